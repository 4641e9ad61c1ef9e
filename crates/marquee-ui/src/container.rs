use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

use marquee_core::{
    BuildError, Color, ConfigError, ListPosition, Modifier, MovePolicy, SectionedSnapshot, Size,
    StableId, View, ViewKind, compute_delta,
};
use slotmap::SlotMap;

use crate::layout::ListLayout;
use crate::slot::{Slot, SlotId, SlotKind};

/// Rows kept bound beyond each edge of the viewport.
const BIND_BUFFER: usize = 2;

pub type CellBuilder<I> = Rc<dyn Fn(&I, ListPosition) -> View>;
pub type HeaderFooterBuilder<S> = Rc<dyn Fn(&S, SlotKind, ListPosition) -> Option<View>>;
pub type SelectObserver<I> = Rc<dyn Fn(&I, ListPosition)>;
pub type BuildErrorObserver = Rc<dyn Fn(&BuildError)>;

/// Routes slot events back to the container that owns the slot. Slots hold
/// this behind a `Weak`; a dead container simply drops the event.
pub(crate) trait HostContext {
    fn dispatch_select(&self, position: ListPosition);
}

#[derive(Clone)]
struct Config<S, I> {
    layout: ListLayout,
    cell: CellBuilder<I>,
    header_footer: Option<HeaderFooterBuilder<S>>,
}

pub(crate) struct Inner<S, I> {
    config: Option<Config<S, I>>,
    move_policy: MovePolicy,
    displayed: SectionedSnapshot<S, I>,
    slots: SlotMap<SlotId, Slot>,
    free: HashMap<SlotKind, Vec<SlotId>>,
    bound_cells: HashMap<I, SlotId>,
    bound_supplementaries: HashMap<(S, SlotKind), SlotId>,
    viewport: Size,
    scroll_offset: f32,
    on_select: Option<SelectObserver<I>>,
    on_build_error: Option<BuildErrorObserver>,
    builder_invocations: u64,
    recycled: u64,
}

impl<S: StableId, I: StableId> Inner<S, I> {
    fn dequeue(&mut self, kind: SlotKind, context: &Weak<dyn HostContext>) -> SlotId {
        if let Some(id) = self.free.get_mut(&kind).and_then(|pool| pool.pop()) {
            return id;
        }
        self.slots.insert(Slot::new(kind, context.clone()))
    }

    fn recycle_slot(&mut self, id: SlotId, kind: SlotKind) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.recycle();
        }
        self.free.entry(kind).or_default().push(id);
        self.recycled += 1;
    }
}

impl<S: StableId, I: StableId> HostContext for RefCell<Inner<S, I>> {
    fn dispatch_select(&self, position: ListPosition) {
        let hit = {
            let inner = self.borrow();
            match (&inner.on_select, inner.displayed.item_at(position)) {
                (Some(observer), Some(item)) => Some((observer.clone(), item.clone())),
                _ => None,
            }
        };
        match hit {
            Some((observer, item)) => observer(&item, position),
            None => log::trace!("selection at {position:?} dropped"),
        }
    }
}

/// The imperative side of the hybrid list: owns the layout, the displayed
/// snapshot, and the pool of reusable slots; applies snapshot deltas and
/// keeps the visible range bound.
///
/// Cloning shares the same underlying list.
pub struct DiffListView<S, I> {
    inner: Rc<RefCell<Inner<S, I>>>,
}

impl<S, I> Clone for DiffListView<S, I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: StableId, I: StableId> Default for DiffListView<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StableId, I: StableId> DiffListView<S, I> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                config: None,
                move_policy: MovePolicy::default(),
                displayed: SectionedSnapshot::empty(),
                slots: SlotMap::with_key(),
                free: HashMap::new(),
                bound_cells: HashMap::new(),
                bound_supplementaries: HashMap::new(),
                viewport: Size {
                    width: 1280.0,
                    height: 800.0,
                },
                scroll_offset: 0.0,
                on_select: None,
                on_build_error: None,
                builder_invocations: 0,
                recycled: 0,
            })),
        }
    }

    /// One-time setup: installs the layout and the content builders.
    /// Calling again replaces the configuration wholesale.
    pub fn configure(
        &self,
        layout: ListLayout,
        cell: CellBuilder<I>,
        header_footer: Option<HeaderFooterBuilder<S>>,
    ) {
        self.inner.borrow_mut().config = Some(Config {
            layout,
            cell,
            header_footer,
        });
    }

    pub fn set_move_policy(&self, policy: MovePolicy) {
        self.inner.borrow_mut().move_policy = policy;
    }

    pub fn on_select(&self, observer: impl Fn(&I, ListPosition) + 'static) {
        self.inner.borrow_mut().on_select = Some(Rc::new(observer));
    }

    pub fn on_build_error(&self, observer: impl Fn(&BuildError) + 'static) {
        self.inner.borrow_mut().on_build_error = Some(Rc::new(observer));
    }

    /// Build a snapshot from the input, diff it against the displayed one and
    /// converge the display on the result.
    ///
    /// Idempotent: an unchanged input is a no-op, with no slot traffic. Panics
    /// on duplicate identifiers (caller bug) and when called before
    /// `configure`.
    pub fn apply(&self, items_per_section: Vec<(S, Vec<I>)>) {
        if self.inner.borrow().config.is_none() {
            panic!("{}", ConfigError::NotConfigured);
        }
        let new = match SectionedSnapshot::new(items_per_section) {
            Ok(snapshot) => snapshot,
            Err(err) => panic!("{err}"),
        };
        {
            let mut inner = self.inner.borrow_mut();
            let delta = compute_delta(&inner.displayed, &new, inner.move_policy);
            if delta.is_empty() {
                log::trace!("apply: unchanged snapshot, nothing to do");
                return;
            }
            log::debug!(
                "apply: {} edits ({} +sections, {} -sections, {} +items, {} -items, {} moves)",
                delta.edit_count(),
                delta.section_inserts.len(),
                delta.section_deletes.len(),
                delta.item_inserts.len(),
                delta.item_deletes.len(),
                delta.item_moves.len(),
            );
            let converged = delta.applied_to(&inner.displayed);
            debug_assert_eq!(converged, new.pruned());
            inner.displayed = converged;
        }
        self.rebind_visible();
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.inner.borrow_mut().viewport = viewport;
        self.rebind_visible();
    }

    /// Clamped to the content height, then rebinds the visible range.
    pub fn set_scroll_offset(&self, offset: f32) {
        {
            let mut inner = self.inner.borrow_mut();
            let Some(config) = inner.config.clone() else {
                panic!("{}", ConfigError::NotConfigured);
            };
            let counts = inner.displayed.item_counts();
            let max = (config.layout.content_height(&counts) - inner.viewport.height).max(0.0);
            inner.scroll_offset = offset.clamp(0.0, max);
        }
        self.rebind_visible();
    }

    pub fn scroll_offset(&self) -> f32 {
        self.inner.borrow().scroll_offset
    }

    pub fn viewport(&self) -> Size {
        self.inner.borrow().viewport
    }

    /// Resolve the item at `position` and notify the selection observer.
    /// Without an observer the event is dropped.
    pub fn select_at(&self, position: ListPosition) {
        HostContext::dispatch_select(&*self.inner, position);
    }

    /// The root view for the current frame: an extent ghost plus the bound
    /// slots' mounted content, placed at their frames relative to the scroll
    /// offset.
    pub fn render(&self) -> View {
        let inner = self.inner.borrow();
        let Some(config) = inner.config.clone() else {
            panic!("{}", ConfigError::NotConfigured);
        };
        let counts = inner.displayed.item_counts();
        let viewport = inner.viewport;
        let content_height = config.layout.content_height(&counts);

        let mut children = Vec::new();
        children.push(crate::Box(
            Modifier::new().size(viewport.width, content_height),
        ));

        let mut bound: Vec<&Slot> = inner.slots.values().filter(|slot| slot.is_bound()).collect();
        bound.sort_by_key(|slot| (slot.position(), slot.kind()));
        for slot in bound {
            let Some(mounted) = slot.host().mounted() else {
                continue;
            };
            let frame = slot.frame();
            children.push(
                View::new(ViewKind::Box)
                    .modifier(
                        Modifier::new()
                            .offset(frame.x, frame.y - inner.scroll_offset)
                            .size(frame.w, frame.h),
                    )
                    .with_children(vec![mounted.clone()]),
            );
        }

        View::new(ViewKind::Stack)
            .modifier(Modifier::new().size(viewport.width, viewport.height))
            .with_children(children)
    }

    // Introspection, used by callers and tests.

    pub fn displayed_snapshot(&self) -> SectionedSnapshot<S, I> {
        self.inner.borrow().displayed.clone()
    }

    pub fn bound_positions(&self) -> Vec<ListPosition> {
        let inner = self.inner.borrow();
        let mut positions: Vec<ListPosition> = inner
            .slots
            .values()
            .filter(|slot| slot.kind() == SlotKind::Cell && slot.is_bound())
            .filter_map(|slot| slot.position())
            .collect();
        positions.sort();
        positions
    }

    /// Hosted content (without the mount wrapper) at a row, if bound.
    pub fn mounted_content(&self, position: ListPosition) -> Option<View> {
        let inner = self.inner.borrow();
        inner
            .slots
            .values()
            .find(|slot| slot.kind() == SlotKind::Cell && slot.position() == Some(position))
            .and_then(|slot| slot.host().content().cloned())
    }

    pub fn supplementary_count(&self) -> usize {
        self.inner.borrow().bound_supplementaries.len()
    }

    pub fn live_slot_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    pub fn pooled_slot_count(&self) -> usize {
        self.inner.borrow().free.values().map(Vec::len).sum()
    }

    pub fn builder_invocations(&self) -> u64 {
        self.inner.borrow().builder_invocations
    }

    pub fn recycled_count(&self) -> u64 {
        self.inner.borrow().recycled
    }

    fn rebind_visible(&self) {
        let errors = self.sync_slots();
        if errors.is_empty() {
            return;
        }
        let observer = self.inner.borrow().on_build_error.clone();
        for error in &errors {
            match &observer {
                Some(observer) => observer(error),
                None => log::warn!("{error}"),
            }
        }
    }

    /// One binding pass: recycle slots whose row left the buffered visible
    /// range, bind slots for rows that entered it, refresh coordinates of
    /// survivors. Builders run isolated; a panicking builder costs its slot a
    /// placeholder, never the pass.
    fn sync_slots(&self) -> Vec<BuildError> {
        let inner_dyn: Rc<dyn HostContext> = self.inner.clone();
        let context: Weak<dyn HostContext> = Rc::downgrade(&inner_dyn);
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let Some(config) = inner.config.clone() else {
            panic!("{}", ConfigError::NotConfigured);
        };
        let counts = inner.displayed.item_counts();
        let viewport = inner.viewport;

        // Applying a shorter snapshot can strand the offset past the end.
        let max_offset = (config.layout.content_height(&counts) - viewport.height).max(0.0);
        inner.scroll_offset = inner.scroll_offset.clamp(0.0, max_offset);
        let offset = inner.scroll_offset;

        let visible = config
            .layout
            .visible_rows(&counts, viewport, offset, BIND_BUFFER);
        let mut errors = Vec::new();

        let mut wanted: HashMap<I, ListPosition> = HashMap::with_capacity(visible.len());
        for &position in &visible {
            if let Some(item) = inner.displayed.item_at(position) {
                wanted.insert(item.clone(), position);
            }
        }

        let stale: Vec<(I, SlotId)> = inner
            .bound_cells
            .iter()
            .filter(|(item, _)| !wanted.contains_key(item))
            .map(|(item, id)| (item.clone(), *id))
            .collect();
        for (item, id) in stale {
            inner.recycle_slot(id, SlotKind::Cell);
            inner.bound_cells.remove(&item);
        }

        for &position in &visible {
            let Some(item) = inner.displayed.item_at(position).cloned() else {
                continue;
            };
            let frame = config.layout.item_frame(&counts, viewport, position);
            if let Some(&id) = inner.bound_cells.get(&item) {
                let crossed_sections = inner
                    .slots
                    .get(id)
                    .and_then(|slot| slot.position())
                    .is_some_and(|previous| previous.section != position.section);
                // Under section-scoped identity a section hop is delete +
                // insert: the slot reloads. A tracked move keeps its content.
                if !(crossed_sections && inner.move_policy == MovePolicy::DeleteInsert) {
                    if let Some(slot) = inner.slots.get_mut(id) {
                        slot.move_to(position, frame);
                    }
                    continue;
                }
                inner.recycle_slot(id, SlotKind::Cell);
                inner.bound_cells.remove(&item);
            }
            let id = inner.dequeue(SlotKind::Cell, &context);
            inner.builder_invocations += 1;
            let content = match catch_unwind(AssertUnwindSafe(|| (config.cell)(&item, position))) {
                Ok(view) => view,
                Err(payload) => {
                    errors.push(BuildError {
                        target: format!("{item:?}"),
                        section: position.section,
                        row: position.row,
                        message: panic_message(payload),
                    });
                    placeholder()
                }
            };
            if let Some(slot) = inner.slots.get_mut(id) {
                slot.bind_content(content, position, frame);
            }
            inner.bound_cells.insert(item, id);
        }

        self.sync_supplementaries(inner, &config, &counts, viewport, offset, &context, &mut errors);
        errors
    }

    #[allow(clippy::too_many_arguments)]
    fn sync_supplementaries(
        &self,
        inner: &mut Inner<S, I>,
        config: &Config<S, I>,
        counts: &[usize],
        viewport: Size,
        offset: f32,
        context: &Weak<dyn HostContext>,
        errors: &mut Vec<BuildError>,
    ) {
        let mut wanted: HashMap<(S, SlotKind), (ListPosition, marquee_core::Rect)> = HashMap::new();
        if config.header_footer.is_some() {
            for section in config.layout.visible_sections(counts, viewport, offset) {
                let id = inner.displayed.sections()[section].id.clone();
                let position = ListPosition::new(section, 0);
                if let Some(frame) = config.layout.header_frame(counts, viewport, section) {
                    wanted.insert((id.clone(), SlotKind::Header), (position, frame));
                }
                if let Some(frame) = config.layout.footer_frame(counts, viewport, section) {
                    wanted.insert((id.clone(), SlotKind::Footer), (position, frame));
                }
            }
        }

        let stale: Vec<((S, SlotKind), SlotId)> = inner
            .bound_supplementaries
            .iter()
            .filter(|(key, _)| !wanted.contains_key(key))
            .map(|(key, id)| (key.clone(), *id))
            .collect();
        for (key, id) in stale {
            inner.recycle_slot(id, key.1);
            inner.bound_supplementaries.remove(&key);
        }

        let Some(builder) = &config.header_footer else {
            return;
        };
        for ((section_id, kind), (position, frame)) in wanted {
            if let Some(&id) = inner.bound_supplementaries.get(&(section_id.clone(), kind)) {
                if let Some(slot) = inner.slots.get_mut(id) {
                    slot.move_to(position, frame);
                }
                continue;
            }
            inner.builder_invocations += 1;
            match catch_unwind(AssertUnwindSafe(|| builder(&section_id, kind, position))) {
                Ok(Some(content)) => {
                    let id = inner.dequeue(kind, context);
                    if let Some(slot) = inner.slots.get_mut(id) {
                        slot.bind_content(content, position, frame);
                    }
                    inner.bound_supplementaries.insert((section_id, kind), id);
                }
                // Declined: no supplementary view at this position.
                Ok(None) => {}
                Err(payload) => {
                    errors.push(BuildError {
                        target: format!("{section_id:?}"),
                        section: position.section,
                        row: position.row,
                        message: panic_message(payload),
                    });
                }
            }
        }
    }
}

fn placeholder() -> View {
    View::new(ViewKind::Box).modifier(
        Modifier::new()
            .fill_max_size()
            .background(Color::GRAY.with_alpha(64)),
    )
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    }
}
