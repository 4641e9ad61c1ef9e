use std::rc::Rc;

use marquee_core::{
    BuildError, ConfigError, ListPosition, MovePolicy, Signal, StableId, Subscription, View,
};

use crate::container::{CellBuilder, DiffListView, HeaderFooterBuilder};
use crate::layout::ListLayout;
use crate::slot::SlotKind;

/// The declarative side of the hybrid list.
///
/// Collects a cell builder plus chained configuration, then `bind` wires it
/// to a reactive input: the current value is applied synchronously and every
/// subsequent write re-applies. All diffing and recycling is the container's;
/// the adapter holds none of it.
///
/// ```rust
/// use marquee_core::*;
/// use marquee_ui::*;
///
/// let items = signal(vec![("main", vec![1u32, 2, 3])]);
/// let list = CompositionalList::new(|n: &u32, _| Text(format!("row {n}")))
///     .layout(ListLayout::uniform(SectionLayout::rows(48.0)))
///     .bind(&items);
///
/// items.update(|v| v[0].1.push(4));
/// assert_eq!(list.list().displayed_snapshot().item_count(), 4);
/// ```
pub struct CompositionalList<S, I> {
    layout: Option<ListLayout>,
    cell: CellBuilder<I>,
    header_footer: Option<HeaderFooterBuilder<S>>,
    select: Option<Rc<dyn Fn(&I, ListPosition)>>,
    build_error: Option<Rc<dyn Fn(&BuildError)>>,
    move_policy: MovePolicy,
}

impl<S: StableId, I: StableId> CompositionalList<S, I> {
    pub fn new(cell: impl Fn(&I, ListPosition) -> View + 'static) -> Self {
        Self {
            layout: None,
            cell: Rc::new(cell),
            header_footer: None,
            select: None,
            build_error: None,
            move_policy: MovePolicy::default(),
        }
    }

    pub fn layout(mut self, layout: ListLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Supply header/footer content per section. Returning `None` shows no
    /// supplementary view for that position.
    pub fn section_header(
        mut self,
        builder: impl Fn(&S, SlotKind, ListPosition) -> Option<View> + 'static,
    ) -> Self {
        self.header_footer = Some(Rc::new(builder));
        self
    }

    pub fn on_select(mut self, observer: impl Fn(&I, ListPosition) + 'static) -> Self {
        self.select = Some(Rc::new(observer));
        self
    }

    pub fn on_build_error(mut self, observer: impl Fn(&BuildError) + 'static) -> Self {
        self.build_error = Some(Rc::new(observer));
        self
    }

    pub fn move_policy(mut self, policy: MovePolicy) -> Self {
        self.move_policy = policy;
        self
    }

    /// Wire the list to its reactive input. Panics when no layout was
    /// supplied; a list without one is a configuration bug, not an empty
    /// render.
    pub fn bind(self, items: &Signal<Vec<(S, Vec<I>)>>) -> BoundList<S, I> {
        let Some(layout) = self.layout else {
            panic!("{}", ConfigError::NotConfigured);
        };
        let list = DiffListView::new();
        list.set_move_policy(self.move_policy);
        list.configure(layout, self.cell, self.header_footer);
        if let Some(observer) = self.select {
            list.on_select(move |item, position| observer(item, position));
        }
        if let Some(observer) = self.build_error {
            list.on_build_error(move |error| observer(error));
        }

        list.apply(items.get());

        let reapply = list.clone();
        let sub = items.subscribe(move |value| reapply.apply(value.clone()));
        let detach = {
            let items = items.clone();
            move || items.unsubscribe(sub)
        };
        log::trace!("list bound to reactive input");
        BoundList {
            list,
            _subscription: Subscription::new(detach),
        }
    }
}

/// A live list driven by a reactive input. Dropping it detaches the
/// subscription; the container stops receiving updates.
pub struct BoundList<S, I> {
    list: DiffListView<S, I>,
    _subscription: Subscription,
}

impl<S: StableId, I: StableId> BoundList<S, I> {
    pub fn list(&self) -> &DiffListView<S, I> {
        &self.list
    }

    pub fn render(&self) -> View {
        self.list.render()
    }
}

/// Header-less, one-shot variant: configure, apply once, hand the container
/// back to the caller.
pub fn flexible_list<S: StableId, I: StableId>(
    items: Vec<(S, Vec<I>)>,
    layout: ListLayout,
    cell: impl Fn(&I, ListPosition) -> View + 'static,
) -> DiffListView<S, I> {
    let list = DiffListView::new();
    list.configure(layout, Rc::new(cell), None);
    list.apply(items);
    list
}
