use std::cell::Cell;
use std::rc::{Rc, Weak};

use marquee_core::{ListPosition, Rect, View};
use slotmap::new_key_type;

use crate::container::HostContext;
use crate::host::{ContentHost, HostState};

new_key_type! {
    /// Pool key for a live slot.
    pub struct SlotId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotKind {
    Cell,
    Header,
    Footer,
}

/// A recyclable container for one row or one header/footer. Knows nothing
/// about the data model; all content lifecycle goes through its
/// `ContentHost`.
pub struct Slot {
    kind: SlotKind,
    host: ContentHost,
    // Shared with the tap closure so selection reports the row's current
    // position, not the one captured at bind time.
    position: Option<Rc<Cell<ListPosition>>>,
    frame: Rect,
    generation: u32,
    // Non-owning reference to the hosting container, used only to route
    // selection; never extends the container's lifetime.
    context: Weak<dyn HostContext>,
}

impl Slot {
    pub(crate) fn new(kind: SlotKind, context: Weak<dyn HostContext>) -> Self {
        Self {
            kind,
            host: ContentHost::new(),
            position: None,
            frame: Rect::default(),
            generation: 0,
            context,
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn host(&self) -> &ContentHost {
        &self.host
    }

    pub fn position(&self) -> Option<ListPosition> {
        self.position.as_ref().map(|cell| cell.get())
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_bound(&self) -> bool {
        self.host.state() == HostState::Bound
    }

    pub(crate) fn bind_content(&mut self, content: View, position: ListPosition, frame: Rect) {
        let position = Rc::new(Cell::new(position));
        let content = if self.kind == SlotKind::Cell {
            let context = self.context.clone();
            let tap_position = position.clone();
            let modifier = content.modifier.clone().on_click(move || {
                if let Some(context) = context.upgrade() {
                    context.dispatch_select(tap_position.get());
                }
            });
            content.modifier(modifier)
        } else {
            content
        };
        self.host.bind(content);
        self.position = Some(position);
        self.frame = frame;
        self.generation += 1;
    }

    /// Keep the bound content, update display coordinates.
    pub(crate) fn move_to(&mut self, position: ListPosition, frame: Rect) {
        if let Some(cell) = &self.position {
            cell.set(position);
        } else {
            self.position = Some(Rc::new(Cell::new(position)));
        }
        self.frame = frame;
    }

    /// Detach content and return to the idle state. No-op when already idle.
    pub fn recycle(&mut self) {
        if self.host.state() == HostState::Idle && self.position.is_none() {
            return;
        }
        self.host.detach();
        self.position = None;
        self.frame = Rect::default();
        log::trace!("slot recycled ({:?}, generation {})", self.kind, self.generation);
    }
}
