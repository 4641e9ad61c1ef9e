use marquee_core::{Modifier, View, ViewKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostState {
    Idle,
    Bound,
}

/// Hosts one piece of declarative content inside a reusable slot.
///
/// At most one content instance is mounted at any time: binding a new one
/// detaches and discards the previous one first, recycling clears the
/// mount entirely.
#[derive(Debug, Default)]
pub struct ContentHost {
    mounted: Option<View>,
}

impl ContentHost {
    pub fn new() -> Self {
        Self { mounted: None }
    }

    pub fn state(&self) -> HostState {
        if self.mounted.is_some() {
            HostState::Bound
        } else {
            HostState::Idle
        }
    }

    /// Mount content. Detach always precedes the next attach; the mount
    /// wrapper fills the slot's bounds.
    pub fn bind(&mut self, content: View) {
        if self.mounted.take().is_some() {
            log::trace!("content host detached previous content on rebind");
        }
        self.mounted = Some(
            View::new(ViewKind::Box)
                .modifier(Modifier::new().fill_max_size())
                .with_children(vec![content]),
        );
    }

    /// Safe to call from `Idle`.
    pub fn detach(&mut self) {
        self.mounted = None;
    }

    /// The mount wrapper, parented under the slot.
    pub fn mounted(&self) -> Option<&View> {
        self.mounted.as_ref()
    }

    /// The hosted content itself, without the mount wrapper.
    pub fn content(&self) -> Option<&View> {
        self.mounted.as_ref().and_then(|wrapper| wrapper.children.first())
    }
}
