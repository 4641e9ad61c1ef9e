#![allow(non_snake_case)]

//! # The hybrid list
//!
//! Declarative content inside an imperative, diff-driven recycling container.
//! Call sites describe *what* each row shows; the container keeps diffing,
//! reuse, and layout efficient:
//!
//! - `DiffListView` — owns the layout, the displayed snapshot, and the slot
//!   pool; `apply` converges the display on a new snapshot by replaying the
//!   minimal delta.
//! - `Slot` / `ContentHost` — recyclable containers that mount exactly one
//!   piece of content at a time.
//! - `ListLayout` — per-section compositional layout (rows, paged full-bleed
//!   carousels, horizontal strips).
//! - `CompositionalList` — the declarative wrapper: builder-chained
//!   configuration, bound to a `Signal` input, re-applying on every change.
//!
//! ```rust
//! use marquee_core::*;
//! use marquee_ui::*;
//!
//! let sections = signal(vec![
//!     ("main", vec!["m1", "m2", "m3"]),
//!     ("more", vec!["m4", "m5"]),
//! ]);
//!
//! let list = CompositionalList::new(|id: &&str, _| Text(*id))
//!     .layout(ListLayout::uniform(SectionLayout::rows(64.0)))
//!     .on_select(|id, position| log::info!("picked {id} at {position:?}"))
//!     .bind(&sections);
//!
//! assert_eq!(list.list().displayed_snapshot().section_count(), 2);
//! ```

pub mod adapter;
pub mod container;
pub mod debug;
pub mod host;
pub mod layout;
pub mod slot;
pub mod tests;

pub use adapter::*;
pub use container::{BuildErrorObserver, CellBuilder, DiffListView, HeaderFooterBuilder, SelectObserver};
pub use debug::*;
pub use host::*;
pub use layout::*;
pub use slot::{Slot, SlotId, SlotKind};

use marquee_core::{Modifier, View, ViewKind};

pub fn Box(modifier: Modifier) -> View {
    View::new(ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(ViewKind::Column).modifier(modifier)
}

pub fn Stack(modifier: Modifier) -> View {
    View::new(ViewKind::Stack).modifier(modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text {
        text: text.into(),
        size: 14.0,
    })
}

pub fn Image(source: impl Into<String>) -> View {
    View::new(ViewKind::Image {
        source: source.into(),
    })
}

pub fn Spinner() -> View {
    View::new(ViewKind::Spinner)
}
