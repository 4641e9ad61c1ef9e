//! # Snapshots, Deltas, and Signals
//!
//! Marquee's core is a data model for diff-driven lists. There are three main
//! pieces:
//!
//! - `SectionedSnapshot<S, I>` — an immutable description of the
//!   section/item structure to display.
//! - `compute_delta` — the minimal edit set between two snapshots, by
//!   identifier.
//! - `Signal<T>` — observable, reactive value feeding re-application.
//!
//! ## Snapshots
//!
//! A snapshot is ordered sections of ordered item identifiers. Identifiers
//! must be unique across the whole snapshot; equality is identity, never
//! content:
//!
//! ```rust
//! use marquee_core::*;
//!
//! let snap = SectionedSnapshot::new(vec![
//!     ("main", vec![1, 2, 3]),
//!     ("more", vec![4, 5]),
//! ])
//! .unwrap();
//! assert_eq!(snap.section_count(), 2);
//! assert_eq!(snap.item_at(ListPosition::new(1, 0)), Some(&4));
//! ```
//!
//! ## Deltas
//!
//! `compute_delta` diffs two snapshots and the result replays over a display
//! state, converging exactly to the (pruned) new snapshot:
//!
//! ```rust
//! use marquee_core::*;
//!
//! let old = SectionedSnapshot::new(vec![("main", vec![1, 2, 3])]).unwrap();
//! let new = SectionedSnapshot::new(vec![("main", vec![1, 3])]).unwrap();
//!
//! let delta = compute_delta(&old, &new, MovePolicy::default());
//! assert_eq!(delta.item_deletes.as_slice(), &[(2, "main")]);
//! assert_eq!(delta.applied_to(&old), new);
//! ```
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state with synchronous
//! subscribers; the list adapter subscribes to one and re-applies on every
//! write:
//!
//! ```rust
//! use marquee_core::*;
//!
//! let items = signal(vec![1, 2]);
//! items.update(|v| v.push(3));
//! assert_eq!(items.get(), vec![1, 2, 3]);
//! ```

pub mod color;
pub mod diff;
pub mod error;
pub mod geometry;
pub mod modifier;
pub mod signal;
pub mod snapshot;
pub mod view;

pub use color::*;
pub use diff::*;
pub use error::*;
pub use geometry::*;
pub use modifier::*;
pub use signal::*;
pub use snapshot::*;
pub use view::*;
