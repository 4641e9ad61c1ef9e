use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SnapshotError;

/// Capability set for section and item identifiers: cloneable, uniquely
/// hashable, printable. Identity for diff purposes is the identifier itself,
/// never the full value.
pub trait StableId: Clone + Eq + Hash + Debug + 'static {}

impl<T: Clone + Eq + Hash + Debug + 'static> StableId for T {}

/// Display coordinates of one row: section index, row index within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListPosition {
    pub section: usize,
    pub row: usize,
}

impl ListPosition {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotSection<S, I> {
    pub id: S,
    pub items: Vec<I>,
}

/// Ordered sections, each owning an ordered run of item identifiers.
///
/// A snapshot is a value: applying a new one never mutates the previous one,
/// and the diff is computed between the two values. Construction enforces the
/// uniqueness invariant: no section identifier repeats, and no item
/// identifier appears twice anywhere in the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionedSnapshot<S, I> {
    sections: Vec<SnapshotSection<S, I>>,
}

impl<S: StableId, I: StableId> SectionedSnapshot<S, I> {
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub fn new(sections: Vec<(S, Vec<I>)>) -> Result<Self, SnapshotError> {
        let mut seen_sections: HashSet<&S> = HashSet::new();
        let mut seen_items: HashSet<&I> = HashSet::new();
        for (id, items) in &sections {
            if !seen_sections.insert(id) {
                return Err(SnapshotError::DuplicateSection(format!("{id:?}")));
            }
            for item in items {
                if !seen_items.insert(item) {
                    return Err(SnapshotError::DuplicateItem(format!("{item:?}")));
                }
            }
        }
        Ok(Self {
            sections: sections
                .into_iter()
                .map(|(id, items)| SnapshotSection { id, items })
                .collect(),
        })
    }

    pub(crate) fn from_parts(sections: Vec<SnapshotSection<S, I>>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> &[SnapshotSection<S, I>] {
        &self.sections
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &S> {
        self.sections.iter().map(|s| &s.id)
    }

    pub fn section_index(&self, id: &S) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn items_of(&self, id: &S) -> Option<&[I]> {
        self.sections
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.items.as_slice())
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    pub fn item_at(&self, pos: ListPosition) -> Option<&I> {
        self.sections.get(pos.section)?.items.get(pos.row)
    }

    pub fn position_of(&self, item: &I) -> Option<ListPosition> {
        for (section, s) in self.sections.iter().enumerate() {
            if let Some(row) = s.items.iter().position(|i| i == item) {
                return Some(ListPosition { section, row });
            }
        }
        None
    }

    /// The snapshot with empty sections removed. The display always converges
    /// to the pruned form of the applied snapshot.
    pub fn pruned(&self) -> Self {
        Self {
            sections: self
                .sections
                .iter()
                .filter(|s| !s.items.is_empty())
                .cloned()
                .collect(),
        }
    }

    /// Per-section item counts, the shape the layout math consumes.
    pub fn item_counts(&self) -> Vec<usize> {
        self.sections.iter().map(|s| s.items.len()).collect()
    }
}
