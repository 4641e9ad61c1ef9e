use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;

use crate::snapshot::{SectionedSnapshot, SnapshotSection, StableId};

/// What happens when a known item identifier reappears under a different
/// section identifier.
///
/// `DeleteInsert` keeps identity section-scoped: the item is deleted from the
/// old section and inserted into the new one. `StableIdentity` tracks
/// identifiers across sections and emits a single move instead. Moves are only
/// emitted between sections that survive in place; rebuilt sections batch
/// insert their content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovePolicy {
    #[default]
    DeleteInsert,
    StableIdentity,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemMove<S, I> {
    pub item: I,
    pub from_section: S,
    pub from_row: usize,
    pub to_section: S,
    pub to_row: usize,
}

/// The edit set between two snapshots. Row indices are positions in the new
/// snapshot; replaying the edits over the old snapshot converges exactly to
/// the pruned new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotDelta<S, I> {
    pub section_inserts: SmallVec<[(S, usize); 4]>,
    pub section_deletes: SmallVec<[S; 4]>,
    pub item_inserts: SmallVec<[(I, S, usize); 8]>,
    pub item_deletes: SmallVec<[(I, S); 8]>,
    pub item_moves: SmallVec<[ItemMove<S, I>; 4]>,
}

impl<S, I> SnapshotDelta<S, I> {
    pub fn empty() -> Self {
        Self {
            section_inserts: SmallVec::new(),
            section_deletes: SmallVec::new(),
            item_inserts: SmallVec::new(),
            item_deletes: SmallVec::new(),
            item_moves: SmallVec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.section_inserts.is_empty()
            && self.section_deletes.is_empty()
            && self.item_inserts.is_empty()
            && self.item_deletes.is_empty()
            && self.item_moves.is_empty()
    }

    pub fn edit_count(&self) -> usize {
        self.section_inserts.len()
            + self.section_deletes.len()
            + self.item_inserts.len()
            + self.item_deletes.len()
            + self.item_moves.len()
    }
}

impl<S, I> Default for SnapshotDelta<S, I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: StableId, I: StableId> SnapshotDelta<S, I> {
    /// Pure replay of the edit set over a display snapshot.
    ///
    /// Order matters: moved and deleted items leave first, then dead sections,
    /// then section inserts at their final indices, then item placements in
    /// ascending row order. Placement rows are final-snapshot rows.
    pub fn applied_to(&self, base: &SectionedSnapshot<S, I>) -> SectionedSnapshot<S, I> {
        let removed: HashSet<&I> = self
            .item_deletes
            .iter()
            .map(|(item, _)| item)
            .chain(self.item_moves.iter().map(|m| &m.item))
            .collect();
        let dead: HashSet<&S> = self.section_deletes.iter().collect();

        let mut sections: Vec<SnapshotSection<S, I>> = base
            .sections()
            .iter()
            .filter(|s| !dead.contains(&s.id))
            .map(|s| SnapshotSection {
                id: s.id.clone(),
                items: s
                    .items
                    .iter()
                    .filter(|item| !removed.contains(item))
                    .cloned()
                    .collect(),
            })
            .collect();

        let mut inserts: Vec<(S, usize)> = self.section_inserts.to_vec();
        inserts.sort_by_key(|(_, idx)| *idx);
        for (id, idx) in inserts {
            let at = idx.min(sections.len());
            sections.insert(
                at,
                SnapshotSection {
                    id,
                    items: Vec::new(),
                },
            );
        }

        let mut placements: Vec<(S, usize, I)> = self
            .item_inserts
            .iter()
            .map(|(item, sid, row)| (sid.clone(), *row, item.clone()))
            .chain(
                self.item_moves
                    .iter()
                    .map(|m| (m.to_section.clone(), m.to_row, m.item.clone())),
            )
            .collect();
        placements.sort_by_key(|(_, row, _)| *row);
        for (sid, row, item) in placements {
            match sections.iter_mut().find(|s| s.id == sid) {
                Some(section) => {
                    let at = row.min(section.items.len());
                    section.items.insert(at, item);
                }
                None => log::warn!("delta placement into unknown section {sid:?} dropped"),
            }
        }

        SectionedSnapshot::from_parts(sections)
    }
}

/// Diff two snapshots by identifier.
///
/// Sections present only in `new` are inserts at their new position; sections
/// absent from `new` are deletes. A common section whose `new` item run is
/// empty is deleted as well (the cascade is applied here, after item diffing,
/// not implied by the engine). Within a section present in both, surviving
/// items that changed relative order produce minimal moves (longest increasing
/// subsequence); everything else is an insert or a delete, subject to
/// `MovePolicy` for cross-section reappearances.
pub fn compute_delta<S: StableId, I: StableId>(
    old: &SectionedSnapshot<S, I>,
    new: &SectionedSnapshot<S, I>,
    policy: MovePolicy,
) -> SnapshotDelta<S, I> {
    let target = new.pruned();
    let mut delta = SnapshotDelta::empty();

    let old_index: HashMap<&S, usize> = old
        .section_ids()
        .enumerate()
        .map(|(idx, id)| (id, idx))
        .collect();
    let target_ids: HashSet<&S> = target.section_ids().collect();

    for id in old.section_ids() {
        if !target_ids.contains(id) {
            delta.section_deletes.push(id.clone());
        }
    }

    // The delta model has no section move: common sections that fall off the
    // longest stable order are rebuilt in place.
    let common_old_rows: Vec<usize> = target
        .section_ids()
        .filter_map(|id| old_index.get(id).copied())
        .collect();
    let keep = lis_positions(&common_old_rows);
    let mut displaced: HashSet<S> = HashSet::new();
    let mut seq = 0usize;
    for s in target.sections() {
        if old_index.contains_key(&s.id) {
            if !keep.contains(&seq) {
                displaced.insert(s.id.clone());
            }
            seq += 1;
        }
    }

    for (target_idx, s) in target.sections().iter().enumerate() {
        let rebuilt = displaced.contains(&s.id);
        let brand_new = !old_index.contains_key(&s.id);
        if !(brand_new || rebuilt) {
            continue;
        }
        if rebuilt {
            delta.section_deletes.push(s.id.clone());
        }
        delta.section_inserts.push((s.id.clone(), target_idx));
        for (row, item) in s.items.iter().enumerate() {
            delta.item_inserts.push((item.clone(), s.id.clone(), row));
        }
    }

    let stable: Vec<&SnapshotSection<S, I>> = target
        .sections()
        .iter()
        .filter(|s| old_index.contains_key(&s.id) && !displaced.contains(&s.id))
        .collect();
    let stable_ids: HashSet<&S> = stable.iter().map(|s| &s.id).collect();

    let mut moved: HashSet<I> = HashSet::new();
    if policy == MovePolicy::StableIdentity {
        for s in &stable {
            let old_items = old.items_of(&s.id).unwrap_or(&[]);
            let staying: HashSet<&I> = s.items.iter().collect();
            for (from_row, item) in old_items.iter().enumerate() {
                if staying.contains(item) {
                    continue;
                }
                let Some(pos) = target.position_of(item) else {
                    continue;
                };
                let dest = &target.sections()[pos.section];
                if stable_ids.contains(&dest.id) && dest.id != s.id {
                    delta.item_moves.push(ItemMove {
                        item: item.clone(),
                        from_section: s.id.clone(),
                        from_row,
                        to_section: dest.id.clone(),
                        to_row: pos.row,
                    });
                    moved.insert(item.clone());
                }
            }
        }
    }

    for s in &stable {
        let old_items = old.items_of(&s.id).unwrap_or(&[]);
        let old_rows: HashMap<&I, usize> = old_items
            .iter()
            .enumerate()
            .map(|(row, item)| (item, row))
            .collect();
        let staying: HashSet<&I> = s.items.iter().collect();

        for item in old_items {
            if staying.contains(item) || moved.contains(item) {
                continue;
            }
            delta.item_deletes.push((item.clone(), s.id.clone()));
        }
        for (to_row, item) in s.items.iter().enumerate() {
            if old_rows.contains_key(item) || moved.contains(item) {
                continue;
            }
            delta.item_inserts.push((item.clone(), s.id.clone(), to_row));
        }

        let survivors_old_rows: Vec<usize> = s
            .items
            .iter()
            .filter_map(|item| old_rows.get(item).copied())
            .collect();
        let keep_rows = lis_positions(&survivors_old_rows);
        let mut seq = 0usize;
        for (to_row, item) in s.items.iter().enumerate() {
            let Some(&from_row) = old_rows.get(item) else {
                continue;
            };
            if !keep_rows.contains(&seq) {
                delta.item_moves.push(ItemMove {
                    item: item.clone(),
                    from_section: s.id.clone(),
                    from_row,
                    to_section: s.id.clone(),
                    to_row,
                });
            }
            seq += 1;
        }
    }

    log::trace!(
        "computed delta: {} section inserts, {} section deletes, {} item inserts, {} item deletes, {} moves",
        delta.section_inserts.len(),
        delta.section_deletes.len(),
        delta.item_inserts.len(),
        delta.item_deletes.len(),
        delta.item_moves.len(),
    );
    delta
}

/// Positions (indices into `seq`) of one longest strictly increasing
/// subsequence, patience-style.
fn lis_positions(seq: &[usize]) -> HashSet<usize> {
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; seq.len()];
    for (i, &v) in seq.iter().enumerate() {
        let k = tails.partition_point(|&t| seq[t] < v);
        if k > 0 {
            prev[i] = Some(tails[k - 1]);
        }
        if k == tails.len() {
            tails.push(i);
        } else {
            tails[k] = i;
        }
    }
    let mut out = HashSet::new();
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        out.insert(i);
        cursor = prev[i];
    }
    out
}
