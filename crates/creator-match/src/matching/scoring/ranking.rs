use std::cmp::Reverse;
use std::collections::HashSet;

use crate::matching::domain::ScoredCreator;

/// Orders by score descending, then handle (case-insensitive), then roster position.
pub(crate) fn rank(scored: Vec<ScoredCreator>, diversified_slots: usize) -> Vec<ScoredCreator> {
    let mut indexed: Vec<(usize, ScoredCreator)> = scored.into_iter().enumerate().collect();
    indexed.sort_by_cached_key(|(position, creator)| {
        (Reverse(creator.score), creator.handle.to_lowercase(), *position)
    });

    diversify(
        indexed.into_iter().map(|(_, creator)| creator).collect(),
        diversified_slots,
    )
}

/// Single partition pass over an already sorted list.
///
/// The head admits at most `slots` creators whose primary vertical has not been admitted yet;
/// creators without any vertical never enter the head. Everything else keeps its sorted order
/// in the tail.
pub(crate) fn diversify(sorted: Vec<ScoredCreator>, slots: usize) -> Vec<ScoredCreator> {
    let mut head = Vec::with_capacity(slots.min(sorted.len()));
    let mut tail = Vec::with_capacity(sorted.len());
    let mut seen = HashSet::new();

    for creator in sorted {
        if head.len() < slots {
            if let Some(primary) = creator.primary_vertical() {
                if seen.insert(primary) {
                    head.push(creator);
                    continue;
                }
            }
        }
        tail.push(creator);
    }

    head.extend(tail);
    head
}
