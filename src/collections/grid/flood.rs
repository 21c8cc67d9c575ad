//! Breadth-first flood fill over grid positions

use std::collections::{BTreeSet, VecDeque};

use ahash::AHashSet;

use super::Position;

/// Collects every position reachable from `start`, in breadth-first order.
/// `neighbors` yields the positions one step away from a position; it is responsible for
/// bounds, walls and any other adjacency rule.
pub fn flood_fill<F, I>(start: Position, mut neighbors: F) -> Vec<Position>
where
    F: FnMut(Position) -> I,
    I: IntoIterator<Item = Position>,
{
    let mut seen: AHashSet<Position> = AHashSet::default();
    let mut queue = VecDeque::new();
    let mut reached = Vec::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        reached.push(p);
        for next in neighbors(p) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    reached
}

/// Partitions `cells` into connected regions. Regions are seeded in ascending position order
/// and `neighbors` results outside of `cells` are ignored.
pub fn regions<F, I>(cells: &BTreeSet<Position>, mut neighbors: F) -> Vec<Vec<Position>>
where
    F: FnMut(Position) -> I,
    I: IntoIterator<Item = Position>,
{
    let mut remaining = cells.clone();
    let mut regions = Vec::new();
    while let Some(&seed) = remaining.iter().next() {
        let region = flood_fill(seed, |p| {
            neighbors(p)
                .into_iter()
                .filter(|n| cells.contains(n))
                .collect::<Vec<_>>()
        });
        for p in &region {
            remaining.remove(p);
        }
        regions.push(region);
    }
    regions
}

/// Returns true if the cells form a single orthogonally connected region
pub fn is_connected(cells: &BTreeSet<Position>) -> bool {
    let start = match cells.iter().next() {
        None => return true,
        Some(&start) => start,
    };
    let reached = flood_fill(start, |p| p.neighbors4().filter(move |n| cells.contains(n)));
    reached.len() == cells.len()
}
