//! Breadth-first enumeration of every state reachable from a start state

use std::collections::VecDeque;
use std::hash::Hash;

use ahash::AHashSet;

/// A state that can be explored without any notion of goal or cost
pub trait Explore: Clone + Eq + Hash {
    fn gen_children(&self, children: &mut Vec<Self>);
}

/// Returns every state reachable from `start` (including `start`), each exactly once, in
/// breadth-first order.
pub fn gen_moves<S: Explore>(start: S) -> Vec<S> {
    let mut seen: AHashSet<S> = AHashSet::default();
    let mut queue = VecDeque::new();
    let mut moves = Vec::new();
    let mut children = Vec::new();
    seen.insert(start.clone());
    queue.push_back(start);
    while let Some(state) = queue.pop_front() {
        children.clear();
        state.gen_children(&mut children);
        for child in children.drain(..) {
            if !seen.contains(&child) {
                seen.insert(child.clone());
                queue.push_back(child);
            }
        }
        moves.push(state);
    }
    moves
}
