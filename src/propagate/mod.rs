//! Propagation of forced matches.
//!
//! A puzzle state keeps a `Matches` map from each unresolved slot to the candidates that are
//! still possible for it. Propagation repeatedly removes candidates that conflict with the
//! board, commits slots that are left with a single candidate and gives up as soon as a slot
//! has none.

pub use self::matches::{Matches, Scan};

use std::fmt::Debug;
use std::mem;

mod matches;

/// The outcome of one propagation pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// A slot has no candidates or a global rule is broken
    Infeasible,
    /// A forced slot was committed and another pass is needed
    Progress,
    /// Nothing is forced and the state is valid
    Stable,
}

/// A puzzle state that tracks its unresolved slots with `Matches`
pub trait MatchState: Clone {
    type Slot: Ord + Clone + Debug;
    type Candidate: Clone + Debug;

    fn matches(&self) -> &Matches<Self::Slot, Self::Candidate>;

    fn matches_mut(&mut self) -> &mut Matches<Self::Slot, Self::Candidate>;

    /// Returns false if the candidate conflicts with the cells committed so far.
    /// The matches are detached from the state while candidates are checked, so this must
    /// not look at them.
    fn is_consistent(&self, slot: &Self::Slot, candidate: &Self::Candidate) -> bool;

    /// Applies a candidate to the board and removes every slot that is resolved as a
    /// result. If the slot itself stays unresolved, the candidate must no longer be
    /// consistent with it afterwards.
    fn commit(&mut self, slot: &Self::Slot, candidate: &Self::Candidate);

    /// Rules that can only be checked once nothing more is forced
    fn is_valid(&self) -> bool {
        true
    }
}

fn filter<S: MatchState>(state: &mut S) -> Scan<S::Slot, S::Candidate> {
    let mut matches = mem::take(state.matches_mut());
    let scan = matches.filter(|slot, candidate| state.is_consistent(slot, candidate));
    *state.matches_mut() = matches;
    scan
}

/// Removes inconsistent candidates without committing anything. Used to seed a start
/// state. Returns false if a slot was left without candidates.
pub fn prune<S: MatchState>(state: &mut S) -> bool {
    !matches!(filter(state), Scan::Empty(_))
}

/// Runs a single propagation pass
pub fn find_matches<S: MatchState>(state: &mut S) -> Propagation {
    match filter(state) {
        Scan::Empty(slot) => {
            trace!("no candidates left for {:?}", slot);
            Propagation::Infeasible
        }
        Scan::Forced(slot, candidate) => {
            trace!("forced {:?} to {:?}", slot, candidate);
            state.commit(&slot, &candidate);
            Propagation::Progress
        }
        Scan::Settled => {
            if state.is_valid() {
                Propagation::Stable
            } else {
                Propagation::Infeasible
            }
        }
    }
}

/// Propagates until nothing more is forced. Returns true if the state is stable and false
/// if it is infeasible.
pub fn settle<S: MatchState>(state: &mut S) -> bool {
    let mut passes = 0;
    loop {
        match find_matches(state) {
            Propagation::Progress => passes += 1,
            Propagation::Stable => {
                trace!("stable after {} forced moves", passes);
                return true;
            }
            Propagation::Infeasible => {
                trace!("infeasible after {} forced moves", passes);
                return false;
            }
        }
    }
}

/// Commits a slot to a candidate and propagates. Returns false if the result is infeasible.
pub fn make_move<S: MatchState>(state: &mut S, slot: &S::Slot, candidate: &S::Candidate) -> bool {
    state.commit(slot, candidate);
    settle(state)
}

/// Branches on the slot with the fewest candidates, appending one child per candidate that
/// survives propagation
pub fn gen_children<S: MatchState>(state: &S, children: &mut Vec<S>) {
    let (slot, candidates) = match state.matches().min_slot() {
        Some((slot, candidates)) => (slot.clone(), candidates.to_vec()),
        None => return,
    };
    for candidate in &candidates {
        let mut child = state.clone();
        if make_move(&mut child, &slot, candidate) {
            children.push(child);
        }
    }
}

/// The number of slots resolved between a state and its child
pub fn resolved_between<S: MatchState>(parent: &S, child: &S) -> u32 {
    parent.matches().len().saturating_sub(child.matches().len()) as u32
}
