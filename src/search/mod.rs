//! Generic state-space search over puzzle states

pub use self::astar::{AStar, TieBreak};
pub use self::bfs::BreadthFirst;
pub use self::dfs::DepthFirst;
pub use self::idastar::IdaStar;
pub use self::limits::SearchLimits;

use std::hash::Hash;
use std::time::Duration;

mod astar;
mod bfs;
mod dfs;
mod idastar;
mod limits;
pub mod move_gen;
mod path;

/// The capabilities a puzzle state must provide to be searched.
///
/// A state is one node of the implicit search graph: a full or partial solution
/// together with whatever bookkeeping the puzzle needs. Equal states are treated as the
/// same node, so equality and hashing must cover everything that affects the state's
/// future.
pub trait PuzzleState: Clone + Eq + Hash {
    /// True iff the state is a complete and valid solution
    fn is_goal_state(&self) -> bool;

    /// Appends every feasible state reachable with a single move.
    /// States found to be infeasible must not be appended.
    fn gen_children(&self, children: &mut Vec<Self>);

    /// An estimate of the remaining work, zero exactly at goal states
    fn heuristic(&self) -> u32;

    /// The cost of moving from this state to one of its children
    fn distance_to(&self, child: &Self) -> u32 {
        let _ = child;
        1
    }
}

/// A search algorithm over `PuzzleState`s
pub trait Solver {
    fn solve<S: PuzzleState>(&self, start: S) -> SearchOutcome<S>;
}

pub enum SearchResult<S> {
    /// A goal state was reached
    Solved(Solution<S>),
    /// Every reachable state was examined without reaching a goal
    NoSolution,
    /// The search was stopped by its `SearchLimits`
    LimitReached,
}

impl<S> SearchResult<S> {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchResult::Solved(_))
    }

    pub fn solved(&self) -> Option<&Solution<S>> {
        match self {
            SearchResult::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solved(self) -> Option<Solution<S>> {
        match self {
            SearchResult::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// A sequence of states from the start state to a goal state
#[derive(Clone, Debug)]
pub struct Solution<S> {
    pub path: Vec<S>,
    /// The sum of the distances along the path
    pub cost: u32,
}

impl<S> Solution<S> {
    pub fn moves(&self) -> usize {
        self.path.len() - 1
    }

    pub fn goal(&self) -> &S {
        self.path.last().expect("a solution path is never empty")
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// The number of states examined (popped from the frontier)
    pub examined: usize,
    /// The number of distinct states added to the search graph
    pub generated: usize,
    pub elapsed: Duration,
}

pub struct SearchOutcome<S> {
    pub result: SearchResult<S>,
    pub stats: SearchStats,
}

/// The outcome of a search for every optimal solution
pub struct AllSolutionsOutcome<S> {
    /// Every shortest path to a goal, empty if there is none
    pub solutions: Vec<Solution<S>>,
    pub limit_reached: bool,
    pub stats: SearchStats,
}

#[cfg(test)]
pub(crate) mod test_states {
    //! Small graphs used to exercise the search algorithms

    use super::PuzzleState;

    /// A walk on the number line from `pos` towards `target`, stepping by one or two.
    /// Steps of two cost three, so the cheapest path only takes single steps.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Walk {
        pub pos: i32,
        pub target: i32,
    }

    impl Walk {
        pub fn new(pos: i32, target: i32) -> Self {
            Self { pos, target }
        }
    }

    impl PuzzleState for Walk {
        fn is_goal_state(&self) -> bool {
            self.pos == self.target
        }

        fn gen_children(&self, children: &mut Vec<Self>) {
            for step in &[-2, -1, 1, 2] {
                let pos = self.pos + step;
                if pos >= 0 && pos <= 20 {
                    children.push(Walk::new(pos, self.target));
                }
            }
        }

        fn heuristic(&self) -> u32 {
            (self.target - self.pos).abs() as u32
        }

        fn distance_to(&self, child: &Self) -> u32 {
            if (child.pos - self.pos).abs() == 2 {
                3
            } else {
                1
            }
        }
    }

    /// A grid walk where every shortest path from the origin to the goal is optimal,
    /// used to count all shortest paths.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Lattice {
        pub x: u32,
        pub y: u32,
        pub goal: (u32, u32),
    }

    impl PuzzleState for Lattice {
        fn is_goal_state(&self) -> bool {
            (self.x, self.y) == self.goal
        }

        fn gen_children(&self, children: &mut Vec<Self>) {
            if self.x < self.goal.0 {
                children.push(Lattice { x: self.x + 1, ..self.clone() });
            }
            if self.y < self.goal.1 {
                children.push(Lattice { y: self.y + 1, ..self.clone() });
            }
        }

        fn heuristic(&self) -> u32 {
            (self.goal.0 - self.x) + (self.goal.1 - self.y)
        }
    }

    /// A state space without any goal
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Dead(pub u32);

    impl PuzzleState for Dead {
        fn is_goal_state(&self) -> bool {
            false
        }

        fn gen_children(&self, children: &mut Vec<Self>) {
            if self.0 < 5 {
                children.push(Dead(self.0 + 1));
                children.push(Dead(self.0 + 2));
            }
        }

        fn heuristic(&self) -> u32 {
            1
        }
    }

    /// An unbounded state space
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Endless(pub u64);

    impl PuzzleState for Endless {
        fn is_goal_state(&self) -> bool {
            false
        }

        fn gen_children(&self, children: &mut Vec<Self>) {
            children.push(Endless(self.0.wrapping_mul(2)));
            children.push(Endless(self.0.wrapping_mul(2).wrapping_add(1)));
        }

        fn heuristic(&self) -> u32 {
            1
        }
    }
}
