use std::mem;
use std::time::Instant;

use super::{
    PuzzleState, SearchLimits, SearchOutcome, SearchResult, SearchStats, Solution, Solver,
};

/// Iterative deepening A*. Repeats a depth-first search bounded by `g + h`, raising the
/// bound to the smallest value that exceeded it, until a goal is reached. Memory is limited
/// to the current path; a state is never revisited on the path that leads to it.
///
/// With an admissible heuristic the first solution found is optimal. The `generated`
/// statistic counts every child produced, including those generated again in later passes.
#[derive(Clone, Debug, Default)]
pub struct IdaStar {
    limits: SearchLimits,
}

impl IdaStar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

enum Descent {
    /// The path ends at a goal with this cost
    Found(u32),
    Exhausted,
    LimitReached,
}

struct Pass<'a, S> {
    limits: &'a SearchLimits,
    started: Instant,
    bound: u32,
    /// The smallest `g + h` seen above `bound`
    next_bound: Option<u32>,
    path: Vec<S>,
    examined: usize,
    generated: usize,
}

impl<S: PuzzleState> Pass<'_, S> {
    /// Searches below the last state of the path, reached at cost `g`
    fn descend(&mut self, g: u32) -> Descent {
        if self.limits.exceeded(self.examined, self.started) {
            return Descent::LimitReached;
        }
        self.examined += 1;
        let current = &self.path[self.path.len() - 1];
        let f = g + current.heuristic();
        if f > self.bound {
            self.next_bound = Some(self.next_bound.map_or(f, |b| b.min(f)));
            return Descent::Exhausted;
        }
        if current.is_goal_state() {
            return Descent::Found(g);
        }
        let mut children = Vec::new();
        current.gen_children(&mut children);
        let steps: Vec<_> = children
            .into_iter()
            .map(|child| {
                let step = current.distance_to(&child);
                (child, step)
            })
            .collect();
        self.generated += steps.len();
        for (child, step) in steps {
            if self.path.contains(&child) {
                continue;
            }
            self.path.push(child);
            match self.descend(g + step) {
                Descent::Exhausted => {
                    self.path.pop();
                }
                done => return done,
            }
        }
        Descent::Exhausted
    }
}

impl Solver for IdaStar {
    fn solve<S: PuzzleState>(&self, start: S) -> SearchOutcome<S> {
        let started = Instant::now();
        let mut pass = Pass {
            limits: &self.limits,
            started,
            bound: start.heuristic(),
            next_bound: None,
            path: vec![start],
            examined: 0,
            generated: 1,
        };
        let result = loop {
            match pass.descend(0) {
                Descent::Found(cost) => {
                    break SearchResult::Solved(Solution {
                        path: mem::take(&mut pass.path),
                        cost,
                    })
                }
                Descent::LimitReached => break SearchResult::LimitReached,
                Descent::Exhausted => match pass.next_bound.take() {
                    Some(bound) => {
                        debug!("raising the cost bound from {} to {}", pass.bound, bound);
                        pass.bound = bound;
                    }
                    None => break SearchResult::NoSolution,
                },
            }
        };
        let stats = SearchStats {
            examined: pass.examined,
            generated: pass.generated,
            elapsed: started.elapsed(),
        };
        debug!(
            "iterative deepening A* finished (solved={}): {} states examined, {} generated",
            result.is_solved(),
            stats.examined,
            stats.generated
        );
        SearchOutcome { result, stats }
    }
}
