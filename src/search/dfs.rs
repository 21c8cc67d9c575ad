use std::time::Instant;

use super::path::{SearchGraph, ROOT};
use super::{PuzzleState, SearchLimits, SearchOutcome, SearchResult, SearchStats, Solver};

/// Depth-first search. A state is pushed only the first time it is discovered and checked
/// for the goal when it is popped. The first goal found is returned, which need not be the
/// cheapest.
#[derive(Clone, Debug, Default)]
pub struct DepthFirst {
    limits: SearchLimits,
}

impl DepthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Solver for DepthFirst {
    fn solve<S: PuzzleState>(&self, start: S) -> SearchOutcome<S> {
        let started = Instant::now();
        let mut graph = SearchGraph::new(start);
        let mut stack = vec![ROOT];
        let mut examined = 0;
        let mut children = Vec::new();
        let result = loop {
            let node = match stack.pop() {
                Some(node) => node,
                None => break SearchResult::NoSolution,
            };
            if self.limits.exceeded(examined, started) {
                break SearchResult::LimitReached;
            }
            examined += 1;
            let current = graph.state(node);
            if current.is_goal_state() {
                break SearchResult::Solved(graph.solution(node));
            }
            children.clear();
            current.gen_children(&mut children);
            let distance = graph.distance(node);
            let steps: Vec<_> = children
                .drain(..)
                .map(|child| {
                    let step = current.distance_to(&child);
                    (child, step)
                })
                .collect();
            // push in reverse so the first child is explored first
            for (child, step) in steps.into_iter().rev() {
                if graph.find(&child).is_none() {
                    let id = graph.insert(child, node, distance + step);
                    stack.push(id);
                }
            }
        };
        let stats = SearchStats {
            examined,
            generated: graph.len(),
            elapsed: started.elapsed(),
        };
        debug!(
            "depth-first search finished (solved={}): {} states examined, {} generated",
            result.is_solved(),
            stats.examined,
            stats.generated
        );
        SearchOutcome { result, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::DepthFirst;
    use crate::search::test_states::{Dead, Endless, Walk};
    use crate::search::{PuzzleState, SearchLimits, SearchResult, Solver};

    #[test]
    fn finds_a_goal() {
        let outcome = DepthFirst::new().solve(Walk::new(0, 4));
        let solution = outcome.result.solved().unwrap();
        assert!(solution.goal().is_goal_state());
        assert_eq!(Walk::new(0, 4), solution.path[0]);
        for pair in solution.path.windows(2) {
            assert!((pair[1].pos - pair[0].pos).abs() <= 2);
        }
    }

    #[test]
    fn no_solution() {
        let outcome = DepthFirst::new().solve(Dead(0));
        assert!(matches!(outcome.result, SearchResult::NoSolution));
        assert_eq!(7, outcome.stats.examined);
    }

    #[test]
    fn limit_reached() {
        let limits = SearchLimits::unlimited().max_examined(50);
        let outcome = DepthFirst::new().limits(limits).solve(Endless(1));
        assert!(matches!(outcome.result, SearchResult::LimitReached));
        assert_eq!(50, outcome.stats.examined);
    }
}
