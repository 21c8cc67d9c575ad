use std::collections::VecDeque;
use std::time::Instant;

use super::path::{SearchGraph, ROOT};
use super::{PuzzleState, SearchLimits, SearchOutcome, SearchResult, SearchStats, Solver};

/// Breadth-first search. States are checked for the goal as they are examined, so the
/// solution found has the fewest moves, whatever the distances between states.
#[derive(Clone, Debug, Default)]
pub struct BreadthFirst {
    limits: SearchLimits,
}

impl BreadthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Solver for BreadthFirst {
    fn solve<S: PuzzleState>(&self, start: S) -> SearchOutcome<S> {
        let started = Instant::now();
        let mut graph = SearchGraph::new(start);
        let mut queue = VecDeque::new();
        queue.push_back(ROOT);
        let mut examined = 0;
        let mut children = Vec::new();
        let result = loop {
            let node = match queue.pop_front() {
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
            for (child, step) in steps {
                if graph.find(&child).is_none() {
                    let id = graph.insert(child, node, distance + step);
                    queue.push_back(id);
                }
            }
        };
        let stats = SearchStats {
            examined,
            generated: graph.len(),
            elapsed: started.elapsed(),
        };
        debug!(
            "breadth-first search finished (solved={}): {} states examined, {} generated",
            result.is_solved(),
            stats.examined,
            stats.generated
        );
        SearchOutcome { result, stats }
    }
}
