use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::path::{NodeId, SearchGraph, ROOT};
use super::{
    AllSolutionsOutcome, PuzzleState, SearchLimits, SearchOutcome, SearchResult, SearchStats,
    Solution, Solver,
};

/// Decides which of several equally scored frontier states is expanded first.
/// States are first ordered by distance plus heuristic, then by heuristic alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    /// The state added to the frontier first is expanded first
    Fifo,
    /// The state added to the frontier last is expanded first
    Lifo,
    /// Equally scored states are expanded in a random order determined by the seed
    Random(u64),
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::Fifo
    }
}

/// Best-first search ordered by accumulated distance plus heuristic (A*)
#[derive(Clone, Debug, Default)]
pub struct AStar {
    tie_break: TieBreak,
    limits: SearchLimits,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Searches for every path to a goal with the minimum total distance.
    ///
    /// Goal states are not expanded and children farther from the root than the
    /// closest goal found so far are discarded. The search otherwise runs until the
    /// frontier is exhausted.
    pub fn solve_all<S: PuzzleState>(&self, start: S) -> AllSolutionsOutcome<S> {
        let started = Instant::now();
        let mut graph = SearchGraph::new(start);
        // every predecessor reaching a node with its best known distance
        let mut preds: Vec<Vec<NodeId>> = vec![Vec::new()];
        let mut frontier = Frontier::new(self.tie_break);
        frontier.push(ROOT, 0, graph.state(ROOT).heuristic());
        let mut goals: Vec<NodeId> = Vec::new();
        let mut goal_distance: Option<u32> = None;
        let mut examined = 0;
        let mut limit_reached = false;
        let mut children = Vec::new();
        while let Some(entry) = frontier.pop() {
            if entry.distance != graph.distance(entry.node) {
                continue;
            }
            if goal_distance.map_or(false, |d| entry.distance > d) {
                continue;
            }
            if self.limits.exceeded(examined, started) {
                limit_reached = true;
                break;
            }
            examined += 1;
            let current = graph.state(entry.node);
            if current.is_goal_state() {
                if goal_distance.map_or(true, |d| entry.distance < d) {
                    goals.clear();
                    goal_distance = Some(entry.distance);
                }
                if !goals.contains(&entry.node) {
                    goals.push(entry.node);
                }
                continue;
            }
            children.clear();
            current.gen_children(&mut children);
            let steps: Vec<(S, u32)> = children
                .drain(..)
                .map(|child| {
                    let step = current.distance_to(&child);
                    (child, step)
                })
                .collect();
            for (child, step) in steps {
                let distance = entry.distance + step;
                if goal_distance.map_or(false, |d| distance > d) {
                    continue;
                }
                match graph.find(&child) {
                    Some(id) => {
                        let known = graph.distance(id);
                        if distance < known {
                            let h = child.heuristic();
                            graph.reparent(id, child, entry.node, distance);
                            preds[id] = vec![entry.node];
                            frontier.push(id, distance, h);
                        } else if distance == known && !preds[id].contains(&entry.node) {
                            preds[id].push(entry.node);
                        }
                    }
                    None => {
                        let h = child.heuristic();
                        let id = graph.insert(child, entry.node, distance);
                        preds.push(vec![entry.node]);
                        frontier.push(id, distance, h);
                    }
                }
            }
        }
        let mut solutions = Vec::new();
        for &goal in &goals {
            let mut suffix = Vec::new();
            let mut paths = Vec::new();
            collect_paths(goal, &preds, &mut suffix, &mut paths);
            solutions.extend(paths.into_iter().map(|ids| Solution {
                path: ids.iter().map(|&id| graph.state(id).clone()).collect(),
                cost: graph.distance(goal),
            }));
        }
        let stats = SearchStats {
            examined,
            generated: graph.len(),
            elapsed: started.elapsed(),
        };
        debug!(
            "A* (all solutions) finished: {} solutions, {} states examined, {} generated",
            solutions.len(),
            stats.examined,
            stats.generated
        );
        AllSolutionsOutcome {
            solutions,
            limit_reached,
            stats,
        }
    }
}

impl Solver for AStar {
    fn solve<S: PuzzleState>(&self, start: S) -> SearchOutcome<S> {
        let started = Instant::now();
        let mut graph = SearchGraph::new(start);
        let mut frontier = Frontier::new(self.tie_break);
        frontier.push(ROOT, 0, graph.state(ROOT).heuristic());
        let mut examined = 0;
        let mut children = Vec::new();
        let result = loop {
            let entry = match frontier.pop() {
                Some(entry) => entry,
                None => break SearchResult::NoSolution,
            };
            // a shorter route to this state was found after this entry was queued
            if entry.distance != graph.distance(entry.node) {
                continue;
            }
            if self.limits.exceeded(examined, started) {
                break SearchResult::LimitReached;
            }
            examined += 1;
            let current = graph.state(entry.node);
            if current.is_goal_state() {
                break SearchResult::Solved(graph.solution(entry.node));
            }
            trace!(
                "expanding state at distance {} with heuristic {}",
                entry.distance,
                entry.heuristic
            );
            children.clear();
            current.gen_children(&mut children);
            let steps: Vec<(S, u32)> = children
                .drain(..)
                .map(|child| {
                    let step = current.distance_to(&child);
                    (child, step)
                })
                .collect();
            for (child, step) in steps {
                let distance = entry.distance + step;
                match graph.find(&child) {
                    Some(id) => {
                        if distance < graph.distance(id) {
                            let h = child.heuristic();
                            graph.reparent(id, child, entry.node, distance);
                            frontier.push(id, distance, h);
                        }
                    }
                    None => {
                        let h = child.heuristic();
                        let id = graph.insert(child, entry.node, distance);
                        frontier.push(id, distance, h);
                    }
                }
            }
        };
        let stats = SearchStats {
            examined,
            generated: graph.len(),
            elapsed: started.elapsed(),
        };
        debug!(
            "A* finished (solved={}): {} states examined, {} generated",
            result.is_solved(),
            stats.examined,
            stats.generated
        );
        SearchOutcome { result, stats }
    }
}

/// Walks the predecessor lists back from `node` to the root, collecting every route
fn collect_paths(
    node: NodeId,
    preds: &[Vec<NodeId>],
    suffix: &mut Vec<NodeId>,
    paths: &mut Vec<Vec<NodeId>>,
) {
    suffix.push(node);
    if node == ROOT {
        paths.push(suffix.iter().rev().copied().collect());
    } else {
        for &pred in &preds[node] {
            // zero-distance moves could otherwise lead around in circles
            if !suffix.contains(&pred) {
                collect_paths(pred, preds, suffix, paths);
            }
        }
    }
    suffix.pop();
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    score: u32,
    heuristic: u32,
    tie: u64,
    distance: u32,
    node: NodeId,
}

struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    ties: TieSequence,
}

impl Frontier {
    fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            ties: TieSequence::new(tie_break),
        }
    }

    fn push(&mut self, node: NodeId, distance: u32, heuristic: u32) {
        self.heap.push(Reverse(Entry {
            score: distance.saturating_add(heuristic),
            heuristic,
            tie: self.ties.next(),
            distance,
            node,
        }));
    }

    fn pop(&mut self) -> Option<Entry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }
}

enum TieSequence {
    Counter { count: u64, descending: bool },
    Random(StdRng),
}

impl TieSequence {
    fn new(tie_break: TieBreak) -> Self {
        match tie_break {
            TieBreak::Fifo => TieSequence::Counter {
                count: 0,
                descending: false,
            },
            TieBreak::Lifo => TieSequence::Counter {
                count: 0,
                descending: true,
            },
            TieBreak::Random(seed) => TieSequence::Random(StdRng::seed_from_u64(seed)),
        }
    }

    fn next(&mut self) -> u64 {
        match self {
            TieSequence::Counter { count, descending } => {
                *count += 1;
                if *descending {
                    u64::MAX - *count
                } else {
                    *count
                }
            }
            TieSequence::Random(rng) => rng.gen(),
        }
    }
}
