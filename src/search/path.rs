use ahash::AHashMap;

use super::{PuzzleState, Solution};

pub(super) type NodeId = usize;

pub(super) const ROOT: NodeId = 0;

struct Node<S> {
    state: S,
    /// the root is its own parent
    parent: NodeId,
    distance: u32,
}

/// The explored part of the implicit state graph: every distinct state seen so far with
/// its best known predecessor and distance from the root.
pub(super) struct SearchGraph<S> {
    nodes: Vec<Node<S>>,
    index: AHashMap<S, NodeId>,
}

impl<S: PuzzleState> SearchGraph<S> {
    pub fn new(start: S) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            index: AHashMap::default(),
        };
        graph.insert(start, ROOT, 0);
        graph
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn find(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    pub fn insert(&mut self, state: S, parent: NodeId, distance: u32) -> NodeId {
        let id = self.nodes.len();
        self.index.insert(state.clone(), id);
        self.nodes.push(Node {
            state,
            parent,
            distance,
        });
        id
    }

    /// Records a shorter route to an existing node. The new state replaces the stored one
    /// since equal states may still carry different move bookkeeping.
    pub fn reparent(&mut self, id: NodeId, state: S, parent: NodeId, distance: u32) {
        let node = &mut self.nodes[id];
        node.state = state;
        node.parent = parent;
        node.distance = distance;
    }

    pub fn state(&self, id: NodeId) -> &S {
        &self.nodes[id].state
    }

    pub fn distance(&self, id: NodeId) -> u32 {
        self.nodes[id].distance
    }

    /// The states along the best known route from the root to `id`
    pub fn path_to(&self, id: NodeId) -> Vec<S> {
        let mut ids = vec![id];
        let mut current = id;
        while self.nodes[current].parent != current {
            current = self.nodes[current].parent;
            ids.push(current);
        }
        ids.iter().rev().map(|&id| self.state(id).clone()).collect()
    }

    pub fn solution(&self, id: NodeId) -> Solution<S> {
        Solution {
            path: self.path_to(id),
            cost: self.distance(id),
        }
    }
}
