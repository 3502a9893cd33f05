//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices; a child refers to its parent by
//! index, so the parent link never owns anything.

use engine_core::{Board, MoveGenerator, PromotionMode};
use serde::Serialize;

use crate::node::{Expansion, MctsNode, NodeId};
use crate::selection::{argmax_first, SelectionPolicy};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<B: Board> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<B>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<B: Board> MctsTree<B> {
    /// Create a new tree whose root wraps the given position.
    pub fn new(root_state: B) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<B> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<B> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<B>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<B>] {
        &self.nodes
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, move_played: B::Move, state: B) -> NodeId {
        let depth = self.get(parent_id).depth + 1;
        let child_id = self.allocate(MctsNode::new_child(parent_id, move_played, state, depth));

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Select the best child of a node by selection score.
    ///
    /// Children's cached scores are refreshed against the node's current
    /// visit count before comparing. Ties go to the first child in
    /// expansion order. Returns None for a childless node.
    pub fn select_child<P: SelectionPolicy>(
        &mut self,
        node_id: NodeId,
        policy: &P,
    ) -> Option<NodeId> {
        let parent_visits = self.get(node_id).visit_count;

        for i in 0..self.get(node_id).children.len() {
            let child_id = self.get(node_id).children[i];
            self.get_mut(child_id).calculate_ucb(parent_visits, policy);
        }

        let children = &self.get(node_id).children;
        argmax_first(children.iter().map(|&id| self.get(id).ucb_score)).map(|i| children[i])
    }

    /// Descend from `from` by best selection score until reaching a node
    /// with no children, and return it.
    pub fn selection<P: SelectionPolicy>(&mut self, from: NodeId, policy: &P) -> NodeId {
        let mut current = from;
        while let Some(child) = self.select_child(current, policy) {
            current = child;
        }
        current
    }

    /// Expand a node by materializing one child per generated move.
    ///
    /// Expansion is eager and one-shot: every move becomes a child in this
    /// call, and nodes that are already expanded or terminal are left alone.
    /// A node without moves becomes `Terminal`. Returns the number of
    /// children created.
    pub fn expand<G: MoveGenerator<B>>(
        &mut self,
        node_id: NodeId,
        generator: &G,
        promotions: PromotionMode,
    ) -> usize {
        let node = self.get(node_id);
        if node.expansion != Expansion::Unexpanded {
            return 0;
        }

        // The root expands for the side to move in the searched position;
        // everything below it for whoever is on move after `move_played`.
        let at_root = node.is_root();
        let moves = generator.generate_moves(&node.state, at_root, promotions);

        if moves.is_empty() {
            self.get_mut(node_id).expansion = Expansion::Terminal;
            return 0;
        }

        self.get_mut(node_id).pending_expansions = moves.len() as u32;

        for &mv in &moves {
            let mut child_state = self.get(node_id).state.clone();
            child_state.make_move(mv);
            self.add_child(node_id, mv, child_state);
            self.get_mut(node_id).pending_expansions -= 1;
        }

        self.get_mut(node_id).expansion = Expansion::Expanded;
        moves.len()
    }

    /// Backpropagate a playout result from a node to the root.
    ///
    /// `value` is from the perspective of the player who moved into
    /// `leaf_id`; it is flipped to `1 - value` at each step up. Cached
    /// selection scores along the path are refreshed afterwards.
    pub fn backpropagate<P: SelectionPolicy>(&mut self, leaf_id: NodeId, value: f64, policy: &P) {
        let mut path = Vec::with_capacity(self.get(leaf_id).depth as usize + 1);
        let mut current_id = leaf_id;
        let mut current_value = value;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.total_value += current_value;

            // Flip for the player one ply up
            current_value = 1.0 - current_value;

            path.push(current_id);
            current_id = node.parent;
        }

        for node_id in path {
            let parent = self.get(node_id).parent;
            if parent.is_some() {
                let parent_visits = self.get(parent).visit_count;
                self.get_mut(node_id).calculate_ucb(parent_visits, policy);
            }
        }
    }

    /// Immediate child of `node_id` with the best selection score.
    pub fn best_child_by_ucb<P: SelectionPolicy>(
        &mut self,
        node_id: NodeId,
        policy: &P,
    ) -> Option<NodeId> {
        self.select_child(node_id, policy)
    }

    /// Most visited immediate child of `node_id`; ties go to the first child.
    pub fn most_visited_child(&self, node_id: NodeId) -> Option<NodeId> {
        let children = &self.get(node_id).children;
        argmax_first(children.iter().map(|&id| self.get(id).visit_count as f64))
            .map(|i| children[i])
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            root_children: root.children.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
        }
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub root_children: usize,
    pub max_depth: u32,
}
