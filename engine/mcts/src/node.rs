//! MCTS tree node representation.
//!
//! Each node represents a game position reached by playing `move_played` in
//! the parent's position. Statistics are stored from the perspective of the
//! player who made `move_played`, so a parent compares its children's mean
//! values directly when choosing which move to explore.

use engine_core::{Board, GameMove, GameResult};

use crate::selection::SelectionPolicy;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Expansion lifecycle of a node.
///
/// A node is expanded at most once. Positions that are over, or where the
/// generator produced no moves, end up `Terminal` and are never expanded
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Unexpanded,
    Expanded,
    Terminal,
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<B: Board> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move applied to the parent's position to reach this node.
    /// `GameMove::INVALID` for the root.
    pub move_played: B::Move,

    /// Position at this node, never mutated after construction
    pub state: B,

    /// Number of playouts backpropagated through this node
    pub visit_count: u32,

    /// Sum of playout results credited to this node, each in [0, 1]
    pub total_value: f64,

    /// Moves generated but not yet materialized as children
    pub pending_expansions: u32,

    /// Cached selection score, +inf until the first visit
    pub ucb_score: f64,

    /// Expansion lifecycle
    pub expansion: Expansion,

    /// Rules verdict for `state`, computed once at construction
    pub result: GameResult,

    /// Plies from the root
    pub depth: u32,

    /// Children in move generation order. Empty until expanded.
    pub children: Vec<NodeId>,
}

impl<B: Board> MctsNode<B> {
    /// Create a new root node.
    pub fn new_root(state: B) -> Self {
        Self::new(NodeId::NONE, B::Move::INVALID, state, 0)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, move_played: B::Move, state: B, depth: u32) -> Self {
        Self::new(parent, move_played, state, depth)
    }

    fn new(parent: NodeId, move_played: B::Move, state: B, depth: u32) -> Self {
        let result = state.game_result();
        let expansion = if result.is_over() {
            Expansion::Terminal
        } else {
            Expansion::Unexpanded
        };

        Self {
            parent,
            move_played,
            state,
            visit_count: 0,
            total_value: 0.0,
            pending_expansions: 0,
            ucb_score: f64::INFINITY,
            expansion,
            result,
            depth,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Calculate mean value Q = total_value / visit_count.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_value / self.visit_count as f64
        }
    }

    /// Recompute the cached selection score against the parent's visit count.
    ///
    /// Unvisited nodes always score +inf. Precondition for visited nodes:
    /// `parent_visits > 0`, which holds because every playout through a node
    /// also passes through its parent.
    #[inline]
    pub fn calculate_ucb<P: SelectionPolicy>(&mut self, parent_visits: u32, policy: &P) {
        self.ucb_score = policy.score(self.total_value, self.visit_count, parent_visits);
    }

    /// True once the node's moves were generated and all of them became
    /// children. Expansion is eager, so this is the "was expanded" signal.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.expansion == Expansion::Expanded && self.pending_expansions == 0
    }

    /// True when the game is over here or no moves were available.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.expansion == Expansion::Terminal
    }

    /// Check if this is a leaf node (no children to descend into).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Deterministic value of a finished game for the player who moved into
    /// this node. `None` while the rules collaborator reports the game as
    /// ongoing, even if no moves were generated.
    pub fn terminal_value(&self) -> Option<f64> {
        if self.result.is_over() {
            Some(self.result.value_for(self.state.opponent_colour()))
        } else {
            None
        }
    }
}
