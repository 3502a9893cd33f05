//! MCTS search driver.
//!
//! Runs the playout loop for a budget and reports the chosen move:
//! 1. Selection: descend from the root by UCB through expanded nodes
//! 2. Expansion: materialize every move of the frontier node as a child
//! 3. Simulation: bounded random rollout from the frontier node
//! 4. Backpropagation: update statistics up to the root, flipping perspective
//!
//! A search moves through `Idle → Running → Completed | Aborted`.
//! Cancellation is cooperative: `end_search` raises a flag that the loop
//! checks before each playout, so a request takes effect within one playout.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use engine_core::{Board, GameMove, MoveGenerator, PositionEvaluator};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{FinalMoveSelection, MctsConfig};
use crate::diagnostics::SearchDiagnostics;
use crate::node::NodeId;
use crate::rollout;
use crate::selection::Ucb1;
use crate::tree::{MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Node {0} has no children to select from")]
    NoChildren(u32),
}

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running,
    Completed,
    Aborted,
}

/// Thread-safe handle for requesting cooperative cancellation.
///
/// Requests are only honoured when the search was configured with
/// `use_time_limit`; otherwise `end_search` does nothing.
#[derive(Debug, Clone)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
    honoured: bool,
}

impl AbortHandle {
    /// Ask the running search to stop before its next playout.
    pub fn end_search(&self) {
        if self.honoured {
            self.flag.store(true, Ordering::Release);
        }
    }

    pub fn is_abort_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<M: GameMove> {
    /// Chosen move, `GameMove::INVALID` if the root position has no moves
    pub best_move: M,

    /// Mean value of the chosen child for the side to move at the root
    pub best_eval: f64,

    /// Number of playouts performed
    pub playouts: u32,

    /// Completed or Aborted
    pub state: SearchState,

    /// The root position was terminal; no playouts were run
    pub terminal_root: bool,

    pub tree_stats: TreeStats,

    pub diagnostics: SearchDiagnostics,
}

type CompletionCallback<M> = Box<dyn FnMut(M) + Send>;

/// MCTS search state.
pub struct MctsSearch<B: Board, G, E> {
    board: B,
    generator: G,
    evaluator: E,
    config: MctsConfig,
    policy: Ucb1,
    abort: Arc<AtomicBool>,
    state: SearchState,
    best_move: B::Move,
    best_eval: f64,
    diagnostics: SearchDiagnostics,
    tree: Option<MctsTree<B>>,
    on_complete: Option<CompletionCallback<B::Move>>,
}

impl<B: Board, G, E> fmt::Debug for MctsSearch<B, G, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MctsSearch")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("best_move", &self.best_move)
            .field("tree_nodes", &self.tree.as_ref().map(|t| t.len()))
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

impl<B, G, E> MctsSearch<B, G, E>
where
    B: Board,
    G: MoveGenerator<B>,
    E: PositionEvaluator<B>,
{
    /// Create a new search from a copy of the given position.
    pub fn new(
        board: &B,
        generator: G,
        evaluator: E,
        config: MctsConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        Ok(Self {
            board: board.clone(),
            generator,
            evaluator,
            policy: Ucb1::new(config.exploration_constant),
            config,
            abort: Arc::new(AtomicBool::new(false)),
            state: SearchState::Idle,
            best_move: B::Move::INVALID,
            best_eval: 0.0,
            diagnostics: SearchDiagnostics::default(),
            tree: None,
            on_complete: None,
        })
    }

    /// Register the completion callback, invoked once per search with the
    /// chosen move.
    pub fn on_complete<F>(&mut self, callback: F)
    where
        F: FnMut(B::Move) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Handle for cancelling this search from another thread.
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            flag: Arc::clone(&self.abort),
            honoured: self.config.use_time_limit,
        }
    }

    /// Request cooperative cancellation (only with `use_time_limit`).
    pub fn end_search(&self) {
        self.abort_handle().end_search();
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &SearchDiagnostics {
        &self.diagnostics
    }

    /// Get the tree of the last search (for inspection/debugging).
    pub fn tree(&self) -> Option<&MctsTree<B>> {
        self.tree.as_ref()
    }

    /// Run the search synchronously to completion or abort.
    ///
    /// The previous search's tree, if any, is discarded.
    pub fn start_search(
        &mut self,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<B::Move>, SearchError> {
        self.best_move = B::Move::INVALID;
        self.best_eval = 0.0;
        self.abort.store(false, Ordering::Release);
        self.diagnostics = SearchDiagnostics::start();
        self.tree = None;
        self.state = SearchState::Running;

        debug!(
            max_playouts = self.config.max_playouts,
            exploration_constant = self.config.exploration_constant,
            rollout_depth = self.config.rollout_depth,
            promotions = %self.config.promotions_to_search,
            "MCTS search started"
        );

        let (tree, aborted) = match self.search_moves(rng) {
            Ok(searched) => searched,
            Err(e) => {
                self.state = SearchState::Idle;
                return Err(e);
            }
        };

        self.diagnostics.finish(aborted);
        self.state = if aborted {
            SearchState::Aborted
        } else {
            SearchState::Completed
        };

        let result = SearchResult {
            best_move: self.best_move,
            best_eval: self.best_eval,
            playouts: self.diagnostics.playouts,
            state: self.state,
            terminal_root: tree.get(tree.root()).is_terminal(),
            tree_stats: tree.stats(),
            diagnostics: self.diagnostics.clone(),
        };
        self.tree = Some(tree);

        if let Some(callback) = self.on_complete.as_mut() {
            callback(result.best_move);
        }

        if !self.config.use_threading {
            self.log_debug_info();
        }

        Ok(result)
    }

    fn search_moves(&mut self, rng: &mut ChaCha20Rng) -> Result<(MctsTree<B>, bool), SearchError> {
        let mut tree = MctsTree::new(self.board.clone());
        let root = tree.root();

        // Expand the root up front so every playout starts below it
        if !tree.get(root).is_terminal() {
            let created = tree.expand(root, &self.generator, self.config.promotions_to_search);
            self.diagnostics.record_expansion(created);
        }

        if tree.get(root).is_terminal() {
            debug!("Root position is terminal, nothing to search");
            return Ok((tree, false));
        }

        let mut aborted = false;
        for _ in 0..self.config.max_playouts {
            if self.should_stop() {
                aborted = true;
                break;
            }
            self.playout(&mut tree, rng)?;
        }

        let chosen = match self.config.final_move {
            FinalMoveSelection::BestUcb => tree.best_child_by_ucb(root, &self.policy),
            FinalMoveSelection::MostVisited => tree.most_visited_child(root),
        }
        .ok_or(SearchError::NoChildren(root.0))?;

        let child = tree.get(chosen);
        self.best_move = child.move_played;
        self.best_eval = child.mean_value();

        Ok((tree, aborted))
    }

    /// One select → expand → simulate → backpropagate cycle.
    fn playout(
        &mut self,
        tree: &mut MctsTree<B>,
        rng: &mut ChaCha20Rng,
    ) -> Result<(), SearchError> {
        let mut current = tree.root();

        while tree.get(current).is_fully_expanded() {
            current = tree
                .select_child(current, &self.policy)
                .ok_or(SearchError::NoChildren(current.0))?;
        }

        if !tree.get(current).is_terminal() {
            let created = tree.expand(current, &self.generator, self.config.promotions_to_search);
            self.diagnostics.record_expansion(created);
        }

        let (value, plies, terminal) = self.simulate(tree, current, rng);
        tree.backpropagate(current, value, &self.policy);

        let depth = tree.get(current).depth;
        self.diagnostics.record_playout(depth, plies, terminal);

        trace!(
            node = current.0,
            depth,
            value,
            rollout_plies = plies,
            terminal,
            "MCTS playout complete"
        );

        Ok(())
    }

    /// Value of a node for the player who moved into it.
    ///
    /// Finished games score deterministically; everything else gets a
    /// random rollout. Returns (value, rollout plies, node was terminal).
    fn simulate(
        &self,
        tree: &MctsTree<B>,
        node_id: NodeId,
        rng: &mut ChaCha20Rng,
    ) -> (f64, u32, bool) {
        let node = tree.get(node_id);
        if let Some(value) = node.terminal_value() {
            return (value, 0, true);
        }

        let rollout = rollout::simulate(
            &node.state,
            &self.generator,
            &self.evaluator,
            self.config.rollout_depth,
            self.config.promotions_to_search,
            rng,
        );
        (rollout.value, rollout.plies, node.is_terminal())
    }

    fn should_stop(&self) -> bool {
        if !self.config.use_time_limit {
            return false;
        }
        if self.abort.load(Ordering::Acquire) {
            return true;
        }
        self.config
            .time_limit
            .is_some_and(|limit| self.diagnostics.elapsed() >= limit)
    }

    fn log_debug_info(&self) {
        debug!(
            best_move = ?self.best_move,
            best_eval = self.best_eval,
            state = ?self.state,
            "MCTS search result"
        );
        self.diagnostics.log();
    }
}

/// Convenience function to run a single MCTS search.
///
/// The rollout RNG is seeded from `config.seed`, or from entropy when unset.
pub fn run_mcts<B, G, E>(
    board: &B,
    generator: G,
    evaluator: E,
    config: MctsConfig,
) -> Result<SearchResult<B::Move>, SearchError>
where
    B: Board,
    G: MoveGenerator<B>,
    E: PositionEvaluator<B>,
{
    let mut rng = match config.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    let mut search = MctsSearch::new(board, generator, evaluator, config)?;
    search.start_search(&mut rng)
}
