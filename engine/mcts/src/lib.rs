//! Anytime Monte Carlo Tree Search for two-player turn-based games.
//!
//! This crate provides a game-agnostic MCTS that works with any position
//! implementing the `engine-core` [`Board`](engine_core::Board) trait, paired
//! with a [`MoveGenerator`](engine_core::MoveGenerator) and a
//! [`PositionEvaluator`](engine_core::PositionEvaluator).
//!
//! # Overview
//!
//! Each playout consists of four phases:
//!
//! 1. **Selection**: Descend from the root through fully expanded nodes,
//!    taking the child with the highest UCB1 score
//! 2. **Expansion**: Materialize one child per legal move of the node reached
//! 3. **Simulation**: Play a short random rollout and score where it stops
//!    with the static evaluator (finished games score 1 / 0 / 0.5)
//! 4. **Backpropagation**: Update visit counts and value totals along the
//!    path to the root, flipping the value at every level
//!
//! Values are always stored from the perspective of the player who made the
//! move into a node, so a parent compares its children on one scale.
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_tictactoe::{LineEvaluator, State, TicTacToeMoves};
//! use mcts::{MctsConfig, MctsSearch};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let config = MctsConfig::default().with_playouts(2_000);
//! let mut search = MctsSearch::new(&State::new(), TicTacToeMoves, LineEvaluator, config)?;
//! search.on_complete(|mv| println!("bestmove {mv:?}"));
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = search.start_search(&mut rng)?;
//! println!("Best move: {:?} ({:.3})", result.best_move, result.best_eval);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `max_playouts`: Playout budget per search (default: 10000)
//! - `exploration_constant`: UCB1 exploration weight `c` (default: 1.0)
//! - `rollout_depth`: Maximum plies per random rollout (default: 6)
//! - `use_time_limit` / `time_limit`: Honour cancellation and a wall-clock budget
//! - `final_move`: Best UCB score (default) or most visits
//!
//! [`MctsConfig::from_central`] builds it from `config.toml` via
//! `engine-config`.
//!
//! # Architecture
//!
//! ```text
//! MctsSearch ── owns ──> MctsTree (arena of MctsNode, indexed by NodeId)
//!     │                      │
//!     │                      └─ select_child / expand / backpropagate
//!     ├─ rollout::simulate (random plies + PositionEvaluator)
//!     ├─ Ucb1 (SelectionPolicy)
//!     └─ SearchDiagnostics (counters, timing, tracing summary)
//! ```

pub mod config;
pub mod diagnostics;
pub mod node;
pub mod rollout;
pub mod search;
pub mod selection;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main types
pub use config::{FinalMoveSelection, MctsConfig};
pub use diagnostics::{DiagnosticsSnapshot, SearchDiagnostics};
pub use node::{Expansion, MctsNode, NodeId};
pub use rollout::Rollout;
pub use search::{run_mcts, AbortHandle, MctsSearch, SearchError, SearchResult, SearchState};
pub use selection::{argmax_first, SelectionPolicy, Ucb1};
pub use tree::{MctsTree, TreeStats};
