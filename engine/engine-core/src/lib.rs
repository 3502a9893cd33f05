//! Core traits and types for the Gambit search engine
//!
//! The search core never looks inside a position. Everything it needs from
//! the game is expressed through the contracts in this crate:
//! - `Board`: position snapshot that can be cloned, mutated and inspected
//! - `GameMove`: small copyable move with an invalid sentinel
//! - `MoveGenerator`: legal move enumeration for a position
//! - `PositionEvaluator`: static heuristic used to score rollout cutoffs

pub mod board;
pub mod evaluation;
pub mod movegen;

// Re-export main types for convenience
pub use board::{Board, Colour, GameMove, GameResult};
pub use evaluation::PositionEvaluator;
pub use movegen::{MoveGenerator, ParsePromotionError, PromotionMode};
