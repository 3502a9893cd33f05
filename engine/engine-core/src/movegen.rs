//! Move generation contract

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::Board;

/// Which promotion pieces the generator should emit.
///
/// Chess-like games multiply the branching factor with under-promotions;
/// searches usually restrict them. Games without promotions ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionMode {
    All,
    QueenOnly,
    #[default]
    QueenAndKnight,
}

impl PromotionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PromotionMode::All => "all",
            PromotionMode::QueenOnly => "queen_only",
            PromotionMode::QueenAndKnight => "queen_and_knight",
        }
    }
}

impl fmt::Display for PromotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown promotion mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown promotion mode: {0} (expected all, queen_only or queen_and_knight)")]
pub struct ParsePromotionError(pub String);

impl FromStr for PromotionMode {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PromotionMode::All),
            "queen_only" | "queen" => Ok(PromotionMode::QueenOnly),
            "queen_and_knight" => Ok(PromotionMode::QueenAndKnight),
            other => Err(ParsePromotionError(other.to_string())),
        }
    }
}

/// Legal move enumeration.
///
/// Must be a pure function of its inputs: generating moves never mutates the
/// board, and the same position always yields the same moves in the same
/// order. The search relies on the order for reproducible trees.
pub trait MoveGenerator<B: Board>: Send + Sync {
    /// Generate moves for the side to move in `board`.
    ///
    /// `at_root` is true only when expanding the root of a search; generators
    /// may use it to generate a wider move set at the root than deeper in the
    /// tree or during rollouts.
    fn generate_moves(&self, board: &B, at_root: bool, promotions: PromotionMode) -> Vec<B::Move>;
}
