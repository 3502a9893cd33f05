//! Board contract for two-player, perfect-information, turn-based games
//!
//! Implementations own the full game position. The search clones boards
//! freely (one per tree node), so `Clone` must produce a deep, independent
//! copy.

use std::fmt::Debug;

/// Side identifier for a two-player game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Colour {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

/// Outcome of a position as reported by the rules collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Game continues
    InProgress,
    /// Game over, the given side won
    Win(Colour),
    /// Game over without a winner (stalemate, repetition, ...)
    Draw,
}

impl GameResult {
    /// Check if the game has ended
    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Score of a finished game from `colour`'s point of view.
    ///
    /// Win = 1.0, loss = 0.0, draw = 0.5. An unfinished game scores 0.5.
    pub fn value_for(self, colour: Colour) -> f64 {
        match self {
            GameResult::Win(winner) if winner == colour => 1.0,
            GameResult::Win(_) => 0.0,
            GameResult::Draw | GameResult::InProgress => 0.5,
        }
    }
}

/// Move type accepted by a `Board`
///
/// Moves should be small and `Copy`. Every move type reserves one value as
/// the `INVALID` sentinel, used for the root of a search tree and for the
/// result of a search from a position without legal moves.
pub trait GameMove: Copy + Eq + Debug + Send + Sync + 'static {
    /// Sentinel meaning "no move"
    const INVALID: Self;

    #[inline]
    fn is_invalid(&self) -> bool {
        *self == Self::INVALID
    }
}

/// Game position consumed by the search
pub trait Board: Clone + Debug + Send + Sync + 'static {
    /// Move type applied with `make_move`
    type Move: GameMove;

    /// Cheaper, evaluation-only snapshot handed to the static evaluator
    type Lightweight: Send + Sync;

    /// Apply a move in place. The move is assumed to be legal.
    fn make_move(&mut self, mv: Self::Move);

    /// Side whose turn it is
    fn side_to_move(&self) -> Colour;

    /// Side that is not to move, i.e. the side that made the last move
    #[inline]
    fn opponent_colour(&self) -> Colour {
        self.side_to_move().opponent()
    }

    /// Produce the evaluation-only snapshot of this position
    fn lightweight_clone(&self) -> Self::Lightweight;

    /// Terminal detection (checkmate, stalemate, draw rules, ...).
    ///
    /// Games without explicit terminal rules can keep the default; the search
    /// still treats positions with no legal moves as terminal.
    fn game_result(&self) -> GameResult {
        GameResult::InProgress
    }
}
