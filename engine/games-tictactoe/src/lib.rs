//! TicTacToe reference game for the MCTS engine
//!
//! This crate implements the `engine-core` contracts for TicTacToe and
//! serves as the fixture game for search tests and benchmarks.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Board, GameResult, MoveGenerator, PromotionMode};
//! use games_tictactoe::{Cell, State, TicTacToeMoves};
//!
//! let mut state = State::new();
//! state.make_move(Cell(4));
//!
//! let moves = TicTacToeMoves.generate_moves(&state, true, PromotionMode::default());
//! assert_eq!(moves.len(), 8);
//! assert_eq!(state.game_result(), GameResult::InProgress);
//! ```

use engine_core::{
    Board, Colour, GameMove, GameResult, MoveGenerator, PositionEvaluator, PromotionMode,
};

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

const X: u8 = 1;
const O: u8 = 2;
const DRAW: u8 = 3;

/// A move: the board position (0-8) to mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell(pub u8);

impl GameMove for Cell {
    const INVALID: Self = Cell(u8::MAX);
}

/// TicTacToe game state
///
/// X moves first and plays as `Colour::White`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: X,
            winner: 0,
        }
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Play a move and return the new state.
    ///
    /// Illegal moves (occupied cell, out of range, finished game) leave the
    /// state unchanged.
    pub fn play(&self, position: u8) -> State {
        let mut next = *self;
        next.place(position);
        next
    }

    /// Contents of a cell: 0=empty, 1=X, 2=O
    pub fn cell(&self, position: usize) -> u8 {
        self.board[position]
    }

    fn place(&mut self, position: u8) {
        if self.is_done() || position >= 9 || self.board[position as usize] != 0 {
            return;
        }

        self.board[position as usize] = self.current_player;
        self.winner = Self::check_winner(&self.board);

        // Switch player if game not over
        if self.winner == 0 {
            self.current_player = if self.current_player == X { O } else { X };
        }
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        for &[a, b, c] in &LINES {
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a];
            }
        }

        // Board full but no winner
        if board.iter().all(|&cell| cell != 0) {
            return DRAW;
        }

        0
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

fn colour_of(player: u8) -> Colour {
    if player == X {
        Colour::White
    } else {
        Colour::Black
    }
}

impl Board for State {
    type Move = Cell;
    type Lightweight = State;

    fn make_move(&mut self, mv: Cell) {
        self.place(mv.0);
    }

    /// The player is not switched on the final move, so a finished game
    /// reports the other side as to move.
    fn side_to_move(&self) -> Colour {
        let side = colour_of(self.current_player);
        if self.is_done() {
            side.opponent()
        } else {
            side
        }
    }

    fn lightweight_clone(&self) -> State {
        *self
    }

    fn game_result(&self) -> GameResult {
        match self.winner {
            X => GameResult::Win(Colour::White),
            O => GameResult::Win(Colour::Black),
            DRAW => GameResult::Draw,
            _ => GameResult::InProgress,
        }
    }
}

/// Legal move generator: every empty cell, none once the game is over
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToeMoves;

impl MoveGenerator<State> for TicTacToeMoves {
    fn generate_moves(
        &self,
        board: &State,
        _at_root: bool,
        _promotions: PromotionMode,
    ) -> Vec<Cell> {
        board.legal_moves().into_iter().map(Cell).collect()
    }
}

/// Static evaluator based on open lines.
///
/// A line still open for one side scores the square of that side's marks
/// on it. The balance is squashed into (0, 1) with a logistic curve, so
/// only finished games reach 1, 0 or exactly 0.5.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEvaluator;

impl LineEvaluator {
    const SCALE: f64 = 4.0;

    fn line_balance(state: &State) -> f64 {
        let mut balance = 0i32;
        for line in &LINES {
            let xs = line.iter().filter(|&&i| state.board[i] == X).count() as i32;
            let os = line.iter().filter(|&&i| state.board[i] == O).count() as i32;
            match (xs, os) {
                (n, 0) => balance += n * n,
                (0, n) => balance -= n * n,
                _ => {}
            }
        }
        balance as f64
    }
}

impl PositionEvaluator<State> for LineEvaluator {
    fn evaluate_sim_board(&self, board: &State, white_perspective: bool) -> f64 {
        let perspective = if white_perspective {
            Colour::White
        } else {
            Colour::Black
        };

        let result = board.game_result();
        if result.is_over() {
            return result.value_for(perspective);
        }

        let white = 1.0 / (1.0 + (-Self::line_balance(board) / Self::SCALE).exp());
        if white_perspective {
            white
        } else {
            1.0 - white
        }
    }
}

#[cfg(test)]
mod tests;
