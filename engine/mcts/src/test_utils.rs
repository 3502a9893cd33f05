//! Scripted game used by the unit tests.
//!
//! A position is the sequence of move indices played from the start. Every
//! position offers `branching` moves until `max_plies` moves were played.
//! The evaluator scores positions by their first move, which makes the
//! value of each root child easy to control.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use engine_core::{
    Board, Colour, GameMove, GameResult, MoveGenerator, PositionEvaluator, PromotionMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedMove(pub u8);

impl GameMove for ScriptedMove {
    const INVALID: Self = ScriptedMove(u8::MAX);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedBoard {
    pub path: Vec<u8>,
    pub branching: u8,
    pub max_plies: usize,
    /// Fixed verdict for every position derived from this board
    pub result: GameResult,
    /// Verdict for one specific path
    pub decisive: Option<(Vec<u8>, GameResult)>,
}

impl ScriptedBoard {
    pub fn new(branching: u8, max_plies: usize) -> Self {
        Self {
            path: Vec::new(),
            branching,
            max_plies,
            result: GameResult::InProgress,
            decisive: None,
        }
    }

    pub fn with_result(mut self, result: GameResult) -> Self {
        self.result = result;
        self
    }

    pub fn with_decisive_path(mut self, path: Vec<u8>, result: GameResult) -> Self {
        self.decisive = Some((path, result));
        self
    }
}

impl Board for ScriptedBoard {
    type Move = ScriptedMove;
    type Lightweight = Vec<u8>;

    fn make_move(&mut self, mv: ScriptedMove) {
        self.path.push(mv.0);
    }

    fn side_to_move(&self) -> Colour {
        if self.path.len() % 2 == 0 {
            Colour::White
        } else {
            Colour::Black
        }
    }

    fn lightweight_clone(&self) -> Vec<u8> {
        self.path.clone()
    }

    fn game_result(&self) -> GameResult {
        if self.result.is_over() {
            return self.result;
        }
        match &self.decisive {
            Some((path, result)) if *path == self.path => *result,
            _ => GameResult::InProgress,
        }
    }
}

/// Generator that counts its calls and records the promotion mode of each
#[derive(Debug, Default)]
pub struct ScriptedMoves {
    calls: AtomicU32,
    root_calls: AtomicU32,
    promotions: Mutex<Vec<(bool, PromotionMode)>>,
}

impl ScriptedMoves {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn root_calls(&self) -> u32 {
        self.root_calls.load(Ordering::Relaxed)
    }

    /// `(at_root, promotions)` for every call, in order
    pub fn promotions_seen(&self) -> Vec<(bool, PromotionMode)> {
        self.promotions.lock().unwrap().clone()
    }
}

impl MoveGenerator<ScriptedBoard> for ScriptedMoves {
    fn generate_moves(
        &self,
        board: &ScriptedBoard,
        at_root: bool,
        promotions: PromotionMode,
    ) -> Vec<ScriptedMove> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.promotions.lock().unwrap().push((at_root, promotions));
        if at_root {
            self.root_calls.fetch_add(1, Ordering::Relaxed);
        }

        if board.path.len() >= board.max_plies || board.game_result().is_over() {
            return Vec::new();
        }
        (0..board.branching).map(ScriptedMove).collect()
    }
}

/// Scores a position by its first move, from White's point of view
#[derive(Debug, Clone, Default)]
pub struct ScriptedEval {
    pub white_values: Vec<f64>,
}

impl ScriptedEval {
    pub fn new(white_values: Vec<f64>) -> Self {
        Self { white_values }
    }
}

impl PositionEvaluator<ScriptedBoard> for ScriptedEval {
    fn evaluate_sim_board(&self, path: &Vec<u8>, white_perspective: bool) -> f64 {
        let white = path
            .first()
            .and_then(|&first| self.white_values.get(first as usize))
            .copied()
            .unwrap_or(0.5);

        if white_perspective {
            white
        } else {
            1.0 - white
        }
    }
}
