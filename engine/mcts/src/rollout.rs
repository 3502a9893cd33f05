//! Random playouts.
//!
//! A rollout plays uniformly random moves from a copy of a node's position
//! for a bounded number of plies, then scores where it stopped. Shallow
//! rollouts are cheap but noisy; the search compensates with volume.

use engine_core::{Board, Colour, MoveGenerator, PositionEvaluator, PromotionMode};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Outcome of a single rollout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rollout {
    /// Result in [0, 1] from the perspective of the player who moved into
    /// the start position
    pub value: f64,

    /// Plies played before stopping
    pub plies: u32,

    /// True when the rollout stopped in a finished game
    pub decisive: bool,
}

/// Play a bounded random rollout from `start` and score it.
///
/// Stops after `max_depth` plies, at a position without legal moves, or at
/// a finished game. Finished games score 1/0/0.5. Anything else is scored by
/// the evaluator on a lightweight copy, from the perspective of the side
/// that made the last move, and then re-expressed for the player who moved
/// into `start`.
pub fn simulate<B, G, E>(
    start: &B,
    generator: &G,
    evaluator: &E,
    max_depth: u32,
    promotions: PromotionMode,
    rng: &mut ChaCha20Rng,
) -> Rollout
where
    B: Board,
    G: MoveGenerator<B>,
    E: PositionEvaluator<B>,
{
    let mover = start.opponent_colour();
    let mut board = start.clone();
    let mut plies = 0;

    while plies < max_depth && !board.game_result().is_over() {
        let moves = generator.generate_moves(&board, false, promotions);
        if moves.is_empty() {
            break;
        }

        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(mv);
        plies += 1;
    }

    let result = board.game_result();
    if result.is_over() {
        return Rollout {
            value: result.value_for(mover),
            plies,
            decisive: true,
        };
    }

    let last_mover = board.opponent_colour();
    let score = evaluator
        .evaluate_sim_board(&board.lightweight_clone(), last_mover == Colour::White)
        .clamp(0.0, 1.0);

    let value = if last_mover == mover { score } else { 1.0 - score };

    Rollout {
        value,
        plies,
        decisive: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedBoard, ScriptedEval, ScriptedMove, ScriptedMoves};
    use engine_core::GameResult;
    use rand::SeedableRng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    fn run<G>(board: &ScriptedBoard, generator: &G, eval: &ScriptedEval, depth: u32) -> Rollout
    where
        G: MoveGenerator<ScriptedBoard>,
    {
        simulate(board, generator, eval, depth, PromotionMode::All, &mut rng())
    }

    #[test]
    fn test_depth_bound() {
        let board = ScriptedBoard::new(3, 100);
        let eval = ScriptedEval::default();

        for depth in [0, 1, 6, 9] {
            let rollout = run(&board, &ScriptedMoves::default(), &eval, depth);
            assert_eq!(rollout.plies, depth);
            assert!(!rollout.decisive);
        }
    }

    #[test]
    fn test_stops_without_moves() {
        let board = ScriptedBoard::new(3, 2);
        let generator = ScriptedMoves::default();
        let rollout = run(&board, &generator, &ScriptedEval::default(), 6);

        assert_eq!(rollout.plies, 2);
        // Two moves, then the empty move list ends the rollout
        assert_eq!(generator.calls(), 3);
        assert_eq!(generator.root_calls(), 0);
    }

    #[test]
    fn test_does_not_mutate_start() {
        let board = ScriptedBoard::new(3, 10);
        let before = board.clone();
        run(&board, &ScriptedMoves::default(), &ScriptedEval::default(), 6);
        assert_eq!(board, before);
    }

    #[test]
    fn test_value_is_from_mover_perspective() {
        // Position after White's move 0; White's evaluation of it is 0.8
        let mut board = ScriptedBoard::new(2, 1);
        board.make_move(ScriptedMove(0));
        let eval = ScriptedEval::new(vec![0.8, 0.1]);

        // No moves left: evaluated in place, White moved last
        let rollout = run(&board, &ScriptedMoves::default(), &eval, 6);
        assert_eq!(rollout.plies, 0);
        assert!((rollout.value - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_odd_rollout_keeps_mover_perspective() {
        // White moved into the start; Black makes the single rollout ply
        let mut board = ScriptedBoard::new(2, 2);
        board.make_move(ScriptedMove(1));
        let eval = ScriptedEval::new(vec![0.3, 0.3]);

        let rollout = run(&board, &ScriptedMoves::default(), &eval, 6);
        assert_eq!(rollout.plies, 1);
        // Evaluator called for Black (0.7), value reported for White
        assert!((rollout.value - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_finished_game_scores_decisively() {
        let mut board = ScriptedBoard::new(1, 10)
            .with_decisive_path(vec![0, 0], GameResult::Win(Colour::Black));
        board.make_move(ScriptedMove(0));

        // White moved into the start, Black wins on the next ply
        let rollout = run(&board, &ScriptedMoves::default(), &ScriptedEval::default(), 6);
        assert!(rollout.decisive);
        assert_eq!(rollout.plies, 1);
        assert!(rollout.value.abs() < 1e-12);
    }

    #[test]
    fn test_clamps_evaluator_output() {
        let mut board = ScriptedBoard::new(1, 1);
        board.make_move(ScriptedMove(0));
        let eval = ScriptedEval::new(vec![3.5]);

        let rollout = run(&board, &ScriptedMoves::default(), &eval, 6);
        assert!((rollout.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_rollouts_repeat() {
        let board = ScriptedBoard::new(5, 50);
        let eval = ScriptedEval::new(vec![0.1, 0.2, 0.3, 0.4, 0.5]);

        let mut rng_a = ChaCha20Rng::seed_from_u64(7);
        let mut rng_b = ChaCha20Rng::seed_from_u64(7);
        let generator = ScriptedMoves::default();
        for _ in 0..20 {
            let a = simulate(&board, &generator, &eval, 6, PromotionMode::All, &mut rng_a);
            let b = simulate(&board, &generator, &eval, 6, PromotionMode::All, &mut rng_b);
            assert_eq!(a, b);
        }
    }
}
