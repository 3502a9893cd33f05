//! Static evaluation contract

use crate::board::Board;

/// Static heuristic used to score positions where a rollout stops.
///
/// Scores are higher-is-better for the requested side and nominally lie in
/// [0, 1], with 0 and 1 reserved for decided games. The search clamps
/// anything outside that range.
pub trait PositionEvaluator<B: Board>: Send + Sync {
    /// Evaluate a lightweight snapshot.
    ///
    /// `white_perspective` selects the side the score is reported for: true
    /// for White, false for Black.
    fn evaluate_sim_board(&self, board: &B::Lightweight, white_perspective: bool) -> f64;
}
