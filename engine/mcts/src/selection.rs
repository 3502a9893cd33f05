//! Child selection policy.
//!
//! Selection descends the tree by repeatedly taking the child with the
//! highest score. The score balances the child's observed mean value
//! against an exploration bonus that grows while the child is visited
//! rarely relative to its parent.

/// Scoring function used during tree descent.
pub trait SelectionPolicy {
    /// Score a child from its accumulated value, its visit count and its
    /// parent's visit count. Unvisited children must score `f64::INFINITY`.
    fn score(&self, total_value: f64, visits: u32, parent_visits: u32) -> f64;
}

/// UCB1: `Q + c * sqrt(ln(N_parent) / N)`.
#[derive(Debug, Clone, Copy)]
pub struct Ucb1 {
    pub exploration_constant: f64,
}

impl Ucb1 {
    pub fn new(exploration_constant: f64) -> Self {
        Self {
            exploration_constant,
        }
    }
}

impl Default for Ucb1 {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SelectionPolicy for Ucb1 {
    #[inline]
    fn score(&self, total_value: f64, visits: u32, parent_visits: u32) -> f64 {
        if visits == 0 {
            return f64::INFINITY;
        }
        debug_assert!(parent_visits > 0, "UCB needs a visited parent");

        let visits = visits as f64;
        let exploitation = total_value / visits;
        let exploration = self.exploration_constant * ((parent_visits as f64).ln() / visits).sqrt();
        exploitation + exploration
    }
}

/// Index of the first strictly greatest score.
///
/// Ties go to the earliest entry, so an expansion order of A, B with both
/// unvisited always selects A first.
pub fn argmax_first<I>(scores: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores.into_iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            // NaN never wins against an existing entry
            Some(_) if score.is_nan() => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}
