//! MCTS configuration parameters.

use std::str::FromStr;
use std::time::Duration;

use engine_config::CentralConfig;
use engine_core::PromotionMode;

use crate::search::SearchError;

/// Rule for picking the reported move once the budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalMoveSelection {
    /// Root child with the highest selection score after the last playout
    #[default]
    BestUcb,
    /// Root child with the most visits
    MostVisited,
}

impl FromStr for FinalMoveSelection {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_ucb" | "ucb" => Ok(FinalMoveSelection::BestUcb),
            "most_visited" | "visits" => Ok(FinalMoveSelection::MostVisited),
            other => Err(SearchError::InvalidConfig(format!(
                "unknown final move rule: {other}"
            ))),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Maximum number of playouts per search.
    pub max_playouts: u32,

    /// Exploration constant `c` in UCB1. Higher values spread visits
    /// more evenly, lower values favor the best observed moves.
    pub exploration_constant: f64,

    /// Maximum plies per random rollout.
    pub rollout_depth: u32,

    /// Honour `end_search` requests and `time_limit`.
    pub use_time_limit: bool,

    /// Wall-clock budget, checked between playouts when `use_time_limit`
    /// is set.
    pub time_limit: Option<Duration>,

    /// The host runs the search off its main flow; suppresses the
    /// end-of-search diagnostics log.
    pub use_threading: bool,

    /// Promotion pieces handed to the move generator.
    pub promotions_to_search: PromotionMode,

    /// How the reported move is chosen.
    pub final_move: FinalMoveSelection,

    /// Seed for `run_mcts`; None seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_playouts: 10_000,
            exploration_constant: 1.0,
            rollout_depth: 6,
            use_time_limit: false,
            time_limit: None,
            use_threading: false,
            promotions_to_search: PromotionMode::default(),
            final_move: FinalMoveSelection::BestUcb,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_playouts: 200,
            use_threading: true,
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Build from the central configuration (config.toml + env overrides).
    pub fn from_central(central: &CentralConfig) -> Result<Self, SearchError> {
        let mcts = &central.mcts;

        let promotions_to_search = mcts
            .promotions_to_search
            .parse::<PromotionMode>()
            .map_err(|e| SearchError::InvalidConfig(e.to_string()))?;

        let config = Self {
            max_playouts: mcts.max_playouts,
            exploration_constant: mcts.exploration_constant,
            rollout_depth: mcts.rollout_depth,
            use_time_limit: mcts.use_time_limit,
            time_limit: (mcts.time_limit_ms > 0).then(|| Duration::from_millis(mcts.time_limit_ms)),
            use_threading: mcts.use_threading,
            promotions_to_search,
            final_move: mcts.final_move.parse()?,
            seed: (mcts.seed != 0).then_some(mcts.seed),
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder pattern: set the playout budget.
    pub fn with_playouts(mut self, n: u32) -> Self {
        self.max_playouts = n;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the rollout depth bound.
    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    /// Builder pattern: enable cooperative cancellation, optionally with a
    /// wall-clock budget.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.use_time_limit = true;
        self.time_limit = limit;
        self
    }

    /// Builder pattern: set the final move rule.
    pub fn with_final_move(mut self, rule: FinalMoveSelection) -> Self {
        self.final_move = rule;
        self
    }

    /// Builder pattern: set the promotion pieces to search.
    pub fn with_promotions(mut self, promotions: PromotionMode) -> Self {
        self.promotions_to_search = promotions;
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_playouts == 0 {
            return Err(SearchError::InvalidConfig(
                "max_playouts must be at least 1".into(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration_constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
