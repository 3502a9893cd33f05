//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_max_playouts() -> u32 {
    defaults::max_playouts()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_rollout_depth() -> u32 {
    defaults::rollout_depth()
}
fn d_use_time_limit() -> bool {
    defaults::use_time_limit()
}
fn d_time_limit_ms() -> u64 {
    defaults::time_limit_ms()
}
fn d_use_threading() -> bool {
    defaults::use_threading()
}
fn d_promotions() -> String {
    defaults::promotions_to_search().into()
}
fn d_final_move() -> String {
    defaults::final_move().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    /// Filter directive for the host's tracing subscriber (e.g. "info",
    /// "mcts=trace"). The libraries only emit events and never read it.
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
///
/// Enum-like settings (`promotions_to_search`, `final_move`) stay as strings
/// here; the search crate parses and validates them.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_max_playouts")]
    pub max_playouts: u32,
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    #[serde(default = "d_rollout_depth")]
    pub rollout_depth: u32,
    #[serde(default = "d_use_time_limit")]
    pub use_time_limit: bool,
    /// Wall-clock budget in milliseconds, 0 = none
    #[serde(default = "d_time_limit_ms")]
    pub time_limit_ms: u64,
    #[serde(default = "d_use_threading")]
    pub use_threading: bool,
    #[serde(default = "d_promotions")]
    pub promotions_to_search: String,
    #[serde(default = "d_final_move")]
    pub final_move: String,
    /// RNG seed, 0 = seed from entropy
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_playouts: defaults::max_playouts(),
            exploration_constant: defaults::exploration_constant(),
            rollout_depth: defaults::rollout_depth(),
            use_time_limit: defaults::use_time_limit(),
            time_limit_ms: defaults::time_limit_ms(),
            use_threading: defaults::use_threading(),
            promotions_to_search: defaults::promotions_to_search().into(),
            final_move: defaults::final_move().into(),
            seed: defaults::seed(),
        }
    }
}
