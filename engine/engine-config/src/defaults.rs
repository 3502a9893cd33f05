//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so a binary never depends on
//! it being present at runtime.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    max_playouts: u32,
    exploration_constant: f64,
    rollout_depth: u32,
    use_time_limit: bool,
    time_limit_ms: u64,
    use_threading: bool,
    promotions_to_search: String,
    final_move: String,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn max_playouts() -> u32 {
    DEFAULTS.mcts.max_playouts
}
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn rollout_depth() -> u32 {
    DEFAULTS.mcts.rollout_depth
}
pub fn use_time_limit() -> bool {
    DEFAULTS.mcts.use_time_limit
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}
pub fn use_threading() -> bool {
    DEFAULTS.mcts.use_threading
}
pub fn promotions_to_search() -> &'static str {
    &DEFAULTS.mcts.promotions_to_search
}
pub fn final_move() -> &'static str {
    &DEFAULTS.mcts.final_move
}
pub fn seed() -> u64 {
    DEFAULTS.mcts.seed
}
