//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by GAMBIT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("GAMBIT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from GAMBIT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "GAMBIT_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &PathBuf) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!(key = $key, "Ignoring unparseable environment override"),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: GAMBIT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "GAMBIT_COMMON_LOG_LEVEL");

    // MCTS
    env_override!(
        config,
        mcts.max_playouts,
        "GAMBIT_MCTS_MAX_PLAYOUTS",
        parse
    );
    env_override!(
        config,
        mcts.exploration_constant,
        "GAMBIT_MCTS_EXPLORATION_CONSTANT",
        parse
    );
    env_override!(
        config,
        mcts.rollout_depth,
        "GAMBIT_MCTS_ROLLOUT_DEPTH",
        parse
    );
    env_override!(
        config,
        mcts.use_time_limit,
        "GAMBIT_MCTS_USE_TIME_LIMIT",
        parse
    );
    env_override!(
        config,
        mcts.time_limit_ms,
        "GAMBIT_MCTS_TIME_LIMIT_MS",
        parse
    );
    env_override!(
        config,
        mcts.use_threading,
        "GAMBIT_MCTS_USE_THREADING",
        parse
    );
    env_override!(
        config,
        mcts.promotions_to_search,
        "GAMBIT_MCTS_PROMOTIONS_TO_SEARCH"
    );
    env_override!(config, mcts.final_move, "GAMBIT_MCTS_FINAL_MOVE");
    env_override!(config, mcts.seed, "GAMBIT_MCTS_SEED", parse);

    config
}
