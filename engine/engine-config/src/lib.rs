//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared by
//! the search engine and any host embedding it.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`GAMBIT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! GAMBIT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     GAMBIT_COMMON_LOG_LEVEL=debug
//!     GAMBIT_MCTS_MAX_PLAYOUTS=50000
//!     GAMBIT_MCTS_USE_TIME_LIMIT=true
//!     GAMBIT_MCTS_PROMOTIONS_TO_SEARCH=all
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
