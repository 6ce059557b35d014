//! Configuration layers
//!
//! Effective configuration is merged from:
//! 1. Built-in defaults
//! 2. A TOML config file (`--config`, or `i18n-merge.toml` in the working directory)
//! 3. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::{DuplicatePolicy, MergeConfig, MergeSettings, OutputSettings, MAX_INDENT};
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, DEFAULT_CONFIG_FILE};
pub use merge::merge_layers;
