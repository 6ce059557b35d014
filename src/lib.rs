//! i18n-merge - merge per-language localisation files
//!
//! Reads one file per language (YAML, JSON or a JavaScript module exporting
//! an object literal) and produces a single JSON tree where every string
//! leaf is replaced by a `{language: string}` map, nesting preserved.

pub mod config;
pub mod driver;
pub mod error;
pub mod format;
pub mod output;

pub use config::{DuplicatePolicy, EffectiveConfig, MergeConfig};
pub use driver::{MergeDriver, MergeReport, SourceRecord};
pub use error::{ErrorCode, MergeError};
pub use format::{Format, Loader};
pub use i18n_tree::{Merger, Tree, TreeError};
pub use output::{to_json_string, write_output, OutputError};
