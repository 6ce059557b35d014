//! Built-in defaults (layer 1) and the typed configuration they fill.

use serde::{Deserialize, Serialize};

/// Largest accepted `output.indent`.
pub const MAX_INDENT: usize = 8;

/// What to do when two input files share a language tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Abort the run before reading any file.
    #[default]
    Error,
    /// Merge both; the file later in name order wins per key.
    LastWins,
}

/// `[merge]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeSettings {
    pub duplicate_languages: DuplicatePolicy,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Spaces per indentation level in the written JSON (default: 2)
    pub indent: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Typed configuration for a merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub merge: MergeSettings,
    pub output: OutputSettings,
}

impl MergeConfig {
    /// Convert to JSON Value for layering
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "merge": {
                "duplicate_languages": self.merge.duplicate_languages
            },
            "output": {
                "indent": self.output.indent
            }
        })
    }
}
