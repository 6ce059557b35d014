//! JSON adapter.

use serde_json::Value;
use std::path::Path;

use super::Loader;
use crate::error::MergeError;

/// Loads `*.json` files. Key order is kept as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl Loader for JsonLoader {
    fn parse(&self, text: &str, path: &Path) -> Result<Value, MergeError> {
        serde_json::from_str(text).map_err(|e| MergeError::parse(path, e))
    }
}
