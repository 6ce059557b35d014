//! Source format adapters.
//!
//! Each adapter turns the text of one localisation file into a parsed
//! document (`serde_json::Value`). Validation and merging are shared and
//! happen afterwards, in the driver.

mod js;
mod json;
mod yaml;

pub use js::{normalize_template_literals, JsModuleLoader, Normalized};
pub use json::JsonLoader;
pub use yaml::YamlLoader;

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::error::MergeError;

/// Parses the text of one source file.
pub trait Loader {
    /// Parse `text`, read from `path`, into a document.
    fn parse(&self, text: &str, path: &Path) -> Result<Value, MergeError>;

    /// Read and parse a file.
    fn load(&self, path: &Path) -> Result<Loaded, MergeError> {
        let source = SourceFile::read(path)?;
        let document = self.parse(&source.text, path)?;
        Ok(Loaded {
            document,
            sha256: source.sha256,
        })
    }
}

/// A parsed file together with the digest of its bytes.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub document: Value,
    pub sha256: String,
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `*.yaml` / `*.yml`
    Yaml,
    /// `*.json`
    Json,
    /// `*.js` modules with `export default { ... }`
    JsModule,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::JsModule => "js",
        }
    }

    /// File name globs matched in the input directory.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &["*.y*ml"],
            Self::Json => &["*.json"],
            Self::JsModule => &["*.js"],
        }
    }

    pub fn loader(&self) -> &'static dyn Loader {
        match self {
            Self::Yaml => &YamlLoader,
            Self::Json => &JsonLoader,
            Self::JsModule => &JsModuleLoader,
        }
    }
}

/// A source file read from disk.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// UTF-8 contents with any byte order mark removed.
    pub text: String,
    /// SHA-256 of the raw bytes, hex encoded.
    pub sha256: String,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self, MergeError> {
        let bytes = fs::read(path).map_err(|e| MergeError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let sha256 = hex::encode(hasher.finalize());

        let mut text = String::from_utf8(bytes)
            .map_err(|e| MergeError::parse(path, format!("invalid UTF-8: {}", e)))?;
        if text.starts_with('\u{feff}') {
            text.replace_range(..'\u{feff}'.len_utf8(), "");
        }

        Ok(Self { text, sha256 })
    }
}

/// Language tag of a file: its name without the final extension.
pub fn language_tag(path: &Path) -> Result<String, MergeError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| MergeError::InvalidFileName(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_language_tag_from_stem() {
        assert_eq!(language_tag(Path::new("locales/en.json")).unwrap(), "en");
        assert_eq!(language_tag(Path::new("pt-BR.yml")).unwrap(), "pt-BR");
        assert_eq!(language_tag(Path::new("zh.Hant.js")).unwrap(), "zh.Hant");
    }

    #[test]
    fn test_patterns_per_format() {
        assert_eq!(Format::Yaml.patterns(), &["*.y*ml"]);
        assert_eq!(Format::Json.patterns(), &["*.json"]);
        assert_eq!(Format::JsModule.patterns(), &["*.js"]);
        assert_eq!(Format::JsModule.name(), "js");
    }

    #[test]
    fn test_source_file_strips_bom_and_hashes_raw_bytes() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all("\u{feff}{\"a\": \"b\"}".as_bytes()).unwrap();

        let source = SourceFile::read(temp.path()).unwrap();
        assert_eq!(source.text, "{\"a\": \"b\"}");
        assert_eq!(source.sha256.len(), 64);

        let loaded = Format::Json.loader().load(temp.path()).unwrap();
        assert_eq!(loaded.document, serde_json::json!({"a": "b"}));
        assert_eq!(loaded.sha256, source.sha256);
    }

    #[test]
    fn test_source_file_rejects_invalid_utf8() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = SourceFile::read(temp.path()).unwrap_err();
        assert!(matches!(err, MergeError::Parse { .. }));
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SourceFile::read(Path::new("/nonexistent/en.json")).unwrap_err();
        assert!(matches!(err, MergeError::Io { .. }));
    }
}
