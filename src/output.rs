//! Writing the merged tree as JSON.

use i18n_tree::Tree;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::Path;

/// Errors for writing output
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("{}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Render `tree` as pretty JSON with `indent` spaces per level.
///
/// Non-ASCII characters are written as-is. The result ends with a newline.
pub fn to_json_string(tree: &Tree, indent: usize) -> Result<String, OutputError> {
    let indent = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    tree.serialize(&mut serializer)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `tree` to `path`, creating parent directories as needed.
pub fn write_output(tree: &Tree, path: &Path, indent: usize) -> Result<(), OutputError> {
    let json = to_json_string(tree, indent)?;
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> Tree {
        Tree::from_document(
            json!({"greet": {"en": "Hi", "ru": "Привет"}, "items": [{"en": "a"}]}),
            "merged",
        )
        .unwrap()
    }

    #[test]
    fn test_two_space_indent_and_unescaped_unicode() {
        let text = to_json_string(&sample(), 2).unwrap();
        assert_eq!(
            text,
            "{\n  \"greet\": {\n    \"en\": \"Hi\",\n    \"ru\": \"Привет\"\n  },\n  \"items\": [\n    {\n      \"en\": \"a\"\n    }\n  ]\n}\n"
        );
    }

    #[test]
    fn test_custom_indent() {
        let text = to_json_string(&sample(), 4).unwrap();
        assert!(text.contains("\n    \"greet\": {\n        \"en\""));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dist/i18n/translations.json");

        write_output(&sample(), &path, 2).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["greet"]["ru"], "Привет");
    }
}
