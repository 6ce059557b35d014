//! Error types for validation and merging.

/// Failure while validating or merging a translation tree.
///
/// Every variant names the file the offending tree came from and the path
/// inside it, so a failure can be located without re-running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A leaf is not a string (number, boolean, null).
    #[error("{file}: leaf values must be strings, got {found} at `{path}`")]
    InvalidStructure {
        file: String,
        path: String,
        found: &'static str,
    },

    /// The document itself is not a mapping.
    #[error("{file}: top-level value must be a mapping, got {found}")]
    RootNotMapping { file: String, found: &'static str },

    /// The same path is an object in one language and something else in another.
    #[error("structure mismatch at key `{path}` between languages (file {file})")]
    StructureMismatch { file: String, path: String },

    /// A sequence element is neither a string nor a mapping.
    #[error("{file}: unsupported array element type {found} at key `{path}[{index}]`")]
    UnsupportedElementType {
        file: String,
        path: String,
        index: usize,
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_file_and_path() {
        let err = TreeError::InvalidStructure {
            file: "locales/en.json".to_string(),
            path: "count".to_string(),
            found: "number",
        };
        let msg = err.to_string();
        assert!(msg.contains("locales/en.json"));
        assert!(msg.contains("`count`"));
        assert!(msg.contains("number"));

        let err = TreeError::UnsupportedElementType {
            file: "ru.yaml".to_string(),
            path: "menu.items".to_string(),
            index: 3,
            found: "sequence",
        };
        assert_eq!(
            err.to_string(),
            "ru.yaml: unsupported array element type sequence at key `menu.items[3]`"
        );
    }
}
