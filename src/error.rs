//! Error types for a merge run.

use i18n_tree::TreeError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Stable error codes, printed in `--json` failure output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A leaf is not a string, or the document root is not a mapping.
    InvalidStructure,
    /// The same path has different shapes across languages.
    StructureMismatch,
    /// A sequence element is neither a string nor a mapping.
    UnsupportedElementType,
    /// A source file could not be parsed.
    ParseError,
    /// Two files map to the same language tag.
    DuplicateLanguage,
    /// Filesystem failure while discovering or reading inputs.
    Io,
    /// Invalid configuration file or flags.
    Config,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStructure => write!(f, "INVALID_STRUCTURE"),
            Self::StructureMismatch => write!(f, "STRUCTURE_MISMATCH"),
            Self::UnsupportedElementType => write!(f, "UNSUPPORTED_ELEMENT_TYPE"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::DuplicateLanguage => write!(f, "DUPLICATE_LANGUAGE"),
            Self::Io => write!(f, "IO"),
            Self::Config => write!(f, "CONFIG"),
        }
    }
}

/// Errors that abort a merge run.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("{}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("file name is not valid UTF-8: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error(
        "language `{lang}` is provided by both {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateLanguage {
        lang: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] globset::Error),
}

impl MergeError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Tree(TreeError::InvalidStructure { .. } | TreeError::RootNotMapping { .. }) => {
                ErrorCode::InvalidStructure
            }
            Self::Tree(TreeError::StructureMismatch { .. }) => ErrorCode::StructureMismatch,
            Self::Tree(TreeError::UnsupportedElementType { .. }) => {
                ErrorCode::UnsupportedElementType
            }
            Self::Parse { .. } | Self::InvalidFileName(_) => ErrorCode::ParseError,
            Self::DuplicateLanguage { .. } => ErrorCode::DuplicateLanguage,
            Self::Io { .. } | Self::NotADirectory(_) | Self::Walk(_) | Self::Glob(_) => {
                ErrorCode::Io
            }
        }
    }
}
