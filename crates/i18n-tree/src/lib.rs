//! Translation trees and the per-language deep merge.
//!
//! A translation file is a tree of maps, sequences and string leaves. This
//! crate validates parsed documents into [`Tree`] values and folds one tree
//! per language into a single accumulator whose leaves are
//! `{language: string}` maps.
//!
//! The crate does no IO; format loading and file discovery live in the
//! `i18n-merge` package.

mod error;
mod merge;
mod path;
mod tree;

pub use error::TreeError;
pub use merge::{fold, Merger};
pub use path::TreePath;
pub use tree::{Tree, TreeMap};
