//! The translation tree type and its validator.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::TreeError;
use crate::path::TreePath;

/// Ordered map of child nodes. Keys keep first-insertion order.
pub type TreeMap = IndexMap<String, Tree>;

/// A translation tree: string leaves nested in maps and sequences.
///
/// Parsed documents are converted into this type by [`Tree::from_document`],
/// which is also the point where non-string leaves are rejected. The merge
/// accumulator uses the same type; once merged, every leaf position holds a
/// `Map` from language tag to `String`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Tree {
    String(String),
    Map(TreeMap),
    Seq(Vec<Tree>),
}

impl Default for Tree {
    fn default() -> Self {
        Self::empty_map()
    }
}

impl Tree {
    pub fn empty_map() -> Self {
        Tree::Map(TreeMap::new())
    }

    /// Convert a parsed document into a tree.
    ///
    /// The top level must be a mapping. A `null` document (an empty YAML
    /// file) is read as an empty mapping.
    pub fn from_document(value: Value, file: &str) -> Result<Self, TreeError> {
        match value {
            Value::Null => Ok(Self::empty_map()),
            value @ Value::Object(_) => Self::from_value(value, file),
            other => Err(TreeError::RootNotMapping {
                file: file.to_string(),
                found: value_kind(&other),
            }),
        }
    }

    /// Convert any parsed node into a tree, rejecting non-string leaves.
    pub fn from_value(value: Value, file: &str) -> Result<Self, TreeError> {
        let mut path = TreePath::root();
        convert(value, file, &mut path)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tree::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&TreeMap> {
        match self {
            Tree::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Tree]> {
        match self {
            Tree::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Child of a map node.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.as_map()?.get(key)
    }

    /// Number of entries for maps and sequences, 0 for strings.
    pub fn len(&self) -> usize {
        match self {
            Tree::String(_) => 0,
            Tree::Map(map) => map.len(),
            Tree::Seq(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Tree::String(_) => "string",
            Tree::Map(_) => "mapping",
            Tree::Seq(_) => "sequence",
        }
    }

    pub fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl From<&Tree> for Value {
    fn from(tree: &Tree) -> Self {
        match tree {
            Tree::String(s) => Value::String(s.clone()),
            Tree::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), Value::from(child)))
                    .collect(),
            ),
            Tree::Seq(items) => Value::Array(items.iter().map(Value::from).collect()),
        }
    }
}

/// Kind name of a parsed value, as reported in validation errors.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

fn convert(value: Value, file: &str, path: &mut TreePath) -> Result<Tree, TreeError> {
    match value {
        Value::String(s) => Ok(Tree::String(s)),
        Value::Object(map) => {
            let mut out = TreeMap::with_capacity(map.len());
            for (key, child) in map {
                path.push_key(&key);
                let child = convert(child, file, path)?;
                path.pop();
                out.insert(key, child);
            }
            Ok(Tree::Map(out))
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, child) in items.into_iter().enumerate() {
                path.push_index(index);
                out.push(convert(child, file, path)?);
                path.pop();
            }
            Ok(Tree::Seq(out))
        }
        other => Err(invalid_leaf(&other, file, path)),
    }
}

fn invalid_leaf(value: &Value, file: &str, path: &TreePath) -> TreeError {
    TreeError::InvalidStructure {
        file: file.to_string(),
        path: path.to_string(),
        found: value_kind(value),
    }
}
