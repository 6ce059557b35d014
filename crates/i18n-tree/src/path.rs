//! Key/index paths into a tree, used for error reporting.

use std::fmt;

/// One step of a [`TreePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a node, rendered as `menu.items[2].label`.
///
/// The validator and merge engine push and pop segments while recursing
/// instead of building a fresh path per node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath {
    segments: Vec<PathSegment>,
}

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: &str) {
        self.segments.push(PathSegment::Key(key.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
