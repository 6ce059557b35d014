//! Per-language deep merge.
//!
//! Folding a language's tree into the accumulator:
//! - Maps: merged key by key (recursive)
//! - Sequences: merged index by index; every slot is a map, the accumulator
//!   sequence grows to the longest contributor and never shrinks
//! - Strings: become `accumulator[key][lang] = value`
//!
//! Once a key holds a map (or a sequence) in the accumulator, no later file
//! may put a different kind of value there.

use crate::error::TreeError;
use crate::path::TreePath;
use crate::tree::{Tree, TreeMap};

/// Fold `incoming` (one language's tree) into `accumulator`.
///
/// Both trees must be maps at the top level. When the same `(path, lang)`
/// pair is folded twice the later value wins. On error the accumulator may
/// hold part of the failing file's contribution; callers abort the run.
pub fn fold(
    accumulator: &mut Tree,
    incoming: &Tree,
    lang: &str,
    file: &str,
) -> Result<(), TreeError> {
    let mut path = TreePath::root();
    let (Tree::Map(target), Tree::Map(source)) = (accumulator, incoming) else {
        return Err(mismatch(file, &path));
    };
    fold_map(target, source, lang, file, &mut path)
}

fn fold_map(
    target: &mut TreeMap,
    incoming: &TreeMap,
    lang: &str,
    file: &str,
    path: &mut TreePath,
) -> Result<(), TreeError> {
    for (key, value) in incoming {
        path.push_key(key);
        match value {
            Tree::Map(children) => {
                let slot = target.entry(key.clone()).or_insert_with(Tree::empty_map);
                let Tree::Map(slot) = slot else {
                    return Err(mismatch(file, path));
                };
                fold_map(slot, children, lang, file, path)?;
            }
            Tree::Seq(items) => {
                let slot = target
                    .entry(key.clone())
                    .or_insert_with(|| Tree::Seq(Vec::new()));
                let Tree::Seq(slots) = slot else {
                    return Err(mismatch(file, path));
                };
                fold_seq(slots, items, lang, file, path)?;
            }
            Tree::String(text) => {
                let slot = target.entry(key.clone()).or_insert_with(Tree::empty_map);
                let Tree::Map(leaf) = slot else {
                    return Err(mismatch(file, path));
                };
                leaf.insert(lang.to_string(), Tree::String(text.clone()));
            }
        }
        path.pop();
    }
    Ok(())
}

fn fold_seq(
    slots: &mut Vec<Tree>,
    items: &[Tree],
    lang: &str,
    file: &str,
    path: &mut TreePath,
) -> Result<(), TreeError> {
    if slots.len() < items.len() {
        slots.resize_with(items.len(), Tree::empty_map);
    }

    for (index, item) in items.iter().enumerate() {
        let slot = slot_map(&mut slots[index]);
        match item {
            Tree::Map(children) => {
                path.push_index(index);
                fold_map(slot, children, lang, file, path)?;
                path.pop();
            }
            Tree::String(text) => {
                slot.insert(lang.to_string(), Tree::String(text.clone()));
            }
            Tree::Seq(_) => {
                return Err(TreeError::UnsupportedElementType {
                    file: file.to_string(),
                    path: path.to_string(),
                    index,
                    found: item.kind(),
                });
            }
        }
    }
    Ok(())
}

/// Sequence slots are always per-language containers. A slot holding
/// anything else is replaced with an empty map, discarding its content.
fn slot_map(slot: &mut Tree) -> &mut TreeMap {
    if !matches!(slot, Tree::Map(_)) {
        *slot = Tree::empty_map();
    }
    match slot {
        Tree::Map(map) => map,
        _ => unreachable!("sequence slot was normalised to a map"),
    }
}

fn mismatch(file: &str, path: &TreePath) -> TreeError {
    TreeError::StructureMismatch {
        file: file.to_string(),
        path: path.to_string(),
    }
}

/// Owned accumulator for one merge run.
///
/// Records the language tags folded in, in the order they arrived.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    root: Tree,
    languages: Vec<String>,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one language's tree into the accumulator.
    pub fn fold(&mut self, incoming: &Tree, lang: &str, file: &str) -> Result<(), TreeError> {
        fold(&mut self.root, incoming, lang, file)?;
        if !self.languages.iter().any(|l| l == lang) {
            self.languages.push(lang.to_string());
        }
        Ok(())
    }

    /// Language tags merged so far, without repeats.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn into_tree(self) -> Tree {
        self.root
    }
}
