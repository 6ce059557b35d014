//! Merge driver: discover the files of one format in a directory and fold
//! them, one at a time, into a single tree.
//!
//! Files are processed in file-name order so the result does not depend on
//! directory listing order. The first failure aborts the run.

use globset::{Glob, GlobSet, GlobSetBuilder};
use i18n_tree::{Merger, Tree};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::DuplicatePolicy;
use crate::error::MergeError;
use crate::format::{language_tag, Format};

/// One input file that contributed to a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    pub lang: String,
    pub path: PathBuf,
    /// SHA-256 of the raw file bytes, hex encoded.
    pub sha256: String,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub tree: Tree,
    /// Contributing files in processing order.
    pub sources: Vec<SourceRecord>,
}

impl MergeReport {
    pub fn top_level_keys(&self) -> usize {
        self.tree.len()
    }

    /// Distinct language tags, in processing order.
    pub fn languages(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for source in &self.sources {
            if !seen.contains(&source.lang.as_str()) {
                seen.push(&source.lang);
            }
        }
        seen
    }
}

/// A file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub lang: String,
    pub path: PathBuf,
}

/// Runs adapter, validator and merge engine over every file of a format.
#[derive(Debug, Clone)]
pub struct MergeDriver {
    format: Format,
    duplicates: DuplicatePolicy,
}

impl MergeDriver {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Set how files sharing a language tag are handled
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// List matching files directly inside `dir`, sorted by file name.
    ///
    /// Duplicate language tags are rejected here, before any file is read,
    /// unless the policy is [`DuplicatePolicy::LastWins`].
    pub fn discover(&self, dir: &Path) -> Result<Vec<Discovered>, MergeError> {
        if !dir.is_dir() {
            return Err(MergeError::NotADirectory(dir.to_path_buf()));
        }
        let globs = self.glob_set()?;

        let mut found = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !globs.is_match(entry.file_name()) {
                continue;
            }
            let path = entry.into_path();
            let lang = language_tag(&path)?;

            if let Some(first) = seen.get(&lang) {
                match self.duplicates {
                    DuplicatePolicy::Error => {
                        return Err(MergeError::DuplicateLanguage {
                            lang,
                            first: first.clone(),
                            second: path,
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        warn!(
                            lang = %lang,
                            first = %first.display(),
                            second = %path.display(),
                            "duplicate language tag, later file wins"
                        );
                    }
                }
            } else {
                seen.insert(lang.clone(), path.clone());
            }

            found.push(Discovered { lang, path });
        }

        Ok(found)
    }

    /// Merge every matching file in `dir`.
    pub fn run(&self, dir: &Path) -> Result<MergeReport, MergeError> {
        let files = self.discover(dir)?;
        if files.is_empty() {
            warn!(
                dir = %dir.display(),
                format = self.format.name(),
                "no input files found"
            );
        }

        let loader = self.format.loader();
        let mut merger = Merger::new();
        let mut sources = Vec::with_capacity(files.len());

        for Discovered { lang, path } in files {
            let loaded = loader.load(&path)?;
            let label = path.display().to_string();

            let tree = Tree::from_document(loaded.document, &label)?;
            debug!(file = %label, lang = %lang, keys = tree.len(), "loaded");

            merger.fold(&tree, &lang, &label)?;
            sources.push(SourceRecord {
                lang,
                path,
                sha256: loaded.sha256,
            });
        }

        info!(
            files = sources.len(),
            languages = merger.languages().len(),
            format = self.format.name(),
            "merge complete"
        );

        Ok(MergeReport {
            tree: merger.into_tree(),
            sources,
        })
    }

    fn glob_set(&self) -> Result<GlobSet, MergeError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in self.format.patterns() {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }
}
