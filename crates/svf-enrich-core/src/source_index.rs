//! Filename resolution against a source tree.
//!
//! SVF locations name a file only by its basename. [`SourceIndex`] walks the
//! source root once, indexes every file by name, and maps a reported
//! `(file, line, column, function)` to a single absolute path. When several
//! files share the name, each candidate is opened and checked for structural
//! agreement with the report:
//!
//! - it has at least `line` lines,
//! - line `line` is at least `column` characters long,
//! - the reported function name appears somewhere in lines `1..=line`.
//!
//! The tree is treated as a snapshot: files added after [`SourceIndex::build`]
//! are not seen.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::EnrichError;
use crate::source_file::SourceFile;

/// A reported location to resolve.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    /// Filename as reported. Usually a bare basename; a relative path such
    /// as `src/list.c` is matched as a path suffix.
    pub file: &'a str,
    pub line: u32,
    /// `None` skips the column check.
    pub column: Option<u32>,
    /// Empty or `None` skips the function check.
    pub function_hint: Option<&'a str>,
}

/// Outcome of resolving a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one file fits; the path is absolute.
    Resolved(PathBuf),
    /// More than one file fits equally well.
    Ambiguous { candidates: usize },
    /// No file of that name, or none that fits the location.
    NotFound,
}

/// Basename index over a source root.
#[derive(Debug, Clone)]
pub struct SourceIndex {
    root: PathBuf,
    by_name: HashMap<OsString, Vec<PathBuf>>,
}

impl SourceIndex {
    /// Walk `root` and index every file under it.
    ///
    /// Fails only when the root itself cannot be read; unreadable entries
    /// below it are logged and skipped.
    pub fn build(root: &Path) -> Result<Self, EnrichError> {
        let root = root.canonicalize().map_err(|source| EnrichError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let mut by_name: HashMap<OsString, Vec<PathBuf>> = HashMap::new();
        let mut files = 0usize;

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry in source tree");
                    continue;
                }
            };

            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            files += 1;
            by_name
                .entry(entry.file_name().to_os_string())
                .or_default()
                .push(entry.into_path());
        }

        tracing::debug!(root = %root.display(), files, "indexed source tree");
        Ok(Self { root, by_name })
    }

    /// Canonical source root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All indexed files matching the reported name, in walk order.
    pub fn candidates(&self, file: &str) -> Vec<&Path> {
        let reported = Path::new(file);
        let Some(name) = reported.file_name() else {
            return Vec::new();
        };
        let multi_component = reported.components().nth(1).is_some();

        self.by_name
            .get(name)
            .map(|paths| {
                paths
                    .iter()
                    .map(PathBuf::as_path)
                    .filter(|path| !multi_component || path.ends_with(reported))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve a reported location to a single file.
    pub fn resolve(&self, query: &Query<'_>) -> Resolution {
        let candidates = self.candidates(query.file);

        match candidates.as_slice() {
            [] => Resolution::NotFound,
            [only] => Resolution::Resolved(only.to_path_buf()),
            many => {
                let fitting: Vec<&Path> = many
                    .iter()
                    .copied()
                    .filter(|path| fits(path, query))
                    .collect();

                tracing::debug!(
                    file = query.file,
                    candidates = many.len(),
                    fitting = fitting.len(),
                    "disambiguated duplicate filename"
                );

                match fitting.as_slice() {
                    [] => Resolution::NotFound,
                    [only] => Resolution::Resolved(only.to_path_buf()),
                    more => Resolution::Ambiguous {
                        candidates: more.len(),
                    },
                }
            }
        }
    }
}

/// Whether `path` is structurally consistent with the reported location.
fn fits(path: &Path, query: &Query<'_>) -> bool {
    let source = match SourceFile::read(path) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot read candidate file");
            return false;
        }
    };

    if source.line(query.line).is_none() {
        return false;
    }
    if let Some(column) = query.column {
        if !source.has_position(query.line, column) {
            return false;
        }
    }
    match query.function_hint {
        Some(hint) if !hint.is_empty() => source.mentions_before(hint, query.line),
        _ => true,
    }
}
