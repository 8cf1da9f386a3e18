//! Configuration for report enrichment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which column the resolver checks when disambiguating the file of a
/// conditional free path.
///
/// Branch locations carry no column of their own. SVF reports have always
/// been enriched by borrowing the primary warning's column for this check,
/// which may not describe the branch line at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchColumn {
    /// Reuse the primary warning's column (historical behaviour).
    Primary,
    /// Skip the column check for branch lines.
    Ignore,
}

/// Options for report enrichment.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `root-dir`, `copy-range`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnrichOptions {
    /// Root of the source tree that bare filenames are resolved against.
    pub root_dir: PathBuf,
    /// Number of lines copied on each side of the warning line.
    pub copy_range: usize,
    /// Treat identifiers without lowercase letters as macros or constants
    /// and keep them out of the inferred variable names.
    pub caps_as_constants: bool,
    /// Column policy for conditional free path resolution.
    pub branch_column: BranchColumn,
    /// Keywords excluded from inferred names on top of the C/C++ set.
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./"),
            copy_range: 5,
            caps_as_constants: true,
            branch_column: BranchColumn::Primary,
            extra_keywords: Vec::new(),
        }
    }
}
