//! Error types for report enrichment.
//!
//! These are batch-fatal. Per-warning problems (missing or duplicated source
//! files) are not errors: they end up in the record as a
//! [`FailureReason`](crate::outcome::FailureReason).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source root walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),
}
