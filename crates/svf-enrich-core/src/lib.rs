//! # svf-enrich-core
//!
//! Enrich SVF memory-safety reports (never-free, double-free,
//! use-after-free, partial leak) with the information a reviewer needs to
//! act on them. SVF locates each warning by bare filename, line and column
//! only; for every warning this crate
//!
//! - resolves the filename to one absolute path under a source root,
//!   disambiguating same-named files by line, column and function name,
//! - guesses the variable names on the warning line with a lexical filter,
//! - copies the surrounding source lines,
//! - for partial leaks, does the same for every conditional free path,
//! - stamps `SuccessTransform` / `TransformMessage` with the outcome.
//!
//! ## Example
//!
//! ```no_run
//! use svf_enrich_core::{enrich_report, EnrichOptions, Report};
//!
//! let text = std::fs::read_to_string("report.json").unwrap();
//! let report: Report = serde_json::from_str(&text).unwrap();
//! let enriched = enrich_report(report, &EnrichOptions::default()).unwrap();
//! println!("{} of {} warnings enriched", enriched.summary.succeeded, enriched.summary.total);
//! ```

pub mod config;
pub mod enricher;
pub mod error;
pub mod lexicon;
pub mod outcome;
pub mod report;
pub mod source_file;
pub mod source_index;

pub use config::{BranchColumn, EnrichOptions};
pub use enricher::{EnrichedReport, Enricher, Summary};
pub use error::EnrichError;
pub use lexicon::Lexicon;
pub use outcome::{FailureReason, Outcome};
pub use report::{
    BranchLocation, ConditionalFreePath, DefectKind, Description, Location, Report,
    TransformStatus, WarningRecord,
};
pub use source_index::{Query, Resolution, SourceIndex};

/// Enrich a whole report against `options.root_dir`.
///
/// Records come back in input order. Per-warning failures are recorded in
/// the warnings themselves; only an unusable source root is an error.
pub fn enrich_report(report: Report, options: &EnrichOptions) -> Result<EnrichedReport, EnrichError> {
    let enricher = Enricher::new(options.clone())?;
    tracing::debug!(
        root = %enricher.index().root().display(),
        warnings = report.len(),
        "enriching report"
    );
    Ok(enricher.enrich_all(report))
}
