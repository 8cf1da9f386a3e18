//! Warning enrichment pipeline.
//!
//! Each record goes through, in order:
//!
//! 1. resolve `Location.fl` to an absolute path,
//! 2. infer variable names from the warning line,
//! 3. copy the surrounding lines,
//! 4. for partial leaks, resolve and excerpt every conditional free path.
//!
//! The first step that fails ends the record with a [`FailureReason`]; the
//! batch itself always runs to the end.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::config::{BranchColumn, EnrichOptions};
use crate::error::EnrichError;
use crate::lexicon::Lexicon;
use crate::outcome::{FailureReason, Outcome};
use crate::report::{Report, WarningRecord};
use crate::source_file::SourceFile;
use crate::source_index::{Query, Resolution, SourceIndex};

/// Counts over one enriched report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Failures raised on a partial leak's conditional free paths, after the
    /// primary location was enriched.
    pub conditional_failures: usize,
    pub by_reason: BTreeMap<FailureReason, usize>,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome.reason() {
            None => self.succeeded += 1,
            Some(reason) => {
                self.failed += 1;
                if reason.is_conditional() {
                    self.conditional_failures += 1;
                }
                *self.by_reason.entry(reason).or_default() += 1;
            }
        }
    }
}

/// Result of enriching a whole report.
#[derive(Debug, Clone)]
pub struct EnrichedReport {
    /// Records in input order, status fields set.
    pub records: Report,
    pub summary: Summary,
}

/// Enriches warnings against one source tree.
#[derive(Debug, Clone)]
pub struct Enricher {
    index: SourceIndex,
    lexicon: Lexicon,
    options: EnrichOptions,
}

impl Enricher {
    /// Index `options.root_dir` and set up the C/C++ lexicon plus any extra
    /// keywords.
    pub fn new(options: EnrichOptions) -> Result<Self, EnrichError> {
        let index = SourceIndex::build(&options.root_dir)?;
        let lexicon = Lexicon::c_family().with_keywords(options.extra_keywords.iter().cloned());
        Ok(Self::with_parts(index, lexicon, options))
    }

    /// Assemble an enricher from a prebuilt index and lexicon.
    pub fn with_parts(index: SourceIndex, lexicon: Lexicon, options: EnrichOptions) -> Self {
        Self {
            index,
            lexicon,
            options,
        }
    }

    pub fn index(&self) -> &SourceIndex {
        &self.index
    }

    /// Enrich every record in order.
    pub fn enrich_all(&self, report: Report) -> EnrichedReport {
        let mut summary = Summary::default();
        let records = report
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                let outcome = self.enrich(position, record);
                summary.record(&outcome);
                outcome.into_record()
            })
            .collect();

        EnrichedReport { records, summary }
    }

    /// Run the pipeline on one record. `position` is the record's index in
    /// the report and is only used for logging.
    pub fn enrich(&self, position: usize, mut record: WarningRecord) -> Outcome {
        record.clear_enrichment();

        let resolution = self.index.resolve(&Query {
            file: &record.location.file,
            line: record.location.line,
            column: Some(record.location.column),
            function_hint: Some(record.function.as_str()),
        });
        let path = match resolution {
            Resolution::Resolved(path) => path,
            Resolution::NotFound => return fail(position, record, FailureReason::NoSuchFile),
            Resolution::Ambiguous { .. } => {
                return fail(position, record, FailureReason::DuplicatedFiles)
            }
        };
        record.location.file = path.to_string_lossy().into_owned();

        let source = match SourceFile::read(&path) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot read resolved file");
                return fail(position, record, FailureReason::CannotInferVarName);
            }
        };
        let Some(line) = source.line(record.location.line) else {
            tracing::debug!(
                line = record.location.line,
                lines = source.line_count(),
                "warning line outside file"
            );
            return fail(position, record, FailureReason::CannotInferVarName);
        };

        record.var = self
            .lexicon
            .filter_names(line, self.options.caps_as_constants);
        record.code_near = source.excerpt(record.location.line, self.options.copy_range);
        drop(source);

        if let Err(reason) = self.enrich_conditional_paths(position, &mut record) {
            return Outcome::Failure(record, reason);
        }

        tracing::debug!(warning = position, file = %record.location.file, "enriched warning");
        Outcome::Success(record)
    }

    /// Resolve and excerpt a partial leak's conditional free paths, stopping
    /// at the first one that fails. Paths handled before the failure keep
    /// their resolved file and excerpt.
    fn enrich_conditional_paths(
        &self,
        position: usize,
        record: &mut WarningRecord,
    ) -> Result<(), FailureReason> {
        // Branches have no column of their own.
        let column = match self.options.branch_column {
            BranchColumn::Primary => Some(record.location.column),
            BranchColumn::Ignore => None,
        };
        let Some(paths) = record.conditional_free_paths_mut() else {
            return Ok(());
        };

        for (branch, path) in paths.iter_mut().enumerate() {
            let location = &mut path.branch_location;
            let resolution = self.index.resolve(&Query {
                file: &location.file,
                line: location.line,
                column,
                function_hint: None,
            });

            let reason = match resolution {
                Resolution::Resolved(resolved) => {
                    location.file = resolved.to_string_lossy().into_owned();
                    match branch_line(&resolved, location.line) {
                        Some(text) => {
                            path.code_near = Some(text);
                            continue;
                        }
                        None => FailureReason::CannotExcerptInConditions,
                    }
                }
                Resolution::NotFound => FailureReason::NoSuchFileInConditions,
                Resolution::Ambiguous { .. } => FailureReason::DuplicatedFilesInConditions,
            };

            tracing::warn!(
                warning = position,
                branch,
                file = %location.file,
                line = location.line,
                %reason,
                "conditional free path not enriched"
            );
            return Err(reason);
        }

        Ok(())
    }
}

/// Trimmed line `line` of `path`, if the file can be read and has it.
fn branch_line(path: &Path, line: u32) -> Option<String> {
    match SourceFile::read(path) {
        Ok(source) => source.line(line).map(|text| text.trim().to_string()),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot read branch file");
            None
        }
    }
}

fn fail(position: usize, record: WarningRecord, reason: FailureReason) -> Outcome {
    tracing::warn!(
        warning = position,
        file = %record.location.file,
        %reason,
        "warning not enriched"
    );
    Outcome::Failure(record, reason)
}
