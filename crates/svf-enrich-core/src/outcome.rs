//! Per-warning enrichment result.
//!
//! The enricher hands back every record wrapped in an [`Outcome`] instead of
//! flagging it in place, so callers can branch on success without reading
//! string fields. [`Outcome::into_record`] writes the status back into the
//! SVF fields for serialization.

use std::fmt;

use serde::Serialize;

use crate::report::{TransformStatus, WarningRecord};

/// Why a warning could not be enriched. Serialized as the
/// `TransformMessage` strings downstream tooling matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FailureReason {
    #[serde(rename = "No Such File")]
    NoSuchFile,
    #[serde(rename = "Duplicated Files Found")]
    DuplicatedFiles,
    #[serde(rename = "Cannot Infer VarName")]
    CannotInferVarName,
    #[serde(rename = "No Such File In Conditions Analysis")]
    NoSuchFileInConditions,
    #[serde(rename = "Duplicated Files Found In Conditions Analysis")]
    DuplicatedFilesInConditions,
    #[serde(rename = "Cannot Excerpt Code In Conditions Analysis")]
    CannotExcerptInConditions,
}

impl FailureReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoSuchFile => "No Such File",
            Self::DuplicatedFiles => "Duplicated Files Found",
            Self::CannotInferVarName => "Cannot Infer VarName",
            Self::NoSuchFileInConditions => "No Such File In Conditions Analysis",
            Self::DuplicatedFilesInConditions => "Duplicated Files Found In Conditions Analysis",
            Self::CannotExcerptInConditions => "Cannot Excerpt Code In Conditions Analysis",
        }
    }

    /// Raised while handling a partial leak's conditional free paths.
    pub fn is_conditional(self) -> bool {
        matches!(
            self,
            Self::NoSuchFileInConditions
                | Self::DuplicatedFilesInConditions
                | Self::CannotExcerptInConditions
        )
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A record after the pipeline, tagged with how far it got.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(WarningRecord),
    /// The record keeps whatever was filled in before the failure.
    Failure(WarningRecord, FailureReason),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            Self::Success(_) => None,
            Self::Failure(_, reason) => Some(*reason),
        }
    }

    pub fn record(&self) -> &WarningRecord {
        match self {
            Self::Success(record) | Self::Failure(record, _) => record,
        }
    }

    /// Unwrap the record with `SuccessTransform` / `TransformMessage` set.
    pub fn into_record(self) -> WarningRecord {
        match self {
            Self::Success(mut record) => {
                record.status = Some(TransformStatus::Success);
                record.message.clear();
                record
            }
            Self::Failure(mut record, reason) => {
                record.status = Some(TransformStatus::Failure);
                record.message = reason.message().to_string();
                record
            }
        }
    }
}
