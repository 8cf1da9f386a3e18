//! SVF report model — the subset of the report schema enrichment touches.
//!
//! Keys the enricher does not understand are kept in `extra` maps so that a
//! report written back out still carries everything SVF emitted (`Events`,
//! per-kind payloads, and so on).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A whole SVF report: warnings in analyzer order.
pub type Report = Vec<WarningRecord>;

/// Category of defect reported by SVF. Kinds from other SVF checkers
/// (`"File Never Close"`, ...) are kept verbatim in [`DefectKind::Other`]
/// and enriched like any non-partial-leak warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefectKind {
    #[serde(rename = "Never Free")]
    NeverFree,
    #[serde(rename = "Double Free")]
    DoubleFree,
    #[serde(rename = "Use After Free")]
    UseAfterFree,
    #[serde(rename = "Partial Leak")]
    PartialLeak,
    #[serde(untagged)]
    Other(String),
}

/// Primary source location of a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Bare filename on input, absolute path once resolved.
    #[serde(rename = "fl")]
    pub file: String,
    /// 1-based line.
    #[serde(rename = "ln")]
    pub line: u32,
    #[serde(rename = "cl", default)]
    pub column: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Location of a branch in a conditional free path. SVF gives no column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchLocation {
    #[serde(rename = "fl")]
    pub file: String,
    #[serde(rename = "ln")]
    pub line: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One branch of a partial leak along which the object is (or is not) freed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalFreePath {
    #[serde(rename = "BranchLoc")]
    pub branch_location: BranchLocation,
    #[serde(rename = "BranchCond", default, skip_serializing_if = "Value::is_null")]
    pub branch_condition: Value,
    /// The trimmed branch line, present once the branch file is resolved.
    #[serde(rename = "CodeNear", default, skip_serializing_if = "Option::is_none")]
    pub code_near: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Kind-specific warning payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(
        rename = "ConditionalFreePath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conditional_free_paths: Option<Vec<ConditionalFreePath>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whether enrichment of a record succeeded, serialized as SVF-style
/// `"True"` / `"False"` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformStatus {
    #[serde(rename = "True")]
    Success,
    #[serde(rename = "False")]
    Failure,
}

/// A single SVF warning plus the fields enrichment adds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningRecord {
    #[serde(rename = "DefectType")]
    pub defect_kind: DefectKind,
    #[serde(rename = "Location")]
    pub location: Location,
    #[serde(rename = "Function", default)]
    pub function: String,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    /// Likely variable names at the warning line, left to right.
    #[serde(rename = "Var", default)]
    pub var: Vec<String>,
    /// Trimmed source lines around the warning line.
    #[serde(rename = "CodeNear", default)]
    pub code_near: Vec<String>,
    #[serde(rename = "SuccessTransform", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransformStatus>,
    /// Failure reason, empty on success.
    #[serde(rename = "TransformMessage", default)]
    pub message: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WarningRecord {
    /// Conditional free paths of a partial leak. `None` for every other kind,
    /// even if the description happens to carry the key.
    pub fn conditional_free_paths_mut(&mut self) -> Option<&mut Vec<ConditionalFreePath>> {
        if self.defect_kind != DefectKind::PartialLeak {
            return None;
        }
        self.description
            .as_mut()
            .and_then(|d| d.conditional_free_paths.as_mut())
    }

    /// Reset the enrichment fields to their pre-pipeline state.
    pub(crate) fn clear_enrichment(&mut self) {
        self.var.clear();
        self.code_near.clear();
        self.status = None;
        self.message.clear();
    }
}
