use thiserror::Error;

use crate::joint::CalcKind;
use crate::pose::LandmarkGroup;

/// Joint catalog, engine setting and lookup errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("joint id must not be empty")]
    EmptyId,

    #[error("duplicate joint id '{0}'")]
    DuplicateId(String),

    #[error("joint '{id}': {kind:?} needs {expected} landmark indices, got {actual}")]
    Arity {
        id: String,
        kind: CalcKind,
        expected: usize,
        actual: usize,
    },

    #[error("joint '{id}': landmark index {index} out of range for {group:?} (max {max})")]
    IndexOutOfRange {
        id: String,
        group: LandmarkGroup,
        index: usize,
        max: usize,
    },

    #[error("joint '{id}': thresholds must be finite with good >= fair >= poor (got {good}/{fair}/{poor})")]
    Thresholds {
        id: String,
        good: f32,
        fair: f32,
        poor: f32,
    },

    #[error("engine setting {field} = {value} is invalid (expected {expected})")]
    EngineSetting {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("unknown joint id '{0}'")]
    UnknownJoint(String),
}

/// Session report export errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
