use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::Category;

/// One record field that failed sanitization. Recoverable: the record is
/// skipped and the condition surfaces in the run's warnings list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' has malformed value '{token}': {reason}")]
pub struct MalformedValue {
    pub field: &'static str,
    pub token: String,
    pub reason: &'static str,
}

impl MalformedValue {
    pub fn new(field: &'static str, token: impl Into<String>, reason: &'static str) -> Self {
        Self {
            field,
            token: token.into(),
            reason,
        }
    }
}

/// Non-fatal conditions collected during a run and returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// A record was skipped because one of its fields failed sanitization.
    MalformedRecord {
        row: usize,
        field: &'static str,
        token: String,
        reason: &'static str,
    },
    /// A secondary input file could not be fetched; the run continued
    /// without it.
    AuxiliaryUnavailable { url: String, reason: String },
}

impl RunWarning {
    pub fn malformed(row: usize, value: MalformedValue) -> Self {
        Self::MalformedRecord {
            row,
            field: value.field,
            token: value.token,
            reason: value.reason,
        }
    }
}

/// Fatal run-level failures. None of these leave a partial output file
/// behind.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("transport failure fetching {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("unsupported payload shape for {name}: {reason}")]
    UnsupportedPayload { name: String, reason: String },

    #[error("{category} feed unusable: all {total} records malformed")]
    AllRecordsMalformed { category: Category, total: usize },

    #[error("table write failed for {path:?}")]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Rejected caller-supplied date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("date must be YYYY-MM-DD: '{value}'")]
pub struct InvalidDay {
    pub value: String,
}
