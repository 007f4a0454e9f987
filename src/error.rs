// Error taxonomy for the schedule view model.
//
// Only structurally absent top-level resources (the root directory, a term's
// store file) are fatal. Everything below a store is recovered locally by
// dropping or defaulting the offending record/field.
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which level of the hierarchy a failed lookup was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Quarter,
    Department,
    Course,
    Section,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Quarter => write!(f, "quarter"),
            LookupKind::Department => write!(f, "department"),
            LookupKind::Course => write!(f, "course"),
            LookupKind::Section => write!(f, "section"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("store root directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),

    #[error("no store for term '{term}' at {path:?}")]
    StoreNotFound { term: String, path: PathBuf },

    #[error("malformed record in {context}: {reason}")]
    MalformedRecord { context: String, reason: String },

    #[error("unknown {kind} '{key}'")]
    Lookup { kind: LookupKind, key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn lookup(kind: LookupKind, key: &str) -> Self {
        ModelError::Lookup {
            kind,
            key: key.to_string(),
        }
    }

    pub fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::MalformedRecord {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, ModelError::Lookup { .. })
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
