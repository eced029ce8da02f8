//! Error types for ingestion, GEDCOM reading, and tree construction.
//!
//! Only conditions that abort a run live here. Recoverable data
//! inconsistencies are reported as [`crate::tree::Diagnostic`] values instead.

use std::fmt;

use thiserror::Error;

/// Which kind of entity an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Individual,
    Family,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Individual => "individual",
            EntityKind::Family => "family",
        }
    }

    /// Prefix used for remapped identifiers (`I1`, `F1`, ...).
    pub fn id_prefix(self) -> char {
        match self {
            EntityKind::Individual => 'I',
            EntityKind::Family => 'F',
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal errors raised while ingesting a record graph or building the tree.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A raw identifier was never registered with the remapper.
    ///
    /// Either the data references an id that does not exist, or a caller
    /// queried before registering every record.
    #[error("{kind} identifier that should be mapped could not be found: {raw_id}")]
    Lookup { kind: EntityKind, raw_id: String },

    /// A full-name entry is neither a string nor an object with a string `Value`.
    #[error("couldn't extract full name of individual {individual}: unsupported entry {entry}")]
    Extraction { individual: String, entry: String },

    /// The record graph does not follow the expected schema.
    #[error("malformed {record} record: {reason}")]
    MalformedRecord { record: &'static str, reason: String },
}

impl TransformError {
    pub fn lookup(kind: EntityKind, raw_id: impl Into<String>) -> Self {
        TransformError::Lookup { kind, raw_id: raw_id.into() }
    }

    pub fn malformed(record: &'static str, reason: impl Into<String>) -> Self {
        TransformError::MalformedRecord { record, reason: reason.into() }
    }
}

/// Convenience result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors raised while reading GEDCOM text.
#[derive(Debug, Error)]
pub enum GedcomError {
    /// A line could not be split into level, optional xref, tag and value.
    #[error("GEDCOM syntax error on line {line}: {reason}")]
    Syntax { line: usize, reason: String },
}

pub type GedcomResult<T> = Result<T, GedcomError>;
