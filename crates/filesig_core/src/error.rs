use std::fmt;
use thiserror::Error;

/// The record field a [`ParseError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Header,
    Trailer,
    Offset,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Description => "description",
            Field::Header => "header",
            Field::Trailer => "trailer",
            Field::Offset => "offset",
        };
        f.write_str(name)
    }
}

/// A catalog record that could not be turned into a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {record:?}: invalid {field}: {reason}")]
pub struct ParseError {
    pub field: Field,
    pub record: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(field: Field, record: &str, reason: impl Into<String>) -> Self {
        Self {
            field,
            record: record.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog record: {0}")]
    Parse(#[from] ParseError),

    #[error("Malformed catalog document: {0}")]
    Document(#[from] serde_json::Error),
}

impl CoreError {
    /// True for failures caused by the catalog rather than the queried file.
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, CoreError::Parse(_) | CoreError::Document(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
