use thiserror::Error;

/// Structural defects in the source sheet. Every variant aborts the conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Claims row {row}: invalid indent marker '{marker}'")]
    InvalidMarker { row: usize, marker: String },

    #[error("Claims row {row}: marker '{marker}' references a missing parent claim")]
    MissingParent { row: usize, marker: String },

    #[error("Application events row {row}: unrecognized date '{value}'")]
    InvalidDate { row: usize, value: String },
}
