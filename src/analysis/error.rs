use std::path::PathBuf;
use thiserror::Error;

/// Typed failures for the descriptor/response analysis pipeline. The tables
/// are hand-authored, so every one of these is a condition a user can hit
/// with an editor typo.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to open table {path}: {source}")]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row at line {line} has {found} column(s), expected {expected}")]
    MalformedRow {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("line {line}, column {column}: unrecognized {kind} value '{value}'")]
    BadValue {
        line: usize,
        column: usize,
        kind: &'static str,
        value: String,
    },

    #[error("descriptor table has {descriptors} row(s) but response table has {responses}")]
    LengthMismatch {
        descriptors: usize,
        responses: usize,
    },

    #[error("table read error: {0}")]
    Read(#[from] csv::Error),
}
