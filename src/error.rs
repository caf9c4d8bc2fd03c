//! Ошибки конвейера анализа

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Input file '{}' is missing or unreadable: {source}", path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Column '{0}' was not found in the table")]
    ColumnNotFound(String),

    #[error("Degenerate column: {0}")]
    DegenerateColumn(String),

    #[error("Empty partition: {0}")]
    EmptyPartition(String),

    #[error("{0} is not fitted")]
    NotFitted(&'static str),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
