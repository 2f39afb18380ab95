use thiserror::Error;

/// Everything that can abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing expected column `{column}`")]
    MissingColumn { column: String },

    #[error("row {row}: cannot parse timestamp {value:?}")]
    Timestamp { row: usize, value: String },

    #[error("row {row}: column `{column}` has non-numeric value {value:?}")]
    Number {
        row: usize,
        column: String,
        value: String,
    },

    #[error("dataset contains no orders")]
    EmptyDataset,

    #[error("failed to render {chart}: {message}")]
    Render { chart: String, message: String },
}
