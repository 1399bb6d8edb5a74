use thiserror::Error;

/// Everything that can abort an analysis run.
///
/// There is no partial-success mode: the first error stops the pipeline and
/// travels up to `main`.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("header is missing expected column(s): {}", .missing.join(", "))]
    HeaderMismatch { missing: Vec<String> },
    #[error("line {line}: row has {found} field(s), column {needed} is required")]
    MalformedRow { line: u64, needed: usize, found: usize },
    #[error("line {line}: column '{column}' is not a number: {value:?}")]
    ParseFloat {
        column: String,
        line: u64,
        value: String,
    },
    #[error("cannot correlate {points} point(s): {reason}")]
    DegenerateSeries { points: usize, reason: &'static str },
    #[error("score series differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("config error: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("chart error: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
