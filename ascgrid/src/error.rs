use thiserror::Error;

#[derive(Error, Debug)]
pub enum AscError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("missing {0} header line")]
    MissingHeader(&'static str),

    #[error("expected {key} header line, found {line:?}")]
    HeaderLine { key: &'static str, line: String },

    #[error("invalid {key} header value {value:?}")]
    HeaderValue { key: &'static str, value: String },

    #[error("missing data row {0}")]
    MissingRow(usize),

    #[error("row {row} ends before column {col}")]
    ShortRow { row: usize, col: usize },

    #[error("invalid sample {value:?} at row {row}, column {col}")]
    Sample {
        row: usize,
        col: usize,
        value: String,
    },

    #[error("window exceeds grid bounds")]
    Bounds,

    #[error("expected {expected} samples, got {found}")]
    SampleCount { expected: usize, found: usize },

    #[error("nothing to merge")]
    EmptyMosaic,

    #[error("cell size mismatch, expected {expected}, found {found}")]
    CellSize { expected: f64, found: f64 },
}
