use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    /// Column names or order differ from the fixed listing schema
    #[error("column layout mismatch\n  expected: {expected:?}\n  actual:   {actual:?}")]
    Schema {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Neighbourhood group values differ from the five known boroughs
    #[error("neighbourhood groups mismatch: unexpected {unexpected:?}, missing {missing:?}")]
    Category {
        unexpected: Vec<String>,
        missing: Vec<String>,
    },

    /// A record carries a value outside its allowed range (price or coordinates)
    #[error("row {row}: '{column}' value {value} outside [{min}, {max}]")]
    ValueRange {
        column: &'static str,
        row: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Neighbourhood distribution drifted away from the reference dataset
    #[error(
        "KL divergence {divergence} not below threshold {threshold}\n  candidate: {candidate}\n  reference: {reference}"
    )]
    Drift {
        divergence: f64,
        threshold: f64,
        candidate: String,
        reference: String,
    },

    /// Table size is outside the expected strict bounds
    #[error("row count {rows} outside expected range ({min}, {max}), bounds excluded")]
    Size { rows: usize, min: usize, max: usize },

    /// An expected column is missing from the input table
    #[error("column '{0}' not found in table")]
    DataFormat(String),

    /// A column is present but not of the type its name requires
    #[error("column '{column}' is not of expected type {expected}")]
    ColumnType { column: String, expected: String },

    /// The Arrow kernel produced an error (e.g., unsupported cast)
    #[error("arrow computation error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// CSV reading or IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
