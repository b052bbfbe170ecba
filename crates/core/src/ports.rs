use crate::domain::Dataset;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("required column '{0}' not found in dataset")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

pub trait DatasetReader {
    // Loads the whole input table into memory
    fn read_dataset(&self) -> Result<Dataset>;
}

/// Exports one table as a spreadsheet, header row first and no index column.
/// Cells keep their type: numbers and dates are not written as text.
pub trait SpreadsheetWriter {
    fn write(&self, dataset: &Dataset) -> Result<()>;
}

/// Scores text polarity in the range [-1, 1]. Text with no scorable words yields 0.
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}
