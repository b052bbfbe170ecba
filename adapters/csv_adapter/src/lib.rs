use csv::ReaderBuilder;
use log::debug;
use sentiment_core::domain::{Cell, Dataset};
use sentiment_core::ports::{DatasetReader, PipelineError, Result};

/// CSV implementation of the DatasetReader trait
pub struct CsvDatasetReader {
    path: String,
}

impl CsvDatasetReader {
    /// Creates a new CsvDatasetReader for the given file path
    pub fn new(path: String) -> Self {
        Self { path }
    }

    fn read_error(&self, err: csv::Error) -> PipelineError {
        PipelineError::Read {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

/// Value type shared by every non-empty field of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    fn to_cell(self, raw: &str) -> Cell {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match self {
            ColumnKind::Integer => trimmed.parse().map(Cell::Integer).unwrap_or(Cell::Empty),
            ColumnKind::Float => trimmed.parse().map(Cell::Float).unwrap_or(Cell::Empty),
            ColumnKind::Text => Cell::from_raw(raw),
        }
    }
}

/// A column is numeric only when all of its non-empty fields parse as numbers.
/// Columns with no values at all stay text.
fn infer_column_kind(rows: &[Vec<String>], col: usize) -> ColumnKind {
    let mut values = rows
        .iter()
        .filter_map(|row| row.get(col))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .peekable();
    if values.peek().is_none() {
        return ColumnKind::Text;
    }

    let mut kind = ColumnKind::Integer;
    for value in values {
        if kind == ColumnKind::Integer && value.parse::<i64>().is_ok() {
            continue;
        }
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => kind = ColumnKind::Float,
            _ => return ColumnKind::Text,
        }
    }
    kind
}

impl DatasetReader for CsvDatasetReader {
    fn read_dataset(&self) -> Result<Dataset> {
        // Rows may be shorter or longer than the header; Dataset pads or drops cells
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.read_error(e))?;

        let columns = reader
            .headers()
            .map_err(|e| self.read_error(e))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.read_error(e))?;
            raw_rows.push(record.iter().map(str::to_string).collect());
        }

        let mut dataset = Dataset::new(columns);
        let kinds: Vec<ColumnKind> = (0..dataset.columns().len())
            .map(|col| infer_column_kind(&raw_rows, col))
            .collect();
        for raw in &raw_rows {
            let row = kinds
                .iter()
                .enumerate()
                .map(|(col, kind)| kind.to_cell(raw.get(col).map(String::as_str).unwrap_or("")))
                .collect();
            dataset.push_row(row);
        }

        debug!("Loaded {} rows from {}", dataset.len(), self.path);
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_dataset_keeps_order_and_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.csv");
        fs::write(
            &path,
            "Text,Hashtags,Timestamp\n\
             \"Hello, world\",#a #b,2023-05-01 14:30:00\n\
             second,,\n",
        )
        .unwrap();

        let reader = CsvDatasetReader::new(path.to_string_lossy().into_owned());
        let ds = reader.read_dataset().unwrap();

        assert_eq!(ds.columns(), &["Text", "Hashtags", "Timestamp"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0][0], Cell::Text("Hello, world".into()));
        assert_eq!(ds.rows()[1][1], Cell::Empty);
    }

    #[test]
    fn test_read_dataset_pads_short_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.csv");
        fs::write(&path, "\u{feff}Text,Likes\nonly text\n").unwrap();

        let ds = CsvDatasetReader::new(path.to_string_lossy().into_owned())
            .read_dataset()
            .unwrap();

        assert_eq!(ds.columns(), &["Text", "Likes"]);
        assert_eq!(ds.rows()[0], vec![Cell::Text("only text".into()), Cell::Empty]);
    }

    #[test]
    fn test_read_dataset_infers_numeric_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typed.csv");
        fs::write(
            &path,
            "Text,Likes,Score,Zip\n\
             first,10,0.5,123\n\
             second,,2,AB-1\n\
             third,7,1e3,456\n",
        )
        .unwrap();

        let ds = CsvDatasetReader::new(path.to_string_lossy().into_owned())
            .read_dataset()
            .unwrap();

        assert_eq!(ds.rows()[0][1], Cell::Integer(10));
        assert_eq!(ds.rows()[1][1], Cell::Empty);
        assert_eq!(ds.rows()[1][2], Cell::Float(2.0));
        assert_eq!(ds.rows()[2][2], Cell::Float(1000.0));
        assert_eq!(ds.rows()[0][3], Cell::Text("123".into()));
        assert_eq!(ds.rows()[0][0], Cell::Text("first".into()));
    }

    #[test]
    fn test_infer_column_kind() {
        let rows = vec![vec!["12".to_string()], vec!["7".to_string()]];
        assert_eq!(infer_column_kind(&rows, 0), ColumnKind::Integer);
        assert_eq!(ColumnKind::Integer.to_cell("12").as_text(), "12");
        assert_eq!(infer_column_kind(&rows, 1), ColumnKind::Text);
    }

    #[test]
    fn test_read_dataset_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let err = CsvDatasetReader::new(path.to_string_lossy().into_owned())
            .read_dataset()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Read { .. }));
    }
}
