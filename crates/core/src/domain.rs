use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

pub const TEXT_COLUMN: &str = "Text";
pub const HASHTAGS_COLUMN: &str = "Hashtags";
pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const CLEANED_TEXT_COLUMN: &str = "Cleaned_Text";
pub const SENTIMENT_COLUMN: &str = "Calculated_Sentiment";
pub const DATE_COLUMN: &str = "Date";
pub const HOUR_COLUMN: &str = "Hour";
pub const HASHTAG_COLUMN: &str = "Hashtag";
pub const FREQUENCY_COLUMN: &str = "Frequency";

/// Number of hashtags kept in the frequency table
pub const HASHTAG_LIMIT: usize = 20;

/// A single table cell. `Empty` is the missing-value marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Empty,
}

impl Cell {
    /// Builds a text cell, treating the empty string as a missing value
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(raw.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Coerces the cell to a string; missing values become ""
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Integer(n) => n.to_string(),
            Cell::Float(n) => n.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// In-memory table of social posts. Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with `Cell::Empty` and dropping extra cells
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the cells of a column in row order
    pub fn column_values(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Appends a derived column. An existing column with the same name is
    /// overwritten in place so its position is kept.
    ///
    /// `values` must hold one cell per row.
    pub fn push_column(&mut self, name: &str, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }
}

/// Coarse sentiment label assigned to each post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Maps a polarity score to a label. Exactly zero is neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Sentiment::Positive
        } else if score < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagCount {
    pub hashtag: String,
    pub frequency: usize,
}

/// Hashtags ordered by descending frequency
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashtagTable {
    pub entries: Vec<HashtagCount>,
}

impl HashtagTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Two-column view (`Hashtag`, `Frequency`); columns exist even when empty
    pub fn to_dataset(&self) -> Dataset {
        let mut dataset = Dataset::new(vec![
            HASHTAG_COLUMN.to_string(),
            FREQUENCY_COLUMN.to_string(),
        ]);
        for entry in &self.entries {
            dataset.push_row(vec![
                Cell::Text(entry.hashtag.clone()),
                Cell::Integer(entry.frequency as i64),
            ]);
        }
        dataset
    }
}

/// Per-label counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentSummary {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

impl fmt::Display for SentimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} posts ({} positive, {} negative, {} neutral)",
            self.total(),
            self.positive,
            self.negative,
            self.neutral
        )
    }
}

/// Everything a single pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub dataset: Dataset,
    pub hashtags: HashtagTable,
    pub summary: SentimentSummary,
}
