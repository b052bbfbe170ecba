use crate::domain::{
    Cell, Dataset, HashtagCount, HashtagTable, PipelineReport, Sentiment, SentimentSummary,
    CLEANED_TEXT_COLUMN, DATE_COLUMN, HASHTAGS_COLUMN, HASHTAG_LIMIT, HOUR_COLUMN,
    SENTIMENT_COLUMN, TEXT_COLUMN, TIMESTAMP_COLUMN,
};
use crate::ports::{DatasetReader, PipelineError, PolarityScorer, Result, SpreadsheetWriter};
use crate::utils::{clean_text, parse_timestamp, split_hashtags};
use chrono::Timelike;
use log::{info, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// How many hashtags the frequency table keeps, never more than `HASHTAG_LIMIT`
    pub hashtag_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hashtag_limit: HASHTAG_LIMIT,
        }
    }
}

/// Application service running the post enrichment pipeline:
/// load, clean, classify, aggregate hashtags, extract time features, export.
pub struct SentimentPipelineService {
    dataset_reader: Box<dyn DatasetReader>,
    scorer: Box<dyn PolarityScorer>,
    dataset_writer: Box<dyn SpreadsheetWriter>,
    hashtag_writer: Box<dyn SpreadsheetWriter>,
    config: PipelineConfig,
}

impl SentimentPipelineService {
    /// Creates a new SentimentPipelineService with the given dependencies
    pub fn new(
        dataset_reader: Box<dyn DatasetReader>,
        scorer: Box<dyn PolarityScorer>,
        dataset_writer: Box<dyn SpreadsheetWriter>,
        hashtag_writer: Box<dyn SpreadsheetWriter>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            dataset_reader,
            scorer,
            dataset_writer,
            hashtag_writer,
            config,
        }
    }

    /// Executes every stage once and writes both output tables
    pub fn execute(&self) -> Result<PipelineReport> {
        let dataset = self.dataset_reader.read_dataset()?;
        info!("Columns in dataset: {:?}", dataset.columns());

        let dataset = clean_text_column(dataset)?;
        let (dataset, summary) = classify_sentiment(dataset, self.scorer.as_ref())?;
        let hashtags = top_hashtags(&dataset, self.config.hashtag_limit);
        let dataset = add_time_features(dataset);

        self.dataset_writer.write(&dataset)?;
        self.hashtag_writer.write(&hashtags.to_dataset())?;

        info!("Processed {}", summary);
        Ok(PipelineReport {
            dataset,
            hashtags,
            summary,
        })
    }
}

fn required_column<'a>(dataset: &'a Dataset, name: &str) -> Result<Vec<&'a Cell>> {
    dataset
        .column_values(name)
        .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
}

/// Adds `Cleaned_Text` derived from `Text`
pub fn clean_text_column(mut dataset: Dataset) -> Result<Dataset> {
    let cleaned: Vec<Cell> = required_column(&dataset, TEXT_COLUMN)?
        .into_iter()
        .map(|cell| Cell::Text(clean_text(&cell.as_text())))
        .collect();
    dataset.push_column(CLEANED_TEXT_COLUMN, cleaned);
    Ok(dataset)
}

/// Adds `Calculated_Sentiment` scored from `Cleaned_Text`
pub fn classify_sentiment(
    mut dataset: Dataset,
    scorer: &dyn PolarityScorer,
) -> Result<(Dataset, SentimentSummary)> {
    let mut summary = SentimentSummary::default();
    let labels: Vec<Cell> = required_column(&dataset, CLEANED_TEXT_COLUMN)?
        .into_iter()
        .map(|cell| {
            let sentiment = Sentiment::from_score(scorer.polarity(&cell.as_text()));
            summary.record(sentiment);
            Cell::Text(sentiment.to_string())
        })
        .collect();
    dataset.push_column(SENTIMENT_COLUMN, labels);
    Ok((dataset, summary))
}

/// Counts hashtags across the `Hashtags` column and keeps the `limit` most
/// frequent, capped at `HASHTAG_LIMIT`. Equal counts keep first-seen order.
/// Without the column the table is empty.
pub fn top_hashtags(dataset: &Dataset, limit: usize) -> HashtagTable {
    let Some(cells) = dataset.column_values(HASHTAGS_COLUMN) else {
        warn!("'{}' column not found. Skipping hashtag analysis.", HASHTAGS_COLUMN);
        return HashtagTable::default();
    };

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<HashtagCount> = Vec::new();
    for cell in cells.into_iter().filter(|c| !c.is_empty()) {
        for tag in split_hashtags(&cell.as_text()) {
            match positions.get(&tag) {
                Some(&idx) => entries[idx].frequency += 1,
                None => {
                    positions.insert(tag.clone(), entries.len());
                    entries.push(HashtagCount {
                        hashtag: tag,
                        frequency: 1,
                    });
                }
            }
        }
    }

    // sort_by is stable, ties stay in first-seen order
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    entries.truncate(limit.min(HASHTAG_LIMIT));
    HashtagTable { entries }
}

/// Normalizes `Timestamp` and adds `Date` and `Hour`. Unparseable values are
/// missing in all three columns. Without the column nothing is added.
pub fn add_time_features(mut dataset: Dataset) -> Dataset {
    if !dataset.has_column(TIMESTAMP_COLUMN) {
        warn!("'{}' column not found. Skipping time features.", TIMESTAMP_COLUMN);
        return dataset;
    }

    let parsed: Vec<_> = dataset
        .column_values(TIMESTAMP_COLUMN)
        .unwrap_or_default()
        .into_iter()
        .map(|cell| parse_timestamp(&cell.as_text()))
        .collect();

    let unparsed = parsed.iter().filter(|dt| dt.is_none()).count();
    if unparsed > 0 {
        warn!("{} timestamp value(s) could not be parsed", unparsed);
    }

    let timestamps = parsed
        .iter()
        .map(|dt| match dt {
            Some(dt) => Cell::DateTime(*dt),
            None => Cell::Empty,
        })
        .collect();
    let dates = parsed
        .iter()
        .map(|dt| match dt {
            Some(dt) => Cell::Date(dt.date()),
            None => Cell::Empty,
        })
        .collect();
    let hours = parsed
        .iter()
        .map(|dt| match dt {
            Some(dt) => Cell::Integer(i64::from(dt.hour())),
            None => Cell::Empty,
        })
        .collect();

    dataset.push_column(TIMESTAMP_COLUMN, timestamps);
    dataset.push_column(DATE_COLUMN, dates);
    dataset.push_column(HOUR_COLUMN, hours);
    dataset
}
