use clap::Parser;
use csv_adapter::CsvDatasetReader;
use lexicon_adapter::LexiconScorer;
use log::{error, info};
use sentiment_core::application::{PipelineConfig, SentimentPipelineService};
use sentiment_core::ports::{DatasetReader, PolarityScorer, SpreadsheetWriter};
use xlsx_adapter::XlsxWriterAdapter;

/// CLI tool to clean social posts, label their sentiment and export dashboard tables
#[derive(Parser, Debug)]
#[command(name = "social-sentiment")]
#[command(about = "Cleans social media posts, labels sentiment and exports spreadsheets for dashboards")]
struct Cli {
    /// Path to the source CSV dataset (needs a `Text` column)
    #[arg(short = 'i', long = "input", default_value = "sentimentdataset.csv")]
    input: String,

    /// Path where the enriched posts spreadsheet will be written
    #[arg(short = 'o', long = "output", default_value = "cleaned_social_data.xlsx")]
    output: String,

    /// Path where the hashtag frequency spreadsheet will be written
    #[arg(long = "hashtags-output", default_value = "top_hashtags.xlsx")]
    hashtags_output: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Instantiate concrete implementations of secondary adapters
    let dataset_reader: Box<dyn DatasetReader> = Box::new(CsvDatasetReader::new(cli.input.clone()));
    let scorer: Box<dyn PolarityScorer> = Box::new(LexiconScorer::new());
    let dataset_writer: Box<dyn SpreadsheetWriter> =
        Box::new(XlsxWriterAdapter::new(cli.output.clone()));
    let hashtag_writer: Box<dyn SpreadsheetWriter> =
        Box::new(XlsxWriterAdapter::new(cli.hashtags_output.clone()));

    let service = SentimentPipelineService::new(
        dataset_reader,
        scorer,
        dataset_writer,
        hashtag_writer,
        PipelineConfig::default(),
    );

    match service.execute() {
        Ok(_) => {
            info!(
                "Data exported for dashboarding: {} and {}",
                cli.output, cli.hashtags_output
            );
        }
        Err(e) => {
            error!("Error during processing: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_filenames() {
        let cli = Cli::parse_from(["social-sentiment"]);
        assert_eq!(cli.input, "sentimentdataset.csv");
        assert_eq!(cli.output, "cleaned_social_data.xlsx");
        assert_eq!(cli.hashtags_output, "top_hashtags.xlsx");
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "social-sentiment",
            "-i",
            "posts.csv",
            "--hashtags-output",
            "tags.xlsx",
        ]);
        assert_eq!(cli.input, "posts.csv");
        assert_eq!(cli.hashtags_output, "tags.xlsx");
    }

    #[test]
    fn test_hashtag_limit_is_not_configurable() {
        assert!(Cli::try_parse_from(["social-sentiment", "--top", "30"]).is_err());
    }
}
