use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static SOCIAL_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|@\w+|#\w+").unwrap());
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9 ]+").unwrap());

/// Normalizes post text: removes URLs, @mentions and #hashtags, then every
/// character outside ASCII letters, digits and space, then lowercases.
/// Whitespace runs collapse to one space and the ends are trimmed.
///
/// The pass repeats until nothing changes, so the result is a fixpoint:
/// `clean_text(&clean_text(s)) == clean_text(s)`.
pub fn clean_text(text: &str) -> String {
    let mut current = clean_once(text);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(text: &str) -> String {
    let stripped = SOCIAL_TOKENS.replace_all(text, "");
    let alphanumeric = NON_ALPHANUMERIC.replace_all(&stripped, "");
    alphanumeric
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a raw hashtag cell into lowercase tags with the leading `#` removed.
/// Tokens made only of `#` are dropped.
pub fn split_hashtags(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_start_matches('#'))
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a timestamp string into a wall-clock date-time.
/// Supports various formats: ISO 8601 with or without offset, SQL datetime,
/// date only, US month/day/year. Returns `None` when nothing matches.
pub fn parse_timestamp(timestamp_str: &str) -> Option<NaiveDateTime> {
    let timestamp_str = timestamp_str.trim();
    if timestamp_str.is_empty() {
        return None;
    }

    // ISO 8601 with offset (e.g., "2025-12-16T10:30:00Z"); keep the written hour
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp_str) {
        return Some(dt.naive_local());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ] {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(timestamp_str, format) {
            return Some(naive_dt);
        }
    }

    // Date only - treat as midnight
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(timestamp_str, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // Anything else dateparser understands, read as UTC
    dateparser::parse_with_timezone(timestamp_str, &Utc)
        .ok()
        .map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_clean_text_strips_social_tokens() {
        assert_eq!(
            clean_text("Check this out! http://x.co @joe #great #great"),
            "check this out"
        );
    }

    #[test]
    fn test_clean_text_removes_punctuation_and_lowercases() {
        assert_eq!(clean_text("Hello, World!!! 2023"), "hello world 2023");
    }

    #[test]
    fn test_clean_text_symbols_only_is_empty() {
        assert_eq!(clean_text("!!! ??? @user #tag https://t.co/abc"), "");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_clean_text_drops_non_ascii_letters() {
        assert_eq!(clean_text("Café déjà vu"), "caf dj vu");
    }

    #[test]
    fn test_clean_text_output_alphabet() {
        let inputs = [
            "Loving the #sunset at @beach!! 🌅 https://pic.example/1",
            "TABS\tand\nnewlines, plus ümlauts",
            "Price: $100.50 (50% off)",
        ];
        for input in inputs {
            let cleaned = clean_text(input);
            assert!(cleaned
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        }
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let inputs = [
            "Check this out! http://x.co @joe #great",
            "HTTPfoo bar",
            "ht!tpstuff after punctuation",
            "  spaced   out   ",
        ];
        for input in inputs {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn test_split_hashtags() {
        assert_eq!(split_hashtags("#AI #ml"), vec!["ai", "ml"]);
        assert_eq!(split_hashtags("  #Data   science # "), vec!["data", "science"]);
        assert!(split_hashtags("").is_empty());
    }

    #[test]
    fn test_parse_timestamp_sql_format() {
        let dt = parse_timestamp("2023-05-01 14:30:00").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_timestamp_rfc3339_keeps_wall_clock() {
        let dt = parse_timestamp("2023-05-01T14:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_timestamp_iso_without_timezone() {
        let dt = parse_timestamp("2025-12-16T10:30:00").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.day(), 16);
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight() {
        let dt = parse_timestamp("2025-12-16").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.month(), 12);
    }

    #[test]
    fn test_parse_timestamp_us_format() {
        let dt = parse_timestamp("01/15/2023 09:05").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
    }
}
