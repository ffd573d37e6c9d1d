//! Orders post summaries for the overview page. Publish dates are accepted
//! in exactly two literal formats, a 10-character date and a 16-character
//! date-and-minute; anything else degrades to "now" rather than failing the
//! run, which floats malformed entries to the top of the index. This is the
//! one lenient parse in the whole pipeline.

use crate::post::Summary;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use gtmpl::Value;
use std::cmp::Reverse;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn parse_strict(published: &str) -> Option<NaiveDateTime> {
    match published.len() {
        10 => NaiveDate::parse_from_str(published, DATE_FORMAT)
            .ok()
            .map(|date| NaiveDateTime::new(date, NaiveTime::from_hms(0, 0, 0))),
        16 => NaiveDateTime::parse_from_str(published, DATE_TIME_FORMAT).ok(),
        _ => None,
    }
}

/// Parses a summary's publish string, falling back to the current instant
/// for anything unparseable.
pub fn parse_published(published: &str) -> NaiveDateTime {
    parse_strict(published).unwrap_or_else(|| Utc::now().naive_utc())
}

/// Sorts summaries for the overview page: most recently published first,
/// with ties on the exact instant broken by title, ascending.
pub fn sort(mut summaries: Vec<Summary>) -> Vec<Summary> {
    summaries.sort_by_cached_key(|s| (Reverse(parse_published(&s.published)), s.title.clone()));
    summaries
}

/// Converts sorted summaries into the `Posts` template value the overview
/// layout ranges over.
pub fn to_value(summaries: &[Summary]) -> Value {
    Value::Array(summaries.iter().map(Value::from).collect())
}

#[cfg(test)]
mod test {
    use super::*;

    fn summary(title: &str, published: &str) -> Summary {
        Summary {
            title: title.to_owned(),
            published: published.to_owned(),
            author: "A".to_owned(),
            excerpt: String::new(),
            filename: format!("{}.html", title.to_lowercase()),
        }
    }

    fn titles(summaries: &[Summary]) -> Vec<&str> {
        summaries.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(
            parse_published("2024-01-02"),
            NaiveDate::from_ymd(2024, 1, 2).and_hms(0, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_and_minute() {
        assert_eq!(
            parse_published("2024-01-02 15:04"),
            NaiveDate::from_ymd(2024, 1, 2).and_hms(15, 4, 0)
        );
    }

    #[test]
    fn test_sort_recent_first_with_title_tie_break() {
        let sorted = sort(vec![
            summary("B", "2024-01-02"),
            summary("A", "2024-01-02"),
            summary("C", "2024-01-01"),
        ]);
        assert_eq!(titles(&sorted), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sort_minute_precision_beats_title() {
        let sorted = sort(vec![
            summary("A", "2024-01-02 08:00"),
            summary("B", "2024-01-02 09:00"),
        ]);
        assert_eq!(titles(&sorted), vec!["B", "A"]);
    }

    #[test]
    fn test_malformed_date_sorts_as_now() {
        // "now" is more recent than any dated entry, so the malformed entry
        // floats to the top.
        let sorted = sort(vec![
            summary("Dated", "2024-01-02"),
            summary("Malformed", "someday"),
        ]);
        assert_eq!(titles(&sorted), vec!["Malformed", "Dated"]);
    }
}
