//! Regex fragments and numeric helpers shared by the parsers.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{PlanCalError, PlanCalResult};

/// Full month names and their three-letter abbreviations ("sept" included).
pub(crate) const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// Optional ordinal suffix after a day number.
pub(crate) const ORDINAL: &str = r"(?:st|nd|rd|th)?";

/// Optional trailing year: ", 2025" or " 2025".
pub(crate) const YEAR: &str = r"(?:(?:,\s*|\s+)(\d{4}))?";

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE should compile - this is a bug"));

/// Compile a case-insensitive pattern built from the fragments above.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}"))
        .unwrap_or_else(|e| panic!("date pattern should compile - this is a bug: {e}"))
}

/// Month number (1-12) for a name or abbreviation matched by [`MONTH`].
pub(crate) fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parse capture group `index` as a number.
pub(crate) fn capture_number(caps: &Captures<'_>, index: usize) -> PlanCalResult<u32> {
    let raw = caps
        .get(index)
        .map(|m| m.as_str())
        .ok_or_else(|| PlanCalError::InvalidDate(format!("missing component #{index}")))?;
    raw.parse()
        .map_err(|_| PlanCalError::InvalidDate(format!("'{raw}' is not a number")))
}

/// Parse an optional capture group as a year.
pub(crate) fn capture_year(caps: &Captures<'_>, index: usize) -> PlanCalResult<Option<i32>> {
    match caps.get(index) {
        Some(m) => m
            .as_str()
            .parse()
            .map(Some)
            .map_err(|_| PlanCalError::InvalidDate(format!("'{}' is not a year", m.as_str()))),
        None => Ok(None),
    }
}

/// Month number of capture group `index`.
pub(crate) fn capture_month(caps: &Captures<'_>, index: usize) -> PlanCalResult<u32> {
    let raw = caps.get(index).map(|m| m.as_str()).unwrap_or_default();
    month_number(raw).ok_or_else(|| PlanCalError::InvalidDate(format!("unknown month '{raw}'")))
}

/// Build a calendar date, rejecting out-of-range components.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> PlanCalResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| PlanCalError::InvalidDate(format!("{year}-{month:02}-{day:02}")))
}

/// Resolve the two ends of a month/day range.
///
/// An explicit year belongs to the end of the range; when the end month comes
/// before the start month the range crosses New Year and the start falls in
/// the previous year. Without a year, the start takes the reference year.
pub(crate) fn resolve_range(
    (start_month, start_day): (u32, u32),
    (end_month, end_day): (u32, u32),
    year: Option<i32>,
    reference: NaiveDate,
) -> PlanCalResult<(NaiveDate, NaiveDate)> {
    let crosses_year = end_month < start_month;
    let (start_year, end_year) = match year {
        Some(y) if crosses_year => (y - 1, y),
        Some(y) => (y, y),
        None if crosses_year => (reference.year(), reference.year() + 1),
        None => (reference.year(), reference.year()),
    };
    let start = ymd(start_year, start_month, start_day)?;
    let end = ymd(end_year, end_month, end_day)?;
    if end < start {
        return Err(PlanCalError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok((start, end))
}

/// Every calendar day in `start..=end`.
pub(crate) fn expand_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Remove byte ranges from `text` and collapse the leftover whitespace.
pub(crate) fn excise(text: &str, spans: &[std::ops::Range<usize>]) -> String {
    let mut spans = spans.to_vec();
    spans.sort_by_key(|s| s.start);

    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            kept.push_str(&text[cursor..span.start]);
            kept.push(' ');
        }
        cursor = cursor.max(span.end);
    }
    if cursor < text.len() {
        kept.push_str(&text[cursor..]);
    }
    collapse_whitespace(&kept)
}

/// Trim and squeeze runs of whitespace to one space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_number_accepts_full_and_short_names() {
        assert_eq!(month_number("July"), Some(7));
        assert_eq!(month_number("aug"), Some(8));
        assert_eq!(month_number("Sept"), Some(9));
        assert_eq!(month_number("DECEMBER"), Some(12));
        assert_eq!(month_number("Mo"), None);
    }

    #[test]
    fn month_fragment_needs_word_boundaries() {
        let re = compile(&format!(r"\b{MONTH}\b"));
        assert!(re.is_match("Kickoff Mar 3"));
        assert!(!re.is_match("Marketing sync"));
        assert!(!re.is_match("Decision log"));
    }

    #[test]
    fn resolve_range_crossing_new_year_with_explicit_year() {
        let reference = d(2025, 6, 1);
        let (start, end) = resolve_range((12, 29), (1, 2), Some(2026), reference).unwrap();
        assert_eq!(start, d(2025, 12, 29));
        assert_eq!(end, d(2026, 1, 2));
    }

    #[test]
    fn resolve_range_without_year_uses_reference_year() {
        let reference = d(2025, 6, 1);
        let (start, end) = resolve_range((7, 9), (7, 10), None, reference).unwrap();
        assert_eq!(start, d(2025, 7, 9));
        assert_eq!(end, d(2025, 7, 10));
    }

    #[test]
    fn resolve_range_rejects_inverted_days() {
        let reference = d(2025, 6, 1);
        let result = resolve_range((7, 10), (7, 9), Some(2025), reference);
        assert!(matches!(result, Err(PlanCalError::InvalidRange { .. })));
    }

    #[test]
    fn ymd_rejects_impossible_dates() {
        assert!(ymd(2025, 2, 30).is_err());
        assert!(ymd(2025, 13, 1).is_err());
        assert!(ymd(2025, 7, 47).is_err());
    }

    #[test]
    fn expand_days_is_inclusive() {
        let days = expand_days(d(2025, 7, 28), d(2025, 8, 1));
        assert_eq!(days.len(), 5);
        assert_eq!(days.first(), Some(&d(2025, 7, 28)));
        assert_eq!(days.last(), Some(&d(2025, 8, 1)));
    }

    #[test]
    fn excise_removes_spans_and_squeezes_spaces() {
        let text = "Team Meeting tomorrow 2-4pm please";
        let spans = vec![22..27, 13..21];
        assert_eq!(excise(text, &spans), "Team Meeting please");
    }

    #[test]
    fn excise_tolerates_overlapping_spans() {
        let text = "abc def ghi";
        assert_eq!(excise(text, &[4..7, 5..9]), "abc hi");
    }
}
