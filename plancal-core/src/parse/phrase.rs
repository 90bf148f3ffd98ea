//! General-purpose single date phrase parser.
//!
//! Finds the first date-looking phrase anywhere in a piece of text: ISO
//! dates, US numeric dates and month-name dates with or without a year.
//! Dates without a year take the year of the reference date.

use std::ops::Range;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::patterns::{
    MONTH, ORDINAL, YEAR, capture_month, capture_number, capture_year, compile, ymd,
};
use crate::error::PlanCalResult;

/// A date found in text, with the byte range it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch {
    pub date: NaiveDate,
    pub span: Range<usize>,
}

type Extractor = fn(&Captures<'_>, NaiveDate) -> PlanCalResult<NaiveDate>;

/// Phrase shapes in priority order.
static PHRASES: Lazy<Vec<(Regex, Extractor)>> = Lazy::new(|| {
    vec![
        // 2025-07-09
        (compile(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"), iso as Extractor),
        // 7/9/2025
        (compile(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b"), us_numeric),
        // July 9, 2025 / Jul 9th / Sept. 3 2025
        (
            compile(&format!(r"\b({MONTH})\.?\s+(\d{{1,2}}){ORDINAL}\b{YEAR}")),
            month_day,
        ),
        // 9 July 2025
        (
            compile(&format!(r"\b(\d{{1,2}}){ORDINAL}\s+({MONTH})\b{YEAR}")),
            day_month,
        ),
    ]
});

fn iso(caps: &Captures<'_>, _reference: NaiveDate) -> PlanCalResult<NaiveDate> {
    let year = capture_number(caps, 1)? as i32;
    ymd(year, capture_number(caps, 2)?, capture_number(caps, 3)?)
}

fn us_numeric(caps: &Captures<'_>, _reference: NaiveDate) -> PlanCalResult<NaiveDate> {
    let year = capture_number(caps, 3)? as i32;
    ymd(year, capture_number(caps, 1)?, capture_number(caps, 2)?)
}

fn month_day(caps: &Captures<'_>, reference: NaiveDate) -> PlanCalResult<NaiveDate> {
    let year = capture_year(caps, 3)?.unwrap_or(reference.year());
    ymd(year, capture_month(caps, 1)?, capture_number(caps, 2)?)
}

fn day_month(caps: &Captures<'_>, reference: NaiveDate) -> PlanCalResult<NaiveDate> {
    let year = capture_year(caps, 3)?.unwrap_or(reference.year());
    ymd(year, capture_month(caps, 2)?, capture_number(caps, 1)?)
}

/// Find and parse the first date phrase in `text`.
///
/// Returns `Ok(None)` when nothing date-shaped is present and an error when a
/// phrase matched but names an impossible date ("Feb 30, 2025").
pub fn parse_date_phrase(text: &str, reference: NaiveDate) -> PlanCalResult<Option<PhraseMatch>> {
    for (pattern, extract) in PHRASES.iter() {
        if let Some(caps) = pattern.captures(text) {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
            let date = extract(&caps, reference)?;
            return Ok(Some(PhraseMatch { date, span: whole }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanCalError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn reference() -> NaiveDate {
        d(2025, 6, 15)
    }

    fn date_of(text: &str) -> Option<NaiveDate> {
        parse_date_phrase(text, reference()).unwrap().map(|m| m.date)
    }

    #[test]
    fn parses_iso_date() {
        assert_eq!(date_of("Offsite 2025-09-15"), Some(d(2025, 9, 15)));
    }

    #[test]
    fn parses_us_numeric_date() {
        assert_eq!(date_of("Board 9/15/2025 in person"), Some(d(2025, 9, 15)));
    }

    #[test]
    fn parses_month_day_with_year() {
        assert_eq!(date_of("July 9, 2025"), Some(d(2025, 7, 9)));
        assert_eq!(date_of("Sept. 3 2026"), Some(d(2026, 9, 3)));
        assert_eq!(date_of("Aug 1st, 2025"), Some(d(2025, 8, 1)));
    }

    #[test]
    fn month_day_without_year_uses_reference_year() {
        assert_eq!(date_of("Dec 5"), Some(d(2025, 12, 5)));
    }

    #[test]
    fn parses_day_month() {
        assert_eq!(date_of("15 October 2025"), Some(d(2025, 10, 15)));
    }

    #[test]
    fn reports_span_of_the_phrase() {
        let found = parse_date_phrase("Launch Oct 3, 2025 HQ", reference())
            .unwrap()
            .unwrap();
        assert_eq!(found.span, 7..18);
    }

    #[test]
    fn no_date_is_none() {
        assert_eq!(date_of("Quarterly planning"), None);
    }

    #[test]
    fn impossible_date_is_an_error() {
        let result = parse_date_phrase("Feb 30, 2025", reference());
        assert!(matches!(result, Err(PlanCalError::InvalidDate(_))));
    }
}
