//! Bulk multi-line import.
//!
//! Each line of pasted text describes at most one event, e.g.
//! `Product Mngt Leader Review July 9-10, 2025 (Wed-Thu)`. The text before
//! the first month name is the title; the rest is matched against an ordered
//! table of range patterns, falling back to a single date phrase. Lines that
//! fail to parse are logged and skipped without affecting the others.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use super::keywords::guess_type;
use super::patterns::{
    MONTH, ORDINAL, YEAR, capture_month, capture_number, capture_year, collapse_whitespace,
    compile, excise, expand_days, resolve_range,
};
use super::phrase::parse_date_phrase;
use crate::config::OperatingWindow;
use crate::error::PlanCalResult;
use crate::event::{DEFAULT_TITLE, EventDraft};

/// Days added to a lone "week of" date to cover a Monday-Friday week.
const WORK_WEEK_EXTRA_DAYS: i64 = 4;

static DASHES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*[\x{2013}\x{2014}]\s*|\s+-\s*|\s*-\s+")
        .expect("DASHES should compile - this is a bug")
});

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()]*\)").expect("PARENTHETICAL should compile - this is a bug"));

static UNCLOSED_PARENTHETICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^)]*$").expect("UNCLOSED_PARENTHETICAL should compile - this is a bug")
});

static WEEK_OF: Lazy<Regex> = Lazy::new(|| compile(r"\bweek\s+of\b"));

/// A month name followed by a day number, never by a bare year.
static FIRST_MONTH: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"\b{MONTH}\.?\s+\d{{1,2}}{ORDINAL}\b")));

type RangeExtractor = fn(&Captures<'_>, NaiveDate) -> PlanCalResult<(NaiveDate, NaiveDate)>;

/// Range shapes in priority order; the first one that matches wins.
static RANGES: Lazy<Vec<(&'static str, Regex, RangeExtractor)>> = Lazy::new(|| {
    vec![
        // Jul 28 - Aug 1, 2025 / July 9 - 10, 2025
        (
            "cross-month",
            compile(&format!(
                r"^({MONTH})\.?\s+(\d{{1,2}}){ORDINAL}\s+-\s+(?:({MONTH})\.?\s+)?(\d{{1,2}}){ORDINAL}\b{YEAR}"
            )),
            cross_month as RangeExtractor,
        ),
        // July 9-10, 2025
        (
            "same-month",
            compile(&format!(
                r"^({MONTH})\.?\s+(\d{{1,2}}){ORDINAL}-(\d{{1,2}}){ORDINAL}\b{YEAR}"
            )),
            same_month,
        ),
    ]
});

fn cross_month(
    caps: &Captures<'_>,
    reference: NaiveDate,
) -> PlanCalResult<(NaiveDate, NaiveDate)> {
    let start_month = capture_month(caps, 1)?;
    let end_month = match caps.get(3) {
        Some(_) => capture_month(caps, 3)?,
        None => start_month,
    };
    resolve_range(
        (start_month, capture_number(caps, 2)?),
        (end_month, capture_number(caps, 4)?),
        capture_year(caps, 5)?,
        reference,
    )
}

fn same_month(
    caps: &Captures<'_>,
    reference: NaiveDate,
) -> PlanCalResult<(NaiveDate, NaiveDate)> {
    let month = capture_month(caps, 1)?;
    resolve_range(
        (month, capture_number(caps, 2)?),
        (month, capture_number(caps, 3)?),
        capture_year(caps, 4)?,
        reference,
    )
}

fn match_range(
    candidate: &str,
    reference: NaiveDate,
) -> PlanCalResult<Option<(NaiveDate, NaiveDate)>> {
    for (name, pattern, extract) in RANGES.iter() {
        if let Some(caps) = pattern.captures(candidate) {
            debug!(pattern = name, candidate, "matched date range");
            return extract(&caps, reference).map(Some);
        }
    }
    Ok(None)
}

/// A lone date, widened to a work week when the line said "week of".
fn single_or_week(date: NaiveDate, week_of: bool) -> (NaiveDate, NaiveDate) {
    if week_of {
        (date, date + Duration::days(WORK_WEEK_EXTRA_DAYS))
    } else {
        (date, date)
    }
}

/// Date bounds of a candidate that starts at a month name.
fn month_candidate_bounds(
    candidate: &str,
    week_of: bool,
    reference: NaiveDate,
) -> PlanCalResult<Option<(NaiveDate, NaiveDate)>> {
    if let Some(bounds) = match_range(candidate, reference)? {
        return Ok(Some(bounds));
    }

    if week_of {
        let remainder = collapse_whitespace(&WEEK_OF.replace_all(candidate, ""));
        if let Some(bounds) = match_range(&remainder, reference)? {
            return Ok(Some(bounds));
        }
    }

    Ok(parse_date_phrase(candidate, reference)?.map(|found| single_or_week(found.date, week_of)))
}

/// Title from the text that preceded the date: the "week of" marker and
/// trailing separators or half-open parentheses are dropped.
fn clean_title(candidate: &str) -> String {
    let without_marker = WEEK_OF.replace_all(candidate, " ");
    let without_remnant = UNCLOSED_PARENTHETICAL.replace(&without_marker, "");
    let is_separator = |c: char| c.is_whitespace() || "-,:;|@".contains(c);
    let title = collapse_whitespace(
        without_remnant
            .trim_end_matches(is_separator)
            .trim_start_matches(is_separator),
    );
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

/// Parse one non-empty line.
///
/// `Ok(None)` means the line has no recognizable date; an error means a date
/// pattern matched but described an impossible date or range.
fn parse_line(line: &str, reference: NaiveDate) -> PlanCalResult<Option<EventDraft>> {
    let dashed = DASHES.replace_all(line.trim(), " - ");
    let text = collapse_whitespace(&PARENTHETICAL.replace_all(&dashed, " "));
    let week_of = WEEK_OF.is_match(&text);

    let (title_candidate, bounds) = match FIRST_MONTH.find(&text) {
        Some(month) => (
            text[..month.start()].to_string(),
            month_candidate_bounds(&text[month.start()..], week_of, reference)?,
        ),
        None => match parse_date_phrase(&text, reference)? {
            Some(found) => (
                excise(&text, &[found.span.clone()]),
                Some(single_or_week(found.date, week_of)),
            ),
            None => (text.clone(), None),
        },
    };

    let Some((start, end)) = bounds else {
        return Ok(None);
    };

    let days = expand_days(start, end);
    let title = clean_title(&title_candidate);
    let event_type = guess_type(&title);
    EventDraft::from_days(event_type, title, &days).transpose()
}

/// Parse a single line into zero or one drafts.
///
/// Blank and unparseable lines yield nothing; failures are logged.
pub fn parse_line_to_events(line: &str, reference: NaiveDate) -> Vec<EventDraft> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    match parse_line(line, reference) {
        Ok(Some(draft)) => vec![draft],
        Ok(None) => {
            debug!(line, "no date found");
            Vec::new()
        }
        Err(e) => {
            warn!(line, error = %e, "skipping unparseable line");
            Vec::new()
        }
    }
}

/// Options for [`parse_bulk_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOptions {
    /// Drop drafts whose date falls outside `window`.
    pub clip_to_operating_year: bool,
    pub window: OperatingWindow,
    /// Supplies the year for dates written without one.
    pub reference_date: NaiveDate,
}

impl BulkOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        BulkOptions {
            clip_to_operating_year: true,
            window: OperatingWindow::default(),
            reference_date,
        }
    }

    pub fn with_window(mut self, window: OperatingWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_clipping(mut self, clip: bool) -> Self {
        self.clip_to_operating_year = clip;
        self
    }
}

/// A non-empty line that produced no draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the input.
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

/// Drafts from a bulk import plus what was left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    /// Parsed drafts, in input line order.
    pub drafts: Vec<EventDraft>,
    pub skipped: Vec<SkippedLine>,
    /// Drafts dropped for falling outside the operating window.
    pub clipped: usize,
}

/// Parse multi-line text and report skipped lines alongside the drafts.
pub fn parse_bulk_report(text: &str, options: &BulkOptions) -> BulkReport {
    let mut report = BulkReport::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_number = index + 1;

        let reason = match parse_line(line, options.reference_date) {
            Ok(Some(draft)) => {
                if options.clip_to_operating_year && !options.window.contains(draft.date()) {
                    debug!(line_number, date = %draft.date(), "outside operating window");
                    report.clipped += 1;
                } else {
                    report.drafts.push(draft);
                }
                continue;
            }
            Ok(None) => {
                debug!(line_number, line, "no date found");
                "no date found".to_string()
            }
            Err(e) => {
                warn!(line_number, line, error = %e, "skipping unparseable line");
                e.to_string()
            }
        };

        report.skipped.push(SkippedLine {
            line_number,
            line: line.to_string(),
            reason,
        });
    }

    report
}

/// Parse multi-line text into drafts, in input line order.
pub fn parse_bulk_text(text: &str, options: &BulkOptions) -> Vec<EventDraft> {
    parse_bulk_report(text, options).drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn reference() -> NaiveDate {
        d(2025, 6, 15)
    }

    fn one(line: &str) -> EventDraft {
        let mut drafts = parse_line_to_events(line, reference());
        assert_eq!(drafts.len(), 1, "expected one draft for {line:?}");
        drafts.remove(0)
    }

    #[test]
    fn same_month_range_with_day_annotation() {
        let draft = one("Product Mngt Leader Review July 9-10, 2025 (Wed-Thu)");
        assert_eq!(draft.title(), "Product Mngt Leader Review");
        assert_eq!(draft.event_type, EventType::Meeting);
        assert_eq!(draft.date(), d(2025, 7, 9));
        assert_eq!(draft.start_date(), Some(d(2025, 7, 9)));
        assert_eq!(draft.end_date(), Some(d(2025, 7, 10)));
    }

    #[test]
    fn cross_month_week_of_range() {
        let draft = one("Commit Documentation Week of July 28 - Aug 1, 2025 (Mon-Fri)");
        assert_eq!(draft.title(), "Commit Documentation");
        assert_eq!(draft.event_type, EventType::Planning);
        assert_eq!(draft.start_date(), Some(d(2025, 7, 28)));
        assert_eq!(draft.end_date(), Some(d(2025, 8, 1)));
    }

    #[test]
    fn en_dash_and_em_dash_ranges() {
        let en = one("Sprint Alignment Sep 8\u{2013}12, 2025");
        assert_eq!(en.start_date(), Some(d(2025, 9, 8)));
        assert_eq!(en.end_date(), Some(d(2025, 9, 12)));

        let em = one("Freeze Dec 15 \u{2014} Dec 19, 2025");
        assert_eq!(em.start_date(), Some(d(2025, 12, 15)));
        assert_eq!(em.end_date(), Some(d(2025, 12, 19)));
    }

    #[test]
    fn week_of_single_date_spans_work_week() {
        let draft = one("Week of Sep 8, 2025 Release Hardening");
        assert_eq!(draft.title(), "Event");
        assert_eq!(draft.start_date(), Some(d(2025, 9, 8)));
        assert_eq!(draft.end_date(), Some(d(2025, 9, 12)));
    }

    #[test]
    fn week_of_with_title_before_marker() {
        let draft = one("Release Hardening - week of Sep 8, 2025");
        assert_eq!(draft.title(), "Release Hardening");
        assert_eq!(draft.end_date(), Some(d(2025, 9, 12)));
    }

    #[test]
    fn single_date_line_has_no_span() {
        let draft = one("Company Holiday Nov 27, 2025 (Thu)");
        assert_eq!(draft.title(), "Company Holiday");
        assert_eq!(draft.event_type, EventType::Holidays);
        assert_eq!(draft.date(), d(2025, 11, 27));
        assert!(!draft.is_multi_day());
    }

    #[test]
    fn missing_year_uses_reference_year() {
        let draft = one("Offsite Oct 6-7");
        assert_eq!(draft.start_date(), Some(d(2025, 10, 6)));
        assert_eq!(draft.end_date(), Some(d(2025, 10, 7)));
    }

    #[test]
    fn range_crossing_new_year() {
        let draft = one("Year End Freeze Dec 29 - Jan 2, 2026");
        assert_eq!(draft.start_date(), Some(d(2025, 12, 29)));
        assert_eq!(draft.end_date(), Some(d(2026, 1, 2)));
    }

    #[test]
    fn day_before_month_with_year() {
        let draft = one("Offsite 15 October 2025");
        assert_eq!(draft.title(), "Offsite");
        assert_eq!(draft.date(), d(2025, 10, 15));

        let short = one("Offsite 15 Oct 2025 (Wed)");
        assert_eq!(short.title(), "Offsite");
        assert_eq!(short.date(), d(2025, 10, 15));
    }

    #[test]
    fn line_without_month_uses_numeric_date() {
        let draft = one("Budget lock 2025-09-15");
        assert_eq!(draft.title(), "Budget lock");
        assert_eq!(draft.date(), d(2025, 9, 15));
    }

    #[test]
    fn empty_title_defaults_to_event() {
        let draft = one("July 9, 2025");
        assert_eq!(draft.title(), "Event");
        assert_eq!(draft.event_type, EventType::Planning);
    }

    #[test]
    fn month_word_inside_title_is_not_a_date() {
        let draft = one("Marketing May deliverables June 3, 2025");
        assert_eq!(draft.title(), "Marketing May deliverables");
        assert_eq!(draft.date(), d(2025, 6, 3));
    }

    #[test]
    fn impossible_date_yields_nothing() {
        assert!(parse_line_to_events("Planning Feb 30, 2025", reference()).is_empty());
        assert!(parse_line_to_events("Planning Jul 10-9, 2025", reference()).is_empty());
    }

    #[test]
    fn blank_and_dateless_lines_yield_nothing() {
        assert!(parse_line_to_events("   ", reference()).is_empty());
        assert!(parse_line_to_events("Just a note", reference()).is_empty());
    }

    #[test]
    fn bulk_keeps_line_order_and_skips_bad_lines() {
        let text = "Kickoff Aug 4, 2025\r\n\r\nnot an event\nPlanning Feb 30, 2025\nQ1 Planning Sep 8-12, 2025\n";
        let options = BulkOptions::new(reference()).with_clipping(false);
        let report = parse_bulk_report(text, &options);

        let titles: Vec<_> = report.drafts.iter().map(|d| d.title()).collect();
        assert_eq!(titles, vec!["Kickoff", "Q1 Planning"]);

        let skipped: Vec<_> = report.skipped.iter().map(|s| s.line_number).collect();
        assert_eq!(skipped, vec![3, 4]);
        assert_eq!(report.skipped[0].reason, "no date found");
    }

    #[test]
    fn clipping_drops_dates_outside_window() {
        let text = "Old Review Jul 1, 2025\nNew Review Aug 1, 2025\nLate Review Aug 3, 2026";
        let window = OperatingWindow::new(d(2025, 8, 1), d(2026, 7, 31)).unwrap();
        let options = BulkOptions::new(reference()).with_window(window);

        let report = parse_bulk_report(text, &options);
        assert_eq!(report.drafts.len(), 1);
        assert_eq!(report.drafts[0].title(), "New Review");
        assert_eq!(report.clipped, 2);

        let all = parse_bulk_text(text, &options.with_clipping(false));
        assert_eq!(all.len(), 3);
    }
}
