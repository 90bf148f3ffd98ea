//! Natural-language quick add.
//!
//! Reads one sentence such as `Team Meeting tomorrow 2-4pm` into a draft.
//! Date ranges are looked for first, then single dates, then a time range;
//! each lookup walks an ordered pattern table and stops at the first hit.
//! Whatever text those hits covered is cut out, and the rest is the title.

use std::ops::Range;

use chrono::{Datelike, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::keywords::infer_sentence_type;
use super::patterns::{
    MONTH, ORDINAL, capture_month, capture_number, compile, excise, resolve_range, ymd,
};
use crate::event::{EventDraft, EventType};

/// Outcome of parsing a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NaturalParse {
    Parsed(EventDraft),
    /// No concrete calendar date could be read from the input.
    NoDate,
    /// A date was found but nothing was left over for a title.
    NoTitle,
}

impl NaturalParse {
    pub fn draft(self) -> Option<EventDraft> {
        match self {
            NaturalParse::Parsed(draft) => Some(draft),
            NaturalParse::NoDate | NaturalParse::NoTitle => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, NaturalParse::Parsed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateValue {
    Single(NaiveDate),
    Range(NaiveDate, NaiveDate),
    /// Recognized as a date mention but not usable: a bare weekday, or a
    /// range whose end precedes its start.
    Unresolved,
}

type DateExtractor = fn(&Captures<'_>, NaiveDate) -> Option<DateValue>;
type TimeExtractor = fn(&Captures<'_>) -> Option<(NaiveTime, Option<NaiveTime>)>;

static DATE_RANGES: Lazy<Vec<(Regex, DateExtractor)>> = Lazy::new(|| {
    vec![
        // 15-17 oct
        (
            compile(&format!(r"\b(\d{{1,2}})\s*-\s*(\d{{1,2}})\s+({MONTH})\b")),
            day_day_month as DateExtractor,
        ),
        // 12/1-12/3
        (
            compile(r"\b(\d{1,2})/(\d{1,2})\s*-\s*(\d{1,2})/(\d{1,2})\b"),
            numeric_range,
        ),
        // oct 15-17
        (
            compile(&format!(r"\b({MONTH})\.?\s+(\d{{1,2}})\s*-\s*(\d{{1,2}})\b")),
            month_day_day,
        ),
    ]
});

static SINGLE_DATES: Lazy<Vec<(Regex, DateExtractor)>> = Lazy::new(|| {
    vec![
        // 15 oct
        (
            compile(&format!(r"\b(\d{{1,2}}){ORDINAL}\s+({MONTH})\b")),
            day_month as DateExtractor,
        ),
        // oct 15
        (
            compile(&format!(r"\b({MONTH})\.?\s+(\d{{1,2}}){ORDINAL}\b")),
            month_day,
        ),
        // 12/1/2025
        (compile(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b"), numeric_with_year),
        // 12/1
        (compile(r"\b(\d{1,2})/(\d{1,2})\b"), numeric),
        (compile(r"\btoday\b"), today),
        (compile(r"\btomorrow\b"), tomorrow),
        (
            compile(r"\b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b"),
            weekday,
        ),
    ]
});

static TIMES: Lazy<Vec<(Regex, TimeExtractor)>> = Lazy::new(|| {
    vec![
        // 2-4pm, 2pm-4pm
        (
            compile(r"\b(\d{1,2})\s*(am|pm)?\s*-\s*(\d{1,2})\s*(am|pm)\b"),
            hour_range as TimeExtractor,
        ),
        // 9:30-11:00
        (
            compile(r"\b(\d{1,2}):(\d{2})\s*-\s*(\d{1,2}):(\d{2})\b"),
            clock_range,
        ),
        // 3 pm
        (compile(r"\b(\d{1,2})\s*(am|pm)\b"), single_hour),
    ]
});

fn number(caps: &Captures<'_>, index: usize) -> Option<u32> {
    capture_number(caps, index).ok()
}

/// Same-year range, or the next year for the end when the months wrap
/// ("12/30-1/2"). An inverted or impossible range is unusable.
fn month_range(start: (u32, u32), end: (u32, u32), reference: NaiveDate) -> DateValue {
    match resolve_range(start, end, None, reference) {
        Ok((start, end)) => DateValue::Range(start, end),
        Err(_) => DateValue::Unresolved,
    }
}

fn day_day_month(caps: &Captures<'_>, reference: NaiveDate) -> Option<DateValue> {
    let month = capture_month(caps, 3).ok()?;
    Some(month_range(
        (month, number(caps, 1)?),
        (month, number(caps, 2)?),
        reference,
    ))
}

fn numeric_range(caps: &Captures<'_>, reference: NaiveDate) -> Option<DateValue> {
    Some(month_range(
        (number(caps, 1)?, number(caps, 2)?),
        (number(caps, 3)?, number(caps, 4)?),
        reference,
    ))
}

fn month_day_day(caps: &Captures<'_>, reference: NaiveDate) -> Option<DateValue> {
    let month = capture_month(caps, 1).ok()?;
    Some(month_range(
        (month, number(caps, 2)?),
        (month, number(caps, 3)?),
        reference,
    ))
}

fn day_month(caps: &Captures<'_>, reference: NaiveDate) -> Option<DateValue> {
    let month = capture_month(caps, 2).ok()?;
    ymd(reference.year(), month, number(caps, 1)?)
        .ok()
        .map(DateValue::Single)
}

fn month_day(caps: &Captures<'_>, reference: NaiveDate) -> Option<DateValue> {
    let month = capture_month(caps, 1).ok()?;
    ymd(reference.year(), month, number(caps, 2)?)
        .ok()
        .map(DateValue::Single)
}

fn numeric_with_year(caps: &Captures<'_>, _reference: NaiveDate) -> Option<DateValue> {
    let year = i32::try_from(number(caps, 3)?).ok()?;
    ymd(year, number(caps, 1)?, number(caps, 2)?)
        .ok()
        .map(DateValue::Single)
}

fn numeric(caps: &Captures<'_>, reference: NaiveDate) -> Option<DateValue> {
    ymd(reference.year(), number(caps, 1)?, number(caps, 2)?)
        .ok()
        .map(DateValue::Single)
}

fn today(_caps: &Captures<'_>, reference: NaiveDate) -> Option<DateValue> {
    Some(DateValue::Single(reference))
}

fn tomorrow(_caps: &Captures<'_>, reference: NaiveDate) -> Option<DateValue> {
    reference.succ_opt().map(DateValue::Single)
}

/// A bare weekday names no particular week, so the sentence gets `NoDate`.
fn weekday(_caps: &Captures<'_>, _reference: NaiveDate) -> Option<DateValue> {
    Some(DateValue::Unresolved)
}

/// 12-hour clock to 24-hour: PM adds 12 except at noon, 12 AM is midnight.
fn to_24h(hour: u32, meridiem: &str) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = meridiem.eq_ignore_ascii_case("pm");
    Some(match (pm, hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    })
}

fn hour_range(caps: &Captures<'_>) -> Option<(NaiveTime, Option<NaiveTime>)> {
    let end_meridiem = caps.get(4)?.as_str();
    let (raw_start, raw_end) = (number(caps, 1)?, number(caps, 3)?);
    let end = to_24h(raw_end, end_meridiem)?;
    let start = match caps.get(2) {
        Some(meridiem) => to_24h(raw_start, meridiem.as_str())?,
        // "11-1pm" starts in the morning.
        None => match to_24h(raw_start, end_meridiem)? {
            start if start > end => to_24h(raw_start, "am")?,
            start => start,
        },
    };
    Some((
        NaiveTime::from_hms_opt(start, 0, 0)?,
        Some(NaiveTime::from_hms_opt(end, 0, 0)?),
    ))
}

fn clock_range(caps: &Captures<'_>) -> Option<(NaiveTime, Option<NaiveTime>)> {
    let start = NaiveTime::from_hms_opt(number(caps, 1)?, number(caps, 2)?, 0)?;
    let end = NaiveTime::from_hms_opt(number(caps, 3)?, number(caps, 4)?, 0)?;
    Some((start, Some(end)))
}

fn single_hour(caps: &Captures<'_>) -> Option<(NaiveTime, Option<NaiveTime>)> {
    let hour = to_24h(number(caps, 1)?, caps.get(2)?.as_str())?;
    Some((NaiveTime::from_hms_opt(hour, 0, 0)?, None))
}

/// First date in priority order: ranges before single dates.
fn find_date(input: &str, reference: NaiveDate) -> Option<(DateValue, Range<usize>)> {
    DATE_RANGES
        .iter()
        .chain(SINGLE_DATES.iter())
        .find_map(|(pattern, extract)| {
            let caps = pattern.captures(input)?;
            let span = caps.get(0)?.range();
            extract(&caps, reference).map(|value| (value, span))
        })
}

fn find_time(input: &str) -> Option<((NaiveTime, Option<NaiveTime>), Range<usize>)> {
    TIMES.iter().find_map(|(pattern, extract)| {
        let caps = pattern.captures(input)?;
        let span = caps.get(0)?.range();
        extract(&caps).map(|value| (value, span))
    })
}

/// Parse a quick-add sentence.
///
/// `today` is the caller's local calendar date; "today", "tomorrow" and
/// year-less dates are resolved against it. A sentence with no recognizable
/// keyword is typed as a meeting.
pub fn parse_natural_language(input: &str, today: NaiveDate) -> NaturalParse {
    let event_type = infer_sentence_type(input).unwrap_or(EventType::Meeting);

    let Some((date, date_span)) = find_date(input, today) else {
        return NaturalParse::NoDate;
    };

    let time = find_time(input);
    let mut consumed = vec![date_span];
    if let Some((_, span)) = &time {
        consumed.push(span.clone());
    }

    let title = excise(input, &consumed);
    debug!(input, ?date, title = %title, "parsed sentence");

    let draft = match date {
        DateValue::Unresolved => return NaturalParse::NoDate,
        _ if title.is_empty() => return NaturalParse::NoTitle,
        DateValue::Range(start, end) => {
            match EventDraft::spanning(event_type, title, start, end) {
                Ok(draft) => draft,
                Err(_) => return NaturalParse::NoDate,
            }
        }
        DateValue::Single(day) => {
            let (start_time, end_time) = match time {
                Some(((start, end), _)) => (Some(start), end),
                None => (None, None),
            };
            EventDraft::timed(event_type, title, day, start_time, end_time)
        }
    };

    NaturalParse::Parsed(draft)
}
