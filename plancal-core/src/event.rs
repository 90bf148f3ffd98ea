//! Event drafts and persisted events.
//!
//! An [`EventDraft`] is what both parsers produce: a typed, titled event that
//! occupies either a single day (optionally with a time range) or a span of
//! several days. The two shapes are separate [`Schedule`] variants so a draft
//! can never carry times and a date span at once.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PlanCalError, PlanCalResult};

/// Title used when a bulk line has nothing left after the date is removed.
pub const DEFAULT_TITLE: &str = "Event";

const TIME_FORMAT: &str = "%H:%M";

/// Kind of planning event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Planning,
    Meeting,
    MonthlyReview,
    Holidays,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Planning => "PLANNING",
            EventType::Meeting => "MEETING",
            EventType::MonthlyReview => "MONTHLY_REVIEW",
            EventType::Holidays => "HOLIDAYS",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a draft happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    SingleDay {
        date: NaiveDate,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    },
    /// Inclusive span; `start < end` always holds.
    MultiDay { start: NaiveDate, end: NaiveDate },
}

/// A parsed, not-yet-persisted event.
///
/// Title and schedule are only set through the constructors, which keep the
/// title non-empty and multi-day spans ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DraftRecord", try_from = "DraftRecord")]
pub struct EventDraft {
    pub event_type: EventType,
    title: String,
    schedule: Schedule,
}

/// Blank titles become [`DEFAULT_TITLE`].
fn non_empty_title(title: impl Into<String>) -> String {
    let title = title.into();
    if title.trim().is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

impl EventDraft {
    /// An all-day, single-day draft.
    pub fn single_day(event_type: EventType, title: impl Into<String>, date: NaiveDate) -> Self {
        Self::timed(event_type, title, date, None, None)
    }

    pub fn timed(
        event_type: EventType,
        title: impl Into<String>,
        date: NaiveDate,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> Self {
        EventDraft {
            event_type,
            title: non_empty_title(title),
            schedule: Schedule::SingleDay {
                date,
                start_time,
                end_time,
            },
        }
    }

    /// A draft covering `start..=end`. Collapses to a single-day draft when
    /// both ends are the same day.
    pub fn spanning(
        event_type: EventType,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PlanCalResult<Self> {
        if end < start {
            return Err(PlanCalError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        if start == end {
            return Ok(Self::single_day(event_type, title, start));
        }
        Ok(EventDraft {
            event_type,
            title: non_empty_title(title),
            schedule: Schedule::MultiDay { start, end },
        })
    }

    /// Build a draft from an expanded, ordered day sequence.
    /// Returns None for an empty sequence.
    pub fn from_days(
        event_type: EventType,
        title: impl Into<String>,
        days: &[NaiveDate],
    ) -> Option<PlanCalResult<Self>> {
        let (first, last) = (days.first()?, days.last()?);
        Some(Self::spanning(event_type, title, *first, *last))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The draft's date; the first day for multi-day drafts.
    pub fn date(&self) -> NaiveDate {
        match self.schedule {
            Schedule::SingleDay { date, .. } => date,
            Schedule::MultiDay { start, .. } => start,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        match self.schedule {
            Schedule::MultiDay { start, .. } => Some(start),
            Schedule::SingleDay { .. } => None,
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.schedule {
            Schedule::MultiDay { end, .. } => Some(end),
            Schedule::SingleDay { .. } => None,
        }
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        match self.schedule {
            Schedule::SingleDay { start_time, .. } => start_time,
            Schedule::MultiDay { .. } => None,
        }
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        match self.schedule {
            Schedule::SingleDay { end_time, .. } => end_time,
            Schedule::MultiDay { .. } => None,
        }
    }

    pub fn is_multi_day(&self) -> bool {
        matches!(self.schedule, Schedule::MultiDay { .. })
    }

    /// First and last day occupied, inclusive.
    pub fn day_span(&self) -> (NaiveDate, NaiveDate) {
        match self.schedule {
            Schedule::SingleDay { date, .. } => (date, date),
            Schedule::MultiDay { start, end } => (start, end),
        }
    }

    /// Human-readable date/time portion, e.g. "2025-07-09 → 2025-07-10" or
    /// "2025-07-09 14:00-16:00".
    pub fn render_when(&self) -> String {
        match &self.schedule {
            Schedule::MultiDay { start, end } => format!("{start} → {end}"),
            Schedule::SingleDay {
                date,
                start_time,
                end_time,
            } => match (start_time, end_time) {
                (Some(s), Some(e)) => {
                    format!("{date} {}-{}", s.format(TIME_FORMAT), e.format(TIME_FORMAT))
                }
                (Some(s), None) => format!("{date} {}", s.format(TIME_FORMAT)),
                _ => date.to_string(),
            },
        }
    }
}

impl fmt::Display for EventDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.title, self.event_type, self.render_when())
    }
}

/// Flat wire shape of a draft: camelCase keys, ISO dates, `HH:MM` times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftRecord {
    #[serde(rename = "type")]
    event_type: EventType,
    title: String,
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,
}

impl From<EventDraft> for DraftRecord {
    fn from(draft: EventDraft) -> Self {
        let format_time = |t: Option<NaiveTime>| t.map(|t| t.format(TIME_FORMAT).to_string());
        DraftRecord {
            event_type: draft.event_type,
            date: draft.date(),
            start_date: draft.start_date(),
            end_date: draft.end_date(),
            start_time: format_time(draft.start_time()),
            end_time: format_time(draft.end_time()),
            title: draft.title,
        }
    }
}

impl TryFrom<DraftRecord> for EventDraft {
    type Error = PlanCalError;

    fn try_from(record: DraftRecord) -> Result<Self, Self::Error> {
        if record.title.trim().is_empty() {
            return Err(PlanCalError::InvalidDraft("title is empty".into()));
        }

        let parse_time = |s: Option<String>| -> PlanCalResult<Option<NaiveTime>> {
            s.map(|s| {
                NaiveTime::parse_from_str(&s, TIME_FORMAT)
                    .map_err(|_| PlanCalError::InvalidDraft(format!("invalid time '{s}'")))
            })
            .transpose()
        };

        match (record.start_date, record.end_date) {
            (None, None) => Ok(EventDraft::timed(
                record.event_type,
                record.title,
                record.date,
                parse_time(record.start_time)?,
                parse_time(record.end_time)?,
            )),
            (Some(start), Some(end)) => {
                if start != record.date {
                    return Err(PlanCalError::InvalidDraft(format!(
                        "date {} does not match startDate {start}",
                        record.date
                    )));
                }
                if record.start_time.is_some() || record.end_time.is_some() {
                    return Err(PlanCalError::InvalidDraft(
                        "multi-day drafts cannot carry times".into(),
                    ));
                }
                EventDraft::spanning(record.event_type, record.title, start, end)
            }
            _ => Err(PlanCalError::InvalidDraft(
                "startDate and endDate must be set together".into(),
            )),
        }
    }
}

/// A draft after persistence: identifier plus timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    #[serde(flatten)]
    pub draft: EventDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn from_draft(draft: EventDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft, Utc::now())
    }

    pub fn with_id(id: Uuid, draft: EventDraft, at: DateTime<Utc>) -> Self {
        Event {
            id,
            draft,
            created_at: at,
            updated_at: at,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.draft)
    }
}
