//! Business-day calendar grid and per-week placement of multi-day events.

use std::hash::Hash;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use uuid::Uuid;

use super::lanes::{DayInterval, LaneAssignment, assign_lanes, week_interval};
use crate::error::{PlanCalError, PlanCalResult};
use crate::event::{Event, EventDraft};

/// Columns per rendered week, Monday through Friday.
pub const BUSINESS_DAYS_PER_WEEK: usize = 5;

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday through Friday of the week containing `date`.
pub fn business_days_of_week(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    monday.iter_days().take(BUSINESS_DAYS_PER_WEEK).collect()
}

/// The business-day rows of a month view.
///
/// Every week that has at least one business day inside the month is listed
/// in full, so the first and last rows may include days of the neighbouring
/// months.
pub fn month_business_weeks(year: i32, month: u32) -> PlanCalResult<Vec<Vec<NaiveDate>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| PlanCalError::InvalidDate(format!("{year}-{month:02}")))?;
    let next_month = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(|| PlanCalError::InvalidDate(format!("{year}-{month:02}")))?;
    let last = next_month - Duration::days(1);

    let mut weeks = Vec::new();
    let mut monday = first - Duration::days(first.weekday().num_days_from_monday() as i64);
    while monday <= last {
        let days = business_days_of_week(monday);
        if days.iter().any(|day| first <= *day && *day <= last) {
            weeks.push(days);
        }
        monday += Duration::days(7);
    }
    Ok(weeks)
}

/// Anything that occupies an inclusive range of calendar days.
pub trait Spanning {
    type Id: Eq + Hash + Clone;

    fn span_id(&self) -> Self::Id;

    /// First and last day, inclusive.
    fn day_span(&self) -> (NaiveDate, NaiveDate);

    fn is_multi_day(&self) -> bool {
        let (first, last) = self.day_span();
        first < last
    }
}

impl Spanning for Event {
    type Id = Uuid;

    fn span_id(&self) -> Uuid {
        self.id
    }

    fn day_span(&self) -> (NaiveDate, NaiveDate) {
        self.draft.day_span()
    }
}

/// Drafts have no identity of their own; they are keyed by position.
impl Spanning for (usize, &EventDraft) {
    type Id = usize;

    fn span_id(&self) -> usize {
        self.0
    }

    fn day_span(&self) -> (NaiveDate, NaiveDate) {
        self.1.day_span()
    }
}

/// Where one event's chip sits in a rendered week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSlot {
    pub lane: usize,
    pub start_col: usize,
    /// Number of day columns covered.
    pub span: usize,
    /// The event began before the first column it occupies.
    pub continues_before: bool,
    /// The event carries on past the last column it occupies.
    pub continues_after: bool,
}

/// Lane layout of one rendered week.
#[derive(Debug, Clone)]
pub struct WeekLayout<K: Eq + Hash> {
    pub week_days: Vec<NaiveDate>,
    pub lanes: LaneAssignment<K>,
    /// Placed events ordered by lane, then by column.
    pub slots: Vec<(K, WeekSlot)>,
}

impl<K: Eq + Hash> WeekLayout<K> {
    pub fn max_lanes(&self) -> usize {
        self.lanes.max_lanes()
    }

    pub fn slot_of(&self, id: &K) -> Option<&WeekSlot> {
        self.slots.iter().find(|(k, _)| k == id).map(|(_, slot)| slot)
    }
}

/// Lay out the multi-day events among `events` over one week of business days.
///
/// Single-day events and events that miss every day in `week_days` are left
/// out. `week_days` must be in ascending order.
pub fn assign_week_lanes<'a, E, I>(events: I, week_days: &[NaiveDate]) -> WeekLayout<E::Id>
where
    E: Spanning + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let placed: Vec<(E::Id, DayInterval, (NaiveDate, NaiveDate))> = events
        .into_iter()
        .filter(|event| event.is_multi_day())
        .filter_map(|event| {
            let (first, last) = event.day_span();
            let interval = week_interval(first, last, week_days)?;
            Some((event.span_id(), interval, (first, last)))
        })
        .collect();

    let lanes = assign_lanes(
        placed
            .iter()
            .map(|(id, interval, _)| (id.clone(), *interval)),
    );

    let mut slots: Vec<(E::Id, WeekSlot)> = placed
        .into_iter()
        .filter_map(|(id, interval, (first, last))| {
            let lane = lanes.lane_of(&id)?;
            let slot = WeekSlot {
                lane,
                start_col: interval.start(),
                span: interval.span(),
                continues_before: first < week_days[interval.start()],
                continues_after: last > week_days[interval.end()],
            };
            Some((id, slot))
        })
        .collect();
    slots.sort_by_key(|(_, slot)| (slot.lane, slot.start_col));

    WeekLayout {
        week_days: week_days.to_vec(),
        lanes,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn span(title: &str, start: NaiveDate, end: NaiveDate) -> EventDraft {
        EventDraft::spanning(EventType::Planning, title, start, end).unwrap()
    }

    #[test]
    fn business_days_of_week_starts_on_monday() {
        let days = business_days_of_week(d(2025, 7, 10));
        assert_eq!(days.first(), Some(&d(2025, 7, 7)));
        assert_eq!(days.last(), Some(&d(2025, 7, 11)));
        assert!(days.iter().all(|day| is_business_day(*day)));
    }

    #[test]
    fn business_days_of_week_from_sunday() {
        let days = business_days_of_week(d(2025, 7, 13));
        assert_eq!(days.first(), Some(&d(2025, 7, 7)));
    }

    #[test]
    fn month_weeks_skip_weekend_only_first_week() {
        // November 2025 starts on a Saturday.
        let weeks = month_business_weeks(2025, 11).unwrap();
        assert_eq!(weeks.first().unwrap()[0], d(2025, 11, 3));
        assert_eq!(weeks.last().unwrap()[0], d(2025, 11, 24));
        assert_eq!(weeks.len(), 4);
    }

    #[test]
    fn month_weeks_include_overlapping_neighbour_days() {
        // July 2025 starts on a Tuesday and ends on a Thursday.
        let weeks = month_business_weeks(2025, 7).unwrap();
        assert_eq!(weeks[0][0], d(2025, 6, 30));
        assert_eq!(weeks.last().unwrap()[4], d(2025, 8, 1));
        assert_eq!(weeks.len(), 5);
    }

    #[test]
    fn month_weeks_reject_invalid_month() {
        assert!(month_business_weeks(2025, 13).is_err());
    }

    #[test]
    fn week_layout_places_overlapping_drafts() {
        let drafts = [
            span("Whole week", d(2025, 7, 7), d(2025, 7, 11)),
            span("Early", d(2025, 7, 7), d(2025, 7, 8)),
            span("Late", d(2025, 7, 9), d(2025, 7, 10)),
            EventDraft::single_day(EventType::Meeting, "Standalone", d(2025, 7, 9)),
        ];
        let keyed: Vec<_> = drafts.iter().enumerate().collect();
        let week = business_days_of_week(d(2025, 7, 7));

        let layout = assign_week_lanes(&keyed, &week);
        assert_eq!(layout.max_lanes(), 2);
        assert_eq!(layout.slots.len(), 3);
        assert!(layout.slot_of(&3).is_none());

        let whole = layout.slot_of(&0).unwrap();
        assert_eq!((whole.lane, whole.start_col, whole.span), (0, 0, 5));
        let late = layout.slot_of(&2).unwrap();
        assert_eq!((late.lane, late.start_col, late.span), (1, 2, 2));
    }

    #[test]
    fn week_layout_marks_continuation() {
        let drafts = [span("Freeze", d(2025, 7, 3), d(2025, 7, 15))];
        let keyed: Vec<_> = drafts.iter().enumerate().collect();
        let week = business_days_of_week(d(2025, 7, 7));

        let layout = assign_week_lanes(&keyed, &week);
        let slot = layout.slot_of(&0).unwrap();
        assert_eq!((slot.start_col, slot.span), (0, 5));
        assert!(slot.continues_before);
        assert!(slot.continues_after);
    }

    #[test]
    fn weekend_span_is_not_placed() {
        let drafts = [span("Hackathon", d(2025, 7, 12), d(2025, 7, 13))];
        let keyed: Vec<_> = drafts.iter().enumerate().collect();
        let layout = assign_week_lanes(&keyed, &business_days_of_week(d(2025, 7, 7)));
        assert_eq!(layout.max_lanes(), 0);
        assert!(layout.slots.is_empty());
    }

    #[test]
    fn events_are_keyed_by_id() {
        let event = Event::from_draft(span("Offsite", d(2025, 7, 8), d(2025, 7, 9)));
        let events = vec![event.clone()];
        let layout = assign_week_lanes(&events, &business_days_of_week(d(2025, 7, 8)));
        assert_eq!(layout.lanes.lane_of(&event.id), Some(0));
    }
}
