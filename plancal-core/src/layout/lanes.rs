//! Lane assignment for multi-day events.
//!
//! Each event becomes an inclusive interval of day columns. Intervals are
//! sorted by start column, longer ones first on ties, and then placed in the
//! first lane where they collide with nothing. For interval graphs this
//! greedy order uses the minimum possible number of lanes, so the sort key
//! must not change.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDate;

/// Inclusive range of day columns within a rendered week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInterval {
    start: usize,
    end: usize,
}

impl DayInterval {
    /// None when `end` precedes `start`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then_some(DayInterval { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of columns covered.
    pub fn span(&self) -> usize {
        self.end - self.start + 1
    }

    /// Two intervals overlap unless one ends before the other starts.
    pub fn overlaps(&self, other: &DayInterval) -> bool {
        !(self.end < other.start || other.end < self.start)
    }
}

/// Columns of `week_days` covered by the inclusive date span `first..=last`.
///
/// `week_days` must be in ascending order. Returns None when the span misses
/// every listed day.
pub fn week_interval(
    first: NaiveDate,
    last: NaiveDate,
    week_days: &[NaiveDate],
) -> Option<DayInterval> {
    let start = week_days.iter().position(|day| *day >= first)?;
    let end = week_days.iter().rposition(|day| *day <= last)?;
    DayInterval::new(start, end)
}

/// Lane of each placed event plus the number of lanes opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment<K: Eq + Hash> {
    lane_of: HashMap<K, usize>,
    max_lanes: usize,
}

impl<K: Eq + Hash> LaneAssignment<K> {
    pub fn lane_of(&self, id: &K) -> Option<usize> {
        self.lane_of.get(id).copied()
    }

    /// Lanes in use; the renderer reserves this many rows.
    pub fn max_lanes(&self) -> usize {
        self.max_lanes
    }

    pub fn len(&self) -> usize {
        self.lane_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lane_of.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.lane_of.iter().map(|(id, lane)| (id, *lane))
    }
}

/// Assign every interval to the lowest lane it fits in.
pub fn assign_lanes<K, I>(intervals: I) -> LaneAssignment<K>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, DayInterval)>,
{
    let mut sorted: Vec<(K, DayInterval)> = intervals.into_iter().collect();
    sorted.sort_by(|(_, a), (_, b)| a.start.cmp(&b.start).then(b.span().cmp(&a.span())));

    let mut lanes: Vec<Vec<DayInterval>> = Vec::new();
    let mut lane_of = HashMap::with_capacity(sorted.len());

    for (id, interval) in sorted {
        let free = lanes
            .iter()
            .position(|occupied| occupied.iter().all(|taken| !taken.overlaps(&interval)));
        let lane = match free {
            Some(lane) => lane,
            None => {
                lanes.push(Vec::new());
                lanes.len() - 1
            }
        };
        lanes[lane].push(interval);
        lane_of.insert(id, lane);
    }

    LaneAssignment {
        lane_of,
        max_lanes: lanes.len(),
    }
}
