//! Colored terminal rendering for plancal types.

use std::collections::HashMap;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use plancal_core::layout::{WeekLayout, WeekSlot};
use plancal_core::{Event, EventDraft, EventType};
use uuid::Uuid;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text according to the event type
fn colorize_type(event_type: EventType, text: &str) -> String {
    match event_type {
        EventType::Planning => text.blue().to_string(),
        EventType::Meeting => text.green().to_string(),
        EventType::MonthlyReview => text.magenta().to_string(),
        EventType::Holidays => text.yellow().to_string(),
    }
}

impl Render for EventType {
    fn render(&self) -> String {
        colorize_type(*self, &format!("{:<14}", self.as_str()))
    }
}

impl Render for EventDraft {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.event_type.render(),
            self.title().bold(),
            self.render_when().dimmed()
        )
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Width of one day column in the week view, separator included.
pub const COL_WIDTH: usize = 14;

/// Fixed-width label for an event chip covering `span` columns.
///
/// `<` and `>` mark an event that carries on into the previous or next week;
/// otherwise the chip is bracketed. Long titles are cut with `…`.
pub fn chip_label(
    title: &str,
    span: usize,
    continues_before: bool,
    continues_after: bool,
    col_width: usize,
) -> String {
    let width = (span * col_width).saturating_sub(1).max(2);
    let inner = width - 2;

    let count = title.chars().count();
    let body: String = if count > inner {
        title
            .chars()
            .take(inner.saturating_sub(1))
            .chain(std::iter::once('…'))
            .collect()
    } else {
        format!("{}{}", title, " ".repeat(inner - count))
    };

    let left = if continues_before { '<' } else { '[' };
    let right = if continues_after { '>' } else { ']' };
    format!("{}{}{}", left, body, right)
}

/// One lane as a line of text. `chips` must be ordered by column and must
/// not overlap; padding comes from the slot geometry, so chips may carry
/// color codes.
pub fn lane_row(chips: &[(WeekSlot, String)], col_width: usize) -> String {
    let mut row = String::new();
    let mut col = 0;
    for (slot, chip) in chips {
        row.push_str(&" ".repeat(slot.start_col.saturating_sub(col) * col_width));
        row.push_str(chip);
        row.push(' ');
        col = slot.start_col + slot.span;
    }
    row.trim_end().to_string()
}

fn day_header(day: NaiveDate) -> String {
    format!("{:<width$}", day.format("%a %m/%d").to_string(), width = COL_WIDTH)
}

/// A business week: a header row, one row per lane, then the single-day
/// events falling inside the week.
pub fn render_week(layout: &WeekLayout<Uuid>, events: &[Event]) -> String {
    let by_id: HashMap<Uuid, &Event> = events.iter().map(|event| (event.id, event)).collect();
    let mut lines = Vec::new();

    let header: String = layout.week_days.iter().map(|day| day_header(*day)).collect();
    lines.push(header.trim_end().bold().to_string());

    for lane in 0..layout.max_lanes() {
        let chips: Vec<(WeekSlot, String)> = layout
            .slots
            .iter()
            .filter(|(_, slot)| slot.lane == lane)
            .filter_map(|(id, slot)| {
                let event = by_id.get(id)?;
                let label = chip_label(
                    event.draft.title(),
                    slot.span,
                    slot.continues_before,
                    slot.continues_after,
                    COL_WIDTH,
                );
                Some((*slot, colorize_type(event.draft.event_type, &label)))
            })
            .collect();
        lines.push(lane_row(&chips, COL_WIDTH));
    }

    let (Some(first), Some(last)) = (layout.week_days.first(), layout.week_days.last()) else {
        return lines.join("\n");
    };
    let mut singles: Vec<&Event> = events
        .iter()
        .filter(|event| !event.draft.is_multi_day())
        .filter(|event| (*first..=*last).contains(&event.draft.date()))
        .collect();
    singles.sort_by_key(|event| event.draft.date());

    for event in singles {
        lines.push(format!(
            "  {} {}",
            event.draft.date().format("%a %m/%d").to_string().dimmed(),
            colorize_type(event.draft.event_type, event.draft.title())
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(lane: usize, start_col: usize, span: usize) -> WeekSlot {
        WeekSlot {
            lane,
            start_col,
            span,
            continues_before: false,
            continues_after: false,
        }
    }

    #[test]
    fn chip_fills_its_columns() {
        let chip = chip_label("Offsite", 2, false, false, 10);
        assert_eq!(chip.chars().count(), 19);
        assert!(chip.starts_with("[Offsite"));
        assert!(chip.ends_with(']'));
    }

    #[test]
    fn chip_marks_continuation() {
        let chip = chip_label("Freeze", 1, true, true, 10);
        assert_eq!(chip, "<Freeze >");
    }

    #[test]
    fn chip_truncates_long_titles() {
        let chip = chip_label("Commit Documentation", 1, false, false, 10);
        assert_eq!(chip, "[Commit…]");
        assert_eq!(chip.chars().count(), 9);
    }

    #[test]
    fn lane_row_pads_to_start_column() {
        let chips = vec![
            (slot(0, 1, 1), "[a]".to_string()),
            (slot(0, 3, 2), "[b]".to_string()),
        ];
        assert_eq!(lane_row(&chips, 4), "    [a]     [b]");
    }

    #[test]
    fn lane_row_empty_lane_is_blank() {
        assert_eq!(lane_row(&[], 4), "");
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("line", 1), "line");
        assert_eq!(pluralize("line", 3), "lines");
    }
}
