//! Keyword tables for event type inference.
//!
//! Each table is scanned top to bottom and the first rule with a keyword
//! contained in the lower-cased text wins, so the row order is the precedence.

use crate::event::EventType;

type Rules = &'static [(EventType, &'static [&'static str])];

/// Bulk import rules, matched against the title.
const TITLE_RULES: Rules = &[
    (EventType::MonthlyReview, &["monthly review"]),
    (EventType::Holidays, &["holiday", "annual leave", "pto"]),
    (
        EventType::Meeting,
        &["meeting", "review", "alignment", "kickoff"],
    ),
];

/// Quick-add rules, matched against the whole sentence.
const SENTENCE_RULES: Rules = &[
    (EventType::Planning, &["planning", "pi planning", "qbr planning"]),
    (
        EventType::MonthlyReview,
        &["monthly review", "month review", "monthly"],
    ),
    (
        EventType::Meeting,
        &["meeting", "standup", "review", "retrospective", "qbr"],
    ),
    (
        EventType::Holidays,
        &["holiday", "vacation", "thanksgiving", "veterans", "christmas"],
    ),
];

fn first_match(text: &str, rules: Rules) -> Option<EventType> {
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(event_type, _)| *event_type)
}

/// Type of a bulk-imported title; PLANNING when nothing matches.
pub fn guess_type(title: &str) -> EventType {
    first_match(title, TITLE_RULES).unwrap_or(EventType::Planning)
}

/// Type implied by a quick-add sentence, if any keyword is present.
pub fn infer_sentence_type(input: &str) -> Option<EventType> {
    first_match(input, SENTENCE_RULES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_type_defaults_to_planning() {
        assert_eq!(guess_type("Commit Documentation"), EventType::Planning);
    }

    #[test]
    fn monthly_review_beats_plain_review() {
        assert_eq!(guess_type("Ops Monthly Review"), EventType::MonthlyReview);
    }

    #[test]
    fn holiday_is_checked_before_meeting() {
        assert_eq!(guess_type("Holiday Party Meeting"), EventType::Holidays);
    }

    #[test]
    fn guess_type_matches_meeting_keywords() {
        assert_eq!(guess_type("Product Mngt Leader Review"), EventType::Meeting);
        assert_eq!(guess_type("Q3 Alignment"), EventType::Meeting);
        assert_eq!(guess_type("Program KICKOFF"), EventType::Meeting);
    }

    #[test]
    fn guess_type_matches_leave_keywords() {
        assert_eq!(guess_type("Annual Leave - Sam"), EventType::Holidays);
        assert_eq!(guess_type("PTO"), EventType::Holidays);
    }

    #[test]
    fn sentence_planning_beats_meeting() {
        assert_eq!(
            infer_sentence_type("PI Planning meeting oct 15-17"),
            Some(EventType::Planning)
        );
    }

    #[test]
    fn sentence_monthly_beats_review() {
        assert_eq!(
            infer_sentence_type("monthly ops review 3 nov"),
            Some(EventType::MonthlyReview)
        );
    }

    #[test]
    fn sentence_meeting_beats_holiday() {
        assert_eq!(
            infer_sentence_type("Christmas standup 12/22"),
            Some(EventType::Meeting)
        );
    }

    #[test]
    fn sentence_without_keywords_is_none() {
        assert_eq!(infer_sentence_type("Lunch with Ana tomorrow"), None);
    }
}
