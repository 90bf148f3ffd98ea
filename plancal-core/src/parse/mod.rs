//! Text to event draft parsers.

pub mod bulk;
pub mod keywords;
pub mod natural;
pub mod phrase;
mod patterns;

pub use bulk::{
    BulkOptions, BulkReport, SkippedLine, parse_bulk_report, parse_bulk_text,
    parse_line_to_events,
};
pub use keywords::{guess_type, infer_sentence_type};
pub use natural::{NaturalParse, parse_natural_language};
pub use phrase::{PhraseMatch, parse_date_phrase};
