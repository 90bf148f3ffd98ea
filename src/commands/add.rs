use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use plancal_core::parse::{NaturalParse, parse_natural_language};

use crate::render::Render;

const REPHRASE_HINT: &str = "Try a different phrasing, e.g. \"Team meeting tomorrow 2-4pm\"";

pub fn run(input: &str, today: NaiveDate, json: bool) -> Result<()> {
    let draft = match parse_natural_language(input, today) {
        NaturalParse::Parsed(draft) => draft,
        NaturalParse::NoDate => {
            anyhow::bail!("Could not find a date in \"{}\". {}", input, REPHRASE_HINT)
        }
        NaturalParse::NoTitle => {
            anyhow::bail!("Could not find a title in \"{}\". {}", input, REPHRASE_HINT)
        }
    };

    if json {
        let out = serde_json::to_string_pretty(&draft).context("Failed to serialize draft")?;
        println!("{}", out);
    } else {
        println!("{} {}", "Parsed:".green(), draft.render());
    }

    Ok(())
}
