use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use plancal_core::parse::{BulkOptions, parse_bulk_report};

use crate::render::{Render, pluralize};
use crate::utils::input::read_input;

pub fn run(file: Option<&Path>, options: &BulkOptions, json: bool) -> Result<()> {
    let text = read_input(file)?;
    let report = parse_bulk_report(&text, options);

    if json {
        let out = serde_json::to_string_pretty(&report.drafts)
            .context("Failed to serialize drafts")?;
        println!("{}", out);
        return Ok(());
    }

    if report.drafts.is_empty() {
        println!("{}", "No events found".dimmed());
    }
    for draft in &report.drafts {
        println!("  {}", draft.render());
    }

    if !report.skipped.is_empty() {
        println!();
        println!(
            "{}",
            format!(
                "Skipped {} {}:",
                report.skipped.len(),
                pluralize("line", report.skipped.len())
            )
            .yellow()
        );
        for skipped in &report.skipped {
            println!(
                "  {} {} {}",
                format!("{:>4}", skipped.line_number).dimmed(),
                skipped.line,
                format!("({})", skipped.reason).dimmed()
            );
        }
    }

    if report.clipped > 0 {
        println!();
        println!(
            "{}",
            format!(
                "{} {} outside {} to {} left out (use --all to keep them)",
                report.clipped,
                pluralize("event", report.clipped),
                options.window.start(),
                options.window.end()
            )
            .dimmed()
        );
    }

    Ok(())
}
