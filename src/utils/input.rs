use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read the whole input text from `file`, or from stdin when it is absent or "-".
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Could not read stdin")?;
            Ok(text)
        }
    }
}
