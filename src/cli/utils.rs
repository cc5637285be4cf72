//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use barcode_labels::{GenerationReport, sanitize_input};

use crate::cli::common::InputArgs;

/// Resolve input text given inline, from a file, or on stdin.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }
    if let Some(path) = from {
        if path.as_os_str() == "-" {
            return read_stdin();
        }
        return fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    read_stdin()
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Read the codes for a command, applying the lenient filter when asked.
pub fn read_codes(inline: Option<String>, input: InputArgs) -> Result<String> {
    let text = read_text_arg(inline, input.from)?;
    Ok(if input.lenient {
        sanitize_input(&text)
    } else {
        text
    })
}

/// Print the outcome of a successful request.
pub fn print_report(report: &GenerationReport, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).context("failed to serialize report")?;
        println!("{}", rendered);
        return Ok(());
    }
    println!("{}", report.user_message());
    for path in &report.artifacts {
        println!("  {}", path.display());
    }
    Ok(())
}
