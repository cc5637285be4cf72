//! Input validation and zero-padding of raw code batches.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::LabelError;

/// Minimum number of digits in a normalized code.
pub const CODE_WIDTH: usize = 8;

/// A digits-only code, zero-padded to at least [`CODE_WIDTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedCode(String);

impl NormalizedCode {
    /// Pad a parsed value to the minimum width. Wider values are kept as-is.
    pub fn from_value(value: u64) -> Self {
        NormalizedCode(format!("{:0width$}", value, width = CODE_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NormalizedCode {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s.trim(), 1)
    }
}

impl AsRef<str> for NormalizedCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split newline-delimited text and normalize every non-blank line.
pub fn normalize(raw_text: &str) -> Result<Vec<NormalizedCode>, LabelError> {
    normalize_batch(raw_text.split('\n'))
}

/// Normalize pre-split lines. One malformed line rejects the whole batch.
pub fn normalize_batch<I, S>(raw_lines: I) -> Result<Vec<NormalizedCode>, LabelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut codes = Vec::new();
    for (idx, raw) in raw_lines.into_iter().enumerate() {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        codes.push(parse_line(line, idx + 1)?);
    }
    Ok(codes)
}

fn parse_line(line: &str, line_no: usize) -> Result<NormalizedCode, LabelError> {
    let invalid = || LabelError::InvalidCodeFormat {
        line: line_no,
        content: line.to_string(),
    };
    // `u64::from_str` accepts a leading '+', which is not a digit.
    if !line.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u64 = line.parse().map_err(|_| invalid())?;
    Ok(NormalizedCode::from_value(value))
}

/// Turn every non-digit character into a line break, the way the input
/// fields filter keystrokes. `"12a34"` becomes `"12\n34"`.
pub fn sanitize_input(raw_text: &str) -> String {
    raw_text
        .chars()
        .map(|ch| if ch.is_ascii_digit() { ch } else { '\n' })
        .collect()
}
