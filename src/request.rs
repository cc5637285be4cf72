//! One generation request, from raw text to written artifacts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::document::assemble_batch;
use crate::error::LabelError;
use crate::normalize::{NormalizedCode, normalize};
use crate::raster::RenderOptions;
use crate::render::{render_label, write_all_single};
use crate::symbology::Symbology;

/// Which artifact a request produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Png,
    Pdf,
}

/// What a successful request wrote.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub kind: OutputKind,
    pub symbology: Symbology,
    pub codes: Vec<NormalizedCode>,
    pub artifacts: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    pub generated_at: DateTime<Utc>,
}

impl GenerationReport {
    /// Fixed confirmation text for the person who asked for the labels.
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            OutputKind::Png => "Código gerado com sucesso",
            OutputKind::Pdf => "Códigos gerados com sucesso",
        }
    }
}

/// Write one `<code>.png` per code in `raw_text` into `destination`.
///
/// Every code is rendered before any file is written.
pub fn generate_single(
    raw_text: &str,
    symbology: Symbology,
    destination: Option<&Path>,
) -> Result<GenerationReport, LabelError> {
    let (codes, directory) = prepare(raw_text, destination)?;
    let options = RenderOptions::default();
    let labels = codes
        .iter()
        .map(|code| render_label(code, symbology, &options))
        .collect::<Result<Vec<_>, _>>()?;
    let artifacts = write_all_single(&labels, directory)?;
    Ok(GenerationReport {
        kind: OutputKind::Png,
        symbology,
        codes,
        artifacts,
        pages: None,
        generated_at: Utc::now(),
    })
}

/// Write every code in `raw_text` to one auto-named PDF sheet in `destination`.
pub fn generate_batch(
    raw_text: &str,
    symbology: Symbology,
    destination: Option<&Path>,
) -> Result<GenerationReport, LabelError> {
    let (codes, directory) = prepare(raw_text, destination)?;
    let now = Utc::now();
    let summary = assemble_batch(&codes, symbology, directory, now)?;
    Ok(GenerationReport {
        kind: OutputKind::Pdf,
        symbology,
        codes,
        artifacts: vec![summary.path],
        pages: Some(summary.pages),
        generated_at: now,
    })
}

/// Boundary checks first, then normalization.
fn prepare<'a>(
    raw_text: &str,
    destination: Option<&'a Path>,
) -> Result<(Vec<NormalizedCode>, &'a Path), LabelError> {
    if raw_text.trim().is_empty() {
        return Err(LabelError::EmptyInput);
    }
    let directory = destination
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or(LabelError::NoDestination)?;
    let codes = normalize(raw_text)?;
    Ok((codes, directory))
}
