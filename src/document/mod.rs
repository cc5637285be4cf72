//! PDF label sheets for batch generation.

mod layout;
mod pdf;

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

pub use layout::{A4_HEIGHT_PT, A4_WIDTH_PT, CellPlacement, GridLayout, Padding, Rect};

use crate::error::LabelError;
use crate::normalize::NormalizedCode;
use crate::raster::RenderedLabel;
use crate::render::render_for_document;
use crate::symbology::Symbology;

/// Outcome of a successful [`assemble`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub cells: usize,
}

/// Lay out `codes` on the default grid and write the PDF to `destination`.
pub fn assemble(
    codes: &[NormalizedCode],
    symbology: Symbology,
    destination: &Path,
) -> Result<DocumentSummary, LabelError> {
    assemble_with(codes, symbology, destination, &GridLayout::default())
}

/// All codes are rendered before the destination is touched, so a code the
/// symbology rejects leaves no file behind. An existing file at
/// `destination` is never replaced.
pub fn assemble_with(
    codes: &[NormalizedCode],
    symbology: Symbology,
    destination: &Path,
    layout: &GridLayout,
) -> Result<DocumentSummary, LabelError> {
    let sheet = build_sheet(codes, symbology, layout, destination)?;
    let file = create_new(destination).map_err(|err| LabelError::io(destination, err))?;
    finish_sheet(sheet, file, destination, symbology)
}

/// Like [`assemble`], but into an auto-named `barcodes-<millis>.pdf` in
/// `directory` (see [`create_batch_file`]).
pub fn assemble_batch(
    codes: &[NormalizedCode],
    symbology: Symbology,
    directory: &Path,
    now: DateTime<Utc>,
) -> Result<DocumentSummary, LabelError> {
    let sheet = build_sheet(codes, symbology, &GridLayout::default(), directory)?;
    let (path, file) = create_batch_file(directory, now)?;
    finish_sheet(sheet, file, &path, symbology)
}

struct Sheet {
    bytes: Vec<u8>,
    pages: usize,
    cells: usize,
}

fn build_sheet(
    codes: &[NormalizedCode],
    symbology: Symbology,
    layout: &GridLayout,
    destination: &Path,
) -> Result<Sheet, LabelError> {
    if codes.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    let labels = codes
        .iter()
        .map(|code| render_for_document(code, symbology))
        .collect::<Result<Vec<RenderedLabel>, _>>()?;

    let sizes: Vec<(f32, f32)> = labels.iter().map(RenderedLabel::size_pt).collect();
    let placements = layout.place(&sizes);
    let bytes = pdf::write_pdf(&labels, &placements, layout)
        .map_err(|err| LabelError::io(destination, err))?;
    Ok(Sheet {
        bytes,
        pages: placements.last().map_or(1, |p| p.page + 1),
        cells: labels.len(),
    })
}

/// `file` was created by this call, so a failed write may remove it.
fn finish_sheet(
    sheet: Sheet,
    mut file: File,
    path: &Path,
    symbology: Symbology,
) -> Result<DocumentSummary, LabelError> {
    let written = file.write_all(&sheet.bytes).and_then(|()| file.flush());
    drop(file);
    if let Err(err) = written {
        if fs::remove_file(path).is_err() {
            warn!(path = %path.display(), "left a partial document behind");
        }
        return Err(LabelError::io(path, err));
    }

    info!(
        path = %path.display(),
        %symbology,
        cells = sheet.cells,
        pages = sheet.pages,
        "wrote label sheet"
    );
    Ok(DocumentSummary {
        path: path.to_path_buf(),
        pages: sheet.pages,
        cells: sheet.cells,
    })
}

fn create_new(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// `barcodes-<unix millis>.pdf`
pub fn batch_file_name(unix_millis: i64) -> String {
    format!("barcodes-{}.pdf", unix_millis)
}

/// Exclusively create the sheet file for `now` in `directory`.
///
/// When a sheet from the same millisecond already exists, `-1`, `-2`, ... is
/// appended instead of overwriting it. The name is claimed by the open
/// itself, so concurrent runs never share a file.
pub fn create_batch_file(
    directory: &Path,
    now: DateTime<Utc>,
) -> Result<(PathBuf, File), LabelError> {
    let millis = now.timestamp_millis();
    let mut suffix = 0u32;
    loop {
        let name = match suffix {
            0 => batch_file_name(millis),
            n => format!("barcodes-{}-{}.pdf", millis, n),
        };
        let path = directory.join(name);
        match create_new(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
            Err(err) => return Err(LabelError::io(&path, err)),
        }
    }
}
