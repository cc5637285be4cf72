//! Turning normalized codes into barcode rasters and PNG files.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::LabelError;
use crate::normalize::NormalizedCode;
use crate::raster::{RenderOptions, RenderedLabel, pack_bits, paint_label};
use crate::symbology::Symbology;

/// Encode `code` with the symbology's encoder and rasterise it.
pub fn render_label(
    code: &NormalizedCode,
    symbology: Symbology,
    options: &RenderOptions,
) -> Result<RenderedLabel, LabelError> {
    let pattern = symbology
        .encoder()
        .encode(code.as_str())
        .map_err(|source| LabelError::RenderFailure {
            code: code.to_string(),
            source,
        })?;
    let label = paint_label(code, symbology, &pattern, options);
    debug!(
        code = %code,
        %symbology,
        modules = label.modules,
        width = label.width_px(),
        height = label.height_px(),
        "rendered label"
    );
    Ok(label)
}

/// Render one code and write it to `<directory>/<code>.png`.
///
/// An existing file with the same name is replaced.
pub fn render_single(
    code: &NormalizedCode,
    symbology: Symbology,
    directory: &Path,
) -> Result<PathBuf, LabelError> {
    let label = render_label(code, symbology, &RenderOptions::default())?;
    write_single(&label, directory)
}

/// Write an already rendered label to `<directory>/<code>.png`.
pub fn write_single(label: &RenderedLabel, directory: &Path) -> Result<PathBuf, LabelError> {
    let path = single_file_path(directory, &label.code);
    write_png(label, &path)?;
    info!(path = %path.display(), symbology = %label.symbology, "wrote barcode image");
    Ok(path)
}

/// Write every label, or none: on the first failure the files already
/// written by this call are removed again.
pub fn write_all_single(
    labels: &[RenderedLabel],
    directory: &Path,
) -> Result<Vec<PathBuf>, LabelError> {
    let mut written = Vec::with_capacity(labels.len());
    for label in labels {
        match write_single(label, directory) {
            Ok(path) => written.push(path),
            Err(err) => {
                for path in &written {
                    if fs::remove_file(path).is_err() {
                        warn!(path = %path.display(), "left an image behind");
                    }
                }
                return Err(err);
            }
        }
    }
    Ok(written)
}

/// Render a code for placement on a PDF sheet. Nothing is written to disk.
pub fn render_for_document(
    code: &NormalizedCode,
    symbology: Symbology,
) -> Result<RenderedLabel, LabelError> {
    render_label(code, symbology, &RenderOptions::document())
}

pub fn single_file_path(directory: &Path, code: &NormalizedCode) -> PathBuf {
    directory.join(format!("{}.png", code))
}

/// Encode the label as a 1-bit greyscale PNG. The handle is closed on every
/// return path.
pub fn write_png(label: &RenderedLabel, path: &Path) -> Result<(), LabelError> {
    let file = File::create(path).map_err(|err| LabelError::io(path, err))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), label.width_px(), label.height_px());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::One);
    let mut writer = encoder
        .write_header()
        .map_err(|err| LabelError::io(path, png_to_io(err)))?;
    writer
        .write_image_data(&pack_bits(&label.image))
        .map_err(|err| LabelError::io(path, png_to_io(err)))?;
    writer
        .finish()
        .map_err(|err| LabelError::io(path, png_to_io(err)))
}

fn png_to_io(err: png::EncodingError) -> io::Error {
    match err {
        png::EncodingError::IoError(err) => err,
        other => io::Error::other(other.to_string()),
    }
}
