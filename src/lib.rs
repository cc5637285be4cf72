//! Barcode label generation: normalize numeric codes, render them as
//! Code 128 or Interleaved 2 of 5 symbols, and write PNG files or PDF sheets.

mod document;
mod error;
mod normalize;
mod raster;
mod render;
mod request;
mod symbology;

pub use document::{
    A4_HEIGHT_PT, A4_WIDTH_PT, CellPlacement, DocumentSummary, GridLayout, Padding, Rect,
    assemble, assemble_batch, assemble_with, batch_file_name, create_batch_file,
};
pub use error::LabelError;
pub use normalize::{CODE_WIDTH, NormalizedCode, normalize, normalize_batch, sanitize_input};
pub use raster::{RenderOptions, RenderedLabel};
pub use render::{
    render_for_document, render_label, render_single, single_file_path, write_all_single,
    write_png, write_single,
};
pub use request::{GenerationReport, OutputKind, generate_batch, generate_single};
pub use symbology::{
    BarPattern, Code128Encoder, EncodeError, Interleaved2of5Encoder, SymbolEncoder, Symbology,
};
