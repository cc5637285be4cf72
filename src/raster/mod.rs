//! Rasterisation of encoded barcodes into bilevel images.

mod paint;

pub use paint::{RenderOptions, RenderedLabel, pack_bits, paint_label};
