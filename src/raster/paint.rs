use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::normalize::NormalizedCode;
use crate::symbology::{BarPattern, Symbology};

const SINGLE_DPI: u32 = 150;
/// Narrowest bar, in dots of the target resolution.
const SINGLE_MODULE_DOTS: f32 = 2.5;
const DOCUMENT_DPI: u32 = 300;
const POINTS_PER_INCH: f32 = 72.0;
const QUIET_ZONE_MODULES: u32 = 10;
pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;

pub const BLACK: Luma<u8> = Luma([0]);
pub const WHITE: Luma<u8> = Luma([255]);

/// Options controlling barcode rasterisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub dpi: u32,
    pub module_width_in: f32,
    pub bar_height_in: f32,
    pub quiet_zone: bool,
    /// Print the digits under the bars.
    pub human_readable: bool,
}

impl Default for RenderOptions {
    /// Stand-alone PNG labels.
    fn default() -> Self {
        Self {
            dpi: SINGLE_DPI,
            module_width_in: SINGLE_MODULE_DOTS / SINGLE_DPI as f32,
            bar_height_in: 0.5,
            quiet_zone: false,
            human_readable: true,
        }
    }
}

impl RenderOptions {
    /// Labels placed on PDF sheets. These are not the stand-alone PNG values:
    /// they follow the sheet backend's own defaults (0.8 pt modules, 24 pt
    /// bars), rasterised at 300 dpi so the 2x scale on the page stays sharp.
    pub fn document() -> Self {
        Self {
            dpi: DOCUMENT_DPI,
            module_width_in: 0.8 / POINTS_PER_INCH,
            bar_height_in: 24.0 / POINTS_PER_INCH,
            quiet_zone: false,
            human_readable: true,
        }
    }

    /// Module width rounded to whole pixels, never below one.
    pub fn module_px(&self) -> u32 {
        (self.module_width_in * self.dpi as f32).round().max(1.0) as u32
    }

    fn bar_height_px(&self) -> u32 {
        inches_to_px(self.bar_height_in, self.dpi).max(1)
    }

    fn text_scale(&self) -> u32 {
        (self.dpi / 75).max(1)
    }
}

/// Bilevel raster of one barcode.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    pub code: NormalizedCode,
    pub symbology: Symbology,
    /// Symbol width in modules, quiet zone excluded.
    pub modules: usize,
    pub dpi: u32,
    pub image: GrayImage,
}

impl RenderedLabel {
    pub fn width_px(&self) -> u32 {
        self.image.width()
    }

    pub fn height_px(&self) -> u32 {
        self.image.height()
    }

    /// Physical size in points at the resolution it was rendered for.
    pub fn size_pt(&self) -> (f32, f32) {
        let scale = POINTS_PER_INCH / self.dpi as f32;
        (
            self.width_px() as f32 * scale,
            self.height_px() as f32 * scale,
        )
    }

    /// True when every pixel is pure black or pure white.
    pub fn is_bilevel(&self) -> bool {
        self.image.pixels().all(|p| *p == BLACK || *p == WHITE)
    }
}

/// Rasterise an encoded symbol into a black-on-white image.
pub fn paint_label(
    code: &NormalizedCode,
    symbology: Symbology,
    pattern: &BarPattern,
    options: &RenderOptions,
) -> RenderedLabel {
    let module_px = options.module_px();
    let quiet_px = if options.quiet_zone {
        QUIET_ZONE_MODULES * module_px
    } else {
        0
    };
    let bars_width = pattern.len() as u32 * module_px + 2 * quiet_px;
    let bar_height = options.bar_height_px();

    let scale = options.text_scale();
    let digits = code.as_str().len() as u32;
    let advance = (GLYPH_WIDTH as u32 + 1) * scale;
    let (text_width, text_block) = if options.human_readable && digits > 0 {
        (
            digits * advance - scale,
            (2 + GLYPH_HEIGHT as u32 + 1) * scale,
        )
    } else {
        (0, 0)
    };

    let width = bars_width.max(text_width);
    let height = bar_height + text_block;
    let mut image = GrayImage::from_pixel(width, height, WHITE);

    let bars_x = ((width - bars_width) / 2 + quiet_px) as i32;
    let mut run_start: Option<usize> = None;
    let modules = pattern.modules();
    for idx in 0..=modules.len() {
        let is_bar = modules.get(idx).copied().unwrap_or(false);
        match (is_bar, run_start) {
            (true, None) => run_start = Some(idx),
            (false, Some(start)) => {
                let x = bars_x + (start as u32 * module_px) as i32;
                let run = (idx - start) as u32 * module_px;
                draw_filled_rect_mut(&mut image, Rect::at(x, 0).of_size(run, bar_height), BLACK);
                run_start = None;
            }
            _ => {}
        }
    }

    if text_block > 0 {
        let text_x = ((width - text_width) / 2) as i32;
        let text_y = (bar_height + 2 * scale) as i32;
        for (idx, ch) in code.as_str().chars().enumerate() {
            let glyph_x = text_x + (idx as u32 * advance) as i32;
            draw_glyph(&mut image, glyph_x, text_y, ch, scale);
        }
    }

    RenderedLabel {
        code: code.clone(),
        symbology,
        modules: pattern.len(),
        dpi: options.dpi,
        image,
    }
}

/// One bit per pixel, rows padded to whole bytes, most significant bit first.
/// A set bit is white, which is what both 1-bit PNG greyscale and a 1-bit
/// DeviceGray image expect.
pub fn pack_bits(image: &GrayImage) -> Vec<u8> {
    let row_bytes = image.width().div_ceil(8) as usize;
    let mut data = vec![0u8; row_bytes * image.height() as usize];
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[0] >= 128 {
            let offset = y as usize * row_bytes + x as usize / 8;
            data[offset] |= 0x80 >> (x % 8);
        }
    }
    data
}

fn inches_to_px(inches: f32, dpi: u32) -> u32 {
    (inches * dpi as f32).round() as u32
}

fn draw_glyph(image: &mut GrayImage, x: i32, y: i32, ch: char, scale: u32) {
    let pattern = glyph_pattern(ch);
    for (row, bits) in pattern.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + (col as i32 * scale as i32);
                let py = y + (row as i32 * scale as i32);
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), BLACK);
            }
        }
    }
}

#[rustfmt::skip]
fn glyph_pattern(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        _ => [0; GLYPH_HEIGHT],
    }
}
