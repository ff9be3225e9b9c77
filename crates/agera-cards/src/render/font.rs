//! Text measurement and rasterisation.
//!
//! A configured TrueType/OpenType face is drawn through `ab_glyph` with
//! kerning and coverage blending. Without one, the embedded 8x8 bitmap font
//! from `font8x8` is scaled up to the requested size.

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};

use crate::error::RenderError;

/// Bitmap glyph cell edge in font units.
const CELL: u32 = 8;

/// Drawn for characters the bitmap font lacks.
const MISSING_GLYPH: char = '?';

/// Vertical metrics for one font size, in pixels. `descent` is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
}

/// The face every card draws with.
#[derive(Clone)]
pub enum Typeface {
    Outline(FontArc),
    /// Embedded 8x8 bitmap font.
    Bitmap,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline(_) => f.write_str("Typeface::Outline"),
            Self::Bitmap => f.write_str("Typeface::Bitmap"),
        }
    }
}

impl Typeface {
    /// Read and parse a font file.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("{}: {e}", path.display())))?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, RenderError> {
        FontArc::try_from_vec(bytes)
            .map(Self::Outline)
            .map_err(|e| RenderError::Font(e.to_string()))
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Self::Bitmap)
    }

    pub fn metrics(&self, size: f32) -> LineMetrics {
        match self {
            Self::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                LineMetrics {
                    ascent: scaled.ascent(),
                    descent: scaled.descent(),
                }
            }
            Self::Bitmap => LineMetrics {
                ascent: bitmap_px(bitmap_scale(size)),
                descent: 0.0,
            },
        }
    }

    /// Advance width of `text` at `size`, kerning included.
    pub fn text_width(&self, size: f32, text: &str) -> f32 {
        match self {
            Self::Outline(font) => {
                let scale = PxScale::from(size);
                let scaled = font.as_scaled(scale);
                let mut width = 0.0f32;
                let mut prev: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width
            }
            Self::Bitmap => {
                let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
                bitmap_px(bitmap_scale(size).saturating_mul(count))
            }
        }
    }

    /// Draw `text` with its baseline at `baseline` and its left edge at `x`.
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    pub fn draw(
        &self,
        canvas: &mut RgbaImage,
        size: f32,
        color: Rgba<u8>,
        x: f32,
        baseline: f32,
        text: &str,
    ) {
        match self {
            Self::Outline(font) => {
                let scale = PxScale::from(size);
                let scaled = font.as_scaled(scale);
                let mut caret = x;
                let mut prev: Option<GlyphId> = None;

                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        caret += scaled.kern(prev, id);
                    }
                    let glyph = id.with_scale_and_position(scale, point(caret, baseline));
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        outlined.draw(|gx, gy, coverage| {
                            let px = bounds.min.x as i32 + gx as i32;
                            let py = bounds.min.y as i32 + gy as i32;
                            blend_with_coverage(canvas, px, py, color, coverage);
                        });
                    }
                    caret += scaled.h_advance(id);
                    prev = Some(id);
                }
            }
            Self::Bitmap => {
                let k = bitmap_scale(size);
                let top = (baseline - bitmap_px(k)).round() as i32;
                let mut left = x.round() as i32;
                let step = (CELL * k) as i32;
                for ch in text.chars() {
                    draw_bitmap_glyph(canvas, bitmap_glyph(ch), left, top, k, color);
                    left += step;
                }
            }
        }
    }
}

/// Integer magnification of the 8px cell closest to `size`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn bitmap_scale(size: f32) -> u32 {
    ((size / 8.0).round() as u32).max(1)
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn bitmap_px(units: u32) -> f32 {
    (units * CELL) as f32
}

fn bitmap_glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get(MISSING_GLYPH))
        .unwrap_or([0; 8])
}

/// Each row byte holds eight columns, least significant bit leftmost.
#[allow(clippy::cast_possible_wrap, clippy::as_conversions)]
fn draw_bitmap_glyph(canvas: &mut RgbaImage, rows: [u8; 8], left: i32, top: i32, k: u32, color: Rgba<u8>) {
    let k = k as i32;
    for (row, bits) in (0i32..).zip(rows) {
        for col in 0..8i32 {
            if bits & (1 << col) == 0 {
                continue;
            }
            for dy in 0..k {
                for dx in 0..k {
                    blend_pixel(canvas, left + col * k + dx, top + row * k + dy, color);
                }
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn blend_with_coverage(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    let mut src = color;
    src.0[3] = (f32::from(src.0[3]) * coverage.clamp(0.0, 1.0)).round() as u8;
    blend_pixel(canvas, x, y, src);
}

/// Source-over blend of `src` onto one canvas pixel; off-canvas is a no-op.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
pub(crate) fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, src: Rgba<u8>) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }

    let src_alpha = f32::from(src.0[3]) / 255.0;
    if src_alpha <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x, y);
    let dst_alpha = f32::from(dst.0[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    for channel in 0..3 {
        let s = f32::from(src.0[channel]) / 255.0;
        let d = f32::from(dst.0[channel]) / 255.0;
        let out = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        dst.0[channel] = (out * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}
