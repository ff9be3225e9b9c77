//! Drawing surface shared by all cards.

pub mod assets;
pub mod font;

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub use self::assets::{AssetConfig, CardAssets};
pub use self::font::{LineMetrics, Typeface};

use crate::error::RenderError;

/// Where `(x, y)` sits relative to the drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `(x, y)` is the left edge at the ascender line.
    LeftTop,
    /// `(x, y)` is the horizontal center at the vertical middle.
    Middle,
}

/// An RGBA canvas plus the text and shape primitives the cards use.
#[derive(Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// A canvas filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba<u8>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Canvas { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, fill),
        })
    }

    /// A canvas showing `background` stretched to size, or `fill` without one.
    pub fn with_background(
        width: u32,
        height: u32,
        background: Option<&RgbaImage>,
        fill: Rgba<u8>,
    ) -> Result<Self, RenderError> {
        let mut canvas = Self::new(width, height, fill)?;
        if let Some(bg) = background {
            canvas.image = imageops::resize(bg, width, height, FilterType::Lanczos3);
        }
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Draw `text` anchored at `(x, y)`; returns the drawn width.
    pub fn text(
        &mut self,
        face: &Typeface,
        size: f32,
        color: Rgba<u8>,
        (x, y): (f32, f32),
        anchor: Anchor,
        text: &str,
    ) -> f32 {
        let width = face.text_width(size, text);
        let metrics = face.metrics(size);
        let (left, baseline) = match anchor {
            Anchor::LeftTop => (x, y + metrics.ascent),
            Anchor::Middle => (x - width / 2.0, y + (metrics.ascent + metrics.descent) / 2.0),
        };
        face.draw(&mut self.image, size, color, left, baseline, text);
        width
    }

    /// Draw consecutive colored runs starting at the left edge `x`.
    pub fn text_runs<S: AsRef<str>>(
        &mut self,
        face: &Typeface,
        size: f32,
        (x, y): (f32, f32),
        runs: &[(S, Rgba<u8>)],
    ) {
        let mut caret = x;
        for (text, color) in runs {
            caret += self.text(face, size, *color, (caret, y), Anchor::LeftTop, text.as_ref());
        }
    }

    /// Horizontal rule from `x0` to `x1` centered on `y`.
    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, thickness: u32, color: Rgba<u8>) {
        if x1 <= x0 || thickness == 0 {
            return;
        }
        let half = i32::try_from(thickness / 2).unwrap_or(0);
        let rect = Rect::at(x0, y - half).of_size((x1 - x0) as u32, thickness);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    /// Alpha-composite `overlay` with its top-left corner at `(x, y)`.
    pub fn overlay(&mut self, overlay: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.image, overlay, x, y);
    }

    /// Flatten to RGB and encode as PNG.
    pub fn encode_png(self) -> Result<Vec<u8>, RenderError> {
        let rgb = DynamicImage::ImageRgba8(self.image).into_rgb8();
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }
}
