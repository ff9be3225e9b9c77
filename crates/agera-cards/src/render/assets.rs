//! Font, background and palette, loaded once and shared by every render.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};
use image::RgbaImage;
use tracing::{debug, warn};

use super::font::Typeface;
use crate::theme::Palette;

pub const DEFAULT_FONT_PATH: &str = "Unbounded-Regular.ttf";
pub const DEFAULT_BACKGROUND_PATH: &str = "fon.jpg";

/// Where to find card assets on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub font: PathBuf,
    /// Background image for the stats and profile cards.
    pub background: PathBuf,
    /// Offset applied to timestamps on the profile card, in whole hours.
    pub timezone_offset_hours: i32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            font: PathBuf::from(DEFAULT_FONT_PATH),
            background: PathBuf::from(DEFAULT_BACKGROUND_PATH),
            timezone_offset_hours: 0,
        }
    }
}

/// Everything a renderer needs besides the payload.
#[derive(Debug, Clone)]
pub struct CardAssets {
    pub typeface: Typeface,
    /// Decoded background; stretched per card.
    pub background: Option<RgbaImage>,
    pub palette: Palette,
    pub timezone: FixedOffset,
}

impl CardAssets {
    /// Load assets, degrading to the builtin font, a flat background and
    /// UTC when a piece is missing or broken.
    pub fn load(config: &AssetConfig) -> Self {
        let typeface = match Typeface::load(&config.font) {
            Ok(face) => {
                debug!(path = %config.font.display(), "loaded card font");
                face
            }
            Err(e) => {
                warn!(error = %e, "card font unavailable, using builtin bitmap font");
                Typeface::Bitmap
            }
        };

        Self {
            typeface,
            background: load_background(&config.background),
            palette: Palette::default(),
            timezone: timezone(config.timezone_offset_hours),
        }
    }

    /// Builtin font, no background image, UTC.
    pub fn builtin() -> Self {
        Self {
            typeface: Typeface::Bitmap,
            background: None,
            palette: Palette::default(),
            timezone: Utc.fix(),
        }
    }
}

fn load_background(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => {
            debug!(path = %path.display(), "loaded card background");
            Some(img.to_rgba8())
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "background unavailable, using flat color");
            None
        }
    }
}

fn timezone(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            warn!(hours, "timezone offset out of range, using UTC");
            Utc.fix()
        })
}
