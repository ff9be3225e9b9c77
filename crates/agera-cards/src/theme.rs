//! Card color palette.

use image::Rgba;

/// Opaque color from RGB components.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 0xFF])
}

/// Colors shared by every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Flat canvas fill when no background image is available.
    pub background: Rgba<u8>,
    /// Card titles without a rank color.
    pub primary: Rgba<u8>,
    /// Labels and plain text.
    pub text: Rgba<u8>,
    /// Values.
    pub accent: Rgba<u8>,
    /// Divider under the stats / profile header.
    pub divider: Rgba<u8>,
    /// Game mode name on the stats card.
    pub mode: Rgba<u8>,
    pub footer: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgb(30, 30, 40),
            primary: rgb(100, 150, 255),
            text: rgb(255, 255, 255),
            accent: rgb(255, 200, 50),
            divider: rgb(255, 234, 0),
            mode: rgb(255, 234, 0),
            footer: rgb(150, 150, 150),
        }
    }
}

/// Caption centered at the bottom of every card.
pub const FOOTER_TEXT: &str = "AgeraPvP Stats Bot";
