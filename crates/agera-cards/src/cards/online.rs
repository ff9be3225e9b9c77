//! Total online players card.

use crate::cards::{draw_footer, half};
use crate::error::RenderError;
use crate::model::OnlineCount;
use crate::render::{Anchor, Canvas, CardAssets};

pub const TITLE: &str = "Онлайн игроков";

#[derive(Debug, Clone, PartialEq)]
pub struct OnlineLayout {
    pub width: u32,
    pub height: u32,
    pub title_y: f32,
    pub title_size: f32,
    pub count_size: f32,
    pub footer_offset: u32,
    pub footer_size: f32,
}

impl Default for OnlineLayout {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
            title_y: 60.0,
            title_size: 36.0,
            count_size: 72.0,
            footer_offset: 20,
            footer_size: 14.0,
        }
    }
}

/// The numeral drawn in the middle of the card.
pub fn count_text(count: OnlineCount) -> String {
    count.0.to_string()
}

pub fn render(count: OnlineCount, assets: &CardAssets, layout: &OnlineLayout) -> Result<Vec<u8>, RenderError> {
    let mut canvas = Canvas::new(layout.width, layout.height, assets.palette.background)?;
    let face = &assets.typeface;
    let center_x = half(layout.width);

    canvas.text(
        face,
        layout.title_size,
        assets.palette.primary,
        (center_x, layout.title_y),
        Anchor::Middle,
        TITLE,
    );
    canvas.text(
        face,
        layout.count_size,
        assets.palette.accent,
        (center_x, half(layout.height)),
        Anchor::Middle,
        &count_text(count),
    );

    draw_footer(&mut canvas, assets, layout.footer_size, layout.footer_offset);
    canvas.encode_png()
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;
    use serde_json::json;

    use super::*;

    #[test]
    fn count_numeral() {
        assert_eq!(count_text(OnlineCount::from_value(&json!({ "online": 42 }))), "42");
    }

    #[test]
    fn renders_fixed_size() {
        let png = render(OnlineCount(42), &CardAssets::builtin(), &OnlineLayout::default()).unwrap();
        assert_eq!(image::load_from_memory(&png).unwrap().dimensions(), (600, 300));
    }

    #[test]
    fn count_uses_accent_color() {
        let png = render(OnlineCount(8), &CardAssets::builtin(), &OnlineLayout::default()).unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgb8();
        let accent = img.pixels().filter(|p| p.0 == [255, 200, 50]).count();
        assert!(accent > 0);
    }

    #[test]
    fn zero_sized_layout_fails() {
        let layout = OnlineLayout {
            width: 0,
            ..OnlineLayout::default()
        };
        assert!(matches!(
            render(OnlineCount(1), &CardAssets::builtin(), &layout),
            Err(RenderError::Canvas { .. })
        ));
    }
}
