//! Staff punishment tallies card.

use crate::cards::{draw_footer, half};
use crate::error::RenderError;
use crate::model::PunishmentStats;
use crate::render::{Anchor, Canvas, CardAssets};

pub const TITLE: &str = "Статистика наказаний";

#[derive(Debug, Clone, PartialEq)]
pub struct PunishmentsLayout {
    pub width: u32,
    pub height: u32,
    pub title_y: f32,
    pub title_size: f32,
    pub divider_y: i32,
    pub divider_margin: i32,
    pub divider_thickness: u32,
    pub rows_start_y: f32,
    pub line_height: f32,
    pub text_size: f32,
    pub value_spacing: f32,
    pub footer_offset: u32,
    pub footer_size: f32,
}

impl Default for PunishmentsLayout {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            title_y: 50.0,
            title_size: 40.0,
            divider_y: 100,
            divider_margin: 50,
            divider_thickness: 2,
            rows_start_y: 140.0,
            line_height: 45.0,
            text_size: 20.0,
            value_spacing: 30.0,
            footer_offset: 20,
            footer_size: 14.0,
        }
    }
}

/// Render the punishments card: six label/value rows centered as a block.
pub fn render(
    stats: &PunishmentStats,
    assets: &CardAssets,
    layout: &PunishmentsLayout,
) -> Result<Vec<u8>, RenderError> {
    let mut canvas = Canvas::new(layout.width, layout.height, assets.palette.background)?;
    let face = &assets.typeface;
    let palette = &assets.palette;
    let center_x = half(layout.width);

    canvas.text(
        face,
        layout.title_size,
        palette.primary,
        (center_x, layout.title_y),
        Anchor::Middle,
        TITLE,
    );
    let width = i32::try_from(layout.width).unwrap_or(i32::MAX);
    canvas.hline(
        layout.divider_margin,
        width - layout.divider_margin,
        layout.divider_y,
        layout.divider_thickness,
        palette.primary,
    );

    let rows: Vec<(String, String)> = stats
        .rows()
        .iter()
        .map(|(label, value)| (format!("{label}:"), value.to_string()))
        .collect();
    let widest = |texts: &mut dyn Iterator<Item = &String>| {
        texts
            .map(|text| face.text_width(layout.text_size, text))
            .fold(0.0f32, f32::max)
    };
    let max_label = widest(&mut rows.iter().map(|(label, _)| label));
    let max_value = widest(&mut rows.iter().map(|(_, value)| value));
    let label_area = max_label + layout.value_spacing;
    let start_x = (center_x - (label_area + max_value) / 2.0).floor();

    let mut y = layout.rows_start_y;
    for (label, value) in &rows {
        let label_x = start_x + max_label - face.text_width(layout.text_size, label);
        canvas.text(face, layout.text_size, palette.text, (label_x, y), Anchor::LeftTop, label);
        canvas.text(
            face,
            layout.text_size,
            palette.accent,
            (start_x + label_area, y),
            Anchor::LeftTop,
            value,
        );
        y += layout.line_height;
    }

    draw_footer(&mut canvas, assets, layout.footer_size, layout.footer_offset);
    canvas.encode_png()
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_fixed_size() {
        let stats = PunishmentStats::from_value(&json!({ "totalBans": 1200, "totalWeekMutes": 3 }));
        let png = render(&stats, &CardAssets::builtin(), &PunishmentsLayout::default()).unwrap();
        assert_eq!(image::load_from_memory(&png).unwrap().dimensions(), (800, 500));
    }

    #[test]
    fn empty_payload_renders_zeros() {
        let stats = PunishmentStats::from_value(&json!({}));
        assert!(stats.rows().iter().all(|(_, v)| *v == 0));
        assert!(render(&stats, &CardAssets::builtin(), &PunishmentsLayout::default()).is_ok());
    }
}
