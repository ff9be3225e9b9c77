//! Player stats card: title with rank, game mode, two columns of stats.

use crate::cards::{draw_centered_runs, draw_footer, half, rank_title};
use crate::error::RenderError;
use crate::labels::mode_name;
use crate::model::StatsPayload;
use crate::rank::RankDisplay;
use crate::render::{Anchor, Canvas, CardAssets};

pub const TITLE_PREFIX: &str = "Статистика игрока ";
pub const MODE_PREFIX: &str = "Режим: ";
pub const NO_STATS: &str = "Данные статистики не найдены";
pub const INVALID_FORMAT: &str = "Неверный формат данных от API";

#[derive(Debug, Clone, PartialEq)]
pub struct StatsLayout {
    pub width: u32,
    /// Minimum height; grows to fit the stat rows.
    pub height: u32,
    pub title_y: f32,
    pub mode_y: f32,
    pub divider_y: i32,
    pub divider_margin: i32,
    pub divider_thickness: u32,
    pub stats_start_y: u32,
    pub line_height: u32,
    /// Space kept below the last row when the card grows.
    pub bottom_padding: u32,
    pub left_x: f32,
    /// Right column starts this far right of the center line.
    pub right_column_offset: f32,
    pub label_width: f32,
    pub value_offset: f32,
    pub footer_offset: u32,
    pub title_size: f32,
    pub header_size: f32,
    pub text_size: f32,
    pub footer_size: f32,
}

impl Default for StatsLayout {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            title_y: 200.0,
            mode_y: 265.0,
            divider_y: 324,
            divider_margin: 50,
            divider_thickness: 2,
            stats_start_y: 381,
            line_height: 38,
            bottom_padding: 50,
            left_x: 80.0,
            right_column_offset: 50.0,
            label_width: 250.0,
            value_offset: 150.0,
            footer_offset: 30,
            title_size: 48.0,
            header_size: 32.0,
            text_size: 24.0,
            footer_size: 16.0,
        }
    }
}

impl StatsLayout {
    /// Canvas height for `count` stat rows.
    pub fn height_for(&self, count: usize) -> u32 {
        if count == 0 {
            return self.height;
        }
        let rows = u32::try_from(count.div_ceil(2)).unwrap_or(u32::MAX);
        let needed = self
            .stats_start_y
            .saturating_add(rows.saturating_mul(self.line_height))
            .saturating_add(self.bottom_padding);
        needed.max(self.height)
    }
}

/// Render the stats card for `nickname` in `mode`.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn render(
    nickname: &str,
    mode: &str,
    payload: &StatsPayload,
    rank: Option<&RankDisplay>,
    assets: &CardAssets,
    layout: &StatsLayout,
) -> Result<Vec<u8>, RenderError> {
    let entries = payload.display_entries();
    let height = layout.height_for(entries.len());
    let mut canvas = Canvas::with_background(
        layout.width,
        height,
        assets.background.as_ref(),
        assets.palette.background,
    )?;
    let face = &assets.typeface;
    let palette = &assets.palette;
    let center_x = half(layout.width);

    match rank {
        Some(rank) => {
            let mut runs = vec![(TITLE_PREFIX.to_string(), palette.text)];
            runs.extend(rank_title(rank, nickname));
            draw_centered_runs(&mut canvas, face, layout.title_size, (center_x, layout.title_y), &runs);
        }
        None => {
            canvas.text(
                face,
                layout.title_size,
                palette.text,
                (center_x, layout.title_y),
                Anchor::Middle,
                &format!("{TITLE_PREFIX}{nickname}"),
            );
        }
    }

    let mode_runs = [(MODE_PREFIX.to_string(), palette.text), (mode_name(mode), palette.mode)];
    draw_centered_runs(&mut canvas, face, layout.header_size, (center_x, layout.mode_y), &mode_runs);

    let width = i32::try_from(layout.width).unwrap_or(i32::MAX);
    canvas.hline(
        layout.divider_margin,
        width - layout.divider_margin,
        layout.divider_y,
        layout.divider_thickness,
        palette.divider,
    );

    let placeholder = match payload {
        StatsPayload::Invalid => Some(INVALID_FORMAT),
        StatsPayload::Flat(_) if entries.is_empty() => Some(NO_STATS),
        StatsPayload::Flat(_) => None,
    };

    if let Some(message) = placeholder {
        canvas.text(
            face,
            layout.header_size,
            palette.text,
            (center_x, half(height)),
            Anchor::Middle,
            message,
        );
    } else {
        let left_rows = entries.len().div_ceil(2);
        let right_x = center_x + layout.right_column_offset;
        for (i, entry) in entries.iter().enumerate() {
            let (x, row) = if i < left_rows {
                (layout.left_x, i)
            } else {
                (right_x, i - left_rows)
            };
            let y = layout.stats_start_y as f32 + (row as f32) * layout.line_height as f32;

            canvas.text(
                face,
                layout.text_size,
                palette.text,
                (x, y),
                Anchor::LeftTop,
                &format!("{}:", entry.label),
            );
            canvas.text(
                face,
                layout.text_size,
                palette.accent,
                (x + layout.label_width + layout.value_offset, y),
                Anchor::LeftTop,
                &entry.value,
            );
        }
    }

    draw_footer(&mut canvas, assets, layout.footer_size, layout.footer_offset);
    canvas.encode_png()
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;
    use serde_json::{Map, Value, json};

    use super::*;

    fn dimensions(png: &[u8]) -> (u32, u32) {
        image::load_from_memory(png).unwrap().dimensions()
    }

    fn draw(payload: &Value, rank: Option<&str>) -> Vec<u8> {
        let rank = rank.and_then(RankDisplay::parse);
        render(
            "Steve",
            "BW",
            &StatsPayload::from_value(payload),
            rank.as_ref(),
            &CardAssets::builtin(),
            &StatsLayout::default(),
        )
        .unwrap()
    }

    #[test]
    fn small_payload_keeps_base_size() {
        let png = draw(&json!({ "wins": 10, "kills": 5 }), None);
        assert_eq!(dimensions(&png), (1600, 900));
    }

    #[test]
    fn many_stats_grow_the_canvas() {
        let stats: Map<String, Value> = (0..60).map(|i| (format!("metric_{i}"), json!(i))).collect();
        let png = draw(&Value::Object(stats), Some("GOLD"));
        let (width, height) = dimensions(&png);
        assert_eq!(width, 1600);
        assert!(height > 900);
        assert_eq!(height, 381 + 30 * 38 + 50);

        let img = image::load_from_memory(&png).unwrap().to_rgb8();
        let layout = StatsLayout::default();
        let divider_y = u32::try_from(layout.divider_y).unwrap();
        assert_eq!(img.get_pixel(width / 2, divider_y).0, [255, 234, 0]);
    }

    #[test]
    fn placeholders_still_render() {
        assert_eq!(dimensions(&draw(&json!({ "success": true }), None)), (1600, 900));
        assert_eq!(dimensions(&draw(&json!([1, 2, 3]), Some("YOUTUBE"))), (1600, 900));
    }

    #[test]
    fn height_rule() {
        let layout = StatsLayout::default();
        assert_eq!(layout.height_for(0), 900);
        assert_eq!(layout.height_for(24), 900);
        assert_eq!(layout.height_for(25), 381 + 13 * 38 + 50);
    }
}
