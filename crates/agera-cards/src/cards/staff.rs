//! Online staff roster card; height follows the roster length.

use crate::cards::{draw_footer, half};
use crate::error::RenderError;
use crate::model::{StaffEntry, StaffRoster};
use crate::render::{Anchor, Canvas, CardAssets};
use crate::sanitize::sanitize;

pub const EMPTY_ROSTER: &str = "Нет онлайн стаффа";

#[derive(Debug, Clone, PartialEq)]
pub struct StaffLayout {
    pub width: u32,
    /// Height with no rows, before the bottom padding.
    pub base_height: u32,
    pub row_height: u32,
    pub bottom_padding: u32,
    pub title_y: f32,
    pub title_size: f32,
    pub divider_y: i32,
    pub divider_margin: i32,
    pub divider_thickness: u32,
    pub rows_x: f32,
    pub rows_start_y: u32,
    pub text_size: f32,
    /// Empty-roster notice sits this far below the first row.
    pub empty_offset: f32,
    pub footer_offset: u32,
    pub footer_size: f32,
}

impl Default for StaffLayout {
    fn default() -> Self {
        Self {
            width: 800,
            base_height: 150,
            row_height: 35,
            bottom_padding: 50,
            title_y: 50.0,
            title_size: 40.0,
            divider_y: 100,
            divider_margin: 50,
            divider_thickness: 2,
            rows_x: 80.0,
            rows_start_y: 140,
            text_size: 18.0,
            empty_offset: 50.0,
            footer_offset: 20,
            footer_size: 14.0,
        }
    }
}

impl StaffLayout {
    pub fn height_for(&self, count: usize) -> u32 {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.base_height
            .saturating_add(count.saturating_mul(self.row_height))
            .saturating_add(self.bottom_padding)
    }
}

/// `"{n}. {name} (ID: {id})"`, with formatting codes stripped from the name.
pub fn row_text(index: usize, entry: &StaffEntry) -> String {
    format!("{index}. {} (ID: {})", sanitize(&entry.display_name), entry.user_id)
}

/// Render the staff roster card.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn render(roster: &StaffRoster, assets: &CardAssets, layout: &StaffLayout) -> Result<Vec<u8>, RenderError> {
    let StaffRoster::Players(entries) = roster else {
        return Err(RenderError::InvalidPayload("staff roster is not a list"));
    };
    let height = layout.height_for(entries.len());
    let mut canvas = Canvas::new(layout.width, height, assets.palette.background)?;
    let face = &assets.typeface;
    let palette = &assets.palette;
    let center_x = half(layout.width);

    canvas.text(
        face,
        layout.title_size,
        palette.primary,
        (center_x, layout.title_y),
        Anchor::Middle,
        &format!("Онлайн стафф ({})", entries.len()),
    );
    let width = i32::try_from(layout.width).unwrap_or(i32::MAX);
    canvas.hline(
        layout.divider_margin,
        width - layout.divider_margin,
        layout.divider_y,
        layout.divider_thickness,
        palette.primary,
    );

    let start_y = layout.rows_start_y as f32;
    if entries.is_empty() {
        canvas.text(
            face,
            layout.text_size,
            palette.text,
            (center_x, start_y + layout.empty_offset),
            Anchor::Middle,
            EMPTY_ROSTER,
        );
    }
    let mut y = start_y;
    for (i, entry) in entries.iter().enumerate() {
        canvas.text(
            face,
            layout.text_size,
            palette.text,
            (layout.rows_x, y),
            Anchor::LeftTop,
            &row_text(i + 1, entry),
        );
        y += layout.row_height as f32;
    }

    draw_footer(&mut canvas, assets, layout.footer_size, layout.footer_offset);
    canvas.encode_png()
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;
    use serde_json::json;

    use super::*;

    fn dimensions(roster: &StaffRoster) -> (u32, u32) {
        let png = render(roster, &CardAssets::builtin(), &StaffLayout::default()).unwrap();
        image::load_from_memory(&png).unwrap().dimensions()
    }

    #[test]
    fn empty_roster_is_200_high() {
        assert_eq!(dimensions(&StaffRoster::from_value(&json!({ "players": [] }))), (800, 200));
    }

    #[test]
    fn height_grows_per_member() {
        let players: Vec<_> = (0..10).map(|i| json!({ "displayName": format!("§aMod{i}"), "userId": i })).collect();
        let roster = StaffRoster::from_value(&json!({ "players": players }));
        assert_eq!(dimensions(&roster), (800, 150 + 350 + 50));
    }

    #[test]
    fn row_text_is_sanitized() {
        let entry = StaffEntry {
            display_name: "§cAdmin".into(),
            user_id: "1".into(),
        };
        assert_eq!(row_text(1, &entry), "1. Admin (ID: 1)");
    }

    #[test]
    fn invalid_roster_fails() {
        let result = render(&StaffRoster::Invalid, &CardAssets::builtin(), &StaffLayout::default());
        assert!(matches!(result, Err(RenderError::InvalidPayload(_))));
    }
}
