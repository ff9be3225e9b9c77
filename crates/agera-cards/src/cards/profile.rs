//! Player profile card: skin render on the left, info table on the right.

use chrono::FixedOffset;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::cards::{draw_centered_runs, draw_footer, rank_title};
use crate::error::RenderError;
use crate::format::format_timestamp;
use crate::model::{Profile, ProfilePayload};
use crate::rank::{self, RankDisplay};
use crate::render::{Anchor, Canvas, CardAssets};
use crate::sanitize::sanitize;

/// Rank row value when the player has none.
pub const DEFAULT_RANK: &str = "DEFAULT";

/// Skin pixels brighter than this on every channel become transparent.
const SKIN_WHITE_THRESHOLD: u8 = 240;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLayout {
    pub width: u32,
    pub height: u32,
    /// Title center line.
    pub start_y: f32,
    pub skin_x: i64,
    pub skin_y: i64,
    /// Skin is scaled to this width, height follows the aspect ratio.
    pub skin_width: u32,
    pub skin_spacing: f32,
    /// Divider distance below the title.
    pub divider_offset: f32,
    /// First row distance below the divider.
    pub rows_offset: f32,
    pub divider_thickness: u32,
    pub line_height: f32,
    pub margin_right: f32,
    /// Label column starts this far left of the content center.
    pub label_column_offset: f32,
    pub value_spacing: f32,
    pub footer_offset: u32,
    pub title_size: f32,
    pub text_size: f32,
}

impl Default for ProfileLayout {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            start_y: 250.0,
            skin_x: 10,
            skin_y: 10,
            skin_width: 450,
            skin_spacing: 50.0,
            divider_offset: 100.0,
            rows_offset: 46.0,
            divider_thickness: 2,
            line_height: 50.0,
            margin_right: 50.0,
            label_column_offset: 300.0,
            value_spacing: 30.0,
            footer_offset: 40,
            title_size: 48.0,
            text_size: 32.0,
        }
    }
}

/// Decode a skin render and knock out its near-white backdrop.
///
/// Undecodable bytes mean "no skin".
pub fn prepare_skin(bytes: &[u8]) -> Option<RgbaImage> {
    let mut skin = match image::load_from_memory(bytes) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            debug!(error = %e, "skin render is not a decodable image");
            return None;
        }
    };
    for pixel in skin.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r > SKIN_WHITE_THRESHOLD && g > SKIN_WHITE_THRESHOLD && b > SKIN_WHITE_THRESHOLD {
            *pixel = Rgba([255, 255, 255, 0]);
        }
    }
    Some(skin)
}

/// Info rows in card order.
pub fn rows(
    nickname: &str,
    profile: &Profile,
    rank: Option<&RankDisplay>,
    tz: &FixedOffset,
) -> Vec<(&'static str, String)> {
    let mut rows = Vec::with_capacity(7);
    if let Some(id) = &profile.user_id {
        rows.push(("ID пользователя", id.clone()));
    }
    rows.push((
        "Ранг",
        rank.map_or_else(|| DEFAULT_RANK.to_string(), |r| r.label.clone()),
    ));
    rows.push(("Отображаемое имя", player_name(nickname, profile)));
    if let Some(language) = &profile.language {
        rows.push(("Язык", language.clone()));
    }
    if let Some(server) = &profile.current_server {
        rows.push(("Текущий сервер", server.clone()));
    }
    rows.push(("Онлайн", if profile.online { "Да" } else { "Нет" }.to_string()));
    if let Some(last_login) = &profile.last_login {
        rows.push(("Последний вход", format_timestamp(last_login, tz)));
    }
    rows
}

/// Name shown in the title and the name row: `username`, else the cleaned
/// `displayName`, else the requested nickname.
pub fn player_name(nickname: &str, profile: &Profile) -> String {
    profile
        .username
        .clone()
        .or_else(|| {
            profile
                .display_name
                .as_deref()
                .map(|name| sanitize(name).into_owned())
                .filter(|name| !name.is_empty())
        })
        .unwrap_or_else(|| nickname.to_string())
}

/// Render the profile card. `skin` comes from [`prepare_skin`].
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn render(
    nickname: &str,
    payload: &ProfilePayload,
    skin: Option<&RgbaImage>,
    assets: &CardAssets,
    layout: &ProfileLayout,
) -> Result<Vec<u8>, RenderError> {
    let profile = payload
        .profile()
        .ok_or(RenderError::InvalidPayload("profile is not an object"))?;
    let rank = rank::resolve(profile.rank.as_ref());
    let username = player_name(nickname, profile);
    let info = rows(nickname, profile, rank.as_ref(), &assets.timezone);

    let mut canvas = Canvas::with_background(
        layout.width,
        layout.height,
        assets.background.as_ref(),
        assets.palette.background,
    )?;
    let face = &assets.typeface;
    let palette = &assets.palette;

    let mut skin_width = 0.0;
    if let Some(scaled) = skin.and_then(|skin| fit_skin(skin, layout)) {
        canvas.overlay(&scaled, layout.skin_x, layout.skin_y);
        skin_width = layout.skin_width as f32;
    }

    let content_x = layout.skin_x as f32 + skin_width + layout.skin_spacing;
    let width = layout.width as f32;
    let content_center = content_x + ((width - content_x - layout.margin_right) / 2.0).floor();

    match rank.as_ref().filter(|r| !r.is_default()) {
        Some(rank) => {
            let runs = rank_title(rank, &username);
            let metrics_y = layout.start_y - title_half_height(assets, layout.title_size);
            draw_centered_runs(&mut canvas, face, layout.title_size, (content_center, metrics_y), &runs);
        }
        None => {
            canvas.text(
                face,
                layout.title_size,
                palette.primary,
                (content_center, layout.start_y),
                Anchor::Middle,
                &username,
            );
        }
    }

    let mut y = layout.start_y + layout.divider_offset;
    canvas.hline(
        content_x as i32,
        (width - layout.margin_right) as i32,
        y as i32,
        layout.divider_thickness,
        palette.divider,
    );
    y += layout.rows_offset;

    let labels: Vec<String> = info.iter().map(|(label, _)| format!("{label}:")).collect();
    let max_label = labels
        .iter()
        .map(|label| face.text_width(layout.text_size, label))
        .fold(0.0f32, f32::max);
    let start_x = content_center - layout.label_column_offset;

    for (label, (_, value)) in labels.iter().zip(&info) {
        let label_x = start_x + max_label - face.text_width(layout.text_size, label);
        canvas.text(face, layout.text_size, palette.text, (label_x, y), Anchor::LeftTop, label);
        canvas.text(
            face,
            layout.text_size,
            palette.accent,
            (start_x + max_label + layout.value_spacing, y),
            Anchor::LeftTop,
            value,
        );
        y += layout.line_height;
    }

    draw_footer(&mut canvas, assets, layout.text_size, layout.footer_offset);
    canvas.encode_png()
}

/// Scale the skin to the slot width, keeping the aspect ratio.
///
/// Rows that would fall below the canvas are cropped from the source first,
/// so a very tall render never allocates more than the visible slot.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn fit_skin(skin: &RgbaImage, layout: &ProfileLayout) -> Option<RgbaImage> {
    let (width, height) = skin.dimensions();
    if width == 0 || height == 0 || layout.skin_width == 0 {
        return None;
    }
    let max_height = u32::try_from(i64::from(layout.height) - layout.skin_y)
        .ok()
        .filter(|h| *h > 0)?;

    let scale = f64::from(layout.skin_width) / f64::from(width);
    let scaled_height = (f64::from(height) * scale) as u32;
    if scaled_height <= max_height {
        return Some(imageops::resize(
            skin,
            layout.skin_width,
            scaled_height.max(1),
            FilterType::Lanczos3,
        ));
    }

    let visible_rows = ((f64::from(max_height) / scale).ceil() as u32).clamp(1, height);
    let cropped = imageops::crop_imm(skin, 0, 0, width, visible_rows).to_image();
    Some(imageops::resize(
        &cropped,
        layout.skin_width,
        max_height,
        FilterType::Lanczos3,
    ))
}

/// Distance from the ascender line to the middle of a line of text, used to
/// place left-anchored title runs on the same center line as `Anchor::Middle`.
fn title_half_height(assets: &CardAssets, size: f32) -> f32 {
    let metrics = assets.typeface.metrics(size);
    (metrics.ascent - metrics.descent) / 2.0
}
