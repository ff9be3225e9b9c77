//! The five card renderers and the helpers they share.
//!
//! Every `render` function is pure: payload, assets and layout in, PNG bytes
//! out. [`guarded`] is the boundary where errors and panics turn into a
//! logged `None`.

pub mod online;
pub mod profile;
pub mod punishments;
pub mod staff;
pub mod stats;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use image::Rgba;
use tracing::error;

use crate::CardKind;
use crate::error::RenderError;
use crate::rank::{RankColor, RankDisplay, YOUTUBE_RED, YOUTUBE_WHITE};
use crate::render::{Anchor, Canvas, CardAssets, Typeface};
use crate::theme::FOOTER_TEXT;

pub use self::online::OnlineLayout;
pub use self::profile::ProfileLayout;
pub use self::punishments::PunishmentsLayout;
pub use self::staff::StaffLayout;
pub use self::stats::StatsLayout;

/// Layouts for every card kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layouts {
    pub stats: StatsLayout,
    pub profile: ProfileLayout,
    pub punishments: PunishmentsLayout,
    pub staff: StaffLayout,
    pub online: OnlineLayout,
}

/// Run `draw`, logging and swallowing any error or panic.
pub fn guarded<F>(card: CardKind, draw: F) -> Option<Vec<u8>>
where
    F: FnOnce() -> Result<Vec<u8>, RenderError>,
{
    let err = match panic::catch_unwind(AssertUnwindSafe(draw)) {
        Ok(Ok(png)) => return Some(png),
        Ok(Err(e)) => e,
        Err(payload) => RenderError::Panicked(panic_message(payload.as_ref())),
    };
    error!(card = %card, error = %err, "card render failed");
    None
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".into())
}

/// Footer caption centered `offset` px above the bottom edge.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub(crate) fn draw_footer(canvas: &mut Canvas, assets: &CardAssets, size: f32, offset: u32) {
    let x = half(canvas.width());
    let y = canvas.height().saturating_sub(offset) as f32;
    canvas.text(
        &assets.typeface,
        size,
        assets.palette.footer,
        (x, y),
        Anchor::Middle,
        FOOTER_TEXT,
    );
}

/// Draw `runs` as one line horizontally centered on `center_x`.
pub(crate) fn draw_centered_runs<S: AsRef<str>>(
    canvas: &mut Canvas,
    face: &Typeface,
    size: f32,
    (center_x, y): (f32, f32),
    runs: &[(S, Rgba<u8>)],
) {
    let total = runs_width(face, size, runs);
    let start = (center_x - total / 2.0).floor();
    canvas.text_runs(face, size, (start, y), runs);
}

pub(crate) fn runs_width<S: AsRef<str>>(face: &Typeface, size: f32, runs: &[(S, Rgba<u8>)]) -> f32 {
    runs.iter().map(|(text, _)| face.text_width(size, text.as_ref())).sum()
}

/// "{rank} {name}" in the rank color, or the two-color YouTube badge
/// followed by the name in white.
pub(crate) fn rank_title(rank: &RankDisplay, name: &str) -> Vec<(String, Rgba<u8>)> {
    match rank.color {
        RankColor::YouTube => vec![
            ("You".to_string(), YOUTUBE_RED),
            ("Tube".to_string(), YOUTUBE_WHITE),
            (format!(" {name}"), YOUTUBE_WHITE),
        ],
        RankColor::Solid(color) => vec![(format!("{} {name}", rank.label), color)],
    }
}

/// Midpoint of a pixel extent.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub(crate) fn half(extent: u32) -> f32 {
    (extent / 2) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::rgb;

    #[test]
    fn guard_contains_panics() {
        let result = guarded(CardKind::Online, || panic!("boom"));
        assert_eq!(result, None);
    }

    #[test]
    fn guard_logs_errors() {
        let result = guarded(CardKind::Staff, || {
            Err(RenderError::Canvas {
                width: 0,
                height: 0,
            })
        });
        assert_eq!(result, None);
    }

    #[test]
    fn guard_passes_output_through() {
        assert_eq!(guarded(CardKind::Stats, || Ok(vec![1, 2])), Some(vec![1, 2]));
    }

    #[test]
    fn panic_messages() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "unknown panic");
    }

    #[test]
    fn youtube_title_is_split() {
        let rank = RankDisplay::parse("YOUTUBE").unwrap();
        let runs = rank_title(&rank, "Steve");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], ("You".to_string(), rgb(255, 0, 0)));
        assert_eq!(runs[2].0, " Steve");
    }

    #[test]
    fn solid_title_is_one_run() {
        let rank = RankDisplay::parse("AX_TEAM").unwrap();
        assert_eq!(
            rank_title(&rank, "Steve"),
            vec![("TEAM Steve".to_string(), rgb(128, 0, 128))]
        );
    }
}
