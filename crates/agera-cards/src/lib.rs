// agera-cards: PNG stat cards for the AgeraPvP bot
//
// Payload model and parse step, formatting-code sanitizer, rank and label
// lookup, the five card renderers, and `CardService`, which fetches data
// through `agera-api` and renders off the async runtime.

pub mod cards;
pub mod error;
pub mod format;
pub mod labels;
pub mod model;
pub mod rank;
pub mod render;
pub mod sanitize;
pub mod service;
pub mod theme;

use std::sync::Arc;

use image::RgbaImage;
use strum::{Display, EnumIter, EnumString};

pub use cards::Layouts;
pub use error::{CardError, RenderError};
pub use model::{OnlineCount, ProfilePayload, PunishmentStats, StaffRoster, StatsPayload};
pub use rank::{RankDisplay, RankSource};
pub use render::{AssetConfig, CardAssets};
pub use service::CardService;

/// The kinds of card the bot can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CardKind {
    Stats,
    Profile,
    Punishments,
    Staff,
    Online,
}

/// Cheaply clonable entry point to the renderers.
///
/// Each method returns the PNG bytes, or `None` after logging why the card
/// could not be drawn. Panics in drawing code are contained here.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    assets: Arc<CardAssets>,
    layouts: Arc<Layouts>,
}

impl CardRenderer {
    pub fn new(assets: CardAssets) -> Self {
        Self::with_layouts(assets, Layouts::default())
    }

    pub fn with_layouts(assets: CardAssets, layouts: Layouts) -> Self {
        Self {
            assets: Arc::new(assets),
            layouts: Arc::new(layouts),
        }
    }

    pub fn assets(&self) -> &CardAssets {
        &self.assets
    }

    pub fn layouts(&self) -> &Layouts {
        &self.layouts
    }

    pub fn stats(
        &self,
        nickname: &str,
        mode: &str,
        payload: &StatsPayload,
        rank: Option<&RankDisplay>,
    ) -> Option<Vec<u8>> {
        cards::guarded(CardKind::Stats, || {
            cards::stats::render(nickname, mode, payload, rank, &self.assets, &self.layouts.stats)
        })
    }

    pub fn profile(&self, nickname: &str, payload: &ProfilePayload, skin: Option<&RgbaImage>) -> Option<Vec<u8>> {
        cards::guarded(CardKind::Profile, || {
            cards::profile::render(nickname, payload, skin, &self.assets, &self.layouts.profile)
        })
    }

    pub fn punishments(&self, stats: &PunishmentStats) -> Option<Vec<u8>> {
        cards::guarded(CardKind::Punishments, || {
            cards::punishments::render(stats, &self.assets, &self.layouts.punishments)
        })
    }

    pub fn staff(&self, roster: &StaffRoster) -> Option<Vec<u8>> {
        cards::guarded(CardKind::Staff, || {
            cards::staff::render(roster, &self.assets, &self.layouts.staff)
        })
    }

    pub fn online(&self, count: OnlineCount) -> Option<Vec<u8>> {
        cards::guarded(CardKind::Online, || {
            cards::online::render(count, &self.assets, &self.layouts.online)
        })
    }
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new(CardAssets::builtin())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::cards::OnlineLayout;

    #[test]
    fn card_kind_names() {
        assert_eq!(CardKind::Punishments.to_string(), "punishments");
        assert_eq!(CardKind::from_str("staff").unwrap(), CardKind::Staff);
        assert!(CardKind::from_str("leaderboard").is_err());
        assert_eq!(CardKind::iter().count(), 5);
    }

    #[test]
    fn renderer_produces_every_card() {
        let renderer = CardRenderer::default();
        let stats = StatsPayload::from_value(&json!({ "wins": 1 }));
        assert!(renderer.stats("Steve", "BW", &stats, None).is_some());
        let profile = ProfilePayload::from_value(&json!({ "username": "Steve" }));
        assert!(renderer.profile("Steve", &profile, None).is_some());
        assert!(renderer.punishments(&PunishmentStats::default()).is_some());
        assert!(renderer.staff(&StaffRoster::Players(Vec::new())).is_some());
        assert!(renderer.online(OnlineCount(3)).is_some());
    }

    #[test]
    fn renderer_failures_become_none() {
        let layouts = Layouts {
            online: OnlineLayout {
                height: 0,
                ..OnlineLayout::default()
            },
            ..Layouts::default()
        };
        let renderer = CardRenderer::with_layouts(CardAssets::builtin(), layouts);
        assert_eq!(renderer.online(OnlineCount(3)), None);
        assert_eq!(renderer.profile("x", &ProfilePayload::Invalid, None), None);
        assert_eq!(renderer.staff(&StaffRoster::Invalid), None);
    }
}
