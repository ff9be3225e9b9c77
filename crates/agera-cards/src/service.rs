//! Fetch-then-render facade used by the bot and the CLI.
//!
//! Each `*_card` method performs the HTTP calls for one card, parses the
//! payload, and runs the renderer on the blocking pool. Errors come back as
//! [`CardError`], which maps directly onto a user-facing reply.

use agera_api::{AgeraClient, SkinClient};
use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::cards::profile::prepare_skin;
use crate::error::CardError;
use crate::model::{OnlineCount, ProfilePayload, PunishmentStats, StaffRoster, StatsPayload};
use crate::rank::{self, RankDisplay};
use crate::{CardKind, CardRenderer};

#[derive(Debug, Clone)]
pub struct CardService {
    api: AgeraClient,
    skins: SkinClient,
    renderer: CardRenderer,
}

impl CardService {
    pub fn new(api: AgeraClient, skins: SkinClient, renderer: CardRenderer) -> Self {
        Self { api, skins, renderer }
    }

    pub fn api(&self) -> &AgeraClient {
        &self.api
    }

    pub fn renderer(&self) -> &CardRenderer {
        &self.renderer
    }

    /// Probe `GET /v1/test`.
    pub async fn test_connection(&self) -> bool {
        self.api.test_connection().await
    }

    /// Stats card for `nickname` in `mode`, with the rank taken from the
    /// player's profile when it can be fetched.
    pub async fn stats_card(&self, nickname: &str, mode: &str) -> Result<Vec<u8>, CardError> {
        let raw = self.api.player_stats(nickname, mode).await?;
        let payload = StatsPayload::from_value(&raw);
        let rank = self.lookup_rank(nickname).await;

        let nickname = nickname.to_owned();
        let mode = mode.to_owned();
        self.render(CardKind::Stats, move |r| {
            r.stats(&nickname, &mode, &payload, rank.as_ref())
        })
        .await
    }

    /// Profile card with the player's skin when the skin service has one.
    pub async fn profile_card(&self, nickname: &str) -> Result<Vec<u8>, CardError> {
        let raw = self.api.player_profile(nickname).await?;
        let payload = ProfilePayload::from_value(&raw);
        let skin = self.fetch_skin(nickname).await;

        let nickname = nickname.to_owned();
        self.render(CardKind::Profile, move |r| {
            let skin = skin.as_deref().and_then(prepare_skin);
            r.profile(&nickname, &payload, skin.as_ref())
        })
        .await
    }

    pub async fn punishments_card(&self) -> Result<Vec<u8>, CardError> {
        let stats = PunishmentStats::from_value(&self.api.staff_stats().await?);
        self.render(CardKind::Punishments, move |r| r.punishments(&stats))
            .await
    }

    pub async fn staff_card(&self) -> Result<Vec<u8>, CardError> {
        let roster = StaffRoster::from_value(&self.api.staff_online().await?);
        self.render(CardKind::Staff, move |r| r.staff(&roster)).await
    }

    pub async fn online_card(&self) -> Result<Vec<u8>, CardError> {
        let count = OnlineCount::from_value(&self.api.total_online().await?);
        self.render(CardKind::Online, move |r| r.online(count)).await
    }

    /// First rank of the player's profile; any failure means "no rank".
    async fn lookup_rank(&self, nickname: &str) -> Option<RankDisplay> {
        match self.api.player_profile(nickname).await {
            Ok(raw) => ProfilePayload::from_value(&raw)
                .profile()
                .and_then(|p| rank::resolve(p.rank.as_ref())),
            Err(e) => {
                debug!(nickname, error = %e, "rank lookup failed, rendering without rank");
                None
            }
        }
    }

    async fn fetch_skin(&self, nickname: &str) -> Option<Bytes> {
        match self.skins.fetch_body(nickname).await {
            Ok(body) => body,
            Err(e) => {
                warn!(nickname, error = %e, "skin fetch failed, rendering without skin");
                None
            }
        }
    }

    /// Run a renderer on the blocking pool.
    async fn render<F>(&self, card: CardKind, draw: F) -> Result<Vec<u8>, CardError>
    where
        F: FnOnce(&CardRenderer) -> Option<Vec<u8>> + Send + 'static,
    {
        let renderer = self.renderer.clone();
        let png = tokio::task::spawn_blocking(move || draw(&renderer))
            .await
            .map_err(|e| {
                error!(card = %card, error = %e, "render task failed");
                CardError::RenderFailed { card }
            })?;
        png.ok_or(CardError::RenderFailed { card })
    }
}
