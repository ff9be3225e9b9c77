//! A single card request, shared by the slash commands and the CLI.
//!
//! Knows which service call produces the card, the attachment name, and the
//! Russian reply text for every outcome.

use agera_cards::{CardError, CardKind, CardService};

pub const API_CONNECTED: &str = "✅ Соединение с API установлено!";
pub const API_DISCONNECTED: &str = "❌ Не удалось подключиться к API";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRequest<'a> {
    Stats { nickname: &'a str, mode: &'a str },
    Profile { nickname: &'a str },
    Punishments,
    Staff,
    Online,
}

impl CardRequest<'_> {
    pub fn kind(&self) -> CardKind {
        match self {
            Self::Stats { .. } => CardKind::Stats,
            Self::Profile { .. } => CardKind::Profile,
            Self::Punishments => CardKind::Punishments,
            Self::Staff => CardKind::Staff,
            Self::Online => CardKind::Online,
        }
    }

    pub async fn fetch(&self, service: &CardService) -> Result<Vec<u8>, CardError> {
        match *self {
            Self::Stats { nickname, mode } => service.stats_card(nickname, mode).await,
            Self::Profile { nickname } => service.profile_card(nickname).await,
            Self::Punishments => service.punishments_card().await,
            Self::Staff => service.staff_card().await,
            Self::Online => service.online_card().await,
        }
    }

    /// Attachment name, also the CLI's default output file.
    pub fn file_name(&self) -> String {
        match self {
            Self::Stats { nickname, mode } => format!("stats_{nickname}_{mode}.png"),
            Self::Profile { nickname } => format!("profile_{nickname}.png"),
            Self::Punishments => "punishments.png".into(),
            Self::Staff => "staff_online.png".into(),
            Self::Online => "online.png".into(),
        }
    }

    /// Message posted alongside the image.
    pub fn caption(&self) -> String {
        match self {
            Self::Stats { nickname, mode } => format!(
                "📊 Статистика игрока **{nickname}** в режиме **{}**",
                mode.to_uppercase()
            ),
            Self::Profile { nickname } => format!("👤 Профиль игрока **{nickname}**"),
            Self::Punishments => "📊 Статистика наказаний".into(),
            Self::Staff => "👮 Онлайн стафф".into(),
            Self::Online => "👥 Онлайн игроков".into(),
        }
    }

    /// Reply text when no card could be produced.
    pub fn failure_message(&self, err: &CardError) -> String {
        match err {
            CardError::Unavailable(_) => self.unavailable_message(),
            CardError::Rejected { message } => format!("❌ Ошибка: {message}"),
            CardError::RenderFailed { .. } => self.render_failed_message().into(),
        }
    }

    fn unavailable_message(&self) -> String {
        match self {
            Self::Stats { nickname, mode } => format!(
                "❌ Не удалось получить статистику для игрока **{nickname}** в режиме **{}**.\n\
                 Проверьте правильность ника и режима.",
                mode.to_uppercase()
            ),
            Self::Profile { nickname } => format!(
                "❌ Не удалось получить профиль для игрока **{nickname}**.\n\
                 Проверьте правильность ника."
            ),
            Self::Punishments => "❌ Не удалось получить статистику наказаний.".into(),
            Self::Staff => "❌ Не удалось получить список онлайн стаффа.".into(),
            Self::Online => "❌ Не удалось получить количество онлайн игроков.".into(),
        }
    }

    fn render_failed_message(&self) -> &'static str {
        match self {
            Self::Stats { .. } => "❌ Не удалось сгенерировать изображение со статистикой.",
            Self::Profile { .. } => "❌ Не удалось сгенерировать изображение профиля.",
            Self::Punishments => "❌ Не удалось сгенерировать изображение статистики наказаний.",
            Self::Staff => "❌ Не удалось сгенерировать изображение онлайн стаффа.",
            Self::Online => "❌ Не удалось сгенерировать изображение онлайн.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS: CardRequest<'static> = CardRequest::Stats {
        nickname: "Steve",
        mode: "bw",
    };

    #[test]
    fn file_names_match_attachments() {
        assert_eq!(STATS.file_name(), "stats_Steve_bw.png");
        assert_eq!(
            CardRequest::Profile { nickname: "Alex" }.file_name(),
            "profile_Alex.png"
        );
        assert_eq!(CardRequest::Staff.file_name(), "staff_online.png");
        assert_eq!(CardRequest::Online.kind(), CardKind::Online);
    }

    #[test]
    fn stats_texts_uppercase_the_mode() {
        assert_eq!(
            STATS.caption(),
            "📊 Статистика игрока **Steve** в режиме **BW**"
        );
        let err = CardError::Unavailable(agera_api::Error::Timeout { timeout_secs: 10 });
        assert_eq!(
            STATS.failure_message(&err),
            "❌ Не удалось получить статистику для игрока **Steve** в режиме **BW**.\n\
             Проверьте правильность ника и режима."
        );
    }

    #[test]
    fn rejection_repeats_the_api_message() {
        let err = CardError::Rejected {
            message: "Игрок не найден".into(),
        };
        assert_eq!(
            CardRequest::Profile { nickname: "Ghost" }.failure_message(&err),
            "❌ Ошибка: Игрок не найден"
        );
    }

    #[test]
    fn render_failures_use_the_card_text() {
        let err = CardError::RenderFailed {
            card: CardKind::Online,
        };
        assert_eq!(
            CardRequest::Online.failure_message(&err),
            "❌ Не удалось сгенерировать изображение онлайн."
        );
    }
}
