//! Slash commands. Descriptions are what Discord users see.

use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use agera_cards::CardError;

use super::{Context, Data, Error};
use crate::request::{API_CONNECTED, API_DISCONNECTED, CardRequest};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![stats(), profile(), punishments(), staff(), online(), test()]
}

/// Получить статистику игрока
#[poise::command(slash_command)]
pub async fn stats(
    ctx: Context<'_>,
    #[description = "Никнейм игрока"] nickname: String,
    #[description = "Режим игры (BW для BedWars или Duels)"] mode: String,
) -> Result<(), Error> {
    respond(
        ctx,
        CardRequest::Stats {
            nickname: &nickname,
            mode: &mode,
        },
    )
    .await
}

/// Получить профиль игрока
#[poise::command(slash_command)]
pub async fn profile(
    ctx: Context<'_>,
    #[description = "Никнейм игрока"] nickname: String,
) -> Result<(), Error> {
    respond(ctx, CardRequest::Profile { nickname: &nickname }).await
}

/// Получить статистику наказаний
#[poise::command(slash_command)]
pub async fn punishments(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, CardRequest::Punishments).await
}

/// Получить список онлайн стаффа
#[poise::command(slash_command)]
pub async fn staff(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, CardRequest::Staff).await
}

/// Получить общее количество онлайн игроков
#[poise::command(slash_command)]
pub async fn online(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, CardRequest::Online).await
}

/// Проверить соединение с API
#[poise::command(slash_command)]
pub async fn test(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;
    let text = if ctx.data().service.test_connection().await {
        API_CONNECTED
    } else {
        API_DISCONNECTED
    };
    ctx.say(text).await?;
    Ok(())
}

/// Defer, fetch, then reply with the card or the matching failure text.
async fn respond(ctx: Context<'_>, request: CardRequest<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let reply = match request.fetch(&ctx.data().service).await {
        Ok(png) => {
            info!(card = %request.kind(), user = %ctx.author().name, "card sent");
            poise::CreateReply::default()
                .content(request.caption())
                .attachment(serenity::CreateAttachment::bytes(png, request.file_name()))
        }
        Err(err) => {
            log_failure(&request, &err);
            poise::CreateReply::default().content(request.failure_message(&err))
        }
    };

    ctx.send(reply).await?;
    Ok(())
}

fn log_failure(request: &CardRequest<'_>, err: &CardError) {
    match err {
        CardError::Unavailable(source) => {
            warn!(card = %request.kind(), error = %source, "no data for card");
        }
        CardError::Rejected { message } => {
            info!(card = %request.kind(), reason = %message, "API rejected request");
        }
        CardError::RenderFailed { .. } => {
            error!(card = %request.kind(), "card render failed");
        }
    }
}

/// Command errors get a generic reply; everything else goes to poise's default handler.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, error = %error, "command failed");
            let text = format!("❌ Произошла ошибка при обработке запроса: {error}");
            if let Err(e) = ctx.say(text).await {
                error!(error = %e, "failed to send error reply");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "error while handling framework error");
            }
        }
    }
}
