//! Discord bot: poise framework over a serenity gateway client.
//!
//! Every slash command defers, fetches through the shared [`CardService`],
//! and replies with either the PNG attachment or a failure message.

mod commands;

use poise::serenity_prelude as serenity;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use agera_cards::CardService;

use crate::error::CliError;

/// State shared by every command invocation.
pub struct Data {
    pub service: CardService,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Connect to Discord and serve slash commands until the gateway closes.
pub async fn run(service: CardService, token: &SecretString) -> Result<(), CliError> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(commands::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, "connected to Discord");
                let commands = &framework.options().commands;
                poise::builtins::register_globally(ctx, commands).await?;
                info!(count = commands.len(), "slash commands registered");

                if service.test_connection().await {
                    info!("Соединение с API установлено");
                } else {
                    warn!("Предупреждение: не удалось подключиться к API");
                }
                Ok(Data { service })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(
        token.expose_secret(),
        serenity::GatewayIntents::non_privileged(),
    )
    .framework(framework)
    .await
    .map_err(CliError::discord)?;

    client.start().await.map_err(CliError::discord)
}
