//! CLI error types with miette diagnostics.
//!
//! Maps API, config and card failures into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use agera_cards::CardError;
use agera_config::{ConfigError, SecretKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const RENDER: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the AgeraPvP API")]
    #[diagnostic(
        code(agera::connection_failed),
        help(
            "Check your network and the configured base URL.\n\
             Try: agera test --api-url <url>"
        )
    )]
    ConnectionFailed {
        #[source]
        source: agera_api::Error,
    },

    #[error("API connectivity probe failed for {url}")]
    #[diagnostic(
        code(agera::probe_failed),
        help("The API did not answer GET /v1/test with a success status.")
    )]
    ProbeFailed { url: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(agera::timeout),
        help("Increase the timeout with --timeout or `api.timeout` in the config file.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("The API refused the request (HTTP {status})")]
    #[diagnostic(
        code(agera::auth_failed),
        help(
            "Verify your API key.\n\
             Run: agera config set-secret api-key"
        )
    )]
    AuthFailed { status: u16 },

    #[error("No {secret} configured")]
    #[diagnostic(
        code(agera::no_credentials),
        help(
            "Store it with: agera config set-secret {entry}\n\
             Or export the variable named by `{env_field}` in the config file."
        )
    )]
    NoCredentials {
        secret: SecretKind,
        entry: &'static str,
        env_field: &'static str,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Not found: {body}")]
    #[diagnostic(
        code(agera::not_found),
        help("Check the nickname and the game mode.")
    )]
    NotFound { body: String },

    #[error("API error: {message}")]
    #[diagnostic(code(agera::rejected))]
    Rejected { message: String },

    #[error(transparent)]
    #[diagnostic(code(agera::api))]
    Api(agera_api::Error),

    // ── Rendering ────────────────────────────────────────────────────
    #[error("Failed to render the {card} card")]
    #[diagnostic(
        code(agera::render_failed),
        help("Run with -v to see why the renderer gave up.")
    )]
    RenderFailed { card: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(agera::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(agera::config))]
    Config(Box<ConfigError>),

    // ── Discord ──────────────────────────────────────────────────────
    #[error("Discord client error")]
    #[diagnostic(
        code(agera::discord),
        help("Check the bot token: agera config set-secret bot-token")
    )]
    Discord {
        #[source]
        source: Box<poise::serenity_prelude::Error>,
    },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::ProbeFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::RenderFailed { .. } => exit_code::RENDER,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn discord(err: poise::serenity_prelude::Error) -> Self {
        Self::Discord {
            source: Box::new(err),
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<agera_api::Error> for CliError {
    fn from(err: agera_api::Error) -> Self {
        match err {
            agera_api::Error::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            agera_api::Error::Rejected { message } => Self::Rejected { message },
            agera_api::Error::Status {
                status: status @ (401 | 403),
                ..
            } => Self::AuthFailed { status },
            agera_api::Error::Status { status: 404, body } => Self::NotFound { body },
            other if other.is_unreachable() => Self::ConnectionFailed { source: other },
            other => Self::Api(other),
        }
    }
}

impl From<CardError> for CliError {
    fn from(err: CardError) -> Self {
        match err {
            CardError::Unavailable(source) => source.into(),
            CardError::Rejected { message } => Self::Rejected { message },
            CardError::RenderFailed { card } => Self::RenderFailed {
                card: card.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { secret } => Self::NoCredentials {
                secret,
                entry: secret.keyring_entry(),
                env_field: match secret {
                    SecretKind::ApiKey => "api.api_key_env",
                    SecretKind::BotToken => "bot.token_env",
                },
            },
            other => Self::Config(Box::new(other)),
        }
    }
}
