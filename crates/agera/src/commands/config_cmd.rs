//! Config subcommand handlers.

use dialoguer::{Input, Select};

use agera_config::{ConfigError, SecretKind};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, SecretArg};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

impl From<SecretArg> for SecretKind {
    fn from(arg: SecretArg) -> Self {
        match arg {
            SecretArg::ApiKey => Self::ApiKey,
            SecretArg::BotToken => Self::BotToken,
        }
    }
}

/// Prompt for a secret without echo. Empty input means "skip".
fn prompt_secret(kind: SecretKind) -> Result<Option<String>, CliError> {
    let value = rpassword::prompt_password(format!("{kind} (empty to skip): ")).map_err(prompt_err)?;
    Ok(Some(value).filter(|v| !v.is_empty()))
}

/// Store a secret in the keyring, or hand it back for the plaintext config.
fn store_or_inline(kind: SecretKind, secret: String) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {kind}?"))
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        agera_config::store_secret(kind, &secret)?;
        eprintln!("   ✓ {kind} stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret))
    }
}

fn prompt_value<T>(prompt: &str, default: T) -> Result<T, CliError>
where
    T: Clone + ToString + std::str::FromStr,
    T::Err: std::fmt::Debug + ToString,
{
    Input::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(prompt_err)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let rendered = toml::to_string_pretty(&cfg.redacted()).map_err(ConfigError::from)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::active_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetSecret { secret } => {
            let kind = SecretKind::from(secret);
            let value = rpassword::prompt_password(format!("{kind}: ")).map_err(prompt_err)?;
            if value.is_empty() {
                return Err(CliError::Validation {
                    field: kind.keyring_entry().into(),
                    reason: "value cannot be empty".into(),
                });
            }
            agera_config::store_secret(kind, &value)?;
            output::success(&format!("{kind} stored in system keyring"), global.quiet);
            Ok(())
        }
    }
}

/// Interactive wizard: API endpoint, secrets, then render assets.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::active_path(global);
    eprintln!("✨ agera configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    let mut cfg = Config::default();

    cfg.api.base_url = prompt_value("Game API URL", cfg.api.base_url)?;
    cfg.api.timeout = prompt_value("Request timeout (seconds)", cfg.api.timeout)?;
    if cfg.api.timeout == 0 {
        return Err(CliError::Validation {
            field: "api.timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    if let Some(key) = prompt_secret(SecretKind::ApiKey)? {
        cfg.api.api_key = store_or_inline(SecretKind::ApiKey, key)?;
    }
    if let Some(token) = prompt_secret(SecretKind::BotToken)? {
        cfg.bot.token = store_or_inline(SecretKind::BotToken, token)?;
    }

    let font: String = prompt_value("Font file", cfg.assets.font.display().to_string())?;
    cfg.assets.font = font.into();
    let background: String =
        prompt_value("Background image", cfg.assets.background.display().to_string())?;
    cfg.assets.background = background.into();
    cfg.assets.timezone_offset_hours =
        prompt_value("Timestamp offset from UTC (hours)", cfg.assets.timezone_offset_hours)?;

    agera_config::save_config_to(&cfg, &path)?;

    output::success(&format!("Configuration written to {}", path.display()), global.quiet);
    eprintln!("\n  Test it: agera test");
    Ok(())
}
