//! Shared configuration for the AgeraPvP bot and CLI.
//!
//! One TOML file plus `AGERA_`-prefixed environment overrides, credential
//! resolution (env var, then keyring, then plaintext), and translation to
//! `agera_api::TransportConfig` and `agera_cards::AssetConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use agera_api::TransportConfig;
use agera_cards::AssetConfig;

/// Keyring service name for every stored secret.
pub const KEYRING_SERVICE: &str = "agera";

/// Shown in place of plaintext secrets by [`Config::redacted`].
pub const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {secret} configured")]
    NoCredentials { secret: SecretKind },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub bot: BotSection,

    #[serde(default)]
    pub assets: AssetsSection,
}

/// Game API and skin service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_skin_url")]
    pub skin_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// API key (plaintext; prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            skin_url: default_skin_url(),
            timeout: default_timeout(),
            api_key: None,
            api_key_env: default_api_key_env(),
        }
    }
}

/// Discord bot settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotSection {
    /// Bot token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the bot token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            token: None,
            token_env: default_token_env(),
        }
    }
}

/// Card rendering assets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetsSection {
    #[serde(default = "default_font")]
    pub font: PathBuf,

    #[serde(default = "default_background")]
    pub background: PathBuf,

    /// Offset for profile timestamps, in hours east of UTC.
    #[serde(default)]
    pub timezone_offset_hours: i32,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            font: default_font(),
            background: default_background(),
            timezone_offset_hours: 0,
        }
    }
}

fn default_base_url() -> String {
    agera_api::DEFAULT_BASE_URL.into()
}
fn default_skin_url() -> String {
    agera_api::DEFAULT_SKIN_URL.into()
}
fn default_timeout() -> u64 {
    10
}
fn default_api_key_env() -> String {
    "API_KEY".into()
}
fn default_token_env() -> String {
    "BOT_TOKEN".into()
}
fn default_font() -> PathBuf {
    agera_cards::render::assets::DEFAULT_FONT_PATH.into()
}
fn default_background() -> PathBuf {
    agera_cards::render::assets::DEFAULT_BACKGROUND_PATH.into()
}

impl Config {
    /// Copy with plaintext secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api.api_key.is_some() {
            copy.api.api_key = Some(REDACTED.into());
        }
        if copy.bot.token.is_some() {
            copy.bot.token = Some(REDACTED.into());
        }
        copy
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("club", "agerapvp", "agera").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("agera");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (which need not exist) + environment.
///
/// Nested keys use a double underscore: `AGERA_API__BASE_URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("AGERA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// The secrets the workspace knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    ApiKey,
    BotToken,
}

impl SecretKind {
    /// Keyring entry name under [`KEYRING_SERVICE`].
    pub fn keyring_entry(self) -> &'static str {
        match self {
            Self::ApiKey => "api-key",
            Self::BotToken => "bot-token",
        }
    }
}

impl std::fmt::Display for SecretKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ApiKey => "API key",
            Self::BotToken => "bot token",
        })
    }
}

/// env var → system keyring → plaintext.
fn resolve_secret(kind: SecretKind, env_name: &str, plaintext: Option<&str>) -> Option<SecretString> {
    // 1. Named env var
    if let Ok(val) = std::env::var(env_name) {
        if !val.is_empty() {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, kind.keyring_entry()) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    plaintext
        .filter(|s| !s.is_empty())
        .map(|s| SecretString::from(s.to_owned()))
}

/// The API key, if any is configured. Requests go out without
/// `X-Api-Key` when this is `None`.
pub fn resolve_api_key(api: &ApiSection) -> Option<SecretString> {
    resolve_secret(SecretKind::ApiKey, &api.api_key_env, api.api_key.as_deref())
}

/// The bot token; required to start the bot.
pub fn resolve_bot_token(bot: &BotSection) -> Result<SecretString, ConfigError> {
    resolve_secret(SecretKind::BotToken, &bot.token_env, bot.token.as_deref())
        .ok_or(ConfigError::NoCredentials {
            secret: SecretKind::BotToken,
        })
}

/// Store a secret in the system keyring.
pub fn store_secret(kind: SecretKind, value: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, kind.keyring_entry())?;
    entry.set_password(value)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })
}

impl ApiSection {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        parse_url("api.base_url", &self.base_url)
    }

    pub fn skin_url(&self) -> Result<Url, ConfigError> {
        parse_url("api.skin_url", &self.skin_url)
    }

    /// Transport settings with the resolved API key.
    pub fn transport(&self) -> Result<TransportConfig, ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        let mut transport = TransportConfig::default().with_timeout(Duration::from_secs(self.timeout));
        if let Some(key) = resolve_api_key(self) {
            transport = transport.with_api_key(key);
        }
        Ok(transport)
    }
}

impl AssetsSection {
    pub fn asset_config(&self) -> AssetConfig {
        AssetConfig {
            font: self.font.clone(),
            background: self.background.clone(),
            timezone_offset_hours: self.timezone_offset_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, "http://api.agerapvp.club");
        assert_eq!(cfg.api.skin_url, "https://skin.agerapvp.club");
        assert_eq!(cfg.api.timeout, 10);
        assert_eq!(cfg.api.api_key_env, "API_KEY");
        assert_eq!(cfg.bot.token_env, "BOT_TOKEN");
        assert_eq!(cfg.assets.font, PathBuf::from("Unbounded-Regular.ttf"));
        assert_eq!(cfg.assets.background, PathBuf::from("fon.jpg"));
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [api]
                base_url = "http://file.example"
                timeout = 5

                [assets]
                timezone_offset_hours = 3
                "#,
            )?;
            jail.set_env("AGERA_API__BASE_URL", "http://env.example");

            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.api.base_url, "http://env.example");
            assert_eq!(cfg.api.timeout, 5);
            assert_eq!(cfg.api.skin_url, "https://skin.agerapvp.club");
            assert_eq!(cfg.assets.timezone_offset_hours, 3);
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_defaults() {
        Jail::expect_with(|_| {
            let cfg = load_config_from(Path::new("nope.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn env_var_secret_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("AGERA_TEST_TOKEN_ENV", "from-env");
            let bot = BotSection {
                token: Some("from-file".into()),
                token_env: "AGERA_TEST_TOKEN_ENV".into(),
            };
            let token = resolve_bot_token(&bot).map_err(|e| e.to_string())?;
            assert_eq!(token.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.api.base_url = "http://localhost:8080".into();
        cfg.bot.token = Some("secret".into());

        save_config_to(&cfg, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[api]"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn redaction_masks_secrets_only() {
        let mut cfg = Config::default();
        cfg.api.api_key = Some("k".into());
        let shown = cfg.redacted();
        assert_eq!(shown.api.api_key.as_deref(), Some(REDACTED));
        assert_eq!(shown.bot.token, None);
        assert_eq!(shown.api.base_url, cfg.api.base_url);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let api = ApiSection {
            base_url: "not a url".into(),
            timeout: 0,
            ..ApiSection::default()
        };
        assert!(matches!(api.base_url(), Err(ConfigError::Validation { .. })));
        assert!(matches!(api.transport(), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn asset_translation() {
        let assets = AssetsSection {
            timezone_offset_hours: -2,
            ..AssetsSection::default()
        };
        let cfg = assets.asset_config();
        assert_eq!(cfg.timezone_offset_hours, -2);
        assert_eq!(cfg.font, PathBuf::from("Unbounded-Regular.ttf"));
    }
}
