//! CLI configuration: the shared `agera_config` layers plus `GlobalOpts`
//! overrides (--config, --api-url, --api-key, --timeout).

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use agera_api::{AgeraClient, SkinClient, TransportConfig};
use agera_cards::{CardAssets, CardRenderer, CardService};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use agera_config::{Config, config_path};

/// The config file this invocation reads and writes.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load the layered config and apply flag overrides.
///
/// Flags beat env vars, which beat the file.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = agera_config::load_config_from(&active_path(global))?;
    if let Some(ref url) = global.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.api.timeout = timeout;
    }
    Ok(cfg)
}

/// Renderer with the configured font, background and timezone.
pub fn renderer(cfg: &Config) -> CardRenderer {
    CardRenderer::new(CardAssets::load(&cfg.assets.asset_config()))
}

/// Game API client, skin client and renderer wired together.
pub fn build_service(cfg: &Config, global: &GlobalOpts) -> Result<CardService, CliError> {
    let mut transport = cfg.api.transport()?;
    if let Some(ref key) = global.api_key {
        transport = transport.with_api_key(SecretString::from(key.clone()));
    }
    let api = AgeraClient::new(cfg.api.base_url()?, &transport)?;

    // The skin service is a separate host and never sees the API key.
    let skin_transport = TransportConfig::default().with_timeout(Duration::from_secs(cfg.api.timeout));
    let skins = SkinClient::new(cfg.api.skin_url()?, &skin_transport)?;

    Ok(CardService::new(api, skins, renderer(cfg)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write;

    use super::*;

    fn global(config: PathBuf) -> GlobalOpts {
        GlobalOpts {
            config: Some(config),
            api_url: None,
            api_key: None,
            timeout: None,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn flags_override_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://file.example\"\ntimeout = 3"
        )
        .unwrap();

        let mut opts = global(file.path().to_path_buf());
        assert_eq!(load(&opts).unwrap().api.base_url, "https://file.example");

        opts.api_url = Some("http://127.0.0.1:9".into());
        opts.timeout = Some(30);
        let cfg = load(&opts).unwrap();
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:9");
        assert_eq!(cfg.api.timeout, 30);
        assert!(build_service(&cfg, &opts).is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = global(dir.path().join("missing.toml"));
        opts.timeout = Some(0);
        let cfg = load(&opts).unwrap();
        let err = build_service(&cfg, &opts).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }), "got: {err:?}");
    }
}
