//! `agera render`: draw a card from a saved JSON payload, no network.

use std::path::Path;

use serde_json::Value;

use agera_cards::cards::profile::prepare_skin;
use agera_cards::{
    OnlineCount, ProfilePayload, PunishmentStats, RankDisplay, StaffRoster, StatsPayload,
};

use crate::cli::{CardArg, GlobalOpts, RenderArgs};
use crate::commands::cards::{save_png, target};
use crate::config;
use crate::error::CliError;
use crate::request::CardRequest;

pub fn handle(args: &RenderArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let payload = read_json_file(&args.input)?;
    let renderer = config::renderer(&config::load(global)?);

    let (request, png) = match args.card {
        CardArg::Stats => {
            let nickname = required(args.nick.as_deref(), "nick")?;
            let mode = required(args.mode.as_deref(), "mode")?;
            let rank = args.rank.as_deref().and_then(RankDisplay::parse);
            let png = renderer.stats(
                nickname,
                mode,
                &StatsPayload::from_value(&payload),
                rank.as_ref(),
            );
            (CardRequest::Stats { nickname, mode }, png)
        }
        CardArg::Profile => {
            let nickname = required(args.nick.as_deref(), "nick")?;
            let skin = match &args.skin {
                Some(path) => prepare_skin(&std::fs::read(path)?),
                None => None,
            };
            let png = renderer.profile(nickname, &ProfilePayload::from_value(&payload), skin.as_ref());
            (CardRequest::Profile { nickname }, png)
        }
        CardArg::Punishments => (
            CardRequest::Punishments,
            renderer.punishments(&PunishmentStats::from_value(&payload)),
        ),
        CardArg::Staff => (
            CardRequest::Staff,
            renderer.staff(&StaffRoster::from_value(&payload)),
        ),
        CardArg::Online => (
            CardRequest::Online,
            renderer.online(OnlineCount::from_value(&payload)),
        ),
    };

    let png = png.ok_or_else(|| CliError::RenderFailed {
        card: request.kind().to_string(),
    })?;
    save_png(&target(request, args.out.output.as_deref()), &png, global.quiet)
}

fn required<'a>(value: Option<&'a str>, flag: &str) -> Result<&'a str, CliError> {
    value.ok_or_else(|| CliError::Validation {
        field: format!("--{flag}"),
        reason: "required for this card".into(),
    })
}

/// Read and parse the `--input` payload.
fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "input".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}
