mod bot;
mod cli;
mod commands;
mod config;
mod error;
mod output;
mod request;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use agera_cards::CardService;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;
use crate::request::CardRequest;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = &cli.global;
    match cli.command {
        // Local-only commands
        Command::Config(args) => commands::config_cmd::handle(args, global),
        Command::Render(args) => commands::render::handle(&args, global),
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "agera", &mut std::io::stdout());
            Ok(())
        }

        Command::Bot => {
            let cfg = config::load(global)?;
            let token = agera_config::resolve_bot_token(&cfg.bot)?;
            let service = config::build_service(&cfg, global)?;
            if agera_config::resolve_api_key(&cfg.api).is_none() && global.api_key.is_none() {
                output::notice("no API key configured, requests go out unauthenticated", global.quiet);
            }
            bot::run(service, &token).await
        }

        // Everything else talks to the API
        Command::Test => commands::cards::test(&connect(global)?, global).await,
        Command::Stats(args) => {
            let request = CardRequest::Stats {
                nickname: &args.nickname,
                mode: &args.mode,
            };
            fetch_card(request, args.out.output.as_deref(), global).await
        }
        Command::Profile(args) => {
            let request = CardRequest::Profile {
                nickname: &args.nickname,
            };
            fetch_card(request, args.out.output.as_deref(), global).await
        }
        Command::Punishments(out) => {
            fetch_card(CardRequest::Punishments, out.output.as_deref(), global).await
        }
        Command::Staff(out) => fetch_card(CardRequest::Staff, out.output.as_deref(), global).await,
        Command::Online(out) => fetch_card(CardRequest::Online, out.output.as_deref(), global).await,
    }
}

fn connect(global: &GlobalOpts) -> Result<CardService, CliError> {
    let cfg = config::load(global)?;
    config::build_service(&cfg, global)
}

async fn fetch_card(
    request: CardRequest<'_>,
    output: Option<&std::path::Path>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = connect(global)?;
    tracing::debug!(command = ?request, "dispatching card request");
    commands::cards::handle(request, output, &service, global).await
}
