//! Clap derive structures for the `agera` CLI.
//!
//! Defines the command tree and global flags. Also compiled by `build.rs`
//! for man page generation, so it depends on nothing but clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// agera -- AgeraPvP stat cards for Discord and the terminal
#[derive(Debug, Parser)]
#[command(
    name = "agera",
    version,
    about = "Render AgeraPvP stat cards from the command line or serve them as a Discord bot",
    long_about = "Queries the AgeraPvP game API and renders player stats, profiles,\n\
        punishment totals, the online staff roster and the online counter\n\
        as PNG cards. `agera bot` serves the same cards as slash commands.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, short = 'c', env = "AGERA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Game API base URL (overrides config)
    #[arg(long, env = "AGERA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Game API key (overrides env var, keyring and config)
    #[arg(long, env = "AGERA_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "AGERA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the Discord bot
    Bot,

    /// Render a player's stats card for one game mode
    Stats(StatsArgs),

    /// Render a player's profile card
    #[command(alias = "p")]
    Profile(ProfileArgs),

    /// Render the server-wide punishment totals
    Punishments(OutputArgs),

    /// Render the list of staff members currently online
    Staff(OutputArgs),

    /// Render the total online player count
    Online(OutputArgs),

    /// Check that the game API is reachable
    Test,

    /// Render a card from a JSON payload file without calling the API
    Render(RenderArgs),

    /// Manage configuration
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Card commands ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// PNG file to write (defaults to the attachment name the bot uses)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Player nickname
    pub nickname: String,

    /// Game mode (BW for BedWars, or DUELS)
    pub mode: String,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Player nickname
    pub nickname: String,

    #[command(flatten)]
    pub out: OutputArgs,
}

// ── Offline render ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CardArg {
    Stats,
    Profile,
    Punishments,
    Staff,
    Online,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Which card to draw
    pub card: CardArg,

    /// JSON file holding the API payload
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Player nickname (stats and profile cards)
    #[arg(long)]
    pub nick: Option<String>,

    /// Game mode (stats card)
    #[arg(long)]
    pub mode: Option<String>,

    /// Rank label for the stats title, e.g. OWNER or §6GOLD
    #[arg(long)]
    pub rank: Option<String>,

    /// Skin render image for the profile card
    #[arg(long)]
    pub skin: Option<PathBuf>,

    #[command(flatten)]
    pub out: OutputArgs,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the effective configuration with secrets masked
    Show,

    /// Print the config file path
    Path,

    /// Store a secret in the system keyring
    SetSecret {
        /// Which secret to store
        secret: SecretArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecretArg {
    /// Game API key
    ApiKey,
    /// Discord bot token
    BotToken,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
