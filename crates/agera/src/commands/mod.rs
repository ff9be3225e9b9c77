//! Command handlers.
//!
//! Each module exposes a handler taking parsed args and returning
//! `Result<(), CliError>`.

pub mod cards;
pub mod config_cmd;
pub mod render;
