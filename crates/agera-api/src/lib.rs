// agera-api: Async Rust client for the AgeraPvP game server API
//
// Five fixed data endpoints plus a connectivity probe on the game API,
// and the body-render endpoint of the skin service.

pub mod client;
pub mod error;
pub mod player;
pub mod server;
pub mod skin;
pub mod staff;
pub mod transport;

pub use client::{AgeraClient, DEFAULT_BASE_URL, UNKNOWN_ERROR_MESSAGE};
pub use error::Error;
pub use skin::{DEFAULT_SKIN_URL, SkinClient};
pub use transport::TransportConfig;
