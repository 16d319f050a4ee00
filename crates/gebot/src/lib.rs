//! RuneScape chat bot
//!
//! Answers chat commands about the game:
//!
//! - Latest Grand Exchange prices (`/ge`)
//! - Flip analysis from a 30-day moving average and price volatility
//!   (`/flip`), for one item or the top-100 traded items
//! - Player hiscores (`/highscore`), with profiles linked through `/me`
//! - Wiki article links (`/wiki`)
//!
//! # Architecture
//!
//! - [`api`]: upstream clients behind the [`api::HttpFetch`] seam
//! - [`engine`]: indicator functions and the flip engine
//! - [`interface`]: inbound events, the reply seam and the profile store
//! - [`bot`]: command table, reply text and the [`bot::GeBot`] dispatcher
//! - [`platforms`]: gateways that feed events to the dispatcher
//!
//! # Example
//!
//! ```rust,ignore
//! use gebot::{BotConfig, GeBot};
//! use gebot::platforms::CliGateway;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bot = GeBot::from_config(BotConfig::default())?;
//!     CliGateway::new(bot, "local").run().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod platforms;

// Re-export main types for convenience
pub use bot::{Command, GeBot, Invocation, Stage};
pub use config::{BotConfig, TokenSource};
pub use error::{BotError, ErrorKind, Result};
pub use interface::{BotResponse, CommandEvent, ProfileStore, Responder};
