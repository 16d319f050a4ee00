//! Gateways that drive the bot

pub mod cli;

pub use cli::{CliGateway, CliResponder};
