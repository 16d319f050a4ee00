//! RuneScape bot CLI
//!
//! Drives the command dispatcher from a local line gateway.
//!
//! # Usage
//!
//! ```bash
//! # Token from token.txt or DISCORD_BOT_TOKEN
//! cargo run --bin ge-bot -p gebot
//!
//! # Explicit token, debug logging
//! cargo run --bin ge-bot -p gebot -- --token "$TOKEN" --log-level debug
//! ```

use clap::Parser;
use gebot::bot::GeBot;
use gebot::config::{BotConfig, TokenSource};
use gebot::platforms::CliGateway;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ge-bot")]
#[command(about = "Grand Exchange prices, flips, hiscores and wiki lookups", long_about = None)]
struct Args {
    /// Bot token; takes priority over the token file and environment
    #[arg(long)]
    token: Option<String>,

    /// File holding the bot token
    #[arg(long, default_value = "token.txt")]
    token_file: PathBuf,

    /// Environment variable holding the bot token
    #[arg(long, default_value = "DISCORD_BOT_TOKEN")]
    token_env: String,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// User id attached to commands typed locally
    #[arg(long, default_value = "local")]
    user: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    gebot_utils::init_tracing_with(&args.log_level);

    let tokens = TokenSource::new(&args.token_file, &args.token_env);
    let _token = tokens.resolve(args.token.as_deref())?;
    info!("Resolved bot token");

    let config = BotConfig::builder()
        .request_timeout(Duration::from_secs(args.timeout_secs))
        .build()?;
    let bot = GeBot::from_config(config)?;

    info!(user = %args.user, "Starting ge-bot");
    CliGateway::new(bot, args.user).run().await?;

    Ok(())
}
