//! RuneScape chat bot
//!
//! [`GeBot`] is the command router: it turns one [`CommandEvent`] into
//! exactly one reply on the event's [`Responder`].
//!
//! # Example
//!
//! ```rust,ignore
//! use gebot::bot::GeBot;
//! use gebot::config::BotConfig;
//!
//! let bot = GeBot::from_config(BotConfig::default())?;
//! let invocation = bot.handle(&event, &mut responder).await?;
//! assert_eq!(invocation.stage(), Stage::Replied);
//! ```

pub mod commands;
pub mod replies;

use crate::api::{
    GrandExchangeClient, HiscoresClient, HttpFetch, LeaderboardClient, ReqwestFetcher, WikiClient,
};
use crate::config::BotConfig;
use crate::engine::FlipEngine;
use crate::error::{BotError, Result};
use crate::interface::{
    BotResponse, CommandEvent, Formatter, FormatterFactory, ProfileStore, ReplyMode, Responder,
};
use std::sync::Arc;
use tracing::Instrument;

pub use commands::{Command, CommandDefinition, OptionDefinition};
pub use replies::Subject;

/// Progress of a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    ArgsExtracted,
    Fetching,
    Fetched,
    FetchFailed,
    Formatted,
    Replied,
}

/// Record of one handled command
#[derive(Debug, Clone)]
pub struct Invocation {
    pub id: String,
    pub command: String,
    pub user_id: String,
    stages: Vec<Stage>,
}

impl Invocation {
    fn new(event: &CommandEvent) -> Self {
        Self {
            id: event.id.clone(),
            command: event.command.clone(),
            user_id: event.user_id.clone(),
            stages: vec![Stage::Received],
        }
    }

    fn advance(&mut self, stage: Stage) {
        tracing::debug!(?stage, "Invocation stage");
        self.stages.push(stage);
    }

    /// Every stage passed through, in order
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Received)
    }

    pub fn fetch_failed(&self) -> bool {
        self.stages.contains(&Stage::FetchFailed)
    }

    /// Record the outcome of an upstream call
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.advance(Stage::Fetched),
            Err(e) => {
                if e.is_not_found() {
                    tracing::warn!(error = %e, "Upstream reported not found");
                } else {
                    tracing::error!(error = %e, "Upstream fetch failed");
                }
                self.advance(Stage::FetchFailed);
            }
        }
        result
    }
}

/// Command dispatcher
pub struct GeBot {
    config: BotConfig,
    market: GrandExchangeClient,
    flips: FlipEngine,
    hiscores: HiscoresClient,
    wiki: WikiClient,
    profiles: ProfileStore,
}

impl GeBot {
    /// Create a bot whose upstream requests all go through `http`
    pub fn new(config: BotConfig, http: Arc<dyn HttpFetch>) -> Self {
        let market = GrandExchangeClient::new(http.clone(), &config);
        let leaderboard = LeaderboardClient::new(http.clone(), &config);
        let flips = FlipEngine::new(market.clone(), leaderboard, &config);
        let hiscores = HiscoresClient::new(http.clone(), &config);
        let wiki = WikiClient::new(http, &config);

        Self {
            config,
            market,
            flips,
            hiscores,
            wiki,
            profiles: ProfileStore::new(),
        }
    }

    /// Create a bot backed by a reqwest client
    pub fn from_config(config: BotConfig) -> Result<Self> {
        config.validate()?;
        let http = Arc::new(ReqwestFetcher::new(&config)?);
        Ok(Self::new(config, http))
    }

    /// Share an existing profile store
    pub fn with_profiles(mut self, profiles: ProfileStore) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Handle one event, sending exactly one reply.
    ///
    /// Command failures become a user-facing reply; the returned error is
    /// reserved for the responder itself failing.
    pub async fn handle(
        &self,
        event: &CommandEvent,
        responder: &mut dyn Responder,
    ) -> Result<Invocation> {
        let span = tracing::info_span!(
            "command",
            id = %event.id,
            command = %event.command,
            user = %event.user_id
        );
        self.dispatch(event, responder).instrument(span).await
    }

    async fn dispatch(
        &self,
        event: &CommandEvent,
        responder: &mut dyn Responder,
    ) -> Result<Invocation> {
        let mut invocation = Invocation::new(event);
        tracing::info!(options = ?event.options, "Received command");

        let formatter = FormatterFactory::create(responder.platform());
        let response = match Command::from_event(event) {
            Ok(command) => {
                invocation.advance(Stage::ArgsExtracted);
                if command.reply_mode() == ReplyMode::Deferred {
                    responder.defer().await?;
                }
                self.execute(&command, &event.user_id, formatter.as_ref(), &mut invocation)
                    .await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected command");
                BotResponse::error(replies::failure_reply(
                    formatter.as_ref(),
                    Subject::Request,
                    &e,
                ))
            }
        };
        invocation.advance(Stage::Formatted);

        responder.send(response).await?;
        invocation.advance(Stage::Replied);
        tracing::info!(stages = ?invocation.stages(), "Replied");

        Ok(invocation)
    }

    async fn execute(
        &self,
        command: &Command,
        user_id: &str,
        f: &dyn Formatter,
        invocation: &mut Invocation,
    ) -> BotResponse {
        match command {
            Command::Ge { item } => {
                invocation.advance(Stage::Fetching);
                let result = self.market.get_latest_price(item).await;
                match invocation.settle(result) {
                    Ok(record) => BotResponse::text(replies::price_reply(f, &record)),
                    Err(e) => failure(f, Subject::Item(item), &e),
                }
            }
            Command::Flip { item: Some(item) } => {
                invocation.advance(Stage::Fetching);
                let result = self.flips.analyze_item(item).await;
                match invocation.settle(result) {
                    Ok(analysis) => BotResponse::text(replies::trade_reply(f, &analysis)),
                    Err(e) => failure(f, Subject::Item(item), &e),
                }
            }
            Command::Flip { item: None } => {
                invocation.advance(Stage::Fetching);
                let result = self.flips.find_best_flip().await;
                match invocation.settle(result) {
                    Ok(pick) => BotResponse::text(replies::flip_scan_reply(f, pick.as_ref())),
                    Err(e) => failure(f, Subject::Scan, &e),
                }
            }
            Command::Highscore { player } => {
                let Some(player) = player.clone().or_else(|| self.profiles.resolve(user_id))
                else {
                    let usage = BotError::CommandError(
                        "Please provide a player name or link your profile with /me username:<name>."
                            .to_string(),
                    );
                    return failure(f, Subject::Request, &usage);
                };

                invocation.advance(Stage::Fetching);
                let result = self.hiscores.get_hiscores(&player).await;
                match invocation.settle(result) {
                    Ok(hiscores) => {
                        BotResponse::text(replies::hiscores_reply(f, &player, &hiscores))
                    }
                    Err(e) => failure(f, Subject::Player(&player), &e),
                }
            }
            Command::Wiki { object } => {
                invocation.advance(Stage::Fetching);
                let result = self.wiki.lookup(object).await;
                match invocation.settle(result) {
                    Ok(page) if page.exists => {
                        BotResponse::text(replies::wiki_reply(f, object, &page))
                    }
                    Ok(page) => {
                        tracing::warn!(url = %page.url, "Wiki page does not exist");
                        BotResponse::error(replies::wiki_reply(f, object, &page))
                    }
                    Err(e) => failure(f, Subject::Page(object), &e),
                }
            }
            Command::Me { username } => {
                if let Some(previous) = self.profiles.link(user_id, username) {
                    tracing::info!(previous = %previous, "Replaced linked profile");
                }
                match replies::profile_linked_reply(f, username, &self.config.hiscore_compare_url) {
                    Ok(reply) => BotResponse::text(reply),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to build profile link");
                        failure(f, Subject::Request, &e)
                    }
                }
            }
            Command::Help => BotResponse::text(f.code_block(&Command::help_text())),
        }
    }
}

fn failure(f: &dyn Formatter, subject: Subject<'_>, err: &BotError) -> BotResponse {
    BotResponse::error(replies::failure_reply(f, subject, err))
}
