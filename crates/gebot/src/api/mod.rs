//! API clients for the upstream data sources

pub mod grand_exchange;
pub mod hiscores;
pub mod http;
pub mod leaderboard;
pub mod skills;
pub mod wiki;

pub use grand_exchange::{GrandExchangeClient, KeyIndex, PriceRecord};
pub use hiscores::{Hiscores, HiscoresClient, SkillRecord};
pub use http::{HttpFetch, ReqwestFetcher, with_query};
pub use leaderboard::LeaderboardClient;
pub use skills::Skill;
pub use wiki::{WikiClient, WikiPage};
