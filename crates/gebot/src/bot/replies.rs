//! Reply text for every command outcome

use crate::api::{Hiscores, PriceRecord, WikiPage, with_query};
use crate::engine::{FlipPick, TradeAnalysis};
use crate::error::{BotError, ErrorKind, Result};
use crate::interface::Formatter;
use gebot_utils::{format_amount, format_count};

pub const NO_FLIP_FOUND: &str = "No suitable item found for flipping at this time.";

/// What a failed invocation was about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject<'a> {
    Item(&'a str),
    Player(&'a str),
    Page(&'a str),
    /// Leaderboard scan by `/flip` without an item
    Scan,
    /// Nothing fetched yet, e.g. bad arguments
    Request,
}

pub fn price_reply(f: &dyn Formatter, record: &PriceRecord) -> String {
    f.code_block(&format!(
        "{}\nID: {}\nPrice: {} GP\nVolume: {}\nTimestamp: {}",
        record.name,
        record.item_id,
        format_count(record.price),
        format_count(record.volume),
        record.timestamp
    ))
}

pub fn trade_reply(f: &dyn Formatter, analysis: &TradeAnalysis) -> String {
    let result = &analysis.result;
    f.code_block(&format!(
        "Trading Strategy Analysis for {}:\n\
         - Latest Price: {} GP\n\
         - {}-Day SMA: {} GP\n\
         - Margin: {} GP\n\
         - Volatility: {:.2}\n\
         - Suggestion: {}",
        analysis.item,
        format_count(analysis.latest.price),
        analysis.sma_period,
        format_amount(result.sma),
        format_amount(result.margin),
        result.volatility,
        analysis.suggestion()
    ))
}

pub fn flip_scan_reply(f: &dyn Formatter, pick: Option<&FlipPick>) -> String {
    match pick {
        Some(pick) => trade_reply(f, pick.analysis()),
        None => NO_FLIP_FOUND.to_string(),
    }
}

pub fn hiscores_reply(f: &dyn Formatter, player: &str, hiscores: &Hiscores) -> String {
    if hiscores.is_empty() {
        return format!("No hiscores found for player: {player}");
    }

    let rows = hiscores
        .iter()
        .map(|(skill, record)| {
            let rank = if record.rank < 0 {
                "-".to_string()
            } else {
                format_count(i64::from(record.rank))
            };
            vec![
                skill.display_name().to_string(),
                rank,
                format_count(i64::from(record.level)),
                format_count(record.experience),
            ]
        })
        .collect::<Vec<_>>();

    format!(
        "Highscores for {player}:\n{}",
        f.format_table(&["Skill", "Rank", "Level", "Experience"], &rows, &[1, 2, 3])
    )
}

/// Link to the article, labelled with its title when one was found
pub fn wiki_reply(f: &dyn Formatter, object: &str, page: &WikiPage) -> String {
    if !page.exists {
        return wiki_missing(object);
    }
    let label = page.title.as_deref().unwrap_or(object);
    f.link(label, page.url.as_str())
}

fn wiki_missing(object: &str) -> String {
    format!("Could not find a valid URL for '{object}'.\nPlease check the object name and try again.")
}

/// Confirmation for `/me`, linking the hiscore compare page
pub fn profile_linked_reply(f: &dyn Formatter, username: &str, compare_url: &str) -> Result<String> {
    let slug = username.trim().replace(' ', "_");
    let url = with_query(compare_url, &[("user1", slug.as_str())])?;
    Ok(format!(
        "RuneScape Profile {} has been linked to your profile.",
        f.link(username.trim(), url.as_str())
    ))
}

/// User-facing sentence for a failed invocation. Internal error text is
/// only passed through for usage errors, which are written for users.
pub fn failure_reply(f: &dyn Formatter, subject: Subject<'_>, err: &BotError) -> String {
    let sentence = match (err.kind(), subject) {
        (ErrorKind::Usage, _) => match err {
            BotError::CommandError(message) => message.clone(),
            _ => "Invalid command arguments.".to_string(),
        },
        (ErrorKind::Configuration, _) => {
            "The bot is not configured correctly. Please contact the administrator.".to_string()
        }
        (_, Subject::Page(object)) => wiki_missing(object),
        (ErrorKind::NotFound, Subject::Item(item)) => format!("Item '{item}' not found."),
        (ErrorKind::NotFound, Subject::Player(player)) => {
            format!("Player '{player}' was not found on the hiscores.")
        }
        (ErrorKind::NotFound | ErrorKind::InsufficientData, Subject::Scan) => {
            NO_FLIP_FOUND.to_string()
        }
        (ErrorKind::InsufficientData, Subject::Item(item)) => {
            format!("Not enough price history to analyse '{item}'.")
        }
        (_, Subject::Item(item)) => format!("Failed to fetch details for '{item}'."),
        (_, Subject::Player(player)) => format!("Could not fetch highscores for player: {player}"),
        (_, Subject::Scan) => "Failed to fetch the top traded items. Please try again later.".to_string(),
        (_, Subject::Request) => "Something went wrong. Please try again later.".to_string(),
    };
    f.format_error(&sentence)
}
