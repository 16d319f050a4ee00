//! Command table and argument extraction
//!
//! [`Command::definitions`] is the registration table a gateway uses to
//! declare slash commands; [`Command::from_event`] turns an inbound event
//! back into a typed command.

use crate::error::{BotError, Result};
use crate::interface::{CommandEvent, ReplyMode};

/// Named string option of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Registration metadata for one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [OptionDefinition],
    pub reply_mode: ReplyMode,
}

impl CommandDefinition {
    /// Usage line such as `/ge item:<item>`
    pub fn usage(&self) -> String {
        let mut usage = format!("/{}", self.name);
        for option in self.options {
            if option.required {
                usage.push_str(&format!(" {0}:<{0}>", option.name));
            } else {
                usage.push_str(&format!(" [{0}:<{0}>]", option.name));
            }
        }
        usage
    }
}

const DEFINITIONS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "ge",
        description: "Get details of an item from the Grand Exchange",
        options: &[OptionDefinition {
            name: "item",
            description: "The item name",
            required: true,
        }],
        reply_mode: ReplyMode::Immediate,
    },
    CommandDefinition {
        name: "flip",
        description: "Find an item worth flipping, or analyse one",
        options: &[OptionDefinition {
            name: "item",
            description: "The item name",
            required: false,
        }],
        reply_mode: ReplyMode::Deferred,
    },
    CommandDefinition {
        name: "highscore",
        description: "Show the hiscores of a player",
        options: &[OptionDefinition {
            name: "player",
            description: "The player name, defaults to your linked profile",
            required: false,
        }],
        reply_mode: ReplyMode::Deferred,
    },
    CommandDefinition {
        name: "wiki",
        description: "Link the wiki page of an object",
        options: &[OptionDefinition {
            name: "object",
            description: "The object to look up",
            required: true,
        }],
        reply_mode: ReplyMode::Deferred,
    },
    CommandDefinition {
        name: "me",
        description: "Link your RuneScape profile",
        options: &[OptionDefinition {
            name: "username",
            description: "Your RuneScape username",
            required: true,
        }],
        reply_mode: ReplyMode::Deferred,
    },
    CommandDefinition {
        name: "help",
        description: "List the available commands",
        options: &[],
        reply_mode: ReplyMode::Immediate,
    },
];

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Latest Grand Exchange price of an item
    Ge { item: String },
    /// Buy-strategy analysis, or a leaderboard scan without an item
    Flip { item: Option<String> },
    /// Hiscores of a player, falling back to the caller's linked profile
    Highscore { player: Option<String> },
    /// Wiki article link
    Wiki { object: String },
    /// Link the caller to a player name
    Me { username: String },
    /// Show help
    Help,
}

impl Command {
    /// Every registered command
    pub fn definitions() -> &'static [CommandDefinition] {
        DEFINITIONS
    }

    pub fn definition(name: &str) -> Option<&'static CommandDefinition> {
        DEFINITIONS.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Extract a command from an event.
    ///
    /// Unknown names and missing required options are
    /// [`BotError::CommandError`]s whose text is safe to show to users.
    pub fn from_event(event: &CommandEvent) -> Result<Self> {
        let Some(definition) = Self::definition(&event.command) else {
            return Err(BotError::CommandError(format!(
                "Unknown command /{}. Use /help to see the available commands.",
                event.command
            )));
        };

        let required = |name: &str| {
            event.option(name).map(str::to_string).ok_or_else(|| {
                BotError::CommandError(format!(
                    "Missing {name}. Usage: {}",
                    definition.usage()
                ))
            })
        };
        let optional = |name: &str| event.option(name).map(str::to_string);

        match definition.name {
            "ge" => Ok(Command::Ge {
                item: required("item")?,
            }),
            "flip" => Ok(Command::Flip {
                item: optional("item"),
            }),
            "highscore" => Ok(Command::Highscore {
                player: optional("player"),
            }),
            "wiki" => Ok(Command::Wiki {
                object: required("object")?,
            }),
            "me" => Ok(Command::Me {
                username: required("username")?,
            }),
            _ => Ok(Command::Help),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Ge { .. } => "ge",
            Command::Flip { .. } => "flip",
            Command::Highscore { .. } => "highscore",
            Command::Wiki { .. } => "wiki",
            Command::Me { .. } => "me",
            Command::Help => "help",
        }
    }

    pub fn reply_mode(&self) -> ReplyMode {
        Self::definition(self.name()).map_or(ReplyMode::Immediate, |d| d.reply_mode)
    }

    /// Help text for all commands
    pub fn help_text() -> String {
        let mut text = String::from("RuneScape Bot Commands\n");
        for definition in DEFINITIONS {
            text.push_str(&format!(
                "\n{:<28} {}",
                definition.usage(),
                definition.description
            ));
        }
        text
    }
}
