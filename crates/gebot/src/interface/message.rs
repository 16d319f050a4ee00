//! Inbound command events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A command invocation delivered by a gateway: a command name plus named
/// string options. Typed parsing is left to the handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEvent {
    pub id: String,
    pub user_id: String,
    pub command: String,
    pub options: HashMap<String, String>,
    pub received_at: DateTime<Utc>,
}

impl CommandEvent {
    pub fn new(user_id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            command: command.into().trim().to_lowercase(),
            options: HashMap::new(),
            received_at: Utc::now(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Trimmed option value; blank values count as absent
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A `/command name:value ...` line split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub command: String,
    pub options: Vec<(String, String)>,
    /// Text before the first `name:` token
    pub free_text: Option<String>,
}

/// Parse `/ge item:Rune axe` style input.
///
/// An option value runs until the next `name:` token, so values may contain
/// spaces. Returns `None` for input that is not a command.
pub fn parse_command_line(line: &str) -> Option<CommandLine> {
    let line = line.trim();
    let rest = line.strip_prefix('/')?;
    let mut tokens = rest.split_whitespace();
    let command = tokens.next()?.to_lowercase();

    let mut options: Vec<(String, String)> = Vec::new();
    let mut free_words: Vec<&str> = Vec::new();

    for token in tokens {
        match split_option(token) {
            Some((name, value)) => options.push((name.to_string(), value.to_string())),
            None => match options.last_mut() {
                Some((_, value)) => {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(token);
                }
                None => free_words.push(token),
            },
        }
    }

    let free_text = (!free_words.is_empty()).then(|| free_words.join(" "));
    Some(CommandLine {
        command,
        options,
        free_text,
    })
}

fn split_option(token: &str) -> Option<(&str, &str)> {
    let (name, value) = token.split_once(':')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some((name, value))
}
