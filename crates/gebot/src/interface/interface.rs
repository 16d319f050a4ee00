//! Gateway-facing abstractions
//!
//! The chat SDK is an external collaborator: it delivers [`CommandEvent`]s
//! and accepts replies through a [`Responder`].
//!
//! [`CommandEvent`]: super::CommandEvent

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Platform identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotPlatform {
    /// Local command line gateway
    Cli,

    /// Discord slash commands
    Discord,
}

/// Bot response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotResponse {
    /// Response content
    pub content: String,

    /// Response type
    pub response_type: ResponseType,
}

/// Type of bot response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    /// Normal reply
    Text,

    /// User-readable failure
    Error,
}

impl BotResponse {
    /// Create a simple text response
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            response_type: ResponseType::Text,
        }
    }

    /// Create an error response
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            response_type: ResponseType::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.response_type == ResponseType::Error
    }
}

/// How a command delivers its single reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    /// Reply straight away
    Immediate,
    /// Acknowledge first, send the content when the work is done
    Deferred,
}

/// Reply channel for one invocation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send {
    /// Platform the reply goes to
    fn platform(&self) -> BotPlatform;

    /// Acknowledge the command before slow work begins
    async fn defer(&mut self) -> Result<()>;

    /// Deliver the reply
    async fn send(&mut self, response: BotResponse) -> Result<()>;
}

impl std::fmt::Display for BotPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotPlatform::Cli => write!(f, "CLI"),
            BotPlatform::Discord => write!(f, "Discord"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_response_creation() {
        let response = BotResponse::text("Hello, world!");
        assert_eq!(response.response_type, ResponseType::Text);
        assert_eq!(response.content, "Hello, world!");
        assert!(!response.is_error());

        assert!(BotResponse::error("nope").is_error());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(BotPlatform::Cli.to_string(), "CLI");
        assert_eq!(BotPlatform::Discord.to_string(), "Discord");
    }
}
