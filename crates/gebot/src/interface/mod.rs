//! Gateway seam: inbound events, reply channels, formatting and the
//! profile store

pub mod formatter;
pub mod interface;
pub mod message;
pub mod session;

pub use formatter::{CliFormatter, Formatter, FormatterFactory, MarkdownFormatter};
pub use interface::{BotPlatform, BotResponse, ReplyMode, Responder, ResponseType};
pub use message::{CommandEvent, CommandLine, parse_command_line};
pub use session::{LinkedProfile, ProfileStore};
