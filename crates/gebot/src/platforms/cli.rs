//! Line-oriented gateway: reads `/command name:value` lines from stdin and
//! prints the replies

use crate::bot::{Command, GeBot, Invocation};
use crate::error::Result;
use crate::interface::{BotPlatform, BotResponse, CommandEvent, Responder, parse_command_line};
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Prints replies to a writer
pub struct CliResponder<W> {
    out: W,
}

impl<W: Write + Send> CliResponder<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> Responder for CliResponder<W> {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Cli
    }

    async fn defer(&mut self) -> Result<()> {
        writeln!(self.out, "Working on it...")?;
        self.out.flush()?;
        Ok(())
    }

    async fn send(&mut self, response: BotResponse) -> Result<()> {
        writeln!(self.out, "{}\n", response.content)?;
        self.out.flush()?;
        Ok(())
    }
}

pub struct CliGateway {
    bot: GeBot,
    user_id: String,
    prompt: String,
}

impl CliGateway {
    pub fn new(bot: GeBot, user_id: impl Into<String>) -> Self {
        Self {
            bot,
            user_id: user_id.into(),
            prompt: "> ".to_string(),
        }
    }

    pub fn bot(&self) -> &GeBot {
        &self.bot
    }

    /// Build an event from one input line.
    ///
    /// Free text before any `name:` token fills the command's first option,
    /// so `/ge Rune axe` works like `/ge item:Rune axe`.
    pub fn event_from_line(&self, line: &str) -> Option<CommandEvent> {
        let parsed = parse_command_line(line)?;
        let mut event = CommandEvent::new(self.user_id.clone(), parsed.command);

        for (name, value) in parsed.options {
            event = event.with_option(name, value);
        }

        if let Some(text) = parsed.free_text {
            let first = Command::definition(&event.command).and_then(|d| d.options.first());
            if let Some(option) = first {
                if event.option(option.name).is_none() {
                    event = event.with_option(option.name, text);
                }
            }
        }

        Some(event)
    }

    /// Handle one line; `None` when the line is not a command
    pub async fn handle_line<W: Write + Send>(
        &self,
        line: &str,
        out: W,
    ) -> Result<Option<Invocation>> {
        let Some(event) = self.event_from_line(line) else {
            return Ok(None);
        };
        let mut responder = CliResponder::new(out);
        self.bot.handle(&event, &mut responder).await.map(Some)
    }

    /// Read commands from stdin until EOF or `/exit`
    pub async fn run(&self) -> Result<()> {
        println!("RuneScape bot ready. Type /help for commands, /exit to quit.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{}", self.prompt);
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!("\nGoodbye!");
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "/exit" | "/quit") {
                println!("Goodbye!");
                break;
            }

            match self.handle_line(line, std::io::stdout()).await {
                Ok(Some(_)) => {}
                Ok(None) => println!("Commands start with '/'. Type /help for a list.\n"),
                Err(e) => tracing::error!(error = %e, "Failed to deliver reply"),
            }
        }

        Ok(())
    }
}
