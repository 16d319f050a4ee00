//! Response formatting utilities

use crate::interface::BotPlatform;
use comfy_table::{CellAlignment, Table, presets};

pub trait Formatter: Send + Sync {
    fn platform(&self) -> BotPlatform;
    fn code_block(&self, body: &str) -> String;
    fn link(&self, label: &str, url: &str) -> String;
    /// Render a table; columns listed in `numeric` are right-aligned
    fn format_table(&self, headers: &[&str], rows: &[Vec<String>], numeric: &[usize]) -> String;
    fn format_error(&self, error: &str) -> String;
}

fn build_table(preset: &str, headers: &[&str], rows: &[Vec<String>], numeric: &[usize]) -> Table {
    let mut table = Table::new();
    table.load_preset(preset).set_header(headers.to_vec());
    for row in rows {
        table.add_row(row.clone());
    }
    for &index in numeric {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

pub struct CliFormatter;

impl Formatter for CliFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Cli
    }

    fn code_block(&self, body: &str) -> String {
        body.to_string()
    }

    fn link(&self, label: &str, url: &str) -> String {
        if label == url {
            url.to_string()
        } else {
            format!("{label} <{url}>")
        }
    }

    fn format_table(&self, headers: &[&str], rows: &[Vec<String>], numeric: &[usize]) -> String {
        build_table(presets::UTF8_FULL_CONDENSED, headers, rows, numeric).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {error}")
    }
}

/// Discord-flavoured markdown
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Discord
    }

    fn code_block(&self, body: &str) -> String {
        format!("```\n{body}\n```")
    }

    fn link(&self, label: &str, url: &str) -> String {
        format!("[{label}]({url})")
    }

    fn format_table(&self, headers: &[&str], rows: &[Vec<String>], numeric: &[usize]) -> String {
        let table = build_table(presets::ASCII_FULL_CONDENSED, headers, rows, numeric);
        self.code_block(&table.to_string())
    }

    fn format_error(&self, error: &str) -> String {
        error.to_string()
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(platform: BotPlatform) -> Box<dyn Formatter> {
        match platform {
            BotPlatform::Cli => Box::new(CliFormatter),
            BotPlatform::Discord => Box::new(MarkdownFormatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_matches_platform() {
        for platform in [BotPlatform::Cli, BotPlatform::Discord] {
            assert_eq!(FormatterFactory::create(platform).platform(), platform);
        }
    }

    #[test]
    fn test_markdown_blocks_and_links() {
        let f = MarkdownFormatter;
        assert_eq!(f.code_block("a\nb"), "```\na\nb\n```");
        assert_eq!(
            f.link("Rune axe", "https://runescape.wiki/w/Rune_axe"),
            "[Rune axe](https://runescape.wiki/w/Rune_axe)"
        );
    }

    #[test]
    fn test_cli_links() {
        let f = CliFormatter;
        assert_eq!(f.link("x", "https://a/x"), "x <https://a/x>");
        assert_eq!(f.link("https://a/x", "https://a/x"), "https://a/x");
        assert_eq!(f.format_error("boom"), "Error: boom");
    }

    #[test]
    fn test_table_contains_cells() {
        let rows = vec![
            vec!["Overall".to_string(), "2,898".to_string()],
            vec!["Attack".to_string(), "99".to_string()],
        ];
        let rendered = MarkdownFormatter.format_table(&["Skill", "Level"], &rows, &[1]);
        assert!(rendered.starts_with("```\n"));
        assert!(rendered.ends_with("\n```"));
        for cell in ["Skill", "Level", "Overall", "2,898", "Attack", "99"] {
            assert!(rendered.contains(cell), "missing {cell}");
        }
    }
}
