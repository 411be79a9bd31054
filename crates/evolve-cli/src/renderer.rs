//! Markdown output for the terminal, styled with termimad or left plain.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown produced by the core `Display` impls.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }
        for line in markdown.lines() {
            if line.starts_with('#') {
                // Headers keep their hashes so the hierarchy stays visible
                println!("\x1b[34m{line}\x1b[0m");
            } else if line == "---" {
                println!("\x1b[90m{}\x1b[0m", "─".repeat(40));
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
