//! Quick transcripts
//!
//! A quick transcript is a two-character conversation written as plain
//! `Name: text` lines. It expands into a full command sequence with the
//! standard conversation header:
//!
//! ```text
//! Alice: Hello.
//! Bob: Hi there.
//! ```

use tracing::{debug, warn};

use super::commands::Command;
use crate::config::{AvatarAlias, QuickScriptConfig};
use crate::error::ScannerError;

/// Builder-style generator for quick transcripts.
#[derive(Debug, Clone)]
pub struct QuickScriptParser {
    wrap: bool,
    width: usize,
    avatar_alias: Option<AvatarAlias>,
}

impl Default for QuickScriptParser {
    fn default() -> Self {
        Self::from_config(&QuickScriptConfig::default())
    }
}

impl QuickScriptParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take wrapping and alias settings from a loaded config.
    #[must_use]
    pub fn from_config(config: &QuickScriptConfig) -> Self {
        Self {
            wrap: config.wrap,
            width: config.width,
            avatar_alias: config.avatar_alias.clone(),
        }
    }

    /// Split long lines into two-line pages.
    #[must_use]
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Page width in characters when wrapping.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_avatar_alias(mut self, alias: Option<AvatarAlias>) -> Self {
        self.avatar_alias = alias;
        self
    }

    /// Expand `dialogue` into commands.
    ///
    /// # Errors
    /// Returns a [`ScannerError`] naming the first non-blank line that does
    /// not start with `char1:` or `char2:`.
    pub fn parse(
        &self,
        dialogue: &str,
        char1: &str,
        char1_pos: i32,
        char2: &str,
        char2_pos: i32,
    ) -> Result<Vec<Command>, ScannerError> {
        let mut commands = vec![
            Command::SetConversationType(1),
            Command::load_assets(self.asset_for(char1), char1_pos),
            Command::load_assets(self.asset_for(char2), char2_pos),
            Command::Wait(0),
        ];

        let prefix1 = format!("{char1}:");
        let prefix2 = format!("{char2}:");
        let mut speaker: Option<&str> = None;

        for (index, line) in dialogue.lines().enumerate() {
            let stripped = line.trim();
            if stripped.is_empty() {
                continue;
            }
            let new_speaker = if stripped.starts_with(&prefix1) {
                char1
            } else if stripped.starts_with(&prefix2) {
                char2
            } else {
                warn!("Rejected transcript line {}: {stripped}", index + 1);
                return Err(ScannerError::new(
                    index + 1,
                    0,
                    format!("Line must start with a character name followed by ':': {stripped}"),
                ));
            };
            let text = stripped[new_speaker.len() + 1..].trim();

            match speaker {
                Some(prev) if prev == new_speaker => commands.push(Command::Clear),
                Some(_) => commands.push(Command::Newline),
                None => {}
            }
            if speaker != Some(new_speaker) {
                commands.push(Command::set_speaker(self.asset_for(new_speaker)));
                commands.push(Command::Synchronize);
            }

            if self.wrap {
                self.push_pages(&mut commands, text);
            } else {
                commands.push(Command::print(text));
                commands.push(Command::Pause);
            }
            speaker = Some(new_speaker);
        }

        debug!("Generated {} commands from quick transcript", commands.len());
        Ok(commands)
    }

    fn asset_for<'a>(&'a self, name: &'a str) -> &'a str {
        match &self.avatar_alias {
            Some(alias) if alias.name == name => &alias.asset,
            _ => name,
        }
    }

    fn push_pages(&self, commands: &mut Vec<Command>, text: &str) {
        let mut lines = wrap_text(text, self.width);
        if lines.is_empty() {
            lines.push(String::new());
        }
        for (page_index, page) in lines.chunks(2).enumerate() {
            if page_index > 0 {
                commands.push(Command::Clear);
            }
            commands.push(Command::print(page[0].as_str()));
            if let Some(second) = page.get(1) {
                commands.push(Command::Newline);
                commands.push(Command::print(second.as_str()));
            }
            commands.push(Command::Pause);
        }
    }
}

/// Expand a transcript with the given wrapping settings and no avatar alias.
///
/// # Errors
/// See [`QuickScriptParser::parse`].
pub fn parse(
    dialogue: &str,
    char1: &str,
    char1_pos: i32,
    char2: &str,
    char2_pos: i32,
    wrap: bool,
    width: usize,
) -> Result<Vec<Command>, ScannerError> {
    QuickScriptParser::new()
        .with_wrap(wrap)
        .with_width(width)
        .parse(dialogue, char1, char1_pos, char2, char2_pos)
}

/// Greedy word wrap at `width` characters.
///
/// Words longer than a line are split across lines.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(chars.drain(..width).collect());
        }
        if chars.is_empty() {
            continue;
        }

        let word_len = chars.len();
        if current_len == 0 {
            current = chars.into_iter().collect();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.extend(chars);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, chars.into_iter().collect()));
            current_len = word_len;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}
