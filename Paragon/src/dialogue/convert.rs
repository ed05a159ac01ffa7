//! Conversion between game script, pretty script and quick transcripts

use tracing::debug;

use super::commands::Command;
use super::game_script::GameScriptParser;
use super::pretty_script::PrettyScriptParser;
use super::quick_script::QuickScriptParser;
use crate::config::TranslationTable;
use crate::error::ScannerError;

/// Rename assets and emotions in place.
///
/// `LoadAssets` and `SetSpeaker` names are looked up in `assets`, each
/// `SetEmotions` label in `emotions`. Names missing from a table are kept.
pub fn translate(
    commands: &mut [Command],
    assets: Option<&TranslationTable>,
    emotions: Option<&TranslationTable>,
) {
    if assets.is_none() && emotions.is_none() {
        return;
    }
    for command in commands.iter_mut() {
        match command {
            Command::LoadAssets { assets: name, .. } | Command::SetSpeaker(name) => {
                if let Some(table) = assets {
                    rename(table, name);
                }
            }
            Command::SetEmotions(labels) => {
                if let Some(table) = emotions {
                    labels.iter_mut().for_each(|label| rename(table, label));
                }
            }
            _ => {}
        }
    }
}

fn rename(table: &TranslationTable, name: &mut String) {
    if let Some(new) = table.get(name.as_str()) {
        name.clone_from(new);
    }
}

/// Render commands as pretty script.
///
/// Runs of print commands share a line; every other command gets a line of
/// its own, with a blank line separating it from preceding text.
#[must_use]
pub fn commands_to_pretty(commands: &[Command]) -> String {
    let mut out = String::new();
    let mut prev_is_print = false;
    for command in commands {
        if *command == Command::Newline {
            out.push_str(&command.to_pretty());
            out.push('\n');
        } else if command.is_print() {
            prev_is_print = true;
            out.push_str(&command.to_pretty());
        } else {
            if prev_is_print {
                out.push('\n');
            }
            out.push_str(&command.to_pretty());
            out.push('\n');
            if prev_is_print {
                out.push('\n');
                prev_is_print = false;
            }
        }
    }
    out
}

/// Render commands as game script.
#[must_use]
pub fn commands_to_game(commands: &[Command]) -> String {
    commands.iter().map(Command::to_game).collect()
}

/// Convert game script to pretty script.
///
/// # Errors
/// Propagates the parser's [`ScannerError`].
pub fn game_to_pretty(
    game_text: &str,
    assets: Option<&TranslationTable>,
    emotions: Option<&TranslationTable>,
) -> Result<String, ScannerError> {
    let mut commands = GameScriptParser.scan(game_text)?;
    translate(&mut commands, assets, emotions);
    let pretty = commands_to_pretty(&commands);
    debug!("Converted {} commands to pretty script", commands.len());
    Ok(pretty)
}

/// Convert pretty script to game script.
///
/// # Errors
/// Propagates the parser's [`ScannerError`].
pub fn pretty_to_game(
    pretty_text: &str,
    assets: Option<&TranslationTable>,
    emotions: Option<&TranslationTable>,
) -> Result<String, ScannerError> {
    let mut commands = PrettyScriptParser.scan(pretty_text)?;
    translate(&mut commands, assets, emotions);
    let game = commands_to_game(&commands);
    debug!("Converted {} commands to game script", commands.len());
    Ok(game)
}

/// Turn a `Name: text` transcript into pretty script.
///
/// # Errors
/// Fails on the first line that does not start with one of the two names.
pub fn quick_to_pretty(
    quick_text: &str,
    char1: &str,
    char1_pos: i32,
    char2: &str,
    char2_pos: i32,
    wrap: bool,
    width: usize,
) -> Result<String, ScannerError> {
    let commands = QuickScriptParser::new()
        .with_wrap(wrap)
        .with_width(width)
        .parse(quick_text, char1, char1_pos, char2, char2_pos)?;
    Ok(commands_to_pretty(&commands))
}
