//! Pretty script parser
//!
//! Pretty script is the editing notation: block commands sit on their own
//! lines with readable names, while inline print commands (`$a(0)`, `$G(m,f)`,
//! `$Nu`, `$Np`, `$Nl(n)`, `$c(r,g,b,a)`) flow within message text.
//!
//! ```text
//! $SetSpeaker(Alice)
//! Hello, $Nu!\n
//! $Pause
//! ```

use tracing::{debug, trace};

use super::commands::{Command, SpeakerPosition};
use super::scanner::Scanner;
use crate::error::ScannerError;

/// Commands allowed in the middle of a line of text.
const INLINE_COMMANDS: &[&str] = &["a", "G", "Nu", "Np", "Nl", "c"];

/// Terminators for a bare string argument.
const STRING_TERMINATORS: &[char] = &[',', ')', ' ', '\t', '\r', '\n'];

/// Terminators for a run of message text.
const PRINT_TERMINATORS: &[char] = &['\\', '$', '\r', '\n'];

/// Parser for the pretty script notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyScriptParser;

impl PrettyScriptParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse `text` into commands.
    ///
    /// # Errors
    /// Returns a [`ScannerError`] for unknown command names, misplaced block
    /// commands inside a line of text, or malformed arguments.
    pub fn scan(&self, text: &str) -> Result<Vec<Command>, ScannerError> {
        debug!("Parsing pretty script ({} bytes)", text.len());
        let mut sc = Scanner::new(text);
        let mut commands = Vec::new();

        while !sc.at_end() {
            sc.skip_while(&['\r', '\n']);
            let run = sc.scan_until(PRINT_TERMINATORS);
            if !run.trim().is_empty() {
                commands.push(Command::Print(run));
                scan_print_line(&mut sc, &mut commands)?;
                continue;
            }

            if sc.at_end() {
                break;
            } else if sc.looking_at(r"\n") {
                sc.advance(2)?;
                commands.push(Command::Newline);
            } else if sc.peek() == Some('$') {
                let two = sc.peek_str(3).chars().skip(1).collect::<String>();
                let one = sc.peek_at(1).map(String::from).unwrap_or_default();
                if is_inline(&two) || is_inline(&one) {
                    scan_print_line(&mut sc, &mut commands)?;
                } else {
                    let command = scan_block_command(&mut sc)?;
                    trace!("{command:?}");
                    commands.push(command);
                }
            } else {
                scan_print_line(&mut sc, &mut commands)?;
            }
        }

        debug!("Parsed {} commands", commands.len());
        Ok(commands)
    }
}

/// Parse a pretty script with a default parser.
///
/// # Errors
/// See [`PrettyScriptParser::scan`].
pub fn parse(text: &str) -> Result<Vec<Command>, ScannerError> {
    PrettyScriptParser.scan(text)
}

fn is_inline(name: &str) -> bool {
    INLINE_COMMANDS.contains(&name)
}

/// Text, `\n` escapes and inline commands up to the end of the physical line.
fn scan_print_line(sc: &mut Scanner, commands: &mut Vec<Command>) -> Result<(), ScannerError> {
    while let Some(c) = sc.peek() {
        if c == '\n' || c == '\r' {
            break;
        }
        if c == '$' {
            sc.expect('$')?;
            let two = sc.peek_str(2);
            let one = sc.peek().map(String::from).unwrap_or_default();
            let name = if is_inline(&two) {
                two
            } else if is_inline(&one) {
                one
            } else {
                let (line, column) = sc.position();
                let name = sc.scan_alnum();
                return Err(ScannerError::new(
                    line,
                    column,
                    format!("Unrecognized command {name}."),
                ));
            };
            sc.advance(name.chars().count())?;
            let command = scan_named(sc, &name)?.ok_or_else(|| sc.error("Unrecognized command."))?;
            commands.push(command);
        } else if sc.looking_at(r"\n") {
            sc.advance(2)?;
            commands.push(Command::Newline);
        } else if c == '\\' {
            // Awakening leaves stray backslashes in a few messages.
            sc.next_char()?;
            commands.push(Command::print("\\"));
        } else {
            commands.push(Command::Print(sc.scan_until(PRINT_TERMINATORS)));
        }
    }
    Ok(())
}

fn scan_block_command(sc: &mut Scanner) -> Result<Command, ScannerError> {
    sc.expect('$')?;
    let (line, column) = sc.position();
    let name = sc.scan_alnum();
    scan_named(sc, &name)?
        .ok_or_else(|| ScannerError::new(line, column, format!("Unrecognized command {name}.")))
}

/// Scan the arguments of the command called `name`.
///
/// Returns `Ok(None)` when `name` is not a known command.
fn scan_named(sc: &mut Scanner, name: &str) -> Result<Option<Command>, ScannerError> {
    let command = match name {
        "a" => Command::Param(scan_single_number(sc)?),
        "HasPermanents" => Command::HasPermanents,
        "Overworld" => Command::Overworld,
        "c" => {
            sc.expect('(')?;
            let r = scan_number(sc)?;
            sc.expect(',')?;
            let g = scan_number(sc)?;
            sc.expect(',')?;
            let b = scan_number(sc)?;
            sc.expect(',')?;
            let a = scan_number(sc)?;
            sc.expect(')')?;
            Command::Color { r, g, b, a }
        }
        "SetConversationType" => Command::SetConversationType(scan_single_number(sc)?),
        "Emotions" => {
            sc.expect('(')?;
            let mut emotions = Vec::new();
            while sc.peek() != Some(')') {
                emotions.push(scan_string(sc));
                if sc.peek() != Some(')') {
                    sc.expect(',')?;
                }
            }
            sc.expect(')')?;
            Command::SetEmotions(emotions)
        }
        "G" => {
            sc.expect('(')?;
            let masculine = sc.scan_until(&[',']);
            sc.expect(',')?;
            let feminine = sc.scan_until(&[')']);
            sc.expect(')')?;
            Command::PrintGenderDependent { masculine, feminine }
        }
        "Pause" => Command::Pause,
        "Clear" => Command::Clear,
        "Wf" => Command::Wf,
        "C" => Command::C,
        "Bbs" => {
            sc.expect('(')?;
            let a = scan_string(sc);
            sc.expect(',')?;
            let b = scan_string(sc);
            sc.expect(',')?;
            let c = scan_string(sc);
            sc.expect(')')?;
            Command::Bbs(a, b, c)
        }
        "Bbe" => Command::Bbe,
        "Sev" => {
            sc.expect('(')?;
            let param = scan_number(sc)?;
            sc.expect(',')?;
            let number = scan_number(sc)?;
            sc.expect(')')?;
            Command::Sev { param, number }
        }
        "Bev" => {
            sc.expect('{')?;
            let param = sc.scan_until(&['}']);
            sc.expect('}')?;
            Command::Bev(param)
        }
        "Wait" => Command::Wait(scan_single_number(sc)?),
        "Marriage" => Command::Marriage(scan_single_string(sc)?),
        "VisualEffect" => Command::VisualEffect(scan_single_string(sc)?),
        "VisualEffect2" => Command::VisualEffect2(scan_single_string(sc)?),
        "FadeWhite" => Command::FadeWhite(scan_single_number(sc)?),
        "FadeOut" => Command::FadeOut(scan_single_number(sc)?),
        "FadeIn" => Command::FadeIn(scan_single_number(sc)?),
        "Panicked" => Command::Panicked,
        "Synchronize" => Command::Synchronize,
        "DeleteSpeaker" => Command::DeleteSpeaker,
        "ScrollIn" => Command::ScrollIn,
        "Nu" => Command::PrintAvatar,
        "Np" => Command::PrintAvatar2,
        "Nl" => Command::PrintOnlinePlayer(scan_single_number(sc)?),
        "FidAlias" => Command::FidAlias(scan_single_string(sc)?),
        "Alias" => Command::Alias(scan_single_string(sc)?),
        "SetSpeaker" => Command::SetSpeaker(scan_single_string(sc)?),
        "LoadAssets" => {
            sc.expect('(')?;
            let assets = scan_string(sc);
            sc.expect(',')?;
            sc.skip_whitespace();
            let position = if sc.peek() == Some('h') {
                sc.next_char()?;
                SpeakerPosition::Hidden
            } else {
                SpeakerPosition::Slot(sc.scan_number()?)
            };
            sc.skip_whitespace();
            sc.expect(')')?;
            Command::LoadAssets { assets, position }
        }
        "PlayVoice" => Command::PlayVoice(scan_single_string(sc)?),
        "PlayVoiceJapanese" => Command::PlayVoiceJapanese(scan_single_string(sc)?),
        "PlayVoiceEnglish" => Command::PlayVoiceEnglish(scan_single_string(sc)?),
        "PlaySoundEffect" => Command::PlaySoundEffect(scan_single_string(sc)?),
        "PlaySoundEffect2" => Command::PlaySoundEffect2(scan_single_string(sc)?),
        "PlayMusic" => {
            let (music, delay) = scan_string_and_number(sc)?;
            Command::PlayMusic { music, delay }
        }
        "StopMusic" => Command::StopMusic(scan_single_number(sc)?),
        "SetVolume" => {
            sc.expect('(')?;
            let volume = scan_number(sc)?;
            sc.expect(',')?;
            let delay = scan_number(sc)?;
            sc.expect(')')?;
            Command::SetVolume { volume, delay }
        }
        "DramaticLine" => Command::DramaticLine(scan_single_number(sc)?),
        "DramaticMusic" => {
            let (music, volume) = scan_string_and_number(sc)?;
            Command::DramaticMusic { music, volume }
        }
        "PlayRamp" => {
            let (music, time) = scan_string_and_number(sc)?;
            Command::PlayRamp { music, time }
        }
        "StopRamp" => {
            let (music, delay) = scan_string_and_number(sc)?;
            Command::StopRamp { music, delay }
        }
        "SetRampVolume" => {
            sc.expect('(')?;
            let music = scan_string(sc);
            sc.expect(',')?;
            let volume = scan_number(sc)?;
            sc.expect(',')?;
            let delay = scan_number(sc)?;
            sc.expect(')')?;
            Command::SetRampVolume { music, volume, delay }
        }
        _ => return Ok(None),
    };
    Ok(Some(command))
}

/// A bare argument with surrounding whitespace discarded.
fn scan_string(sc: &mut Scanner) -> String {
    sc.skip_whitespace();
    let value = sc.scan_until(STRING_TERMINATORS);
    sc.skip_whitespace();
    value
}

fn scan_number(sc: &mut Scanner) -> Result<i32, ScannerError> {
    sc.skip_whitespace();
    let value = sc.scan_number()?;
    sc.skip_whitespace();
    Ok(value)
}

/// `(string)`
fn scan_single_string(sc: &mut Scanner) -> Result<String, ScannerError> {
    sc.expect('(')?;
    let value = scan_string(sc);
    sc.expect(')')?;
    Ok(value)
}

/// `(number)`
fn scan_single_number(sc: &mut Scanner) -> Result<i32, ScannerError> {
    sc.expect('(')?;
    let value = scan_number(sc)?;
    sc.expect(')')?;
    Ok(value)
}

/// `(string, number)`
fn scan_string_and_number(sc: &mut Scanner) -> Result<(String, i32), ScannerError> {
    sc.expect('(')?;
    let music = scan_string(sc);
    sc.expect(',')?;
    let number = scan_number(sc)?;
    sc.expect(')')?;
    Ok((music, number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_block_and_text() {
        let script = "$SetSpeaker(Alice)\nHello, $Nu!\\n\n$Pause\n";
        assert_eq!(
            parse(script).unwrap(),
            vec![
                Command::set_speaker("Alice"),
                Command::print("Hello, "),
                Command::PrintAvatar,
                Command::print("!"),
                Command::Newline,
                Command::Pause,
            ]
        );
    }

    #[test]
    fn test_inline_command_starts_line() {
        assert_eq!(
            parse("$a(0) wins\n").unwrap(),
            vec![Command::Param(0), Command::print(" wins")]
        );
        assert_eq!(
            parse("$G(he,she) left").unwrap(),
            vec![
                Command::PrintGenderDependent {
                    masculine: "he".to_string(),
                    feminine: "she".to_string(),
                },
                Command::print(" left"),
            ]
        );
    }

    #[test]
    fn test_arguments_tolerate_whitespace() {
        assert_eq!(
            parse("$LoadAssets( Alice ,  3 )\n$PlayMusic(BGM , -1)\n").unwrap(),
            vec![
                Command::load_assets("Alice", 3),
                Command::PlayMusic { music: "BGM".to_string(), delay: -1 },
            ]
        );
        assert_eq!(
            parse("$LoadAssets(Mob, h)").unwrap(),
            vec![Command::load_assets("Mob", SpeakerPosition::Hidden)]
        );
    }

    #[test]
    fn test_emotions_and_bev() {
        assert_eq!(
            parse("$Emotions(笑, 汗)\n$Bev{a b}\n$Emotions()").unwrap(),
            vec![
                Command::SetEmotions(vec!["笑".to_string(), "汗".to_string()]),
                Command::Bev("a b".to_string()),
                Command::SetEmotions(Vec::new()),
            ]
        );
    }

    #[test]
    fn test_stray_backslash() {
        assert_eq!(
            parse("a\\b").unwrap(),
            vec![Command::print("a"), Command::print("\\"), Command::print("b")]
        );
    }

    #[test]
    fn test_unknown_block_command() {
        let err = parse("$SetSpeaker(A)\n$Bogus(1)").unwrap_err();
        assert_eq!(err.message, "Unrecognized command Bogus.");
        assert_eq!((err.line, err.column), (2, 1));
    }

    #[test]
    fn test_block_command_inside_text() {
        let err = parse("Hello$Pause").unwrap_err();
        assert_eq!(err.message, "Unrecognized command Pause.");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(parse("   \n\r\n").unwrap(), Vec::new());
        assert_eq!(parse("").unwrap(), Vec::new());
    }
}
