//! Game script parser
//!
//! Game script is the compact notation stored in message archives. Control
//! codes start with `$` followed by a one to three character opcode and,
//! for most opcodes, `|`-terminated arguments:
//!
//! ```text
//! $t1$WmAlice|3$WsAlice|$WaHello!$k\n$p
//! ```

use tracing::{debug, trace};

use super::commands::{Command, SpeakerPosition};
use super::scanner::Scanner;
use crate::error::ScannerError;

/// Every opcode the game script grammar recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameOpcode {
    Param,
    Overworld,
    Color,
    SetConversationType,
    SetEmotions,
    PrintGenderDependent,
    Pause,
    Clear,
    C,
    Bev,
    Wait,
    Marriage,
    Wf,
    VisualEffect,
    VisualEffect2,
    FadeWhite,
    FadeOut,
    FadeIn,
    Panicked,
    Synchronize,
    DeleteSpeaker,
    ScrollIn,
    PrintAvatar,
    PrintAvatar2,
    PrintOnlinePlayer,
    FidAlias,
    Alias,
    SetSpeaker,
    LoadAssets,
    Bbs,
    Bbe,
    Sev,
    PlayVoice,
    PlayVoiceJapanese,
    PlayVoiceEnglish,
    PlaySoundEffect,
    PlaySoundEffect2,
    PlayMusic,
    StopMusic,
    SetVolume,
    DramaticLine,
    DramaticMusic,
    PlayRamp,
    StopRamp,
    SetRampVolume,
}

impl GameOpcode {
    fn from_three(code: &str) -> Option<Self> {
        Some(match code {
            "Bbs" => Self::Bbs,
            "Bbe" => Self::Bbe,
            "Sev" => Self::Sev,
            "Svp" => Self::PlayVoice,
            "Svj" => Self::PlayVoiceJapanese,
            "Sve" => Self::PlayVoiceEnglish,
            "Ssp" => Self::PlaySoundEffect,
            "Ssw" => Self::PlaySoundEffect2,
            "Sbp" => Self::PlayMusic,
            "Sbs" => Self::StopMusic,
            "Sbv" => Self::SetVolume,
            "Sre" => Self::DramaticLine,
            "Srp" => Self::DramaticMusic,
            "Slp" => Self::PlayRamp,
            "Sls" => Self::StopRamp,
            "Slv" => Self::SetRampVolume,
            _ => return None,
        })
    }

    fn from_two(code: &str) -> Option<Self> {
        Some(match code {
            "Wf" => Self::Wf,
            "Tc" => Self::VisualEffect,
            "Td" => Self::VisualEffect2,
            "Fw" => Self::FadeWhite,
            "Fo" => Self::FadeOut,
            "Fi" => Self::FadeIn,
            "Wv" => Self::Panicked,
            "Wa" => Self::Synchronize,
            // A handful of Shadows of Valentia files spell it upper case.
            "Wd" | "WD" => Self::DeleteSpeaker,
            "Wc" => Self::ScrollIn,
            "Nu" => Self::PrintAvatar,
            "Np" => Self::PrintAvatar2,
            "Nl" => Self::PrintOnlinePlayer,
            "VF" => Self::FidAlias,
            "VN" => Self::Alias,
            "Ws" => Self::SetSpeaker,
            "Wm" => Self::LoadAssets,
            _ => return None,
        })
    }

    fn from_one(code: char) -> Option<Self> {
        Some(match code {
            'a' => Self::Param,
            'Z' => Self::Overworld,
            'c' => Self::Color,
            't' => Self::SetConversationType,
            'E' => Self::SetEmotions,
            'G' => Self::PrintGenderDependent,
            'k' => Self::Pause,
            'p' => Self::Clear,
            'C' => Self::C,
            'b' => Self::Bev,
            'w' => Self::Wait,
            'l' => Self::Marriage,
            _ => return None,
        })
    }

    /// Longest-match lookup: three character opcodes win over two, two over one.
    fn lookup(sc: &Scanner) -> Option<(Self, usize)> {
        if let Some(op) = Self::from_three(&sc.peek_str(3)) {
            return Some((op, 3));
        }
        if let Some(op) = Self::from_two(&sc.peek_str(2)) {
            return Some((op, 2));
        }
        sc.peek().and_then(Self::from_one).map(|op| (op, 1))
    }
}

/// Parser for the game script notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameScriptParser;

impl GameScriptParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse `text` into commands.
    ///
    /// # Errors
    /// Returns a [`ScannerError`] at the first malformed command. No partial
    /// sequence is returned.
    pub fn scan(&self, text: &str) -> Result<Vec<Command>, ScannerError> {
        debug!("Parsing game script ({} bytes)", text.len());
        let mut sc = Scanner::new(text);
        let mut commands = Vec::new();

        while !sc.at_end() {
            // Stray argument terminators left behind by single-argument codes.
            if sc.peek() == Some('|') {
                sc.next_char()?;
                continue;
            }
            let command = if sc.peek() == Some('$') {
                scan_command(&mut sc)?
            } else if sc.looking_at(r"\n") {
                sc.advance(2)?;
                Command::Newline
            } else {
                scan_print(&mut sc)
            };
            trace!("{command:?}");
            commands.push(command);
        }

        debug!("Parsed {} commands", commands.len());
        Ok(commands)
    }
}

/// Parse a game script with a default parser.
///
/// # Errors
/// See [`GameScriptParser::scan`].
pub fn parse(text: &str) -> Result<Vec<Command>, ScannerError> {
    GameScriptParser.scan(text)
}

fn scan_print(sc: &mut Scanner) -> Command {
    let mut text = String::new();
    while let Some(c) = sc.peek() {
        if c == '$' || sc.looking_at(r"\n") {
            break;
        }
        text.push(c);
        sc.bump();
    }
    Command::Print(text)
}

fn scan_command(sc: &mut Scanner) -> Result<Command, ScannerError> {
    sc.expect('$')?;
    let Some((op, len)) = GameOpcode::lookup(sc) else {
        let name: String = sc
            .peek_str(3)
            .chars()
            .take_while(|c| !matches!(c, '$' | '|' | '\\'))
            .collect();
        return Err(sc.error(format!("Unrecognized command {name}.")));
    };
    sc.advance(len)?;

    let command = match op {
        GameOpcode::Param => {
            if sc.peek().is_some_and(|c| c.is_ascii_digit()) {
                Command::Param(sc.scan_number()?)
            } else {
                Command::HasPermanents
            }
        }
        GameOpcode::Overworld => Command::Overworld,
        GameOpcode::Color => {
            let r = sc.scan_number()?;
            sc.expect(',')?;
            let g = sc.scan_number()?;
            sc.expect(',')?;
            let b = sc.scan_number()?;
            sc.expect(',')?;
            let a = sc.scan_number()?;
            Command::Color { r, g, b, a }
        }
        GameOpcode::SetConversationType => Command::SetConversationType(sc.scan_number()?),
        GameOpcode::SetEmotions => scan_emotions(sc)?,
        GameOpcode::PrintGenderDependent => {
            let masculine = sc.scan_until(&[',']);
            sc.expect(',')?;
            let feminine = sc.scan_until(&['|']);
            sc.expect('|')?;
            Command::PrintGenderDependent { masculine, feminine }
        }
        GameOpcode::Pause => Command::Pause,
        GameOpcode::Clear => Command::Clear,
        GameOpcode::C => Command::C,
        GameOpcode::Bev => Command::Bev(sc.scan_until(&['|'])),
        GameOpcode::Wait => Command::Wait(sc.scan_number()?),
        GameOpcode::Marriage => Command::Marriage(sc.scan_until(&['|'])),
        GameOpcode::Wf => Command::Wf,
        GameOpcode::VisualEffect => Command::VisualEffect(sc.scan_until(&['|'])),
        GameOpcode::VisualEffect2 => Command::VisualEffect2(sc.scan_until(&['|'])),
        GameOpcode::FadeWhite => Command::FadeWhite(sc.scan_number()?),
        GameOpcode::FadeOut => Command::FadeOut(sc.scan_number()?),
        GameOpcode::FadeIn => Command::FadeIn(sc.scan_number()?),
        GameOpcode::Panicked => Command::Panicked,
        GameOpcode::Synchronize => Command::Synchronize,
        GameOpcode::DeleteSpeaker => Command::DeleteSpeaker,
        GameOpcode::ScrollIn => Command::ScrollIn,
        GameOpcode::PrintAvatar => Command::PrintAvatar,
        GameOpcode::PrintAvatar2 => Command::PrintAvatar2,
        GameOpcode::PrintOnlinePlayer => Command::PrintOnlinePlayer(sc.scan_number()?),
        GameOpcode::FidAlias => Command::FidAlias(sc.scan_until(&['|'])),
        GameOpcode::Alias => Command::Alias(sc.scan_until(&['|'])),
        GameOpcode::SetSpeaker => Command::SetSpeaker(sc.scan_until(&['|'])),
        GameOpcode::LoadAssets => {
            let assets = sc.scan_until(&['|']);
            sc.expect('|')?;
            let position = if sc.peek() == Some('h') {
                sc.next_char()?;
                SpeakerPosition::Hidden
            } else {
                SpeakerPosition::Slot(sc.scan_number()?)
            };
            Command::LoadAssets { assets, position }
        }
        GameOpcode::Bbs => {
            let a = sc.scan_until(&[',']);
            sc.expect(',')?;
            let b = sc.scan_until(&[',']);
            sc.expect(',')?;
            let c = sc.scan_until(&['|']);
            sc.expect('|')?;
            Command::Bbs(a, b, c)
        }
        GameOpcode::Bbe => Command::Bbe,
        GameOpcode::Sev => {
            let param = scan_piped_number(sc)?;
            let number = scan_piped_number(sc)?;
            Command::Sev { param, number }
        }
        GameOpcode::PlayVoice => Command::PlayVoice(sc.scan_until(&['|'])),
        GameOpcode::PlayVoiceJapanese => Command::PlayVoiceJapanese(sc.scan_until(&['|'])),
        GameOpcode::PlayVoiceEnglish => Command::PlayVoiceEnglish(sc.scan_until(&['|'])),
        GameOpcode::PlaySoundEffect => Command::PlaySoundEffect(sc.scan_until(&['|'])),
        GameOpcode::PlaySoundEffect2 => Command::PlaySoundEffect2(sc.scan_until(&['|'])),
        GameOpcode::PlayMusic => {
            let music = scan_piped_string(sc)?;
            let delay = scan_piped_number(sc)?;
            Command::PlayMusic { music, delay }
        }
        GameOpcode::StopMusic => Command::StopMusic(sc.scan_number()?),
        GameOpcode::SetVolume => {
            let volume = scan_piped_number(sc)?;
            let delay = scan_piped_number(sc)?;
            Command::SetVolume { volume, delay }
        }
        GameOpcode::DramaticLine => Command::DramaticLine(sc.scan_number()?),
        GameOpcode::DramaticMusic => {
            let music = scan_piped_string(sc)?;
            let volume = scan_piped_number(sc)?;
            Command::DramaticMusic { music, volume }
        }
        GameOpcode::PlayRamp => {
            let music = scan_piped_string(sc)?;
            let time = scan_piped_number(sc)?;
            Command::PlayRamp { music, time }
        }
        GameOpcode::StopRamp => {
            let music = scan_piped_string(sc)?;
            let delay = scan_piped_number(sc)?;
            Command::StopRamp { music, delay }
        }
        GameOpcode::SetRampVolume => {
            let music = scan_piped_string(sc)?;
            let volume = scan_piped_number(sc)?;
            let delay = scan_piped_number(sc)?;
            Command::SetRampVolume { music, volume, delay }
        }
    };
    Ok(command)
}

/// `a,b,c|` with empty labels dropped.
fn scan_emotions(sc: &mut Scanner) -> Result<Command, ScannerError> {
    let mut emotions = Vec::new();
    loop {
        match sc.peek() {
            Some('|') => break,
            Some(',') => {
                sc.next_char()?;
            }
            Some(_) => emotions.push(sc.scan_until(&[',', '|'])),
            None => return Err(sc.error("Reached end of input while parsing emotions.")),
        }
    }
    sc.expect('|')?;
    Ok(Command::SetEmotions(emotions))
}

fn scan_piped_string(sc: &mut Scanner) -> Result<String, ScannerError> {
    let value = sc.scan_until(&['|']);
    sc.expect('|')?;
    Ok(value)
}

fn scan_piped_number(sc: &mut Scanner) -> Result<i32, ScannerError> {
    let value = sc.scan_number()?;
    sc.expect('|')?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_empty() {
        assert_eq!(parse("").unwrap(), Vec::new());
    }

    #[test]
    fn test_scan_basic_message() {
        let commands = parse("$t1$WmAlice|3$WsAlice|$WaHello!$k\\n$p").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::SetConversationType(1),
                Command::load_assets("Alice", 3),
                Command::set_speaker("Alice"),
                Command::Synchronize,
                Command::print("Hello!"),
                Command::Pause,
                Command::Newline,
                Command::Clear,
            ]
        );
    }

    #[test]
    fn test_longest_prefix_wins() {
        assert_eq!(parse("$Sbs5|").unwrap(), vec![Command::StopMusic(5)]);
        assert_eq!(parse("$Wd").unwrap(), vec![Command::DeleteSpeaker]);
        assert_eq!(parse("$WD").unwrap(), vec![Command::DeleteSpeaker]);
        assert_eq!(parse("$C").unwrap(), vec![Command::C]);
        assert_eq!(parse("$Bbe").unwrap(), vec![Command::Bbe]);
    }

    #[test]
    fn test_param_and_permanents() {
        assert_eq!(
            parse("$a0$a").unwrap(),
            vec![Command::Param(0), Command::HasPermanents]
        );
    }

    #[test]
    fn test_emotions() {
        assert_eq!(
            parse("$E笑,,汗|").unwrap(),
            vec![Command::SetEmotions(vec!["笑".to_string(), "汗".to_string()])]
        );
        assert_eq!(parse("$E|").unwrap(), vec![Command::SetEmotions(Vec::new())]);
        assert!(parse("$E笑").is_err());
    }

    #[test]
    fn test_hidden_position() {
        assert_eq!(
            parse("$WmMob|h").unwrap(),
            vec![Command::load_assets("Mob", SpeakerPosition::Hidden)]
        );
    }

    #[test]
    fn test_multi_argument_audio() {
        assert_eq!(
            parse("$SlvBGM|80|30|$Sev1|2|").unwrap(),
            vec![
                Command::SetRampVolume { music: "BGM".to_string(), volume: 80, delay: 30 },
                Command::Sev { param: 1, number: 2 },
            ]
        );
    }

    #[test]
    fn test_unknown_opcode() {
        let err = parse("Hi $Q").unwrap_err();
        assert_eq!(err.message, "Unrecognized command Q.");
        assert_eq!((err.line, err.column), (1, 4));

        let err = parse("$Qxyz").unwrap_err();
        assert_eq!(err.message, "Unrecognized command Qxy.");

        let err = parse("$Q|$k").unwrap_err();
        assert_eq!(err.message, "Unrecognized command Q.");
    }

    #[test]
    fn test_truncated_arguments() {
        assert!(parse("$c1,2").is_err());
        assert!(parse("$Sbp").is_err());
        assert!(parse("$w").is_err());
    }
}
