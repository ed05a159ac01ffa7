//! Dialogue instructions shared by both script notations
//!
//! Every variant knows how to write itself back as game script (the compact
//! `$`-prefixed control codes stored in message archives) and as pretty script
//! (the `$Name(args)` notation authors edit).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where `LoadAssets` places a portrait.
///
/// Numeric slots select the on-screen position; some Echoes scripts use the
/// literal `h` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeakerPosition {
    Slot(i32),
    Hidden,
}

impl SpeakerPosition {
    /// Top-slot speakers render their text in the upper message box.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::Slot(0 | 2))
    }
}

impl fmt::Display for SpeakerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(n) => write!(f, "{n}"),
            Self::Hidden => f.write_str("h"),
        }
    }
}

impl From<i32> for SpeakerPosition {
    fn from(n: i32) -> Self {
        Self::Slot(n)
    }
}

/// A single decoded dialogue instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Literal message text.
    Print(String),
    /// Forced line break, written `\n` in both notations.
    Newline,
    /// Numbered parameter reference (`$a0`, `$a1`, ...).
    Param(i32),
    /// A bare `$a` with no parameter number.
    HasPermanents,
    Overworld,
    Color { r: i32, g: i32, b: i32, a: i32 },
    SetConversationType(i32),
    SetEmotions(Vec<String>),
    /// Text that depends on the avatar's gender.
    PrintGenderDependent { masculine: String, feminine: String },
    /// Wait for input. Closes the current message.
    Pause,
    /// Clear the message box.
    Clear,
    Wf,
    C,
    Bbs(String, String, String),
    Bbe,
    Sev { param: i32, number: i32 },
    Bev(String),
    Wait(i32),
    Marriage(String),
    VisualEffect(String),
    VisualEffect2(String),
    FadeWhite(i32),
    FadeOut(i32),
    FadeIn(i32),
    Panicked,
    Synchronize,
    DeleteSpeaker,
    ScrollIn,
    PrintAvatar,
    PrintAvatar2,
    PrintOnlinePlayer(i32),
    FidAlias(String),
    Alias(String),
    SetSpeaker(String),
    LoadAssets { assets: String, position: SpeakerPosition },
    PlayVoice(String),
    PlayVoiceJapanese(String),
    PlayVoiceEnglish(String),
    PlaySoundEffect(String),
    PlaySoundEffect2(String),
    PlayMusic { music: String, delay: i32 },
    StopMusic(i32),
    SetVolume { volume: i32, delay: i32 },
    DramaticLine(i32),
    DramaticMusic { music: String, volume: i32 },
    PlayRamp { music: String, time: i32 },
    StopRamp { music: String, delay: i32 },
    SetRampVolume { music: String, volume: i32, delay: i32 },
}

impl Command {
    pub fn print(text: impl Into<String>) -> Self {
        Self::Print(text.into())
    }

    pub fn set_speaker(speaker: impl Into<String>) -> Self {
        Self::SetSpeaker(speaker.into())
    }

    pub fn load_assets(assets: impl Into<String>, position: impl Into<SpeakerPosition>) -> Self {
        Self::LoadAssets {
            assets: assets.into(),
            position: position.into(),
        }
    }

    /// True for commands that flow inline as message text.
    ///
    /// This depends only on the variant, never on its payload.
    #[must_use]
    pub fn is_print(&self) -> bool {
        matches!(
            self,
            Self::Print(_)
                | Self::Param(_)
                | Self::PrintGenderDependent { .. }
                | Self::PrintAvatar
                | Self::PrintAvatar2
                | Self::PrintOnlinePlayer(_)
                | Self::Color { .. }
        )
    }

    /// Serialize to the compact control-code form stored in archives.
    #[must_use]
    pub fn to_game(&self) -> String {
        match self {
            Self::Print(text) => text.clone(),
            Self::Newline => r"\n".to_string(),
            Self::Param(n) => format!("$a{n}"),
            Self::HasPermanents => "$a".to_string(),
            Self::Overworld => "$Z".to_string(),
            Self::Color { r, g, b, a } => format!("$c{r},{g},{b},{a}|"),
            Self::SetConversationType(t) => format!("$t{t}"),
            Self::SetEmotions(emotions) => format!("$E{}|", emotions.join(",")),
            Self::PrintGenderDependent { masculine, feminine } => format!("$G{masculine},{feminine}|"),
            Self::Pause => "$k".to_string(),
            Self::Clear => "$p".to_string(),
            Self::Wf => "$Wf".to_string(),
            Self::C => "$C".to_string(),
            Self::Bbs(a, b, c) => format!("$Bbs{a},{b},{c}|"),
            Self::Bbe => "$Bbe".to_string(),
            Self::Sev { param, number } => format!("$Sev{param}|{number}|"),
            Self::Bev(param) => format!("$b{param}|"),
            Self::Wait(time) => format!("$w{time}|"),
            Self::Marriage(param) => format!("$l{param}|"),
            Self::VisualEffect(param) => format!("$Tc{param}|"),
            Self::VisualEffect2(param) => format!("$Td{param}|"),
            Self::FadeWhite(n) => format!("$Fw{n}|"),
            Self::FadeOut(n) => format!("$Fo{n}|"),
            Self::FadeIn(n) => format!("$Fi{n}|"),
            Self::Panicked => "$Wv".to_string(),
            Self::Synchronize => "$Wa".to_string(),
            Self::DeleteSpeaker => "$Wd".to_string(),
            Self::ScrollIn => "$Wc".to_string(),
            Self::PrintAvatar => "$Nu".to_string(),
            Self::PrintAvatar2 => "$Np".to_string(),
            Self::PrintOnlinePlayer(n) => format!("$Nl{n}"),
            Self::FidAlias(param) => format!("$VF{param}|"),
            Self::Alias(param) => format!("$VN{param}|"),
            Self::SetSpeaker(speaker) => format!("$Ws{speaker}|"),
            Self::LoadAssets { assets, position } => format!("$Wm{assets}|{position}"),
            Self::PlayVoice(sound) => format!("$Svp{sound}|"),
            Self::PlayVoiceJapanese(sound) => format!("$Svj{sound}|"),
            Self::PlayVoiceEnglish(sound) => format!("$Sve{sound}|"),
            Self::PlaySoundEffect(sound) => format!("$Ssp{sound}|"),
            Self::PlaySoundEffect2(sound) => format!("$Ssw{sound}|"),
            Self::PlayMusic { music, delay } => format!("$Sbp{music}|{delay}|"),
            Self::StopMusic(delay) => format!("$Sbs{delay}|"),
            Self::SetVolume { volume, delay } => format!("$Sbv{volume}|{delay}|"),
            Self::DramaticLine(volume) => format!("$Sre{volume}|"),
            Self::DramaticMusic { music, volume } => format!("$Srp{music}|{volume}|"),
            Self::PlayRamp { music, time } => format!("$Slp{music}|{time}|"),
            Self::StopRamp { music, delay } => format!("$Sls{music}|{delay}|"),
            Self::SetRampVolume { music, volume, delay } => {
                format!("$Slv{music}|{volume}|{delay}|")
            }
        }
    }

    /// Serialize to the human-editable `$Name(args)` form.
    #[must_use]
    pub fn to_pretty(&self) -> String {
        match self {
            Self::Print(text) => text.clone(),
            Self::Newline => r"\n".to_string(),
            Self::Param(n) => format!("$a({n})"),
            Self::HasPermanents => "$HasPermanents".to_string(),
            Self::Overworld => "$Overworld".to_string(),
            Self::Color { r, g, b, a } => format!("$c({r},{g},{b},{a})"),
            Self::SetConversationType(t) => format!("$SetConversationType({t})"),
            Self::SetEmotions(emotions) => format!("$Emotions({})", emotions.join(",")),
            Self::PrintGenderDependent { masculine, feminine } => format!("$G({masculine},{feminine})"),
            Self::Pause => "$Pause".to_string(),
            Self::Clear => "$Clear".to_string(),
            Self::Wf => "$Wf".to_string(),
            Self::C => "$C".to_string(),
            Self::Bbs(a, b, c) => format!("$Bbs({a},{b},{c})"),
            Self::Bbe => "$Bbe".to_string(),
            Self::Sev { param, number } => format!("$Sev({param},{number})"),
            Self::Bev(param) => format!("$Bev{{{param}}}"),
            Self::Wait(time) => format!("$Wait({time})"),
            Self::Marriage(param) => format!("$Marriage({param})"),
            Self::VisualEffect(param) => format!("$VisualEffect({param})"),
            Self::VisualEffect2(param) => format!("$VisualEffect2({param})"),
            Self::FadeWhite(n) => format!("$FadeWhite({n})"),
            Self::FadeOut(n) => format!("$FadeOut({n})"),
            Self::FadeIn(n) => format!("$FadeIn({n})"),
            Self::Panicked => "$Panicked".to_string(),
            Self::Synchronize => "$Synchronize".to_string(),
            Self::DeleteSpeaker => "$DeleteSpeaker".to_string(),
            Self::ScrollIn => "$ScrollIn".to_string(),
            Self::PrintAvatar => "$Nu".to_string(),
            Self::PrintAvatar2 => "$Np".to_string(),
            Self::PrintOnlinePlayer(n) => format!("$Nl({n})"),
            Self::FidAlias(param) => format!("$FidAlias({param})"),
            Self::Alias(param) => format!("$Alias({param})"),
            Self::SetSpeaker(speaker) => format!("$SetSpeaker({speaker})"),
            Self::LoadAssets { assets, position } => format!("$LoadAssets({assets}, {position})"),
            Self::PlayVoice(sound) => format!("$PlayVoice({sound})"),
            Self::PlayVoiceJapanese(sound) => format!("$PlayVoiceJapanese({sound})"),
            Self::PlayVoiceEnglish(sound) => format!("$PlayVoiceEnglish({sound})"),
            Self::PlaySoundEffect(sound) => format!("$PlaySoundEffect({sound})"),
            Self::PlaySoundEffect2(sound) => format!("$PlaySoundEffect2({sound})"),
            Self::PlayMusic { music, delay } => format!("$PlayMusic({music},{delay})"),
            Self::StopMusic(delay) => format!("$StopMusic({delay})"),
            Self::SetVolume { volume, delay } => format!("$SetVolume({volume},{delay})"),
            Self::DramaticLine(volume) => format!("$DramaticLine({volume})"),
            Self::DramaticMusic { music, volume } => format!("$DramaticMusic({music},{volume})"),
            Self::PlayRamp { music, time } => format!("$PlayRamp({music},{time})"),
            Self::StopRamp { music, delay } => format!("$StopRamp({music},{delay})"),
            Self::SetRampVolume { music, volume, delay } => {
                format!("$SetRampVolume({music},{volume},{delay})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_classification() {
        assert!(Command::print("Hi").is_print());
        assert!(Command::print("").is_print());
        assert!(Command::Param(0).is_print());
        assert!(Command::Color { r: 0, g: 0, b: 0, a: 0 }.is_print());
        assert!(Command::PrintOnlinePlayer(1).is_print());
        assert!(!Command::Newline.is_print());
        assert!(!Command::HasPermanents.is_print());
        assert!(!Command::set_speaker("Hi").is_print());
    }

    #[test]
    fn test_speaker_commands() {
        let load = Command::load_assets("Alice", 3);
        assert_eq!(load.to_game(), "$WmAlice|3");
        assert_eq!(load.to_pretty(), "$LoadAssets(Alice, 3)");

        let hidden = Command::load_assets("Mob", SpeakerPosition::Hidden);
        assert_eq!(hidden.to_game(), "$WmMob|h");

        assert_eq!(Command::set_speaker("Bob").to_game(), "$WsBob|");
        assert_eq!(Command::set_speaker("Bob").to_pretty(), "$SetSpeaker(Bob)");
    }

    #[test]
    fn test_argument_forms() {
        let emotions = Command::SetEmotions(vec!["笑".to_string(), "汗".to_string()]);
        assert_eq!(emotions.to_game(), "$E笑,汗|");
        assert_eq!(emotions.to_pretty(), "$Emotions(笑,汗)");

        let music = Command::SetRampVolume { music: "BGM_01".to_string(), volume: 80, delay: -1 };
        assert_eq!(music.to_game(), "$SlvBGM_01|80|-1|");
        assert_eq!(music.to_pretty(), "$SetRampVolume(BGM_01,80,-1)");

        assert_eq!(Command::Bev("x y".to_string()).to_pretty(), "$Bev{x y}");
        assert_eq!(Command::Sev { param: 1, number: 2 }.to_game(), "$Sev1|2|");
    }

    #[test]
    fn test_position_top_slots() {
        assert!(SpeakerPosition::Slot(0).is_top());
        assert!(SpeakerPosition::Slot(2).is_top());
        assert!(!SpeakerPosition::Slot(3).is_top());
        assert!(!SpeakerPosition::Hidden.is_top());
    }
}
