//! Replay commands into message window snapshots
//!
//! The interpreter is a single forward pass. A snapshot is committed every
//! time a non-empty message is closed by `$Pause`, `$Clear`, a speaker switch
//! or a box overflowing its two lines. Nothing is committed implicitly at the
//! end of the sequence; call [`DialogueInterpreterState::commit`] to keep a
//! trailing partial message.

use tracing::{debug, trace};

use super::commands::{Command, SpeakerPosition};
use super::snapshot::DialogueSnapshot;
use crate::config::{AvatarConfig, Gender};

/// Text shown for names the previewer cannot know.
const UNKNOWN_NAME: &str = "???";

/// Mutable interpreter state: the snapshot being built plus everything committed so far.
#[derive(Debug, Clone, Default)]
pub struct DialogueInterpreterState {
    avatar: AvatarConfig,
    cur: DialogueSnapshot,
    snapshots: Vec<DialogueSnapshot>,
}

impl DialogueInterpreterState {
    #[must_use]
    pub fn new(avatar: AvatarConfig) -> Self {
        Self {
            avatar,
            ..Self::default()
        }
    }

    /// The snapshot currently being built.
    pub fn current(&self) -> &DialogueSnapshot {
        &self.cur
    }

    pub fn snapshots(&self) -> &[DialogueSnapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<DialogueSnapshot> {
        self.snapshots
    }

    pub fn set_type(&mut self, conversation_type: i32) {
        self.cur.conversation_type = conversation_type;
    }

    /// Close the current message and switch to `active`.
    pub fn set_active(&mut self, active: &str) {
        self.commit();
        self.cur.set_active(active);
        self.cur.clear_text();
        self.cur.panicked = false;
    }

    pub fn add_speaker(&mut self, name: &str, position: SpeakerPosition) {
        self.cur.add_speaker(name, position);
    }

    pub fn delete_speaker(&mut self) {
        self.cur.delete_speaker();
    }

    pub fn newline(&mut self) {
        self.cur.next_line();
    }

    /// Close the current message and empty the active box.
    pub fn clear(&mut self) {
        self.commit();
        self.cur.clear_text();
        self.cur.panicked = false;
    }

    /// Record a copy of the current snapshot if it holds any text.
    pub fn commit(&mut self) {
        if self.cur.has_text() {
            trace!("Committing snapshot {}", self.snapshots.len());
            self.snapshots.push(self.cur.clone());
        }
    }

    pub fn append(&mut self, message: &str) {
        if self.cur.active_speaker().is_none() {
            debug!("No speaker named {:?}, dropping text", self.cur.active);
            return;
        }
        if self.cur.is_end_of_message() {
            self.commit();
        }
        self.cur.append(message);
    }

    pub fn set_emotions(&mut self, emotions: &[String]) {
        if !self.cur.set_emotions(emotions.to_vec()) {
            self.lookup_miss("emotions");
        }
    }

    pub fn set_fid_alias(&mut self, fid_alias: &str) {
        if !self.cur.set_fid_alias(fid_alias) {
            self.lookup_miss("fid alias");
        }
    }

    pub fn set_alias(&mut self, alias: &str) {
        if !self.cur.set_alias(alias) {
            self.lookup_miss("alias");
        }
    }

    pub fn set_panicked(&mut self, panicked: bool) {
        self.cur.panicked = panicked;
    }

    fn lookup_miss(&self, what: &str) {
        debug!("No speaker named {:?}, ignoring {what}", self.cur.active);
    }

    /// Apply one command.
    pub fn interpret(&mut self, command: &Command) {
        match command {
            Command::Print(text) => self.append(text),
            Command::Newline => self.newline(),
            Command::Param(_) => self.append(&command.to_game()),
            Command::PrintGenderDependent { masculine, feminine } => {
                let text = match self.avatar.gender {
                    Gender::Male => masculine.clone(),
                    Gender::Female => feminine.clone(),
                };
                self.append(&text);
            }
            Command::PrintAvatar | Command::PrintAvatar2 => {
                let name = self
                    .avatar
                    .name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string());
                self.append(&name);
            }
            Command::PrintOnlinePlayer(_) => self.append(UNKNOWN_NAME),
            Command::SetConversationType(t) => self.set_type(*t),
            Command::SetEmotions(emotions) => self.set_emotions(emotions),
            Command::Pause | Command::Clear => self.clear(),
            Command::Panicked => self.set_panicked(true),
            Command::DeleteSpeaker => self.delete_speaker(),
            Command::FidAlias(fid_alias) => self.set_fid_alias(fid_alias),
            Command::Alias(alias) => self.set_alias(alias),
            Command::SetSpeaker(speaker) => self.set_active(speaker),
            Command::LoadAssets { assets, position } => self.add_speaker(assets, *position),
            // Color, sound, music and window effects leave the text untouched.
            _ => {}
        }
    }

    /// Apply every command in order.
    pub fn run(&mut self, commands: &[Command]) {
        for command in commands {
            self.interpret(command);
        }
    }
}

/// Replay `commands` and return the committed snapshots.
#[must_use]
pub fn interpret(commands: &[Command], avatar: &AvatarConfig) -> Vec<DialogueSnapshot> {
    let mut state = DialogueInterpreterState::new(avatar.clone());
    state.run(commands);
    debug!("Interpreted {} commands into {} snapshots", commands.len(), state.snapshots.len());
    state.into_snapshots()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn opening(speaker: &str, slot: i32) -> Vec<Command> {
        vec![Command::load_assets(speaker, slot), Command::set_speaker(speaker)]
    }

    #[test]
    fn test_pause_commits() {
        let mut commands = opening("Alice", 3);
        commands.extend([Command::print("Hi"), Command::Pause]);
        let snapshots = interpret(&commands, &AvatarConfig::default());
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].bottom[0], "Hi");
        assert_eq!(snapshots[0].active, "Alice");
    }

    #[test]
    fn test_no_commit_at_end() {
        let mut commands = opening("Alice", 3);
        commands.push(Command::print("trailing"));

        let mut state = DialogueInterpreterState::default();
        state.run(&commands);
        assert!(state.snapshots().is_empty());
        state.commit();
        assert_eq!(state.snapshots().len(), 1);
    }

    #[test]
    fn test_avatar_text() {
        let avatar = AvatarConfig {
            name: Some("Robin".to_string()),
            gender: Gender::Female,
        };
        let mut commands = opening("Alice", 0);
        commands.extend([
            Command::PrintAvatar,
            Command::print(" "),
            Command::PrintGenderDependent {
                masculine: "he".to_string(),
                feminine: "she".to_string(),
            },
            Command::Param(2),
            Command::PrintOnlinePlayer(1),
            Command::Color { r: 1, g: 2, b: 3, a: 4 },
            Command::Pause,
        ]);
        let snapshots = interpret(&commands, &avatar);
        assert_eq!(snapshots[0].top[0], "Robin she$a2???");
    }

    #[test]
    fn test_default_avatar_placeholder() {
        let mut commands = opening("Alice", 3);
        commands.extend([Command::PrintAvatar2, Command::print(" waves"), Command::Clear]);
        let snapshots = interpret(&commands, &AvatarConfig::default());
        assert_eq!(snapshots[0].bottom[0], "??? waves");
    }

    #[test]
    fn test_panicked_resets_after_message() {
        let mut commands = opening("Alice", 3);
        commands.extend([
            Command::Panicked,
            Command::print("Eek!"),
            Command::Pause,
            Command::print("Phew."),
            Command::Pause,
        ]);
        let snapshots = interpret(&commands, &AvatarConfig::default());
        assert_eq!(snapshots.len(), 2);
        assert!(snapshots[0].panicked);
        assert!(!snapshots[1].panicked);
    }

    #[test]
    fn test_speaker_switch_commits() {
        let mut commands = opening("Alice", 3);
        commands.extend([
            Command::load_assets("Bob", 7),
            Command::print("Hello"),
            Command::set_speaker("Bob"),
            Command::print("Hey"),
            Command::Pause,
        ]);
        let snapshots = interpret(&commands, &AvatarConfig::default());
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].active, "Alice");
        assert_eq!(snapshots[1].active, "Bob");
        assert_eq!(snapshots[1].bottom[0], "Hey");
    }

    #[test]
    fn test_unknown_active_speaker_is_ignored() {
        let commands = vec![
            Command::set_speaker("Ghost"),
            Command::SetEmotions(vec!["笑".to_string()]),
            Command::Alias("G".to_string()),
            Command::print("boo"),
            Command::Pause,
        ];
        let mut state = DialogueInterpreterState::default();
        state.run(&commands);
        assert!(state.snapshots().is_empty());
        assert_eq!(state.current().speakers.len(), 1);
        assert!(state.current().speakers[0].emotions.is_empty());
    }
}
