//! Message window state as captured by the previewer

use serde::{Deserialize, Serialize};

use super::commands::SpeakerPosition;

/// A portrait on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    pub position: SpeakerPosition,
    pub alias: Option<String>,
    pub fid_alias: Option<String>,
    pub emotions: Vec<String>,
}

impl Speaker {
    pub fn new(name: impl Into<String>, position: SpeakerPosition) -> Self {
        Self {
            name: name.into(),
            position,
            alias: None,
            fid_alias: None,
            emotions: Vec::new(),
        }
    }

    /// The nameless speaker present in every fresh snapshot.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new("", SpeakerPosition::Hidden)
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_top(&self) -> bool {
        self.position.is_top()
    }

    pub fn is_bottom(&self) -> bool {
        !self.is_top()
    }
}

/// The visible state of both message boxes at one moment.
///
/// Each box holds two lines. `top_line`/`bottom_line` index the line that
/// text is appended to; reaching 2 means the box is full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueSnapshot {
    pub conversation_type: i32,
    pub speakers: Vec<Speaker>,
    pub active: String,
    pub top: [String; 2],
    pub bottom: [String; 2],
    pub top_line: usize,
    pub bottom_line: usize,
    pub panicked: bool,
}

impl Default for DialogueSnapshot {
    fn default() -> Self {
        Self {
            conversation_type: 1,
            speakers: vec![Speaker::anonymous()],
            active: String::new(),
            top: Default::default(),
            bottom: Default::default(),
            top_line: 0,
            bottom_line: 0,
            panicked: false,
        }
    }
}

impl DialogueSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `name` at `position`, replacing whoever stood there.
    pub fn add_speaker(&mut self, name: impl Into<String>, position: SpeakerPosition) {
        self.speakers.retain(|s| s.is_anonymous() || s.position != position);
        self.speakers.push(Speaker::new(name, position));
    }

    /// Remove the active speaker. The anonymous speaker is never removed.
    pub fn delete_speaker(&mut self) {
        let Some(index) = self.speakers.iter().position(|s| s.name == self.active) else {
            return;
        };
        if !self.speakers[index].is_anonymous() {
            self.speakers.remove(index);
            self.active.clear();
        }
    }

    pub fn set_active(&mut self, active: impl Into<String>) {
        self.active = active.into();
    }

    pub fn active_speaker(&self) -> Option<&Speaker> {
        self.speakers.iter().find(|s| s.name == self.active)
    }

    fn active_speaker_mut(&mut self) -> Option<&mut Speaker> {
        let active = &self.active;
        self.speakers.iter_mut().find(|s| s.name == *active)
    }

    /// Returns `false` when there is no active speaker to update.
    pub fn set_emotions(&mut self, emotions: Vec<String>) -> bool {
        let Some(speaker) = self.active_speaker_mut() else {
            return false;
        };
        speaker.emotions = emotions;
        true
    }

    pub fn set_fid_alias(&mut self, fid_alias: impl Into<String>) -> bool {
        let Some(speaker) = self.active_speaker_mut() else {
            return false;
        };
        speaker.fid_alias = Some(fid_alias.into());
        true
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) -> bool {
        let Some(speaker) = self.active_speaker_mut() else {
            return false;
        };
        speaker.alias = Some(alias.into());
        true
    }

    /// Add text to the active speaker's box, emptying it first if it is full.
    pub fn append(&mut self, message: &str) {
        let Some(top) = self.active_speaker().map(Speaker::is_top) else {
            return;
        };
        if self.is_end_of_message() {
            self.clear_text();
        }
        if top {
            self.top[self.top_line].push_str(message);
        } else {
            self.bottom[self.bottom_line].push_str(message);
        }
    }

    /// Empty the active speaker's box.
    pub fn clear_text(&mut self) {
        match self.active_speaker().map(Speaker::is_top) {
            Some(true) => {
                self.top = Default::default();
                self.top_line = 0;
            }
            Some(false) => {
                self.bottom = Default::default();
                self.bottom_line = 0;
            }
            None => {}
        }
    }

    pub fn has_text(&self) -> bool {
        match self.active_speaker().map(Speaker::is_top) {
            Some(true) => self.top.iter().any(|l| !l.is_empty()),
            Some(false) => self.bottom.iter().any(|l| !l.is_empty()),
            None => false,
        }
    }

    /// True once the active speaker's box has moved past its second line.
    pub fn is_end_of_message(&self) -> bool {
        match self.active_speaker().map(Speaker::is_top) {
            Some(true) => self.top_line >= 2,
            Some(false) => self.bottom_line >= 2,
            None => false,
        }
    }

    pub fn next_line(&mut self) {
        match self.active_speaker().map(Speaker::is_top) {
            Some(true) => self.top_line += 1,
            Some(false) => self.bottom_line += 1,
            None => {}
        }
    }

    /// Speaker shown beside the top box: the active one if it sits there,
    /// otherwise the most recently placed top speaker.
    pub fn top_speaker(&self) -> Option<&Speaker> {
        self.active_speaker()
            .filter(|s| s.is_top())
            .or_else(|| self.speakers.iter().rev().find(|s| s.is_top()))
    }

    pub fn bottom_speaker(&self) -> Option<&Speaker> {
        self.active_speaker()
            .filter(|s| s.is_bottom())
            .or_else(|| self.speakers.iter().rev().find(|s| s.is_bottom()))
    }

    pub fn top_text(&self) -> String {
        self.top.join("\n")
    }

    pub fn bottom_text(&self) -> String {
        self.bottom.join("\n")
    }
}
