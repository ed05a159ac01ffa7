//! Dialogue script handling for Fire Emblem 3DS titles
//!
//! This module converts message scripts between the game's compact control
//! code notation and an editable pretty notation, expands quick transcripts,
//! and replays scripts into message window snapshots for previewing.
//!
//! # Overview
//!
//! - Game script: `$WsAlice|$WaHello!$k\n$p`
//! - Pretty script: one block command per line, inline text commands in place
//! - Quick transcript: `Name: text` lines for two characters
//!
//! # Usage
//!
//! ```
//! use paragon::dialogue::{game_to_pretty, pretty_to_game};
//!
//! let pretty = game_to_pretty("$WsAlice|Hello!$k", None, None)?;
//! assert_eq!(pretty, "$SetSpeaker(Alice)\nHello!\n$Pause\n\n");
//!
//! let game = pretty_to_game(&pretty, None, None)?;
//! assert_eq!(game, "$WsAlice|Hello!$k");
//! # Ok::<(), paragon::ScannerError>(())
//! ```

pub mod commands;
pub mod convert;
pub mod game_script;
pub mod interpreter;
pub mod pretty_script;
pub mod quick_script;
pub mod scanner;
pub mod snapshot;

pub use commands::{Command, SpeakerPosition};
pub use convert::{
    commands_to_game, commands_to_pretty, game_to_pretty, pretty_to_game, quick_to_pretty,
    translate,
};
pub use game_script::GameScriptParser;
pub use interpreter::{DialogueInterpreterState, interpret};
pub use pretty_script::PrettyScriptParser;
pub use quick_script::{QuickScriptParser, wrap_text};
pub use scanner::Scanner;
pub use snapshot::{DialogueSnapshot, Speaker};
