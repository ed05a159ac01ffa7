//! # Paragon
//!
//! A pure-Rust toolkit for the dialogue scripts of Fire Emblem Awakening,
//! Fates and Shadows of Valentia.
//!
//! ## Features
//!
//! - **Game script** - Parse and write the `$`-prefixed control codes stored in message archives
//! - **Pretty script** - A readable, line-oriented notation for editing
//! - **Quick transcripts** - Generate full conversations from `Name: text` lines
//! - **Preview** - Replay a script into the message boxes the player would see
//!
//! ## Quick Start
//!
//! ```
//! use paragon::prelude::*;
//!
//! let commands = GameScriptParser::new().scan("$WmAlice|3$WsAlice|$WaHi$k")?;
//! let snapshots = interpret(&commands, &AvatarConfig::default());
//! assert_eq!(snapshots[0].bottom_text(), "Hi\n");
//! # Ok::<(), paragon::ScannerError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `paragon` command-line binary

pub mod config;
pub mod dialogue;
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result, ScannerError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{
        AvatarAlias, AvatarConfig, DialogueConfig, Gender, QuickScriptConfig, TranslationTable,
        Translations,
    };
    pub use crate::error::{Error, Result, ScannerError};

    pub use crate::dialogue::{
        Command, DialogueInterpreterState, DialogueSnapshot, GameScriptParser,
        PrettyScriptParser, QuickScriptParser, Speaker, SpeakerPosition, commands_to_game,
        commands_to_pretty, game_to_pretty, interpret, pretty_to_game, quick_to_pretty,
        translate,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
