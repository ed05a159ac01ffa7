use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;

use crate::config::DialogueConfig;
use crate::dialogue::{Command, GameScriptParser, PrettyScriptParser};
use crate::error::{Error, ScannerError};

pub mod check;
pub mod convert;
pub mod preview;
pub mod quick;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert game script to pretty script
    ToPretty {
        /// Source game script
        #[arg(short, long)]
        source: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Translation config (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert pretty script to game script
    ToGame {
        /// Source pretty script
        #[arg(short, long)]
        source: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Translation config (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate pretty script from a `Name: text` transcript
    Quick {
        /// Source transcript
        #[arg(short, long)]
        source: PathBuf,

        /// First character
        #[arg(long)]
        char1: String,

        /// Second character
        #[arg(long)]
        char2: String,

        /// Portrait slot of the first character (config default: 3)
        #[arg(long)]
        pos1: Option<i32>,

        /// Portrait slot of the second character (config default: 7)
        #[arg(long)]
        pos2: Option<i32>,

        /// Wrap long lines into two-line pages
        #[arg(long)]
        wrap: bool,

        /// Line width for wrapping (config default: 30)
        #[arg(long)]
        width: Option<usize>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Config (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Replay a script and show each message the player would see
    Preview {
        /// Source script
        #[arg(short, long)]
        source: PathBuf,

        /// Source is pretty script rather than game script
        #[arg(long)]
        pretty: bool,

        /// Print snapshots as JSON
        #[arg(long)]
        json: bool,

        /// Include a trailing message that is never paused or cleared
        #[arg(long)]
        flush: bool,

        /// Avatar config (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Parse a script and report the first error
    Check {
        /// Source script
        #[arg(short, long)]
        source: PathBuf,

        /// Source is pretty script rather than game script
        #[arg(long)]
        pretty: bool,
    },

    /// Dump the parsed command list as JSON
    #[command(name = "commands")]
    Dump {
        /// Source script
        #[arg(short, long)]
        source: PathBuf,

        /// Source is pretty script rather than game script
        #[arg(long)]
        pretty: bool,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::ToPretty {
                source,
                destination,
                config,
            } => convert::execute_to_pretty(source, destination.as_deref(), config.as_deref()),
            Commands::ToGame {
                source,
                destination,
                config,
            } => convert::execute_to_game(source, destination.as_deref(), config.as_deref()),
            Commands::Quick {
                source,
                char1,
                char2,
                pos1,
                pos2,
                wrap,
                width,
                destination,
                config,
            } => quick::execute(
                source,
                &quick::QuickOptions {
                    char1,
                    char2,
                    pos1: *pos1,
                    pos2: *pos2,
                    wrap: *wrap,
                    width: *width,
                },
                destination.as_deref(),
                config.as_deref(),
            ),
            Commands::Preview {
                source,
                pretty,
                json,
                flush,
                config,
            } => preview::execute(source, *pretty, *json, *flush, config.as_deref()),
            Commands::Check { source, pretty } => check::execute(source, *pretty),
            Commands::Dump { source, pretty } => check::execute_dump(source, *pretty),
        }
    }
}

/// Load a `.toml` or `.json` config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> crate::Result<DialogueConfig> {
    let Some(path) = path else {
        return Ok(DialogueConfig::default());
    };
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("toml") => DialogueConfig::from_toml_str(&fs::read_to_string(path)?),
        Some("json") => DialogueConfig::from_json_str(&fs::read_to_string(path)?),
        _ => Err(Error::UnsupportedConfigFormat(path.display().to_string())),
    }
}

pub(crate) fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub(crate) fn write_output(destination: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match destination {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

pub(crate) fn parse_script(text: &str, pretty: bool) -> Result<Vec<Command>, ScannerError> {
    if pretty {
        PrettyScriptParser::new().scan(text)
    } else {
        GameScriptParser::new().scan(text)
    }
}
