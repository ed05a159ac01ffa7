//! CLI interface for quick transcripts
use std::path::Path;

use super::{load_config, read_source, write_output};
use crate::dialogue::{QuickScriptParser, commands_to_pretty};

/// Command-line overrides for the `[quick]` config section.
pub struct QuickOptions<'a> {
    pub char1: &'a str,
    pub char2: &'a str,
    pub pos1: Option<i32>,
    pub pos2: Option<i32>,
    pub wrap: bool,
    pub width: Option<usize>,
}

pub fn execute(
    source: &Path,
    options: &QuickOptions<'_>,
    destination: Option<&Path>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?.quick;
    let text = read_source(source)?;

    let parser = QuickScriptParser::from_config(&config)
        .with_wrap(options.wrap || config.wrap)
        .with_width(options.width.unwrap_or(config.width));
    let commands = parser
        .parse(
            &text,
            options.char1,
            options.pos1.unwrap_or(config.position1),
            options.char2,
            options.pos2.unwrap_or(config.position2),
        )
        .map_err(|e| anyhow::anyhow!("{}: {e}", source.display()))?;

    write_output(destination, &commands_to_pretty(&commands))
}
