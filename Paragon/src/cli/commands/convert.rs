//! CLI interface for game/pretty script conversion
use std::path::Path;

use super::{load_config, read_source, write_output};
use crate::dialogue::{game_to_pretty, pretty_to_game};

pub fn execute_to_pretty(
    source: &Path,
    destination: Option<&Path>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    // Tables map pretty names to game ids, so flip them for this direction.
    let translations = config.translations.inverted();
    let (assets, emotions) = translations.tables();
    let text = read_source(source)?;

    let pretty = game_to_pretty(&text, assets, emotions)
        .map_err(|e| anyhow::anyhow!("{}: {e}", source.display()))?;

    write_output(destination, &pretty)
}

pub fn execute_to_game(
    source: &Path,
    destination: Option<&Path>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let (assets, emotions) = config.translations.tables();
    let text = read_source(source)?;

    let game = pretty_to_game(&text, assets, emotions)
        .map_err(|e| anyhow::anyhow!("{}: {e}", source.display()))?;

    write_output(destination, &game)
}
