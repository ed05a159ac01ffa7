//! CLI interface for script validation and command dumps
use std::path::Path;

use super::{parse_script, read_source};

pub fn execute(source: &Path, pretty: bool) -> anyhow::Result<()> {
    let text = read_source(source)?;
    match parse_script(&text, pretty) {
        Ok(commands) => {
            println!("{}: OK ({} commands)", source.display(), commands.len());
            Ok(())
        }
        Err(err) => {
            if let Some(context) = err.render_context(&text) {
                eprintln!("{context}");
            }
            anyhow::bail!("{}: {err}", source.display())
        }
    }
}

pub fn execute_dump(source: &Path, pretty: bool) -> anyhow::Result<()> {
    let text = read_source(source)?;
    let commands =
        parse_script(&text, pretty).map_err(|e| anyhow::anyhow!("{}: {e}", source.display()))?;
    println!("{}", serde_json::to_string_pretty(&commands)?);
    Ok(())
}
