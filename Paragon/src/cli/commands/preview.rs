//! CLI interface for the message previewer
use std::path::Path;

use super::{load_config, parse_script, read_source};
use crate::dialogue::{DialogueInterpreterState, DialogueSnapshot, Speaker};

pub fn execute(
    source: &Path,
    pretty: bool,
    json: bool,
    flush: bool,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let text = read_source(source)?;
    let commands =
        parse_script(&text, pretty).map_err(|e| anyhow::anyhow!("{}: {e}", source.display()))?;

    let mut state = DialogueInterpreterState::new(config.avatar);
    state.run(&commands);
    if flush {
        state.commit();
    }
    let snapshots = state.into_snapshots();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        for (index, snapshot) in snapshots.iter().enumerate() {
            print!("{}", render_snapshot(index, snapshot));
        }
        println!("{} message(s)", snapshots.len());
    }
    Ok(())
}

/// Plain-text view of one snapshot: both boxes with their speakers.
pub fn render_snapshot(index: usize, snapshot: &DialogueSnapshot) -> String {
    let mut out = format!("--- Message {} ---\n", index + 1);
    if snapshot.panicked {
        out.push_str("(panicked)\n");
    }
    render_box(&mut out, "top", snapshot.top_speaker(), &snapshot.top);
    render_box(&mut out, "bottom", snapshot.bottom_speaker(), &snapshot.bottom);
    out
}

fn render_box(out: &mut String, label: &str, speaker: Option<&Speaker>, lines: &[String; 2]) {
    if lines.iter().all(String::is_empty) {
        return;
    }
    let name = speaker.map_or("", display_name);
    out.push_str(&format!("[{label}] {name}\n"));
    for line in lines.iter().filter(|l| !l.is_empty()) {
        out.push_str(&format!("  {line}\n"));
    }
}

fn display_name(speaker: &Speaker) -> &str {
    speaker.alias.as_deref().unwrap_or(&speaker.name)
}
