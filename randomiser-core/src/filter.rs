use std::collections::HashSet;

use crate::catalog::VoiceLine;

/// Drops lines from ignored worlds and ignored characters.
pub fn apply_filters(
    lines: Vec<VoiceLine>,
    ignore_worlds: &[String],
    ignore_characters: &[String],
) -> Vec<VoiceLine> {
    let worlds: HashSet<&str> = ignore_worlds.iter().map(String::as_str).collect();
    let characters: HashSet<&str> = ignore_characters.iter().map(String::as_str).collect();

    let before = lines.len();
    let kept: Vec<VoiceLine> = lines
        .into_iter()
        .filter(|line| !worlds.contains(line.world()))
        .filter(|line| !characters.contains(line.character()))
        .collect();

    tracing::debug!(
        kept = kept.len(),
        removed = before - kept.len(),
        "applied world/character filters"
    );
    kept
}
