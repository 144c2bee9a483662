use rand::Rng;

use crate::catalog::VoiceLine;
use crate::filter::apply_filters;
use crate::resolver::{pair_characters, pair_worlds};
use crate::settings::{Mode, RandomiserSettings};
use crate::{RandomiserError, Result};

/// Assigns a replacement to every line.
///
/// Worlds are paired first, then characters inside each world pair. Any
/// failure aborts the whole pass and the lines are dropped.
pub fn randomize<R: Rng + ?Sized>(
    mut lines: Vec<VoiceLine>,
    world_mode: Mode,
    character_mode: Mode,
    rng: &mut R,
) -> Result<Vec<VoiceLine>> {
    tracing::info!(
        lines = lines.len(),
        %world_mode,
        %character_mode,
        "randomizing event voices"
    );

    let pairs = pair_worlds(&lines, world_mode, rng);
    tracing::debug!(pairs = pairs.len(), "paired worlds");

    for pair in &pairs {
        pair_characters(&mut lines, pair, character_mode, rng)?;
    }

    if let Some(line) = lines.iter().find(|line| line.replacement.is_none()) {
        return Err(RandomiserError::Unassigned(line.name().to_string()));
    }

    Ok(lines)
}

/// Filters the catalog and randomizes what is left. Ignored lines are not
/// part of the result.
pub fn randomize_catalog<R: Rng + ?Sized>(
    lines: Vec<VoiceLine>,
    settings: &RandomiserSettings,
    rng: &mut R,
) -> Result<Vec<VoiceLine>> {
    let lines = apply_filters(lines, &settings.ignore_worlds, &settings.ignore_characters);
    randomize(lines, settings.world_mode, settings.character_mode, rng)
}
