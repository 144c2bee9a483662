use std::fs;
use std::path::Path;

use crate::{RandomiserError, Result};

/// Width of both the world prefix and the character window.
pub const KEY_WIDTH: usize = 2;

/// One cutscene voice line.
///
/// `world` is the first two characters of the name; `character` is the two
/// characters right before the first `_` (or before the end of the name when
/// it has no `_`). Both are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLine {
    name: String,
    world: String,
    character: String,
    pub replacement: Option<String>,
}

impl VoiceLine {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let chars: Vec<char> = name.chars().collect();

        if chars.len() < KEY_WIDTH {
            return Err(RandomiserError::MalformedIdentifier(name));
        }

        let end = chars.iter().position(|&c| c == '_').unwrap_or(chars.len());
        if end < KEY_WIDTH {
            return Err(RandomiserError::MalformedIdentifier(name));
        }

        let world: String = chars[..KEY_WIDTH].iter().collect();
        let character: String = chars[end - KEY_WIDTH..end].iter().collect();

        Ok(Self {
            name,
            world,
            character,
            replacement: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn character(&self) -> &str {
        &self.character
    }
}

/// Builds one `VoiceLine` per identifier, keeping input order.
pub fn build_catalog<I, S>(identifiers: I) -> Result<Vec<VoiceLine>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    identifiers.into_iter().map(VoiceLine::new).collect()
}

/// Reads an identifier list, one per line. Blank lines are skipped.
pub fn read_catalog(path: &Path) -> Result<Vec<VoiceLine>> {
    let text = fs::read_to_string(path)?;
    let lines = build_catalog(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty()),
    )?;
    tracing::debug!(count = lines.len(), path = %path.display(), "loaded voice catalog");
    Ok(lines)
}
