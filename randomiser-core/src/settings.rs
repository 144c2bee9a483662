use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{RandomiserError, Result};

pub const DEFAULT_LANGUAGE: &str = "us";

/// Pairing policy, applied once for worlds and once for characters.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Mode {
    /// Everything collapses into one pool on both sides.
    #[default]
    Mix,
    /// Each group is paired with itself.
    Separate,
    /// Each group is paired with a randomly chosen counterpart.
    Swap,
}

impl FromStr for Mode {
    type Err = RandomiserError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mix" => Ok(Mode::Mix),
            "separate" => Ok(Mode::Separate),
            "swap" => Ok(Mode::Swap),
            _ => Err(RandomiserError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Mix => "Mix",
            Mode::Separate => "Separate",
            Mode::Swap => "Swap",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Platform {
    #[default]
    Pc,
    Ps2,
}

impl Platform {
    /// File extension of event voice files on this platform.
    pub fn voice_extension(self) -> &'static str {
        match self {
            Platform::Pc => "win32.scd",
            Platform::Ps2 => "vag",
        }
    }
}

impl FromStr for Platform {
    type Err = RandomiserError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" => Ok(Platform::Pc),
            "ps2" => Ok(Platform::Ps2),
            _ => Err(RandomiserError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Raw `settings.yml` contents. Keys follow the mod manager's PascalCase
/// convention; enum values stay as text until [`SettingsFile::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct SettingsFile {
    pub platform: Option<String>,
    pub language: Option<String>,
    pub world_mode: Option<String>,
    pub character_mode: Option<String>,
    pub ignore_worlds: Option<Vec<String>>,
    pub ignore_characters: Option<Vec<String>>,
    pub seed: Option<u64>,
}

impl SettingsFile {
    /// Loads `path`, or returns all defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as a mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Checks enum values and fills defaults.
    pub fn validate(self, voices_path: PathBuf, output_path: PathBuf) -> Result<RandomiserSettings> {
        let platform = match self.platform.as_deref() {
            Some(p) => p.parse()?,
            None => Platform::default(),
        };
        let world_mode = match self.world_mode.as_deref() {
            Some(m) => m.parse()?,
            None => Mode::default(),
        };
        let character_mode = match self.character_mode.as_deref() {
            Some(m) => m.parse()?,
            None => Mode::default(),
        };

        let language = self
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(RandomiserSettings {
            seed: self.seed,
            platform,
            language,
            world_mode,
            character_mode,
            ignore_worlds: self.ignore_worlds.unwrap_or_default(),
            ignore_characters: self.ignore_characters.unwrap_or_default(),
            debug: false,
            voices_path,
            output_path,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomiserSettings {
    pub seed: Option<u64>,
    pub platform: Platform,
    pub language: String,
    pub world_mode: Mode,
    pub character_mode: Mode,
    pub ignore_worlds: Vec<String>,
    pub ignore_characters: Vec<String>,
    pub debug: bool,
    pub voices_path: PathBuf,
    pub output_path: PathBuf,
}
