use rand::{rngs::StdRng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod catalog;
pub mod engine;
pub mod filter;
pub mod manifest;
pub mod matcher;
pub mod resolver;
pub mod settings;

pub use catalog::VoiceLine;
pub use engine::{randomize, randomize_catalog};
pub use settings::{Mode, Platform, RandomiserSettings, SettingsFile};

#[derive(Debug, Error)]
pub enum RandomiserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("malformed voice identifier: {0:?}")]
    MalformedIdentifier(String),
    #[error("unknown mode {0:?} (expected Mix, Separate or Swap)")]
    UnknownMode(String),
    #[error("unknown platform {0:?} (expected PC or PS2)")]
    UnknownPlatform(String),
    #[error("no source voices available for {destination} destination line(s)")]
    EmptySourcePool { destination: usize },
    #[error("voice line {0:?} was not assigned a replacement")]
    Unassigned(String),
}

pub type Result<T> = std::result::Result<T, RandomiserError>;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub seed: u64,
    pub lines: usize,
    pub manifest_path: PathBuf,
    pub spoiler_path: Option<PathBuf>,
}

fn spoiler_log(settings: &RandomiserSettings, seed: u64, lines: &[VoiceLine]) -> String {
    let mut log = format!("Event Voice Randomizer seed: {}\n", seed);
    log.push_str(&format!("world_mode: {}\n", settings.world_mode));
    log.push_str(&format!("character_mode: {}\n", settings.character_mode));
    log.push_str(&format!("lines: {}\n", lines.len()));
    for line in lines {
        log.push_str(&format!(
            "  {} -> {}\n",
            line.name(),
            line.replacement.as_deref().unwrap_or("-")
        ));
    }
    log
}

fn spoiler_path(manifest_path: &Path) -> PathBuf {
    manifest_path.with_file_name("spoiler_log.txt")
}

/// Reads the voice list, randomizes it and writes the mod manifest.
pub fn run(settings: RandomiserSettings) -> Result<RunSummary> {
    if !settings.voices_path.exists() {
        return Err(RandomiserError::Config(format!(
            "Voice list does not exist: {}",
            settings.voices_path.display()
        )));
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "using seed");
    let mut rng = StdRng::seed_from_u64(seed);

    let catalog = catalog::read_catalog(&settings.voices_path)?;
    let lines = randomize_catalog(catalog, &settings, &mut rng)?;

    let manifest = manifest::build_mod(&lines, settings.platform, &settings.language);
    manifest::write_mod(&settings.output_path, &manifest)?;

    let spoiler_path = if settings.debug {
        let path = spoiler_path(&settings.output_path);
        fs::write(&path, spoiler_log(&settings, seed, &lines))?;
        tracing::debug!(path = %path.display(), "wrote spoiler log");
        Some(path)
    } else {
        None
    };

    Ok(RunSummary {
        seed,
        lines: lines.len(),
        manifest_path: settings.output_path,
        spoiler_path,
    })
}
