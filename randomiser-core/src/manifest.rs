use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::VoiceLine;
use crate::settings::Platform;
use crate::Result;

pub const MOD_TITLE: &str = "Event Voice Randomizer";
pub const MOD_DESCRIPTION: &str = "Randomizes voices in cutscenes.";

/// Mod manager manifest (`mod.yml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    pub title: String,
    pub description: String,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(rename = "source", default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Asset>>,
}

pub fn voice_path(language: &str, platform: Platform, identifier: &str) -> String {
    format!(
        "voice/{}/event/{}.{}",
        language,
        identifier,
        platform.voice_extension()
    )
}

/// One copy asset per line that has a replacement, in catalog order.
pub fn build_mod(lines: &[VoiceLine], platform: Platform, language: &str) -> Mod {
    let assets = lines
        .iter()
        .filter_map(|line| {
            let replacement = line.replacement.as_deref()?;
            let source = Asset {
                name: voice_path(language, platform, replacement),
                kind: Some("internal".to_string()),
                ..Asset::default()
            };
            Some(Asset {
                name: voice_path(language, platform, line.name()),
                method: Some("copy".to_string()),
                sources: Some(vec![source]),
                ..Asset::default()
            })
        })
        .collect();

    Mod {
        title: MOD_TITLE.to_string(),
        description: MOD_DESCRIPTION.to_string(),
        assets,
    }
}

pub fn write_mod(path: &Path, manifest: &Mod) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let yaml = serde_yaml::to_string(manifest)?;
    fs::write(path, yaml)?;
    tracing::info!(assets = manifest.assets.len(), path = %path.display(), "wrote mod manifest");
    Ok(())
}
