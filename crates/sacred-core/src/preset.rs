use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::display::DisplayTier;
use crate::error::Result;
use crate::parameter::ParamId;
use crate::params::ParameterSet;

pub const PRESET_VERSION: u32 = 1;

/// On-disk parameter preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetFile {
    pub version: u32,
    pub tier: DisplayTier,
    #[serde(default)]
    pub animated: bool,
    pub values: Vec<PresetValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresetValue {
    pub id: ParamId,
    pub value: f64,
}

impl PresetFile {
    pub fn capture(params: &ParameterSet, animated: bool) -> Self {
        Self {
            version: PRESET_VERSION,
            tier: params.tier(),
            animated,
            values: params
                .values()
                .into_iter()
                .map(|(id, value)| PresetValue { id, value })
                .collect(),
        }
    }

    /// Build a parameter set from the preset. Values go through the clamping
    /// setters, so a hand-edited file can never push a control out of range.
    /// Controls missing from the file keep their tier defaults.
    pub fn to_params(&self) -> ParameterSet {
        let mut params = ParameterSet::new(self.tier);
        for entry in &self.values {
            if params.set(entry.id, entry.value).was_clamped() {
                log::warn!("preset value for {} adjusted", entry.id.id());
            }
        }
        params
    }
}

/// Save a preset to disk as pretty JSON.
pub fn save_preset(path: &Path, preset: &PresetFile) -> Result<()> {
    let json = serde_json::to_string_pretty(preset)?;
    std::fs::write(path, json)?;
    log::info!("saved preset to {}", path.display());
    Ok(())
}

/// Load a preset from disk.
pub fn load_preset(path: &Path) -> Result<PresetFile> {
    let json = std::fs::read_to_string(path)?;
    let preset: PresetFile = serde_json::from_str(&json)?;
    if preset.version != PRESET_VERSION {
        log::warn!(
            "preset {} has version {}, expected {}",
            path.display(),
            preset.version,
            PRESET_VERSION
        );
    }
    Ok(preset)
}
