//! # Configuration Module
//!
//! World settings, persisted as versioned JSON. The file layout mirrors the
//! config struct directly; a version mismatch logs a warning and falls back
//! to (and rewrites) the defaults rather than attempting migration.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current settings file version. Bumped whenever a field changes meaning.
pub const SETTINGS_VERSION: u16 = 1;

/// Errors from loading or saving the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read or written.
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file exists but is not valid JSON for this version.
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable world parameters.
///
/// Everything stochastic in generation derives from `seed`, so two worlds
/// built from equal configs are voxel-identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Settings file version; mismatches fall back to defaults.
    pub version: u16,

    /// Seed for the noise layers and every random draw in generation.
    pub seed: u64,

    /// Width and depth, in chunks, of the grid `create_all_chunks` builds.
    pub world_size: u16,

    /// Whether terrain height falls off toward the world edge.
    pub island_mode: bool,

    /// Whether surface voxels with a low fractional height become slabs.
    pub generate_slabs: bool,

    /// Sampling frequency of the base height field.
    pub base_frequency: f64,

    /// Frequencies of the additive noise layers, applied in order.
    pub additive_frequencies: Vec<f64>,

    /// Frequencies of the subtractive noise layers, applied in order.
    pub subtractive_frequencies: Vec<f64>,

    /// `(offset, value)` stops of the island falloff gradient.
    pub island_gradient: Vec<(f32, f32)>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            version: SETTINGS_VERSION,
            seed: unix_time_seed(),
            world_size: 15,
            island_mode: false,
            generate_slabs: true,
            base_frequency: 0.008,
            additive_frequencies: vec![0.02],
            subtractive_frequencies: vec![0.03],
            island_gradient: vec![(0.0, 0.0), (0.6, 0.1), (1.0, 1.0)],
        }
    }
}

fn unix_time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

impl WorldConfig {
    /// Loads settings from a JSON file.
    ///
    /// A version mismatch is not an error: the file is ignored with a
    /// warning and defaults are returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: WorldConfig = serde_json::from_str(&text)?;

        if config.version != SETTINGS_VERSION {
            warn!(
                "settings file version {} does not match {}, using defaults",
                config.version, SETTINGS_VERSION
            );
            return Ok(WorldConfig::default());
        }

        Ok(config)
    }

    /// Loads settings, falling back to defaults (and writing them out) when
    /// the file is missing or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(error) => {
                info!("no usable settings file ({error}), writing defaults");
                let config = WorldConfig::default();
                if let Err(error) = config.save(&path) {
                    warn!("could not write default settings: {error}");
                }
                config
            }
        }
    }

    /// Writes the settings to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
