//! `softshadow.toml` loading.
//!
//! ```toml
//! opacity = 0.2
//!
//! [profile]
//! preset = "ambient"
//! dynamic_radius = false
//!
//! [adjustments]
//! extra_blur = 2.0
//! bias = [0.0, 2.0]
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use softshadow::{DrawAdjustments, FinalLayerBoost, LAYER_COUNT, LayerProfile, OffsetScaling};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Opacity used when the command line doesn't give one.
    pub opacity: Option<f32>,
    pub profile: ProfileConfig,
    /// Draw adjustments for the `draw` command.
    pub adjustments: Option<DrawAdjustments>,
}

/// A preset plus per-field overrides.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    pub preset: Option<String>,
    pub fractions: Option<[f32; LAYER_COUNT]>,
    pub offset_scaling: Option<OffsetScaling>,
    pub dynamic_radius: Option<bool>,
    pub final_layer: Option<FinalLayerBoost>,
}

impl ProfileConfig {
    pub fn resolve(&self) -> Result<LayerProfile> {
        let mut profile = match &self.preset {
            Some(name) => name
                .parse::<LayerProfile>()
                .with_context(|| format!("Invalid profile preset in config: {name}"))?,
            None => LayerProfile::default(),
        };
        if let Some(fractions) = self.fractions {
            profile.fractions = fractions;
        }
        if let Some(offset_scaling) = self.offset_scaling {
            profile.offset_scaling = offset_scaling;
        }
        if let Some(dynamic_radius) = self.dynamic_radius {
            profile.dynamic_radius = dynamic_radius;
        }
        if self.final_layer.is_some() {
            profile.final_layer = self.final_layer;
        }
        Ok(profile)
    }
}

impl Config {
    /// Loads the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolves the layer profile; a preset named on the command line replaces
    /// the configured one entirely.
    pub fn layer_profile(&self, cli_preset: Option<&str>) -> Result<LayerProfile> {
        match cli_preset {
            Some(name) => name
                .parse::<LayerProfile>()
                .map_err(anyhow::Error::from),
            None => self.profile.resolve(),
        }
    }
}
