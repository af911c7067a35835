use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TextureError;
use crate::terrain::{BandTable, TerrainBand, default_bands};

// TOML integers are i64, so larger seeds could not be written back out
pub const MAX_SEED: u64 = i64::MAX as u64;
// Four RGBA8 maps of this many pixels stay around 1 GiB
pub const MAX_PIXELS: u64 = 8192 * 8192;

// Missing keys fall back to the defaults, so `width = 512` alone is valid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    pub width: u32,
    pub height: u32,
    // shared by terrain and clouds
    pub octaves: u32,
    // rows per scheduler tick
    pub chunk_rows: u32,
    // radius the unit sphere is scaled to before sampling
    pub scale: f64,
    pub terrain_offset: f64,
    pub cloud_offset: f64,
    // cloud noise at or below this is clear sky
    pub cloud_threshold: f64,
    // None uses the reference permutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub bands: Vec<TerrainBand>,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 128,
            octaves: 3,
            chunk_rows: 16,
            scale: 2.0,
            terrain_offset: 10.0,
            cloud_offset: 50.0,
            cloud_threshold: 0.2,
            seed: None,
            bands: default_bands(),
        }
    }
}

impl PlanetConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), TextureError> {
        let pixels = self.width as u64 * self.height as u64;
        if pixels == 0 || pixels > MAX_PIXELS {
            return Err(TextureError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.octaves == 0 {
            return Err(TextureError::NoOctaves);
        }
        if self.chunk_rows == 0 {
            return Err(TextureError::EmptyChunk);
        }
        for (field, value) in [
            ("scale", self.scale),
            ("terrain_offset", self.terrain_offset),
            ("cloud_offset", self.cloud_offset),
        ] {
            if !value.is_finite() {
                return Err(TextureError::NonFinite { field, value });
            }
        }
        if let Some(seed) = self.seed.filter(|&seed| seed > MAX_SEED) {
            return Err(TextureError::SeedOutOfRange(seed));
        }
        if !(-1.0..1.0).contains(&self.cloud_threshold) {
            return Err(TextureError::CloudThreshold(self.cloud_threshold));
        }
        BandTable::new(&self.bands)?;
        Ok(())
    }

    pub fn parse(content: &str) -> Result<Self, TextureError> {
        let config: PlanetConfig = toml::from_str(content)?;
        if let Err(e) = config.validate() {
            tracing::warn!("rejected planet config: {e}");
            return Err(e);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("loading planet config from {}", path.display());
        Self::parse(&content)
    }

    pub fn to_toml(&self) -> Result<String, TextureError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
