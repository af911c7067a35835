use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("invalid raster dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("octave count must be at least 1")]
    NoOctaves,
    #[error("chunk size must be at least 1 row")]
    EmptyChunk,
    #[error("terrain band table is empty")]
    NoBands,
    #[error("only the last terrain band may be unbounded (band {0} has no max)")]
    UnboundedBand(usize),
    #[error("terrain band thresholds must ascend (band {index}: {max} after {previous})")]
    UnorderedBands { index: usize, previous: f64, max: f64 },
    #[error("cloud threshold {0} must lie in [-1, 1)")]
    CloudThreshold(f64),
    #[error("seed {0} does not fit in a TOML integer")]
    SeedOutOfRange(u64),
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
