// core holds the noise, classification and incremental texture generation
pub mod bodies;
pub mod builder;
pub mod config;
#[cfg(feature = "async")]
pub mod driver;
pub mod error;
pub mod export;
pub mod fractal3;
pub mod perlin3;
pub mod planet;
pub mod raster;
pub mod terrain;
pub mod theme;
pub mod utils;

pub use builder::{CancelToken, Step, TextureBuilder};
pub use config::PlanetConfig;
pub use error::TextureError;
pub use fractal3::{Fractal3D, fbm};
pub use perlin3::Perlin3D;
pub use planet::{PlanetSampler, generate};
pub use raster::{TextureKind, TextureSet};
pub use terrain::{BandTable, TerrainBand};
pub use theme::{Companion, Theme};

// Anything that can be sampled at a point in 3D space
pub trait NoiseGenerator {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64;
}
