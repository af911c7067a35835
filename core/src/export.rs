use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::PlanetConfig;
use crate::error::TextureError;
use crate::raster::{TextureKind, TextureSet};

// Writes `<stem>_<kind>.png` for each map into `dir`, creating it if needed.
// Paths come back in `TextureKind::ALL` order.
pub fn save_textures(maps: &TextureSet, dir: &Path, stem: &str) -> Result<Vec<PathBuf>, TextureError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(TextureKind::ALL.len());
    for kind in TextureKind::ALL {
        let path = dir.join(format!("{stem}_{}.png", kind.name()));
        maps.get(kind).save(&path)?;
        written.push(path);
    }
    info!(dir = %dir.display(), stem, "saved planet textures");
    Ok(written)
}

// Config next to the maps so an export can be regenerated
pub fn save_config(config: &PlanetConfig, dir: &Path, stem: &str) -> Result<PathBuf, TextureError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.toml"));
    std::fs::write(&path, config.to_toml()?)?;
    Ok(path)
}
