use std::ops::Range;

use image::Rgba;

use crate::config::PlanetConfig;
use crate::error::TextureError;
use crate::fractal3::fbm;
use crate::perlin3::Perlin3D;
use crate::raster::TextureSet;
use crate::terrain::{BandTable, cloud_alpha};
use crate::utils::{pixel_lon_lat, sample_point, sphere_normal};

// Per-pixel surface sampler. Each pass owns its lattice and band table.
#[derive(Clone, Debug)]
pub struct PlanetSampler {
    noise: Perlin3D,
    bands: BandTable,
    width: u32,
    height: u32,
    octaves: u32,
    scale: f64,
    terrain_offset: f64,
    cloud_offset: f64,
    cloud_threshold: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Texel {
    pub diffuse: Rgba<u8>,
    pub specular: Rgba<u8>,
    pub bump: Rgba<u8>,
    pub clouds: Rgba<u8>,
}

impl PlanetSampler {
    pub fn new(config: &PlanetConfig) -> Result<Self, TextureError> {
        config.validate()?;
        let noise = match config.seed {
            Some(seed) => Perlin3D::with_seed(seed),
            None => Perlin3D::new(),
        };
        Ok(Self {
            noise,
            bands: BandTable::new(&config.bands)?,
            width: config.width,
            height: config.height,
            octaves: config.octaves,
            scale: config.scale,
            terrain_offset: config.terrain_offset,
            cloud_offset: config.cloud_offset,
            cloud_threshold: config.cloud_threshold,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sample(&self, x: u32, y: u32) -> Texel {
        let (lon, lat) = pixel_lon_lat(x, y, self.width, self.height);
        let normal = sphere_normal(lon, lat);

        let terrain = fbm(
            &self.noise,
            sample_point(normal, self.scale, self.terrain_offset),
            self.octaves,
        );
        let band = self.bands.classify(terrain);

        let cloud = fbm(
            &self.noise,
            sample_point(normal, self.scale, self.cloud_offset),
            self.octaves,
        );
        let alpha = cloud_alpha(cloud, self.cloud_threshold);

        let [r, g, b] = band.color;
        Texel {
            diffuse: Rgba([r, g, b, 255]),
            specular: Rgba([band.specular, band.specular, band.specular, 255]),
            bump: Rgba([band.bump, band.bump, band.bump, 255]),
            clouds: Rgba([255, 255, 255, alpha]),
        }
    }

    // Fill every pixel of `rows` in all four maps. Rows past the raster are ignored.
    pub fn render_rows(&self, rows: Range<u32>, maps: &mut TextureSet) {
        let end = rows.end.min(self.height);
        for y in rows.start..end {
            for x in 0..self.width {
                let texel = self.sample(x, y);
                maps.diffuse.put_pixel(x, y, texel.diffuse);
                maps.specular.put_pixel(x, y, texel.specular);
                maps.bump.put_pixel(x, y, texel.bump);
                maps.clouds.put_pixel(x, y, texel.clouds);
            }
        }
    }
}

// All four maps in one blocking pass
pub fn generate(config: &PlanetConfig) -> Result<TextureSet, TextureError> {
    let sampler = PlanetSampler::new(config)?;
    let mut maps = TextureSet::new(sampler.width, sampler.height);
    sampler.render_rows(0..sampler.height, &mut maps);
    Ok(maps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny(octaves: u32) -> PlanetConfig {
        PlanetConfig {
            octaves,
            ..PlanetConfig::with_size(4, 2)
        }
    }

    const DEEP: [u8; 4] = [0x1e, 0x40, 0xaf, 255];
    const LOW: [u8; 4] = [0x05, 0x96, 0x69, 255];

    fn flat(px: &[[u8; 4]; 8]) -> Vec<u8> {
        px.iter().flatten().copied().collect()
    }

    #[test]
    fn planet_tiny_generate_matches_known_maps() {
        let maps = generate(&tiny(1)).unwrap();
        assert_eq!(maps, generate(&tiny(1)).unwrap());

        let diffuse = [DEEP, DEEP, DEEP, LOW, DEEP, LOW, DEEP, LOW];
        let grey = |deep: u8, low: u8| {
            diffuse.map(|p| {
                let v = if p == DEEP { deep } else { low };
                [v, v, v, 255]
            })
        };
        let specular = grey(230, 40);
        let bump = grey(0, 90);
        let clouds = [23, 0, 0, 0, 0, 0, 87, 0].map(|a| [255, 255, 255, a]);

        assert_eq!(maps.diffuse.as_raw(), &flat(&diffuse));
        assert_eq!(maps.specular.as_raw(), &flat(&specular));
        assert_eq!(maps.bump.as_raw(), &flat(&bump));
        assert_eq!(maps.clouds.as_raw(), &flat(&clouds));
    }

    #[test]
    fn planet_maps_are_consistent_per_pixel() {
        let config = PlanetConfig::with_size(32, 16);
        let maps = generate(&config).unwrap();
        let bands = &config.bands;
        for (x, y, d) in maps.diffuse.enumerate_pixels() {
            let s = maps.specular.get_pixel(x, y);
            let b = maps.bump.get_pixel(x, y);
            let c = maps.clouds.get_pixel(x, y);
            assert_eq!(d[3], 255);
            let band = bands
                .iter()
                .find(|band| band.color == [d[0], d[1], d[2]])
                .expect("diffuse colour comes from a band");
            assert_eq!(s, &Rgba([band.specular, band.specular, band.specular, 255]));
            assert_eq!(b, &Rgba([band.bump, band.bump, band.bump, 255]));
            assert_eq!(&c.0[..3], &[255, 255, 255]);
        }
    }

    #[test]
    fn planet_seed_changes_surface() {
        let base = PlanetConfig::with_size(64, 32);
        let seeded = PlanetConfig {
            seed: Some(7),
            ..base.clone()
        };
        assert_ne!(generate(&base).unwrap(), generate(&seeded).unwrap());
    }

    #[test]
    fn planet_rejects_zero_size() {
        assert!(matches!(
            generate(&PlanetConfig::with_size(0, 2)),
            Err(TextureError::InvalidDimensions { width: 0, height: 2 })
        ));
    }

    #[test]
    fn planet_default_surface_has_land_and_sea() {
        let maps = generate(&PlanetConfig::default()).unwrap();
        let sea_px = maps.diffuse.pixels().filter(|p| p.0 == DEEP).count();
        let total = maps.diffuse.pixels().count();
        assert!(sea_px > 0 && sea_px < total);
    }
}
