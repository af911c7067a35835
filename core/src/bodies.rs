// Moon, sun and star field drawn next to the planet.
// Craters, spots and stars are placed by a seeded RNG.

use image::{Rgba, RgbaImage};
use palette::{Gradient, LinSrgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::raster::fill_circle;

const MOON_BASE: [u8; 3] = [0xe2, 0xe8, 0xf0];
const MOON_CRATER: [u8; 3] = [0xcb, 0xd5, 0xe1];
const MOON_DEEP_CRATER: [u8; 3] = [0x94, 0xa3, 0xb8];

const SUN_CORE: [u8; 3] = [0xff, 0xf3, 0xcd];
const SUN_GOLD: [u8; 3] = [0xfb, 0xbf, 0x24];
const SUN_ORANGE: [u8; 3] = [0xf5, 0x9e, 0x0b];
const SUN_EDGE: [u8; 3] = [0xdc, 0x26, 0x26];
const SUN_FLARE: [u8; 3] = [0xfe, 0xf3, 0xc7];

fn opaque([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

// sRGB bytes taken as-is, so the ramp blends in gamma space like a canvas gradient
fn unencoded([r, g, b]: [u8; 3]) -> LinSrgb {
    LinSrgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

// `count` discs of `color` with radius in `radius`, centred anywhere on the image
fn scatter_discs(
    img: &mut RgbaImage,
    rng: &mut StdRng,
    count: usize,
    radius: std::ops::Range<f32>,
    color: Rgba<u8>,
) {
    let (w, h) = (img.width() as f32, img.height() as f32);
    for _ in 0..count {
        let x = rng.gen_range(0.0..w);
        let y = rng.gen_range(0.0..h);
        let r = rng.gen_range(radius.clone());
        fill_circle(img, x, y, r, color);
    }
}

// Pale grey moon with light and dark craters
pub fn moon_texture(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut moon = RgbaImage::from_pixel(width, height, opaque(MOON_BASE));
    if width == 0 || height == 0 {
        return moon;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    scatter_discs(&mut moon, &mut rng, 20, 5.0..20.0, opaque(MOON_CRATER));
    scatter_discs(&mut moon, &mut rng, 10, 3.0..11.0, opaque(MOON_DEEP_CRATER));
    moon
}

// White core through gold and orange to a red rim at the larger half-extent
pub fn sun_gradient(width: u32, height: u32) -> RgbaImage {
    let mut sun = RgbaImage::new(width, height);
    let gradient = Gradient::with_domain(vec![
        (0.0, unencoded(SUN_CORE)),
        (0.3, unencoded(SUN_GOLD)),
        (0.6, unencoded(SUN_ORANGE)),
        (1.0, unencoded(SUN_EDGE)),
    ]);

    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = cx.max(cy);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
            let col: LinSrgb = gradient.get(t);
            let rgb = col.into_format::<u8>();
            sun.put_pixel(x, y, Rgba([rgb.red, rgb.green, rgb.blue, 255]));
        }
    }
    sun
}

pub fn sun_texture(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut sun = sun_gradient(width, height);
    if width == 0 || height == 0 {
        return sun;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    scatter_discs(&mut sun, &mut rng, 15, 2.0..10.0, opaque(SUN_EDGE));
    scatter_discs(&mut sun, &mut rng, 10, 1.0..7.0, opaque(SUN_FLARE));
    sun
}

// Uniform in a cube of side `extent` centred on the origin
pub fn star_field(count: usize, extent: f32, seed: u64) -> Vec<[f32; 3]> {
    let half = extent.abs() / 2.0;
    if half == 0.0 {
        return vec![[0.0; 3]; count];
    }
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            [
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ]
        })
        .collect()
}
