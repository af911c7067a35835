use image::{GrayImage, Luma};
use planet_core::{Fractal3D, NoiseGenerator, Perlin3D};
use std::path::Path;

// Greyscale z-slice of fBm noise for eyeballing octave detail
fn save_fbm_slice(octaves: u32, size: u32, z: f64, filename: &str) {
    let generator = Fractal3D::new(Perlin3D::new(), octaves);
    let mut img = GrayImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let v = generator.get3(x as f64 / 32.0, y as f64 / 32.0, z);
            let gray = ((v * 0.5 + 0.5).clamp(0.0, 1.0) * 255.0).round() as u8;
            img.put_pixel(x, y, Luma([gray]));
        }
    }
    img.save(Path::new(filename)).unwrap();
    println!("Saved {}", filename);
}

fn main() {
    for octaves in [1, 3, 6] {
        save_fbm_slice(octaves, 256, 0.5, &format!("fbm_slice_{octaves}.png"));
    }
}
