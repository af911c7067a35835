use image::{Rgba, RgbaImage};

// Paint a solid disc; parts outside the image are clipped
pub fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    if radius <= 0.0 {
        return;
    }
    let x0 = (cx - radius).floor().max(0.0) as u32;
    let y0 = (cy - radius).floor().max(0.0) as u32;
    let x1 = ((cx + radius).ceil().max(0.0) as u32).min(img.width());
    let y1 = ((cy + radius).ceil().max(0.0) as u32).min(img.height());
    let r2 = radius * radius;

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

// Lay `overlay` over `base` with the overlay's alpha scaled by `opacity`.
// Base alpha is kept; a mismatched overlay leaves the base unchanged.
pub fn composite(base: &RgbaImage, overlay: &RgbaImage, opacity: f32) -> RgbaImage {
    let mut out = base.clone();
    if overlay.dimensions() != base.dimensions() {
        return out;
    }
    let opacity = opacity.clamp(0.0, 1.0);
    for (dst, src) in out.pixels_mut().zip(overlay.pixels()) {
        let a = src[3] as f32 / 255.0 * opacity;
        for c in 0..3 {
            dst[c] = (dst[c] as f32 * (1.0 - a) + src[c] as f32 * a).round() as u8;
        }
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Bump,
    Clouds,
}

impl TextureKind {
    pub const ALL: [TextureKind; 4] = [
        TextureKind::Diffuse,
        TextureKind::Specular,
        TextureKind::Bump,
        TextureKind::Clouds,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextureKind::Diffuse => "diffuse",
            TextureKind::Specular => "specular",
            TextureKind::Bump => "bump",
            TextureKind::Clouds => "clouds",
        }
    }
}

// The four maps of one planet surface, all the same size
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureSet {
    pub diffuse: RgbaImage,
    pub specular: RgbaImage,
    pub bump: RgbaImage,
    pub clouds: RgbaImage,
}

impl TextureSet {
    // Fully transparent black maps
    pub fn new(width: u32, height: u32) -> Self {
        let blank = RgbaImage::new(width, height);
        Self {
            diffuse: blank.clone(),
            specular: blank.clone(),
            bump: blank.clone(),
            clouds: blank,
        }
    }

    pub fn width(&self) -> u32 {
        self.diffuse.width()
    }

    pub fn height(&self) -> u32 {
        self.diffuse.height()
    }

    pub fn get(&self, kind: TextureKind) -> &RgbaImage {
        match kind {
            TextureKind::Diffuse => &self.diffuse,
            TextureKind::Specular => &self.specular,
            TextureKind::Bump => &self.bump,
            TextureKind::Clouds => &self.clouds,
        }
    }

    // Diffuse map with the cloud layer laid on top
    pub fn composite(&self, cloud_opacity: f32) -> RgbaImage {
        composite(&self.diffuse, &self.clouds, cloud_opacity)
    }
}
