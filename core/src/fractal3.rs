use crate::NoiseGenerator;

// Fractal Brownian motion over any 3D source: frequency doubles and amplitude
// halves per octave, and the sum is divided by the total amplitude so the
// result stays near [-1, 1] for any octave count.
pub fn fbm<N: NoiseGenerator + ?Sized>(source: &N, p: [f64; 3], octaves: u32) -> f64 {
    let mut total = 0.0;
    let mut max_amp = 0.0;
    let mut amplitude = 1.0;
    let mut freq = 1.0;

    for _ in 0..octaves {
        total += source.get3(p[0] * freq, p[1] * freq, p[2] * freq) * amplitude;
        max_amp += amplitude;
        amplitude *= 0.5;
        freq *= 2.0;
    }

    if max_amp == 0.0 { 0.0 } else { total / max_amp }
}

#[derive(Clone, Debug)]
pub struct Fractal3D<N> {
    source: N,
    octaves: u32,
}

impl<N: NoiseGenerator> Fractal3D<N> {
    pub fn new(source: N, octaves: u32) -> Self {
        Self { source, octaves }
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn source(&self) -> &N {
        &self.source
    }
}

impl<N: NoiseGenerator> NoiseGenerator for Fractal3D<N> {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        fbm(&self.source, [x, y, z], self.octaves)
    }
}
