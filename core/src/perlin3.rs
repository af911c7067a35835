use crate::NoiseGenerator;

// Ken Perlin's reference permutation of 0..=255
pub const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

// Duplicate a 256 table into 512 entries so `perm[a + b]` never needs a modulo
const fn doubled(p: &[u8; 256]) -> [u8; 512] {
    let mut perm = [0u8; 512];
    let mut i = 0;
    while i < 512 {
        perm[i] = p[i & 255];
        i += 1;
    }
    perm
}

// The lattice is never mutated after construction
#[derive(Clone, Debug)]
pub struct Perlin3D {
    perm: [u8; 512],
}

impl Default for Perlin3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Perlin3D {
    // Uses the reference permutation
    pub const fn new() -> Self {
        Self {
            perm: doubled(&PERMUTATION),
        }
    }

    // Builds an instance-owned permutation from a seed.
    // Same xorshift + Fisher–Yates shuffle for every seed, so a seed always
    // maps to the same lattice.
    pub fn with_seed(seed: u64) -> Self {
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut x = seed ^ 0xAABBCCDDEEFF1122_u64;
        // xorshift never leaves zero
        if x == 0 {
            x = 0x9E3779B97F4A7C15;
        }
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        for i in (1..256).rev() {
            let j = (rng() % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        Self { perm: doubled(&p) }
    }

    // The 256 distinct entries of the lattice
    pub fn permutation(&self) -> &[u8] {
        &self.perm[..256]
    }

    // 6t^5 - 15t^4 + 10t^3; first and second derivatives vanish at 0 and 1
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Low 4 bits of the hash pick one of 12 cube-edge gradients
    #[inline]
    fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
        let h = hash & 0xF;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        let u = if h & 1 == 0 { u } else { -u };
        let v = if h & 2 == 0 { v } else { -v };
        u + v
    }

    #[inline]
    fn hash(&self, x: usize, y: usize, z: usize) -> u8 {
        let p = &self.perm;
        p[p[p[x] as usize + y] as usize + z]
    }

    // Roughly in [-1, 1]. Floor, not truncate, so negative inputs land in the right cell
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let zi = (fz as i64 & 255) as usize;

        let xf = x - fx;
        let yf = y - fy;
        let zf = z - fz;

        let u = Self::fade(xf);
        let v = Self::fade(yf);
        let w = Self::fade(zf);

        let aaa = self.hash(xi, yi, zi);
        let aba = self.hash(xi, yi + 1, zi);
        let aab = self.hash(xi, yi, zi + 1);
        let abb = self.hash(xi, yi + 1, zi + 1);
        let baa = self.hash(xi + 1, yi, zi);
        let bba = self.hash(xi + 1, yi + 1, zi);
        let bab = self.hash(xi + 1, yi, zi + 1);
        let bbb = self.hash(xi + 1, yi + 1, zi + 1);

        let x1 = Self::lerp(
            Self::grad(aaa, xf, yf, zf),
            Self::grad(baa, xf - 1.0, yf, zf),
            u,
        );
        let x2 = Self::lerp(
            Self::grad(aba, xf, yf - 1.0, zf),
            Self::grad(bba, xf - 1.0, yf - 1.0, zf),
            u,
        );
        let y1 = Self::lerp(x1, x2, v);

        let x3 = Self::lerp(
            Self::grad(aab, xf, yf, zf - 1.0),
            Self::grad(bab, xf - 1.0, yf, zf - 1.0),
            u,
        );
        let x4 = Self::lerp(
            Self::grad(abb, xf, yf - 1.0, zf - 1.0),
            Self::grad(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
            u,
        );
        let y2 = Self::lerp(x3, x4, v);

        Self::lerp(y1, y2, w)
    }
}

impl NoiseGenerator for Perlin3D {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::{PERMUTATION, Perlin3D};

    fn is_permutation(p: &[u8]) -> bool {
        let mut seen = [false; 256];
        for &v in p {
            if seen[v as usize] {
                return false;
            }
            seen[v as usize] = true;
        }
        p.len() == 256
    }

    #[test]
    fn perlin3_reference_table_is_permutation() {
        assert!(is_permutation(&PERMUTATION));
        assert_eq!(Perlin3D::new().permutation(), &PERMUTATION[..]);
    }

    #[test]
    fn perlin3_seeded_table_is_permutation() {
        for seed in [0, 1, 42, 2025, u64::MAX] {
            assert!(is_permutation(Perlin3D::with_seed(seed).permutation()));
        }
        assert_ne!(
            Perlin3D::with_seed(1).permutation(),
            Perlin3D::with_seed(2).permutation()
        );
    }

    #[test]
    fn perlin3_determinism() {
        let p1 = Perlin3D::new();
        let p2 = Perlin3D::new();
        let a = p1.noise(1.23, 4.56, 7.89);
        let b = p2.noise(1.23, 4.56, 7.89);
        assert_eq!(a.to_bits(), b.to_bits());

        let s1 = Perlin3D::with_seed(2025);
        let s2 = Perlin3D::with_seed(2025);
        assert_eq!(
            s1.noise(-3.3, 0.7, 12.1).to_bits(),
            s2.noise(-3.3, 0.7, 12.1).to_bits()
        );
    }

    #[test]
    fn perlin3_reference_values() {
        let p = Perlin3D::new();
        for &((x, y, z), expected) in &[
            ((0.5, 0.5, 0.5), -0.25),
            ((1.23, 4.56, 7.89), -0.5436311580588242),
            ((-3.3, 0.7, 12.1), -0.479883188620416),
        ] {
            let v = p.noise(x, y, z);
            assert!((v - expected).abs() < 1e-12, "({x}, {y}, {z}) gave {v}");
        }
    }

    #[test]
    fn perlin3_zero_at_lattice_points() {
        let p = Perlin3D::new();
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (3.0, -7.0, 11.0), (-256.0, 512.0, 1.0)] {
            assert!(p.noise(x, y, z).abs() < 1e-12);
        }
    }

    #[test]
    fn perlin3_continuous_across_cell_boundaries() {
        let p = Perlin3D::new();
        let eps = 1e-9;
        for n in -4..=4 {
            let n = n as f64;
            let (y, z) = (0.37, 0.81);
            let left = p.noise(n - eps, y, z);
            let right = p.noise(n + eps, y, z);
            let at = p.noise(n, y, z);
            assert!((left - at).abs() < 1e-6, "x boundary {n}");
            assert!((right - at).abs() < 1e-6, "x boundary {n}");

            let below = p.noise(0.42, n - eps, z);
            let above = p.noise(0.42, n + eps, z);
            assert!((below - above).abs() < 1e-6, "y boundary {n}");

            let front = p.noise(0.42, y, n - eps);
            let back = p.noise(0.42, y, n + eps);
            assert!((front - back).abs() < 1e-6, "z boundary {n}");
        }
    }

    #[test]
    fn perlin3_negative_coordinates_wrap() {
        let p = Perlin3D::new();
        // The lattice repeats every 256 cells
        let a = p.noise(-0.25, -1.5, -3.75);
        let b = p.noise(-0.25 + 256.0, -1.5 + 256.0, -3.75 + 256.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn perlin3_range() {
        let p = Perlin3D::new();
        for i in 0..2000 {
            let t = i as f64 * 0.0731;
            let v = p.noise(t, t * 1.7 - 5.0, 3.0 - t * 0.3);
            assert!((-1.05..=1.05).contains(&v), "value {v} out of range");
        }
    }
}
