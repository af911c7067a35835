use std::f64::consts::{FRAC_PI_2, PI, TAU};

// Longitude/latitude (radians) of a pixel centre in an equirectangular
// raster: x spans -π..π left to right, y spans +π/2..-π/2 top to bottom.
pub fn pixel_lon_lat(x: u32, y: u32, width: u32, height: u32) -> (f64, f64) {
    let u = (x as f64 + 0.5) / width as f64;
    let v = (y as f64 + 0.5) / height as f64;
    (u * TAU - PI, FRAC_PI_2 - v * PI)
}

// Unit-sphere normal for a longitude/latitude pair, y up
pub fn sphere_normal(lon: f64, lat: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    [cos_lat * cos_lon, sin_lat, cos_lat * sin_lon]
}

// Scale a normal and shift it off the origin so the field has no symmetry
// around the sphere centre
pub fn sample_point(normal: [f64; 3], scale: f64, offset: f64) -> [f64; 3] {
    [
        normal[0] * scale + offset,
        normal[1] * scale + offset,
        normal[2] * scale + offset,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utils_normals_are_unit_length() {
        for y in 0..16 {
            for x in 0..32 {
                let (lon, lat) = pixel_lon_lat(x, y, 32, 16);
                let n = sphere_normal(lon, lat);
                let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
                assert!((len - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn utils_top_row_is_north() {
        let (_, lat_top) = pixel_lon_lat(0, 0, 8, 4);
        let (_, lat_bottom) = pixel_lon_lat(0, 3, 8, 4);
        assert!(lat_top > 0.0 && lat_bottom < 0.0);
        assert!((lat_top + lat_bottom).abs() < 1e-12);
    }

    #[test]
    fn utils_sample_point_offsets_every_axis() {
        let p = sample_point([1.0, 0.0, -1.0], 2.0, 10.0);
        assert_eq!(p, [12.0, 10.0, 8.0]);
    }
}
