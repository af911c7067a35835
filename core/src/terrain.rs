use serde::{Deserialize, Serialize};

use crate::error::TextureError;

// A value falls into the first band whose `max` it is strictly below;
// the last band leaves `max` unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainBand {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub color: [u8; 3],
    pub specular: u8,
    pub bump: u8,
}

impl TerrainBand {
    pub fn new(name: &str, max: Option<f64>, color: [u8; 3], specular: u8, bump: u8) -> Self {
        Self {
            name: name.to_string(),
            max,
            color,
            specular,
            bump,
        }
    }
}

// deep water, shallow water, lowland, highland, icecap
pub fn default_bands() -> Vec<TerrainBand> {
    vec![
        TerrainBand::new("deep water", Some(0.05), [0x1e, 0x40, 0xaf], 230, 0),
        TerrainBand::new("shallow water", Some(0.10), [0x25, 0x63, 0xeb], 200, 12),
        TerrainBand::new("lowland", Some(0.40), [0x05, 0x96, 0x69], 40, 90),
        TerrainBand::new("highland", Some(0.70), [0x06, 0x5f, 0x46], 25, 180),
        TerrainBand::new("icecap", None, [0xf8, 0xfa, 0xfc], 120, 230),
    ]
}

#[derive(Debug, Clone)]
pub struct BandTable {
    bounded: Vec<TerrainBand>,
    top: TerrainBand,
}

impl BandTable {
    pub fn new(bands: &[TerrainBand]) -> Result<Self, TextureError> {
        let (top, rest) = bands.split_last().ok_or(TextureError::NoBands)?;

        let mut previous = f64::NEG_INFINITY;
        for (index, band) in rest.iter().enumerate() {
            let max = band.max.ok_or(TextureError::UnboundedBand(index))?;
            if !max.is_finite() {
                return Err(TextureError::NonFinite { field: "band max", value: max });
            }
            if max <= previous {
                return Err(TextureError::UnorderedBands { index, previous, max });
            }
            previous = max;
        }

        Ok(Self {
            bounded: rest.to_vec(),
            top: TerrainBand { max: None, ..top.clone() },
        })
    }

    // Total over all f64, NaN included
    pub fn classify(&self, value: f64) -> &TerrainBand {
        self.bounded
            .iter()
            .find(|band| band.max.is_some_and(|max| value < max))
            .unwrap_or(&self.top)
    }

    pub fn len(&self) -> usize {
        self.bounded.len() + 1
    }
}

// Zero at or below the threshold, then rising linearly to full opacity at 1.0
pub fn cloud_alpha(value: f64, threshold: f64) -> u8 {
    if value.is_nan() || value <= threshold {
        return 0;
    }
    let coverage = ((value - threshold) / (1.0 - threshold)).min(1.0);
    (coverage * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_default_bands_classify_in_order() {
        let table = BandTable::new(&default_bands()).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.classify(-0.8).name, "deep water");
        assert_eq!(table.classify(0.05).name, "shallow water");
        assert_eq!(table.classify(0.2).name, "lowland");
        assert_eq!(table.classify(0.69).name, "highland");
        assert_eq!(table.classify(0.7).name, "icecap");
        assert_eq!(table.classify(5.0).name, "icecap");
    }

    #[test]
    fn terrain_classifier_is_total() {
        let table = BandTable::new(&default_bands()).unwrap();
        let bands = default_bands();
        for i in 0..=2000 {
            let v = -1.0 + i as f64 * 0.001;
            let band = table.classify(v);
            // exactly one band matches: the first bounded one above v, or the top
            let expected = bands
                .iter()
                .position(|b| b.max.map_or(true, |m| v < m))
                .unwrap();
            assert_eq!(band.name, bands[expected].name);
        }
        assert_eq!(table.classify(f64::NAN).name, "icecap");
    }

    #[test]
    fn terrain_single_band_catches_everything() {
        let table = BandTable::new(&[TerrainBand::new("flat", None, [1, 2, 3], 4, 5)]).unwrap();
        assert_eq!(table.classify(-1.0).color, [1, 2, 3]);
        assert_eq!(table.classify(1.0).bump, 5);
    }

    #[test]
    fn terrain_top_band_max_is_ignored() {
        let mut bands = default_bands();
        bands[4].max = Some(0.9);
        let table = BandTable::new(&bands).unwrap();
        assert_eq!(table.classify(0.95).name, "icecap");
    }

    #[test]
    fn terrain_rejects_bad_tables() {
        assert!(matches!(BandTable::new(&[]), Err(TextureError::NoBands)));

        let mut unbounded = default_bands();
        unbounded[1].max = None;
        assert!(matches!(
            BandTable::new(&unbounded),
            Err(TextureError::UnboundedBand(1))
        ));

        let mut unordered = default_bands();
        unordered[2].max = Some(0.07);
        unordered[1].max = Some(0.08);
        unordered[0].max = Some(0.09);
        assert!(matches!(
            BandTable::new(&unordered),
            Err(TextureError::UnorderedBands { index: 1, .. })
        ));
    }

    #[test]
    fn terrain_cloud_alpha() {
        assert_eq!(cloud_alpha(-0.3, 0.2), 0);
        assert_eq!(cloud_alpha(0.2, 0.2), 0);
        assert_eq!(cloud_alpha(1.0, 0.2), 255);
        assert_eq!(cloud_alpha(1.04, 0.2), 255);
        assert_eq!(cloud_alpha(0.5, 0.0), 128);
        assert_eq!(cloud_alpha(0.0, 0.0), 0);
        assert_eq!(cloud_alpha(f64::NAN, 0.2), 0);
    }
}
