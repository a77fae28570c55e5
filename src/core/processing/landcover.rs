//! Land-cover breakdown from per-index threshold crossings.
//! NDVI samples are partitioned into non-overlapping vegetation tiers;
//! urban, water and wet-soil fractions come from their own indices. All
//! percentages share the NDVI valid-sample count as denominator.
use serde::Serialize;

use crate::core::thresholds;
use crate::error::{Error, Result};
use crate::io::bands::BandSample;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VegetationCover {
    pub total: f64,
    pub excellent: f64,
    pub good: f64,
    pub moderate: f64,
    pub poor: f64,
}

/// Percentage attribution of the patch to cover categories. Read-only after
/// construction; computed once per analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandCoverBreakdown {
    pub vegetation: VegetationCover,
    pub urban: f64,
    pub water: f64,
    pub wet_soil: f64,
    pub bare_soil: f64,
}

/// Classify land cover from the NDVI, urban, water and moisture samples.
///
/// The NDVI tiers are exhaustive and non-overlapping, so
/// `excellent + good + moderate + poor + bare_soil` always sums to 100
/// (modulo float rounding). Urban/water/wet-soil fractions use independent
/// thresholds and are not constrained to the same total.
pub fn classify_land_cover(
    ndvi: &BandSample,
    urban: &BandSample,
    water: &BandSample,
    moisture: &BandSample,
) -> Result<LandCoverBreakdown> {
    if ndvi.is_empty() {
        return Err(Error::EmptySample { index: ndvi.index });
    }
    let total = ndvi.len() as f64;
    let pct = |count: usize| (count as f64 / total) * 100.0;

    let t = &thresholds::NDVI;
    let excellent = ndvi.values.iter().filter(|&&v| v > t.excellent).count();
    let good = ndvi
        .values
        .iter()
        .filter(|&&v| v > t.good && v <= t.excellent)
        .count();
    let moderate = ndvi
        .values
        .iter()
        .filter(|&&v| v > t.moderate && v <= t.good)
        .count();
    let poor = ndvi
        .values
        .iter()
        .filter(|&&v| v > t.poor && v <= t.moderate)
        .count();
    let none = ndvi.values.iter().filter(|&&v| v <= t.poor).count();

    let urban_hits = urban
        .values
        .iter()
        .filter(|&&v| v > thresholds::URBAN_DETECTION)
        .count();
    let water_hits = water.values.iter().filter(|&&v| v > thresholds::WATER_BODY).count();
    let wet_hits = moisture
        .values
        .iter()
        .filter(|&&v| v > thresholds::MOISTURE.medium)
        .count();

    Ok(LandCoverBreakdown {
        vegetation: VegetationCover {
            total: pct(excellent + good + moderate + poor),
            excellent: pct(excellent),
            good: pct(good),
            moderate: pct(moderate),
            poor: pct(poor),
        },
        urban: pct(urban_hits),
        water: pct(water_hits),
        wet_soil: pct(wet_hits),
        bare_soil: pct(none),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    use crate::types::SpectralIndexKind;

    fn sample(index: SpectralIndexKind, values: Vec<f64>) -> BandSample {
        BandSample {
            index,
            values: Array1::from_vec(values),
            is_fallback: false,
        }
    }

    #[test]
    fn ndvi_tiers_partition_to_one_hundred_percent() {
        // One sample per tier, plus a bare-soil one.
        let ndvi = sample(SpectralIndexKind::Ndvi, vec![0.9, 0.5, 0.3, 0.15, 0.05]);
        let other = sample(SpectralIndexKind::Urban, vec![0.0; 5]);
        let cover = classify_land_cover(
            &ndvi,
            &other,
            &sample(SpectralIndexKind::Water, vec![0.0; 5]),
            &sample(SpectralIndexKind::Moisture, vec![0.0; 5]),
        )
        .unwrap();

        let v = &cover.vegetation;
        assert_relative_eq!(
            v.excellent + v.good + v.moderate + v.poor + cover.bare_soil,
            100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(v.total, 80.0);
        assert_relative_eq!(cover.bare_soil, 20.0);
    }

    #[test]
    fn tier_boundaries_are_exclusive_above() {
        // Exactly 0.6 is good, not excellent; exactly 0.1 is bare soil.
        let ndvi = sample(SpectralIndexKind::Ndvi, vec![0.6, 0.1]);
        let empty = |k| sample(k, vec![0.0]);
        let cover = classify_land_cover(
            &ndvi,
            &empty(SpectralIndexKind::Urban),
            &empty(SpectralIndexKind::Water),
            &empty(SpectralIndexKind::Moisture),
        )
        .unwrap();

        assert_relative_eq!(cover.vegetation.excellent, 0.0);
        assert_relative_eq!(cover.vegetation.good, 50.0);
        assert_relative_eq!(cover.bare_soil, 50.0);
    }

    #[test]
    fn other_categories_use_their_own_thresholds() {
        let ndvi = sample(SpectralIndexKind::Ndvi, vec![0.5; 4]);
        let urban = sample(SpectralIndexKind::Urban, vec![0.2, 0.05, 0.15, 0.0]);
        let water = sample(SpectralIndexKind::Water, vec![0.4, 0.1, 0.0, 0.0]);
        let moisture = sample(SpectralIndexKind::Moisture, vec![0.25, 0.25, 0.1, 0.0]);

        let cover = classify_land_cover(&ndvi, &urban, &water, &moisture).unwrap();
        assert_relative_eq!(cover.urban, 50.0);
        assert_relative_eq!(cover.water, 25.0);
        assert_relative_eq!(cover.wet_soil, 50.0);
    }
}
