//! Per-index statistics and variability metrics.
//! Statistics are computed only over validated samples; the band decoder's
//! fallback guarantee means every index has at least one sample by the time
//! it reaches this module.
use ndarray::Array1;
use serde::Serialize;

use crate::core::thresholds;
use crate::error::{Error, Result};
use crate::io::bands::BandSample;
use crate::types::{SpectralIndexKind, VariabilityLevel};

/// Summary statistics for one spectral index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatistics {
    pub index: SpectralIndexKind,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub is_fallback: bool,
}

/// Compute mean, population standard deviation, min, max and count for a
/// band sample. Empty input is a hard error rather than NaN propagation;
/// the decoder's fallback makes it unreachable in the normal pipeline.
pub fn statistics(sample: &BandSample) -> Result<IndexStatistics> {
    if sample.is_empty() {
        return Err(Error::EmptySample { index: sample.index });
    }

    let n = sample.len() as f64;
    let mean = sample.values.sum() / n;
    let variance = sample.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in sample.values.iter() {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    Ok(IndexStatistics {
        index: sample.index,
        mean,
        std: variance.sqrt(),
        min,
        max,
        count: sample.len(),
        is_fallback: sample.is_fallback,
    })
}

/// Dispersion metrics based on the coefficient of variation (`std / |mean|`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariabilityMetrics {
    pub mean: f64,
    pub std: f64,
    pub variance: f64,
    pub coefficient: f64,
    pub interpretation: VariabilityLevel,
}

/// Compute variability metrics for a sample sequence.
///
/// A mean within `MEAN_EPSILON` of zero makes the coefficient meaningless;
/// it is reported as 0.0 with an `Indeterminate` interpretation instead of
/// dividing toward infinity. An empty sequence gets the same treatment.
pub fn variability(values: &Array1<f64>) -> VariabilityMetrics {
    if values.is_empty() {
        return VariabilityMetrics {
            mean: 0.0,
            std: 0.0,
            variance: 0.0,
            coefficient: 0.0,
            interpretation: VariabilityLevel::Indeterminate,
        };
    }

    let n = values.len() as f64;
    let mean = values.sum() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let (coefficient, interpretation) = if mean.abs() < thresholds::MEAN_EPSILON {
        (0.0, VariabilityLevel::Indeterminate)
    } else {
        let cv = std / mean.abs();
        let level = if cv < thresholds::VARIABILITY.low {
            VariabilityLevel::Low
        } else if cv < thresholds::VARIABILITY.medium {
            VariabilityLevel::Medium
        } else {
            VariabilityLevel::High
        };
        (cv, level)
    };

    VariabilityMetrics {
        mean,
        std,
        variance,
        coefficient,
        interpretation,
    }
}

/// Spatial consistency of a sample sequence: the sequence is split into ten
/// chunks and the variance of the chunk means is inverted into a 0-100
/// score. Uniform fields score high, patchy fields low.
pub fn spatial_consistency(values: &Array1<f64>) -> f64 {
    let chunk_size = values.len() / 10;
    if chunk_size == 0 {
        return 0.0;
    }

    let means: Vec<f64> = values
        .as_slice()
        .unwrap_or(&[])
        .chunks(chunk_size)
        .map(|chunk| chunk.iter().sum::<f64>() / chunk.len() as f64)
        .collect();

    let overall = means.iter().sum::<f64>() / means.len() as f64;
    let variance =
        means.iter().map(|m| (m - overall).powi(2)).sum::<f64>() / means.len() as f64;

    (1.0 - variance).max(0.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn sample(index: SpectralIndexKind, values: Vec<f64>) -> BandSample {
        BandSample {
            index,
            values: Array1::from_vec(values),
            is_fallback: false,
        }
    }

    #[test]
    fn statistics_orders_min_mean_max() {
        let s = sample(SpectralIndexKind::Ndvi, vec![0.2, 0.4, 0.6, 0.8]);
        let stats = statistics(&s).unwrap();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        assert_relative_eq!(stats.mean, 0.5);
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn statistics_uses_population_std() {
        let s = sample(SpectralIndexKind::Evi, vec![0.1, 0.3]);
        let stats = statistics(&s).unwrap();
        // Population std of {0.1, 0.3} is 0.1, not the sample std 0.1414.
        assert_relative_eq!(stats.std, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn statistics_rejects_empty_sample() {
        let s = sample(SpectralIndexKind::Ndvi, vec![]);
        assert!(matches!(
            statistics(&s),
            Err(Error::EmptySample { index: SpectralIndexKind::Ndvi })
        ));
    }

    #[test]
    fn variability_buckets() {
        // Constant sequence: zero dispersion.
        let low = variability(&array![0.5, 0.5, 0.5, 0.5]);
        assert_eq!(low.interpretation, VariabilityLevel::Low);
        assert_relative_eq!(low.coefficient, 0.0);

        // mean 0.5, std 0.2 -> cv 0.4.
        let medium = variability(&array![0.3, 0.7, 0.3, 0.7]);
        assert_eq!(medium.interpretation, VariabilityLevel::Medium);
        assert_relative_eq!(medium.coefficient, 0.4, epsilon = 1e-12);

        // mean 0.4, std 0.22 -> cv 0.55: high variability.
        let high = variability(&array![0.18, 0.62, 0.18, 0.62]);
        assert!(high.coefficient > 0.5);
        assert_eq!(high.interpretation, VariabilityLevel::High);
    }

    #[test]
    fn variability_guards_near_zero_mean() {
        let m = variability(&array![0.5, -0.5, 0.5, -0.5]);
        assert_eq!(m.interpretation, VariabilityLevel::Indeterminate);
        assert_eq!(m.coefficient, 0.0);
        assert!(m.coefficient.is_finite());
    }

    #[test]
    fn spatial_consistency_prefers_uniform_fields() {
        let uniform = Array1::from_elem(100, 0.5);
        let mut patchy = vec![0.9; 50];
        patchy.extend(vec![-0.9; 50]);
        let patchy = Array1::from_vec(patchy);

        assert!(spatial_consistency(&uniform) > spatial_consistency(&patchy));
        assert_relative_eq!(spatial_consistency(&uniform), 100.0);
    }
}
