//! Single source of truth for every spectral threshold used by land-cover
//! classification, health scoring, issue detection, risk assessment, and
//! benchmarking. Keeping them in one table prevents the classifier and the
//! scorer from drifting apart.

/// NDVI vegetation tiers. A sample above `excellent` counts as excellent
/// cover, above `good` as good cover, and so on; at or below `poor` the
/// pixel is bare soil.
pub struct NdviTiers {
    pub excellent: f64,
    pub good: f64,
    pub moderate: f64,
    pub poor: f64,
}

pub const NDVI: NdviTiers = NdviTiers {
    excellent: 0.6,
    good: 0.4,
    moderate: 0.2,
    poor: 0.1,
};

pub struct EviTiers {
    pub excellent: f64,
    pub good: f64,
    pub moderate: f64,
}

pub const EVI: EviTiers = EviTiers {
    excellent: 0.4,
    good: 0.2,
    moderate: 0.1,
};

pub struct MoistureTiers {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

pub const MOISTURE: MoistureTiers = MoistureTiers {
    high: 0.3,
    medium: 0.2,
    low: 0.1,
};

/// Urban-index level above which a pixel counts as built-up.
pub const URBAN_DETECTION: f64 = 0.1;

/// Water-index level above which a pixel (or the patch mean) reads as open water.
pub const WATER_BODY: f64 = 0.3;

/// Coefficient-of-variation buckets: below `low` is uniform, below `medium`
/// is moderately variable, anything else is highly variable.
pub struct VariabilityBuckets {
    pub low: f64,
    pub medium: f64,
}

pub const VARIABILITY: VariabilityBuckets = VariabilityBuckets { low: 0.2, medium: 0.5 };

/// A mean with absolute value below this is treated as zero for the
/// coefficient of variation; the interpretation becomes indeterminate
/// instead of dividing toward infinity.
pub const MEAN_EPSILON: f64 = 1e-6;

/// Health score below which the patch carries a `poor_health` issue.
pub const POOR_HEALTH_SCORE: f64 = 50.0;

/// Health-score bands driving outlook priority and monitoring cadence.
pub const HEALTH_ATTENTION: f64 = 70.0;
pub const HEALTH_BAND_LOW: f64 = 60.0;
pub const HEALTH_BAND_GOOD: f64 = 80.0;

/// Stress-index shortfall references: NDVI below `NDVI_STRESS_FLOOR` and
/// moisture below `MOISTURE_STRESS_FLOOR` contribute proportionally.
pub const NDVI_STRESS_FLOOR: f64 = 0.3;
pub const MOISTURE_STRESS_FLOOR: f64 = 0.2;

/// Risk-assessment trip points.
pub const RISK_NDVI: f64 = 0.3;
pub const RISK_MOISTURE: f64 = 0.15;
pub const RISK_VARIABILITY: f64 = 0.4;

/// Sustainability bonuses/penalties applied on top of the base score.
pub const SUSTAINABILITY_BASE: f64 = 70.0;
pub const VEGETATION_BONUS_HIGH: f64 = 80.0;
pub const VEGETATION_BONUS_MID: f64 = 60.0;
pub const UNIFORMITY_BONUS_CV: f64 = 0.3;

/// Benchmark (NDVI, EVI, moisture) targets per agricultural tier, used by
/// the return-point comparison.
pub struct Benchmark {
    pub ndvi: f64,
    pub evi: f64,
    pub moisture: f64,
}

pub const BENCHMARK_EXCELLENT: Benchmark = Benchmark { ndvi: 0.7, evi: 0.5, moisture: 0.4 };
pub const BENCHMARK_HEALTHY: Benchmark = Benchmark { ndvi: 0.5, evi: 0.3, moisture: 0.3 };
pub const BENCHMARK_MODERATE: Benchmark = Benchmark { ndvi: 0.3, evi: 0.2, moisture: 0.2 };

/// Monitoring-plan alert thresholds surfaced to the caller.
pub const MONITOR_NDVI_MIN: f64 = 0.3;
pub const MONITOR_MOISTURE_MIN: f64 = 0.2;
pub const MONITOR_VARIABILITY_MAX: f64 = 0.5;
