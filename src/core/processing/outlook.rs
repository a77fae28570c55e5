//! Outlook generation: benchmark ("return point") gaps, predictions,
//! expected yield, and the monitoring plan, all derived from the fused
//! classification result.
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::core::processing::fusion::{ClassificationResult, RiskFactor};
use crate::core::processing::pipeline::SpectralAnalysis;
use crate::core::thresholds;
use crate::types::{Classification, MonitoringFrequency, Priority, Severity};

/// (NDVI, EVI, moisture) triple used for benchmark comparison.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkMetrics {
    pub ndvi: f64,
    pub evi: f64,
    pub moisture: f64,
}

/// Distance between the patch's current index values and the reference
/// target for its classification tier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPoints {
    pub current: BenchmarkMetrics,
    pub target: BenchmarkMetrics,
    pub gaps: BenchmarkMetrics,
    pub recommendations: Vec<String>,
}

/// Benchmark comparison, defined only for the three upper agricultural
/// tiers. Other classifications have no reference target and return `None`.
pub fn return_points(
    ndvi: f64,
    evi: f64,
    moisture: f64,
    classification: Classification,
) -> Option<ReturnPoints> {
    let bench = match classification {
        Classification::AgriculturalExcellent => &thresholds::BENCHMARK_EXCELLENT,
        Classification::AgriculturalHealthy => &thresholds::BENCHMARK_HEALTHY,
        Classification::AgriculturalModerate => &thresholds::BENCHMARK_MODERATE,
        _ => return None,
    };

    let target = BenchmarkMetrics { ndvi: bench.ndvi, evi: bench.evi, moisture: bench.moisture };
    let gaps = BenchmarkMetrics {
        ndvi: (target.ndvi - ndvi).max(0.0),
        evi: (target.evi - evi).max(0.0),
        moisture: (target.moisture - moisture).max(0.0),
    };

    let mut recommendations = Vec::new();
    if ndvi < target.ndvi {
        recommendations
            .push("Improve vegetation health through fertilization or pest control".to_string());
    }
    if moisture < target.moisture {
        recommendations
            .push("Raise soil moisture through irrigation or mulching".to_string());
    }

    Some(ReturnPoints {
        current: BenchmarkMetrics { ndvi, evi, moisture },
        target,
        gaps,
        recommendations,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldFactors {
    pub vegetation: f64,
    pub health: f64,
    pub issues: usize,
}

/// Yield estimate relative to a nominal 100% season.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedYield {
    pub percentage: f64,
    pub confidence: f64,
    pub factors: YieldFactors,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    pub predictions: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_analysis_date: NaiveDate,
    pub priority: Priority,
    pub expected_yield: ExpectedYield,
    pub risk_factors: Vec<RiskFactor>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringThresholds {
    pub ndvi_min: f64,
    pub moisture_min: f64,
    pub variability_max: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringPlan {
    pub frequency: MonitoringFrequency,
    pub parameters: Vec<String>,
    pub alerts: Vec<String>,
    pub actions: Vec<&'static str>,
    pub thresholds: MonitoringThresholds,
}

/// Predictions plus monitoring plan for one analyzed patch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outlook {
    pub predictions: Predictions,
    pub monitoring: MonitoringPlan,
}

/// Derive the outlook from the fused result, stamped relative to `Utc::now()`.
pub fn outlook(spectral: &SpectralAnalysis, result: &ClassificationResult) -> Outlook {
    outlook_at(spectral, result, Utc::now())
}

/// Deterministic variant of [`outlook`] for callers that control the clock.
pub fn outlook_at(
    spectral: &SpectralAnalysis,
    result: &ClassificationResult,
    now: DateTime<Utc>,
) -> Outlook {
    Outlook {
        predictions: predictions(spectral, result, now),
        monitoring: monitoring_plan(spectral, result),
    }
}

fn predictions(
    spectral: &SpectralAnalysis,
    result: &ClassificationResult,
    now: DateTime<Utc>,
) -> Predictions {
    let mut predictions = Vec::new();

    if result.health_score > thresholds::HEALTH_BAND_GOOD {
        predictions.push("Excellent productive potential for the next 30 days".to_string());
        predictions.push("Conditions favor crop development".to_string());
    } else if result.health_score > thresholds::HEALTH_BAND_LOW {
        predictions.push("Good productive potential with some points of attention".to_string());
        predictions.push("Monitoring recommended to sustain quality".to_string());
    } else {
        predictions.push("Productive potential compromised, intervention required".to_string());
        predictions.push("Risk of losses without corrective action".to_string());
    }

    let crop_known = !result.crop.crop_type.eq_ignore_ascii_case("unknown");
    let mut recommendations: Vec<String> = Vec::new();
    if crop_known {
        predictions.push(format!(
            "Crop {} at stage {}",
            result.crop.crop_type, result.crop.growth_stage
        ));

        match result.crop.crop_type.to_lowercase().as_str() {
            "soja" => {
                recommendations.push("Monitor for Asian rust".to_string());
                recommendations.push("Check potassium levels".to_string());
            }
            "milho" => {
                recommendations.push("Watch for fall armyworm".to_string());
                recommendations.push("Monitor nitrogen levels".to_string());
            }
            "cana-de-açúcar" => {
                recommendations.push("Check sprouting and tillering".to_string());
                recommendations.push("Control weed pressure".to_string());
            }
            _ => recommendations.push("Follow the crop-specific calendar".to_string()),
        }
    }

    for issue in &result.issues {
        recommendations.push(issue.recommendation.clone());
    }

    let mut deduped: Vec<String> = Vec::new();
    for rec in recommendations {
        if !deduped.contains(&rec) {
            deduped.push(rec);
        }
    }

    let priority = if result.health_score < thresholds::HEALTH_BAND_LOW {
        Priority::High
    } else if result.health_score < thresholds::HEALTH_BAND_GOOD {
        Priority::Medium
    } else {
        Priority::Low
    };

    Predictions {
        predictions,
        recommendations: deduped,
        next_analysis_date: (now + Duration::days(14)).date_naive(),
        priority,
        expected_yield: expected_yield(spectral, result),
        risk_factors: result.advanced_metrics.risk_assessment.clone(),
    }
}

/// Nominal-yield estimate scaled by NDVI tier, health score, and the issue
/// count (floored so a long issue list cannot zero the estimate).
fn expected_yield(spectral: &SpectralAnalysis, result: &ClassificationResult) -> ExpectedYield {
    let ndvi = spectral.ndvi.mean;
    let mut factor = if ndvi > thresholds::NDVI.excellent {
        1.2
    } else if ndvi > thresholds::NDVI.good {
        1.0
    } else if ndvi > thresholds::NDVI.moderate {
        0.8
    } else {
        0.5
    };

    factor *= result.health_score / 100.0;
    factor *= (1.0 - result.issues.len() as f64 * 0.1).max(0.3);

    ExpectedYield {
        percentage: (100.0 * factor).round(),
        confidence: result.confidence,
        factors: YieldFactors {
            vegetation: ndvi,
            health: result.health_score,
            issues: result.issues.len(),
        },
    }
}

fn monitoring_plan(spectral: &SpectralAnalysis, result: &ClassificationResult) -> MonitoringPlan {
    let frequency = if result.health_score < thresholds::HEALTH_BAND_LOW {
        MonitoringFrequency::Weekly
    } else if result.health_score < thresholds::HEALTH_BAND_GOOD {
        MonitoringFrequency::Biweekly
    } else {
        MonitoringFrequency::Monthly
    };

    let mut parameters = vec![
        "NDVI (vegetation health)".to_string(),
        "EVI (enhanced vegetation)".to_string(),
        "Soil moisture".to_string(),
        "Spatial variability".to_string(),
    ];
    if !result.crop.crop_type.eq_ignore_ascii_case("unknown") {
        parameters.push(format!("{} growth stage", result.crop.crop_type));
    }

    let mut alerts = Vec::new();
    if result.health_score < thresholds::HEALTH_ATTENTION {
        alerts.push("Health score below target".to_string());
    }
    if spectral.variability.ndvi.coefficient > thresholds::RISK_VARIABILITY {
        alerts.push("High variability detected".to_string());
    }
    for issue in &result.issues {
        if issue.severity == Severity::High {
            alerts.push(format!("Critical: {}", issue.description));
        }
    }

    MonitoringPlan {
        frequency,
        parameters,
        alerts,
        actions: vec![
            "Regular spectral analysis",
            "Visual field monitoring",
            "Soil moisture checks",
            "Pest and disease control",
        ],
        thresholds: MonitoringThresholds {
            ndvi_min: thresholds::MONITOR_NDVI_MIN,
            moisture_min: thresholds::MONITOR_MOISTURE_MIN,
            variability_max: thresholds::MONITOR_VARIABILITY_MAX,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    use crate::core::processing::fusion::fuse;
    use crate::io::ai::AiAssessment;
    use crate::io::bands::BandSet;
    use crate::core::processing::pipeline::process_bands;
    use crate::io::bands::HEADER_MARGIN;

    fn buffer_with_payload(payload: &[f32]) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_MARGIN];
        for v in payload {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf.extend_from_slice(&vec![0u8; HEADER_MARGIN]);
        buf
    }

    fn healthy_farm() -> (SpectralAnalysis, ClassificationResult) {
        let constant = |v: f32| buffer_with_payload(&[v; 200]);
        let bands = BandSet {
            ndvi: constant(0.45),
            evi: constant(0.3),
            savi: constant(0.35),
            urban: constant(0.02),
            water: constant(0.05),
            moisture: constant(0.25),
        };
        let spectral = process_bands(&bands).unwrap();
        let result = fuse(&spectral, &AiAssessment::neutral());
        (spectral, result)
    }

    #[test]
    fn benchmark_gaps_for_healthy_tier() {
        let rp = return_points(0.4, 0.35, 0.2, Classification::AgriculturalHealthy).unwrap();
        assert_relative_eq!(rp.target.ndvi, 0.5);
        assert_relative_eq!(rp.gaps.ndvi, 0.1, epsilon = 1e-12);
        assert_relative_eq!(rp.gaps.evi, 0.0); // already above target
        assert_relative_eq!(rp.gaps.moisture, 0.1, epsilon = 1e-12);
        // NDVI and moisture both below target: two recommendations.
        assert_eq!(rp.recommendations.len(), 2);
    }

    #[test]
    fn no_benchmark_outside_agricultural_tiers() {
        assert!(return_points(0.3, 0.2, 0.2, Classification::UrbanDense).is_none());
        assert!(return_points(0.3, 0.2, 0.2, Classification::WaterBody).is_none());
        assert!(return_points(0.1, 0.1, 0.1, Classification::AgriculturalPoor).is_none());
    }

    #[test]
    fn next_analysis_is_two_weeks_out() {
        let (spectral, result) = healthy_farm();
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let outlook = outlook_at(&spectral, &result, now);
        assert_eq!(
            outlook.predictions.next_analysis_date,
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
        );
    }

    #[test]
    fn monitoring_frequency_tracks_health_bands() {
        let (spectral, mut result) = healthy_farm();

        result.health_score = 50.0;
        let weekly = outlook(&spectral, &result);
        assert_eq!(weekly.monitoring.frequency, MonitoringFrequency::Weekly);
        assert_eq!(weekly.predictions.priority, Priority::High);

        result.health_score = 70.0;
        let biweekly = outlook(&spectral, &result);
        assert_eq!(biweekly.monitoring.frequency, MonitoringFrequency::Biweekly);

        result.health_score = 90.0;
        let monthly = outlook(&spectral, &result);
        assert_eq!(monthly.monitoring.frequency, MonitoringFrequency::Monthly);
        assert_eq!(monthly.predictions.priority, Priority::Low);
    }

    #[test]
    fn expected_yield_shrinks_with_issues() {
        let (spectral, result) = healthy_farm();
        let clean = expected_yield(&spectral, &result);

        let mut with_issues = result.clone();
        with_issues.health_score = 60.0;
        with_issues.issues = fuse(&spectral, &{
            let mut ai = AiAssessment::neutral();
            ai.problems_detected = vec!["a".into(), "b".into(), "c".into()];
            ai
        })
        .issues;
        let worse = expected_yield(&spectral, &with_issues);

        assert!(worse.percentage < clean.percentage);
        assert!(worse.percentage >= 100.0 * 0.5 * 0.3); // issue floor holds
    }

    #[test]
    fn alerts_include_high_severity_issues() {
        let (spectral, mut result) = healthy_farm();
        result.health_score = 40.0;
        result.issues = vec![crate::core::processing::fusion::Issue {
            kind: crate::core::processing::fusion::IssueKind::PoorHealth,
            severity: Severity::High,
            description: "Critical health score".to_string(),
            recommendation: "Urgent intervention required".to_string(),
        }];

        let plan = monitoring_plan(&spectral, &result);
        assert!(plan.alerts.iter().any(|a| a.starts_with("Critical:")));
        assert!(plan.alerts.iter().any(|a| a.contains("below target")));
    }
}
