//! Fusion & scoring engine: combines the AI visual assessment with the
//! spectral evidence into the final area classification, health score,
//! issue list, advanced metrics, and crop identification.
//!
//! Rule precedence for the classification: the AI's urban/agricultural call
//! is refined by mean NDVI first, but a mean water index above the
//! water-body threshold overrides everything at a fixed 0.9 confidence.
use serde::Serialize;
use tracing::info;

use crate::core::crops;
use crate::core::processing::outlook::{return_points, ReturnPoints};
use crate::core::processing::pipeline::SpectralAnalysis;
use crate::core::thresholds;
use crate::io::ai::AiAssessment;
use crate::types::{Classification, HealthLabel, RiskLevel, Severity};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    VegetationStress,
    LowMoisture,
    HighVariability,
    AiDetected,
    PoorHealth,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    Productivity,
    Drought,
    Uniformity,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub level: RiskLevel,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedMetrics {
    pub productivity_index: f64,
    pub stress_index: f64,
    pub uniformity_index: f64,
    pub sustainability_score: f64,
    pub risk_assessment: Vec<RiskFactor>,
}

/// Where the fused crop identification came from.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CropSource {
    Ai,
    Spectral,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropIdentity {
    pub crop_type: String,
    pub confidence: f64,
    pub growth_stage: String,
    pub alternatives: Vec<String>,
    pub source: CropSource,
}

/// Mean-value snapshot of all six indices, carried on the result for
/// benchmarking and reporting.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectralMetrics {
    pub ndvi: f64,
    pub evi: f64,
    pub savi: f64,
    pub urban: f64,
    pub water: f64,
    pub moisture: f64,
}

/// The primary output of one analysis. Constructed once, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub classification: Classification,
    pub confidence: f64,
    pub description: &'static str,
    pub is_agricultural: bool,
    pub is_urban: bool,
    pub needs_attention: bool,
    pub health_score: f64,
    pub issues: Vec<Issue>,
    pub crop: CropIdentity,
    pub urbanization_level: f64,
    pub vegetation_health: f64,
    pub moisture_level: f64,
    pub variability_index: f64,
    pub advanced_metrics: AdvancedMetrics,
    pub return_points: Option<ReturnPoints>,
    pub spectral_metrics: SpectralMetrics,
}

/// Fuse the AI assessment with the spectral analysis into the final result.
pub fn fuse(spectral: &SpectralAnalysis, ai: &AiAssessment) -> ClassificationResult {
    let mut classification = Classification::Unknown;
    let mut confidence = ai.confidence;
    let mut is_urban = ai.is_urban();
    let mut is_agricultural = ai.is_agricultural();

    if ai.is_urban() {
        if spectral.ndvi.mean < thresholds::NDVI.moderate {
            classification = Classification::UrbanDense;
            confidence = (confidence + 0.1).min(0.95);
        } else {
            classification = Classification::UrbanMixed;
            confidence = (confidence + 0.05).min(0.95);
        }
    } else if ai.is_agricultural() {
        classification = if spectral.ndvi.mean > thresholds::NDVI.excellent {
            Classification::AgriculturalExcellent
        } else if spectral.ndvi.mean > thresholds::NDVI.good {
            Classification::AgriculturalHealthy
        } else if spectral.ndvi.mean > thresholds::NDVI.moderate {
            Classification::AgriculturalModerate
        } else {
            Classification::AgriculturalPoor
        };
        confidence = (confidence + 0.05).min(0.95);
    }

    // Open water wins over every other call.
    if spectral.water.mean > thresholds::WATER_BODY {
        classification = Classification::WaterBody;
        confidence = 0.9;
        is_urban = false;
        is_agricultural = false;
    }

    let health = health_score(
        spectral.ndvi.mean,
        spectral.evi.mean,
        spectral.moisture.mean,
        ai.health_assessment.overall_health,
    );

    let issues = detect_issues(spectral, ai, health);
    let advanced = advanced_metrics(spectral, ai);
    let crop = fuse_crop_identity(ai, spectral.ndvi.mean, spectral.evi.mean, spectral.savi.mean);
    let rp = return_points(
        spectral.ndvi.mean,
        spectral.evi.mean,
        spectral.moisture.mean,
        classification,
    );

    info!(
        "fused classification {} (confidence {:.2}), health {:.0}/100, {} issue(s)",
        classification,
        confidence,
        health,
        issues.len()
    );

    ClassificationResult {
        classification,
        confidence,
        description: classification.description(),
        is_agricultural,
        is_urban,
        needs_attention: !issues.is_empty() || health < thresholds::HEALTH_ATTENTION,
        health_score: health,
        issues,
        crop,
        urbanization_level: spectral.land_cover.urban,
        vegetation_health: spectral.ndvi.mean,
        moisture_level: spectral.moisture.mean,
        variability_index: spectral.variability.ndvi.coefficient,
        advanced_metrics: advanced,
        return_points: rp,
        spectral_metrics: SpectralMetrics {
            ndvi: spectral.ndvi.mean,
            evi: spectral.evi.mean,
            savi: spectral.savi.mean,
            urban: spectral.urban.mean,
            water: spectral.water.mean,
            moisture: spectral.moisture.mean,
        },
    }
}

/// Vegetation health score in [0, 100], summed from four independently
/// tiered components: NDVI (40), EVI (25), moisture (20), AI label (15).
/// No interpolation between tiers.
pub fn health_score(
    ndvi_mean: f64,
    evi_mean: f64,
    moisture_mean: f64,
    label: HealthLabel,
) -> f64 {
    let mut score: f64 = 0.0;

    score += if ndvi_mean > thresholds::NDVI.excellent {
        40.0
    } else if ndvi_mean > thresholds::NDVI.good {
        30.0
    } else if ndvi_mean > thresholds::NDVI.moderate {
        20.0
    } else {
        10.0
    };

    score += if evi_mean > thresholds::EVI.excellent {
        25.0
    } else if evi_mean > thresholds::EVI.good {
        18.0
    } else if evi_mean > thresholds::EVI.moderate {
        12.0
    } else {
        5.0
    };

    score += if moisture_mean > thresholds::MOISTURE.high {
        20.0
    } else if moisture_mean > thresholds::MOISTURE.low {
        15.0
    } else if moisture_mean > 0.0 {
        10.0
    } else {
        5.0
    };

    score += match label {
        HealthLabel::Excellent => 15.0,
        HealthLabel::Good => 12.0,
        HealthLabel::Regular => 8.0,
        HealthLabel::Poor => 4.0,
        HealthLabel::Critical | HealthLabel::Unknown => 2.0,
    };

    score.clamp(0.0, 100.0)
}

/// Independently evaluated issue detectors; every match is appended.
fn detect_issues(spectral: &SpectralAnalysis, ai: &AiAssessment, health: f64) -> Vec<Issue> {
    let mut issues = Vec::new();

    if spectral.ndvi.mean < thresholds::NDVI.moderate {
        issues.push(Issue {
            kind: IssueKind::VegetationStress,
            severity: Severity::High,
            description: "Severely stressed or absent vegetation".to_string(),
            recommendation: "Investigate causes: drought, pests, disease or unsuitable soil"
                .to_string(),
        });
    }

    if spectral.moisture.mean < thresholds::MOISTURE.low {
        issues.push(Issue {
            kind: IssueKind::LowMoisture,
            severity: Severity::Medium,
            description: "Low soil moisture detected".to_string(),
            recommendation: "Consider irrigation or wait for rainfall".to_string(),
        });
    }

    if spectral.variability.ndvi.coefficient > thresholds::VARIABILITY.medium {
        issues.push(Issue {
            kind: IssueKind::HighVariability,
            severity: Severity::Medium,
            description: "High variability across the vegetation".to_string(),
            recommendation: "Investigate unevenness: pests, disease or management gaps"
                .to_string(),
        });
    }

    for problem in &ai.problems_detected {
        issues.push(Issue {
            kind: IssueKind::AiDetected,
            severity: Severity::Medium,
            description: problem.clone(),
            recommendation: "Visually inspect the flagged area".to_string(),
        });
    }

    if health < thresholds::POOR_HEALTH_SCORE {
        issues.push(Issue {
            kind: IssueKind::PoorHealth,
            severity: Severity::High,
            description: "Critical health score".to_string(),
            recommendation: "Urgent intervention required".to_string(),
        });
    }

    issues
}

fn advanced_metrics(spectral: &SpectralAnalysis, ai: &AiAssessment) -> AdvancedMetrics {
    // Productivity: NDVI/EVI means rescaled from [-1, 1] to [0, 1], blended
    // 60/40, as a percentage.
    let ndvi_score = ((spectral.ndvi.mean + 1.0) / 2.0).clamp(0.0, 1.0);
    let evi_score = ((spectral.evi.mean + 1.0) / 2.0).clamp(0.0, 1.0);
    let productivity_index = (ndvi_score * 0.6 + evi_score * 0.4) * 100.0;

    // Stress: shortfall below the floors, as a fraction of each floor,
    // blended 70/30.
    let ndvi_stress = if spectral.ndvi.mean < thresholds::NDVI_STRESS_FLOOR {
        1.0 - spectral.ndvi.mean / thresholds::NDVI_STRESS_FLOOR
    } else {
        0.0
    };
    let moisture_stress = if spectral.moisture.mean < thresholds::MOISTURE_STRESS_FLOOR {
        1.0 - spectral.moisture.mean / thresholds::MOISTURE_STRESS_FLOOR
    } else {
        0.0
    };
    let stress_index = (ndvi_stress * 0.7 + moisture_stress * 0.3) * 100.0;

    let cv = spectral.variability.ndvi.coefficient;
    let uniformity_index = 1.0 - cv;

    let mut sustainability = thresholds::SUSTAINABILITY_BASE;
    if spectral.land_cover.vegetation.total > thresholds::VEGETATION_BONUS_HIGH {
        sustainability += 15.0;
    } else if spectral.land_cover.vegetation.total > thresholds::VEGETATION_BONUS_MID {
        sustainability += 10.0;
    }
    if cv < thresholds::UNIFORMITY_BONUS_CV {
        sustainability += 10.0;
    }
    sustainability -= ai.problems_detected.len() as f64 * 5.0;
    let sustainability_score = sustainability.clamp(0.0, 100.0);

    let mut risk_assessment = Vec::new();
    if spectral.ndvi.mean < thresholds::RISK_NDVI {
        risk_assessment.push(RiskFactor {
            kind: RiskKind::Productivity,
            level: RiskLevel::High,
            description: "Risk of low productivity",
        });
    }
    if spectral.moisture.mean < thresholds::RISK_MOISTURE {
        risk_assessment.push(RiskFactor {
            kind: RiskKind::Drought,
            level: RiskLevel::Medium,
            description: "Risk of water stress",
        });
    }
    if cv > thresholds::RISK_VARIABILITY {
        risk_assessment.push(RiskFactor {
            kind: RiskKind::Uniformity,
            level: RiskLevel::Medium,
            description: "Risk of uneven production",
        });
    }

    AdvancedMetrics {
        productivity_index,
        stress_index,
        uniformity_index,
        sustainability_score,
        risk_assessment,
    }
}

/// Fuse the AI crop guess with spectral signature matching.
///
/// The AI guess is kept unless the spectral candidate is confident
/// (> 0.7) while the AI is either unsure (< 0.6) or reports `unknown`.
pub fn fuse_crop_identity(ai: &AiAssessment, ndvi: f64, evi: f64, savi: f64) -> CropIdentity {
    let spectral = crops::identify_crop(ndvi, evi, savi);
    let guess = &ai.crop_identification;
    let ai_unknown =
        guess.primary_crop.is_empty() || guess.primary_crop.eq_ignore_ascii_case("unknown");
    let alternatives: Vec<String> =
        spectral.alternatives.iter().map(|s| s.to_string()).collect();

    if spectral.confidence > 0.7 && (ai_unknown || guess.confidence < 0.6) {
        CropIdentity {
            crop_type: spectral.crop.to_string(),
            confidence: spectral.confidence,
            growth_stage: guess.growth_stage.clone(),
            alternatives,
            source: CropSource::Spectral,
        }
    } else {
        CropIdentity {
            crop_type: guess.primary_crop.clone(),
            confidence: guess.confidence,
            growth_stage: guess.growth_stage.clone(),
            alternatives,
            source: CropSource::Ai,
        }
    }
}
