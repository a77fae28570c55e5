//! Typed boundary for the external vision-AI assessment.
//!
//! The collaborator returns loose JSON; this module pins it to a strict
//! record with explicit defaults for every optional field, so the core
//! never special-cases missing data. When the AI is unavailable the
//! neutral default keeps the pipeline running end to end.
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::types::HealthLabel;

/// Scene-level call made by the vision AI. Wire values follow the
/// collaborator's vocabulary (`urban` / `rural`).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiSceneClass {
    Urban,
    #[default]
    Rural,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropIdentification {
    pub primary_crop: String,
    pub secondary_crop: Option<String>,
    pub confidence: f64,
    pub growth_stage: String,
    pub reasoning: String,
}

impl Default for CropIdentification {
    fn default() -> Self {
        Self {
            primary_crop: "unknown".to_string(),
            secondary_crop: None,
            confidence: 0.5,
            growth_stage: "unknown".to_string(),
            reasoning: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthAssessment {
    pub overall_health: HealthLabel,
    pub vegetation_density: String,
    pub color_pattern: String,
    pub uniformity: String,
}

impl Default for HealthAssessment {
    fn default() -> Self {
        Self {
            overall_health: HealthLabel::Regular,
            vegetation_density: "média".to_string(),
            color_pattern: "verde normal".to_string(),
            uniformity: "irregular".to_string(),
        }
    }
}

/// Visual patterns the AI may report; all optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patterns {
    pub field_shape: Option<String>,
    pub planting_pattern: Option<String>,
    pub irrigation_signs: Option<bool>,
    pub machinery_marks: Option<bool>,
}

/// Complete AI visual assessment for one patch. Immutable input to the
/// fusion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiAssessment {
    pub classification: AiSceneClass,
    pub confidence: f64,
    pub crop_identification: CropIdentification,
    pub health_assessment: HealthAssessment,
    pub problems_detected: Vec<String>,
    pub patterns: Patterns,
    pub recommendations: Vec<String>,
    pub reasoning: String,
    pub details: String,
}

impl Default for AiAssessment {
    fn default() -> Self {
        Self::neutral()
    }
}

impl AiAssessment {
    /// Neutral default used when the AI collaborator is unavailable:
    /// agricultural scene at confidence 0.7, regular health, no problems.
    pub fn neutral() -> Self {
        Self {
            classification: AiSceneClass::Rural,
            confidence: 0.7,
            crop_identification: CropIdentification::default(),
            health_assessment: HealthAssessment::default(),
            problems_detected: Vec::new(),
            patterns: Patterns::default(),
            recommendations: vec!["Consult an agronomist".to_string()],
            reasoning: "AI analysis unavailable".to_string(),
            details: String::new(),
        }
    }

    pub fn is_urban(&self) -> bool {
        self.classification == AiSceneClass::Urban
    }

    pub fn is_agricultural(&self) -> bool {
        self.classification == AiSceneClass::Rural
    }

    /// Parse an assessment from collaborator JSON, clamping the reported
    /// confidence into the trusted [0.7, 1.0] band.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut parsed: AiAssessment = serde_json::from_str(json)?;
        if !parsed.confidence.is_finite() {
            warn!("AI assessment carried a non-finite confidence, using 0.8");
            parsed.confidence = 0.8;
        }
        parsed.confidence = parsed.confidence.clamp(0.7, 1.0);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_default_is_agricultural() {
        let ai = AiAssessment::neutral();
        assert!(ai.is_agricultural());
        assert!(!ai.is_urban());
        assert_eq!(ai.confidence, 0.7);
        assert!(ai.problems_detected.is_empty());
        assert_eq!(ai.crop_identification.primary_crop, "unknown");
    }

    #[test]
    fn sparse_json_fills_defaults() {
        let ai = AiAssessment::from_json(r#"{"classification": "urban", "confidence": 0.9}"#)
            .unwrap();
        assert!(ai.is_urban());
        assert_eq!(ai.confidence, 0.9);
        assert_eq!(ai.health_assessment.overall_health, HealthLabel::Regular);
        assert_eq!(ai.crop_identification.growth_stage, "unknown");
    }

    #[test]
    fn full_wire_payload_parses() {
        let json = r#"{
            "classification": "rural",
            "confidence": 0.85,
            "cropIdentification": {
                "primaryCrop": "Soja",
                "confidence": 0.8,
                "growthStage": "floração",
                "reasoning": "row pattern and canopy color"
            },
            "healthAssessment": {
                "overallHealth": "excelente",
                "vegetationDensity": "alta",
                "colorPattern": "verde intenso",
                "uniformity": "uniforme"
            },
            "problemsDetected": ["solo exposto na borda norte"],
            "patterns": {"irrigationSigns": true},
            "recommendations": ["manter manejo"]
        }"#;
        let ai = AiAssessment::from_json(json).unwrap();
        assert!(ai.is_agricultural());
        assert_eq!(ai.crop_identification.primary_crop, "Soja");
        assert_eq!(ai.health_assessment.overall_health, HealthLabel::Excellent);
        assert_eq!(ai.problems_detected.len(), 1);
        assert_eq!(ai.patterns.irrigation_signs, Some(true));
    }

    #[test]
    fn confidence_is_clamped_to_trusted_band() {
        let low = AiAssessment::from_json(r#"{"confidence": 0.2}"#).unwrap();
        assert_eq!(low.confidence, 0.7);
        let high = AiAssessment::from_json(r#"{"confidence": 1.4}"#).unwrap();
        assert_eq!(high.confidence, 1.0);
    }

    #[test]
    fn unknown_health_label_maps_to_unknown() {
        let ai = AiAssessment::from_json(
            r#"{"healthAssessment": {"overallHealth": "péssima"}}"#,
        )
        .unwrap();
        assert_eq!(ai.health_assessment.overall_health, HealthLabel::Unknown);
    }
}
