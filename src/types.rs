//! Shared types and enums used across AGRISPEC.
//! Includes `SpectralIndexKind`, `Classification`, severity/risk levels,
//! the AI health vocabulary (`HealthLabel`), and variability interpretation.
use serde::{Deserialize, Serialize};

/// The six spectral indices consumed by the analysis pipeline.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpectralIndexKind {
    Ndvi,
    Evi,
    Savi,
    Urban,
    Water,
    Moisture,
}

impl SpectralIndexKind {
    pub const ALL: [SpectralIndexKind; 6] = [
        SpectralIndexKind::Ndvi,
        SpectralIndexKind::Evi,
        SpectralIndexKind::Savi,
        SpectralIndexKind::Urban,
        SpectralIndexKind::Water,
        SpectralIndexKind::Moisture,
    ];

    /// Valid physical range for decoded samples. Values outside the range
    /// are discarded during decode, never clamped.
    pub fn valid_range(self) -> (f64, f64) {
        match self {
            SpectralIndexKind::Urban => (-0.5, 0.5),
            _ => (-1.0, 1.0),
        }
    }
}

impl std::fmt::Display for SpectralIndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SpectralIndexKind::Ndvi => "NDVI",
            SpectralIndexKind::Evi => "EVI",
            SpectralIndexKind::Savi => "SAVI",
            SpectralIndexKind::Urban => "URBAN",
            SpectralIndexKind::Water => "WATER",
            SpectralIndexKind::Moisture => "MOISTURE",
        };
        write!(f, "{}", s)
    }
}

/// Final fused land-use classification of the analyzed patch.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    UrbanDense,
    UrbanMixed,
    AgriculturalExcellent,
    AgriculturalHealthy,
    AgriculturalModerate,
    AgriculturalPoor,
    WaterBody,
    MixedArea,
    Unknown,
}

impl Classification {
    pub fn is_agricultural(self) -> bool {
        matches!(
            self,
            Classification::AgriculturalExcellent
                | Classification::AgriculturalHealthy
                | Classification::AgriculturalModerate
                | Classification::AgriculturalPoor
        )
    }

    pub fn is_urban(self) -> bool {
        matches!(self, Classification::UrbanDense | Classification::UrbanMixed)
    }

    /// Human-readable summary used in reports.
    pub fn description(self) -> &'static str {
        match self {
            Classification::UrbanDense => "Dense urban area with heavy construction",
            Classification::UrbanMixed => "Urban area mixed with green patches",
            Classification::AgriculturalExcellent => "Farmland with very healthy vegetation",
            Classification::AgriculturalHealthy => "Farmland with good vegetation",
            Classification::AgriculturalModerate => "Farmland with fair vegetation",
            Classification::AgriculturalPoor => "Farmland with stressed vegetation",
            Classification::WaterBody => "Water body (river, lake or reservoir)",
            Classification::MixedArea => "Mixed land use",
            Classification::Unknown => "Undetermined area",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Classification::UrbanDense => "urban_dense",
            Classification::UrbanMixed => "urban_mixed",
            Classification::AgriculturalExcellent => "agricultural_excellent",
            Classification::AgriculturalHealthy => "agricultural_healthy",
            Classification::AgriculturalModerate => "agricultural_moderate",
            Classification::AgriculturalPoor => "agricultural_poor",
            Classification::WaterBody => "water_body",
            Classification::MixedArea => "mixed_area",
            Classification::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Overall health label reported by the external vision AI. The wire values
/// are the collaborator's Portuguese vocabulary; unrecognized labels map to
/// `Unknown` and score the lowest health-component tier.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
pub enum HealthLabel {
    #[serde(rename = "excelente")]
    Excellent,
    #[serde(rename = "boa")]
    Good,
    #[default]
    #[serde(rename = "regular")]
    Regular,
    #[serde(rename = "ruim")]
    Poor,
    #[serde(rename = "crítica")]
    Critical,
    #[serde(other)]
    Unknown,
}

/// Three-bucket coefficient-of-variation interpretation. `Indeterminate`
/// is reported when the sample mean is too close to zero for the
/// coefficient to be meaningful.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariabilityLevel {
    Low,
    Medium,
    High,
    Indeterminate,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Recommended revisit cadence for the monitoring plan.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

/// Dominant land use over the patch, derived from the land-cover breakdown.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantLandUse {
    Vegetation,
    Urban,
    Mixed,
}

/// Agronomic category of a reference crop profile.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    Grain,
    Fiber,
    Sugarcane,
    Coffee,
    Pasture,
    Forestry,
}
