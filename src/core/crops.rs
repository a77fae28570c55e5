//! Reference database of Brazilian crop profiles.
//!
//! Each profile carries the crop's spectral signature ranges, growth-stage
//! curve, optimal agronomic conditions, and common issues. The catalog is
//! built once at first use and never mutated. Crop names keep the
//! collaborator's Portuguese vocabulary so AI-reported crops match catalog
//! entries directly.
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::core::thresholds;
use crate::types::CropCategory;

/// Closed interval with an optimum, for one spectral index.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SignatureRange {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

impl SignatureRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpectralSignature {
    pub ndvi: SignatureRange,
    pub evi: SignatureRange,
    pub savi: SignatureRange,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthStage {
    pub name: &'static str,
    pub duration_days: u32,
    pub ndvi_expected: f64,
    pub evi_expected: f64,
    pub characteristics: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalConditions {
    pub temperature_c: Span,
    pub rainfall_mm_year: Span,
    pub soil_types: Vec<&'static str>,
    pub altitude_m: Span,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropProfile {
    pub name: &'static str,
    pub scientific_name: &'static str,
    pub category: CropCategory,
    pub growth_cycle_days: u32,
    pub signature: SpectralSignature,
    pub growth_stages: Vec<GrowthStage>,
    pub optimal_conditions: OptimalConditions,
    pub common_issues: Vec<&'static str>,
    pub harvest_season: Vec<&'static str>,
}

static CATALOG: Lazy<Vec<CropProfile>> = Lazy::new(|| {
    vec![
        CropProfile {
            name: "Soja",
            scientific_name: "Glycine max",
            category: CropCategory::Grain,
            growth_cycle_days: 120,
            signature: SpectralSignature {
                ndvi: SignatureRange { min: 0.3, max: 0.85, optimal: 0.7 },
                evi: SignatureRange { min: 0.25, max: 0.75, optimal: 0.55 },
                savi: SignatureRange { min: 0.25, max: 0.65, optimal: 0.5 },
            },
            growth_stages: vec![
                GrowthStage {
                    name: "Emergence",
                    duration_days: 10,
                    ndvi_expected: 0.2,
                    evi_expected: 0.15,
                    characteristics: vec!["Visible soil", "Seedlings emerging", "Minimal cover"],
                },
                GrowthStage {
                    name: "Vegetative growth",
                    duration_days: 40,
                    ndvi_expected: 0.5,
                    evi_expected: 0.4,
                    characteristics: vec!["Fast growth", "Rows closing in", "Intense green"],
                },
                GrowthStage {
                    name: "Flowering",
                    duration_days: 25,
                    ndvi_expected: 0.75,
                    evi_expected: 0.6,
                    characteristics: vec!["Maximum cover", "White/purple flowers", "Peak vigor"],
                },
                GrowthStage {
                    name: "Grain filling",
                    duration_days: 30,
                    ndvi_expected: 0.7,
                    evi_expected: 0.55,
                    characteristics: vec!["Sustained vigor", "Pod formation", "Green held"],
                },
                GrowthStage {
                    name: "Maturation",
                    duration_days: 15,
                    ndvi_expected: 0.35,
                    evi_expected: 0.25,
                    characteristics: vec!["Yellowing", "Leaf drop", "Drying out"],
                },
            ],
            optimal_conditions: OptimalConditions {
                temperature_c: Span { min: 20.0, max: 30.0 },
                rainfall_mm_year: Span { min: 450.0, max: 800.0 },
                soil_types: vec!["Latosol", "Argisol", "Neosol"],
                altitude_m: Span { min: 0.0, max: 1000.0 },
            },
            common_issues: vec![
                "Asian rust",
                "Water deficit",
                "Caterpillars and stink bugs",
                "Foliar diseases",
                "Nematodes",
            ],
            harvest_season: vec!["February", "March", "April", "May"],
        },
        CropProfile {
            name: "Milho",
            scientific_name: "Zea mays",
            category: CropCategory::Grain,
            growth_cycle_days: 140,
            signature: SpectralSignature {
                ndvi: SignatureRange { min: 0.3, max: 0.9, optimal: 0.75 },
                evi: SignatureRange { min: 0.3, max: 0.8, optimal: 0.65 },
                savi: SignatureRange { min: 0.3, max: 0.7, optimal: 0.55 },
            },
            growth_stages: vec![
                GrowthStage {
                    name: "Emergence",
                    duration_days: 10,
                    ndvi_expected: 0.25,
                    evi_expected: 0.2,
                    characteristics: vec!["Exposed soil dominates", "Upright seedlings", "Rows visible"],
                },
                GrowthStage {
                    name: "Vegetative development",
                    duration_days: 50,
                    ndvi_expected: 0.6,
                    evi_expected: 0.5,
                    characteristics: vec!["Rapid vertical growth", "Intense green", "Clear row structure"],
                },
                GrowthStage {
                    name: "Tasseling",
                    duration_days: 20,
                    ndvi_expected: 0.8,
                    evi_expected: 0.7,
                    characteristics: vec!["Maximum height", "Tassel visible", "Near-total cover"],
                },
                GrowthStage {
                    name: "Grain filling",
                    duration_days: 40,
                    ndvi_expected: 0.75,
                    evi_expected: 0.65,
                    characteristics: vec!["Ears formed", "Green held", "High biomass"],
                },
                GrowthStage {
                    name: "Maturation",
                    duration_days: 20,
                    ndvi_expected: 0.4,
                    evi_expected: 0.3,
                    characteristics: vec!["Yellowing", "Drying out", "Ears drooping"],
                },
            ],
            optimal_conditions: OptimalConditions {
                temperature_c: Span { min: 18.0, max: 32.0 },
                rainfall_mm_year: Span { min: 400.0, max: 800.0 },
                soil_types: vec!["Latosol", "Argisol", "Nitosol"],
                altitude_m: Span { min: 0.0, max: 2500.0 },
            },
            common_issues: vec![
                "Leafhoppers",
                "Fall armyworm",
                "Water deficit",
                "Foliar diseases",
                "Lodging",
            ],
            harvest_season: vec!["January", "February", "March", "April", "May", "June"],
        },
        CropProfile {
            name: "Cana-de-açúcar",
            scientific_name: "Saccharum officinarum",
            category: CropCategory::Sugarcane,
            growth_cycle_days: 365,
            signature: SpectralSignature {
                ndvi: SignatureRange { min: 0.4, max: 0.85, optimal: 0.7 },
                evi: SignatureRange { min: 0.35, max: 0.75, optimal: 0.6 },
                savi: SignatureRange { min: 0.3, max: 0.65, optimal: 0.52 },
            },
            growth_stages: vec![
                GrowthStage {
                    name: "Sprouting",
                    duration_days: 30,
                    ndvi_expected: 0.3,
                    evi_expected: 0.25,
                    characteristics: vec!["Furrows visible", "Shoots emerging", "Partially exposed soil"],
                },
                GrowthStage {
                    name: "Tillering",
                    duration_days: 60,
                    ndvi_expected: 0.55,
                    evi_expected: 0.45,
                    characteristics: vec!["Multiple stalks", "Lateral growth", "Medium green"],
                },
                GrowthStage {
                    name: "Grand growth",
                    duration_days: 180,
                    ndvi_expected: 0.75,
                    evi_expected: 0.65,
                    characteristics: vec!["Maximum height", "Full closure", "Intense green"],
                },
                GrowthStage {
                    name: "Maturation",
                    duration_days: 95,
                    ndvi_expected: 0.65,
                    evi_expected: 0.55,
                    characteristics: vec!["Sucrose accumulation", "Slight yellowing", "Biomass held"],
                },
            ],
            optimal_conditions: OptimalConditions {
                temperature_c: Span { min: 20.0, max: 35.0 },
                rainfall_mm_year: Span { min: 1200.0, max: 1800.0 },
                soil_types: vec!["Red latosol", "Terra roxa", "Argisol"],
                altitude_m: Span { min: 0.0, max: 1000.0 },
            },
            common_issues: vec![
                "Sugarcane borer",
                "Spittlebugs",
                "Rust",
                "Water deficit",
                "Soil compaction",
            ],
            harvest_season: vec![
                "April", "May", "June", "July", "August", "September", "October", "November",
            ],
        },
        CropProfile {
            name: "Café",
            scientific_name: "Coffea arabica / Coffea canephora",
            category: CropCategory::Coffee,
            growth_cycle_days: 365,
            signature: SpectralSignature {
                ndvi: SignatureRange { min: 0.5, max: 0.8, optimal: 0.68 },
                evi: SignatureRange { min: 0.4, max: 0.7, optimal: 0.58 },
                savi: SignatureRange { min: 0.35, max: 0.6, optimal: 0.5 },
            },
            growth_stages: vec![
                GrowthStage {
                    name: "Vegetative rest",
                    duration_days: 60,
                    ndvi_expected: 0.6,
                    evi_expected: 0.5,
                    characteristics: vec!["Reduced growth", "Constant green", "Stable perennial canopy"],
                },
                GrowthStage {
                    name: "Flowering",
                    duration_days: 15,
                    ndvi_expected: 0.65,
                    evi_expected: 0.55,
                    characteristics: vec!["White blossoms visible", "Altered reflectance"],
                },
                GrowthStage {
                    name: "Fruit filling",
                    duration_days: 180,
                    ndvi_expected: 0.7,
                    evi_expected: 0.6,
                    characteristics: vec!["Berry formation", "Intense green", "High photosynthetic activity"],
                },
                GrowthStage {
                    name: "Maturation",
                    duration_days: 110,
                    ndvi_expected: 0.65,
                    evi_expected: 0.55,
                    characteristics: vec!["Berries turning color", "Green to red/yellow", "Vigor tapering"],
                },
            ],
            optimal_conditions: OptimalConditions {
                temperature_c: Span { min: 18.0, max: 24.0 },
                rainfall_mm_year: Span { min: 1200.0, max: 1800.0 },
                soil_types: vec!["Red latosol", "Argisol", "Deep well-drained soil"],
                altitude_m: Span { min: 600.0, max: 1200.0 },
            },
            common_issues: vec![
                "Coffee leaf rust",
                "Coffee berry borer",
                "Leaf miner",
                "Water deficit",
                "Cercospora leaf spot",
            ],
            harvest_season: vec!["May", "June", "July", "August", "September"],
        },
        CropProfile {
            name: "Algodão",
            scientific_name: "Gossypium hirsutum",
            category: CropCategory::Fiber,
            growth_cycle_days: 180,
            signature: SpectralSignature {
                ndvi: SignatureRange { min: 0.3, max: 0.8, optimal: 0.65 },
                evi: SignatureRange { min: 0.25, max: 0.7, optimal: 0.55 },
                savi: SignatureRange { min: 0.25, max: 0.6, optimal: 0.48 },
            },
            growth_stages: vec![
                GrowthStage {
                    name: "Emergence",
                    duration_days: 15,
                    ndvi_expected: 0.25,
                    evi_expected: 0.2,
                    characteristics: vec!["Soil dominates", "Small seedlings", "Minimal cover"],
                },
                GrowthStage {
                    name: "Vegetative growth",
                    duration_days: 60,
                    ndvi_expected: 0.6,
                    evi_expected: 0.5,
                    characteristics: vec!["Branch development", "Intense green", "Gradual closure"],
                },
                GrowthStage {
                    name: "Flowering",
                    duration_days: 40,
                    ndvi_expected: 0.75,
                    evi_expected: 0.65,
                    characteristics: vec!["White/yellow flowers", "Maximum cover", "High vigor"],
                },
                GrowthStage {
                    name: "Boll development",
                    duration_days: 45,
                    ndvi_expected: 0.7,
                    evi_expected: 0.6,
                    characteristics: vec!["Boll formation", "Green held", "Heavy structure"],
                },
                GrowthStage {
                    name: "Boll opening",
                    duration_days: 20,
                    ndvi_expected: 0.4,
                    evi_expected: 0.3,
                    characteristics: vec!["White cotton visible", "Defoliation", "Pre-harvest"],
                },
            ],
            optimal_conditions: OptimalConditions {
                temperature_c: Span { min: 20.0, max: 30.0 },
                rainfall_mm_year: Span { min: 500.0, max: 1500.0 },
                soil_types: vec!["Latosol", "Argisol", "Deep soil"],
                altitude_m: Span { min: 0.0, max: 1000.0 },
            },
            common_issues: vec![
                "Boll weevil",
                "Pink bollworm",
                "Fungal diseases",
                "Water deficit",
                "Ramularia leaf spot",
            ],
            harvest_season: vec!["June", "July", "August", "September"],
        },
        CropProfile {
            name: "Pastagem",
            scientific_name: "Brachiaria / Panicum / Cynodon",
            category: CropCategory::Pasture,
            growth_cycle_days: 365,
            signature: SpectralSignature {
                ndvi: SignatureRange { min: 0.2, max: 0.75, optimal: 0.55 },
                evi: SignatureRange { min: 0.15, max: 0.65, optimal: 0.45 },
                savi: SignatureRange { min: 0.15, max: 0.55, optimal: 0.4 },
            },
            growth_stages: vec![
                GrowthStage {
                    name: "Early regrowth",
                    duration_days: 15,
                    ndvi_expected: 0.35,
                    evi_expected: 0.28,
                    characteristics: vec!["After grazing", "Soil partially visible", "Light green"],
                },
                GrowthStage {
                    name: "Active growth",
                    duration_days: 30,
                    ndvi_expected: 0.6,
                    evi_expected: 0.5,
                    characteristics: vec!["High vigor", "Intense green", "Grazing height"],
                },
                GrowthStage {
                    name: "Maturation",
                    duration_days: 30,
                    ndvi_expected: 0.5,
                    evi_expected: 0.42,
                    characteristics: vec!["Quality declining", "Seed heads", "Lighter color"],
                },
                GrowthStage {
                    name: "Senescence",
                    duration_days: 60,
                    ndvi_expected: 0.3,
                    evi_expected: 0.25,
                    characteristics: vec!["Yellowing", "Dry matter", "Low nutritive value"],
                },
            ],
            optimal_conditions: OptimalConditions {
                temperature_c: Span { min: 15.0, max: 35.0 },
                rainfall_mm_year: Span { min: 800.0, max: 2000.0 },
                soil_types: vec!["Adapts to most soils"],
                altitude_m: Span { min: 0.0, max: 2000.0 },
            },
            common_issues: vec![
                "Degradation",
                "Invasive weeds",
                "Pasture spittlebug",
                "Overgrazing",
                "Erosion",
                "Compaction",
            ],
            harvest_season: vec!["Rotational grazing year-round"],
        },
        CropProfile {
            name: "Eucalipto",
            scientific_name: "Eucalyptus spp",
            category: CropCategory::Forestry,
            growth_cycle_days: 2555,
            signature: SpectralSignature {
                ndvi: SignatureRange { min: 0.5, max: 0.85, optimal: 0.72 },
                evi: SignatureRange { min: 0.45, max: 0.75, optimal: 0.65 },
                savi: SignatureRange { min: 0.4, max: 0.68, optimal: 0.58 },
            },
            growth_stages: vec![
                GrowthStage {
                    name: "Establishment",
                    duration_days: 365,
                    ndvi_expected: 0.45,
                    evi_expected: 0.38,
                    characteristics: vec!["Young plants", "Soil visible between rows", "Initial growth"],
                },
                GrowthStage {
                    name: "Rapid growth",
                    duration_days: 1095,
                    ndvi_expected: 0.7,
                    evi_expected: 0.62,
                    characteristics: vec!["Canopy closure", "Constant intense green", "High increment"],
                },
                GrowthStage {
                    name: "Maturation",
                    duration_days: 1095,
                    ndvi_expected: 0.75,
                    evi_expected: 0.68,
                    characteristics: vec!["Stabilized structure", "Total cover", "Adult stand"],
                },
            ],
            optimal_conditions: OptimalConditions {
                temperature_c: Span { min: 15.0, max: 28.0 },
                rainfall_mm_year: Span { min: 800.0, max: 1500.0 },
                soil_types: vec!["Latosol", "Argisol", "Deep soils"],
                altitude_m: Span { min: 0.0, max: 1000.0 },
            },
            common_issues: vec![
                "Leaf-cutting ants",
                "Nutrient deficiency",
                "Gonipterus beetle",
                "Water deficit while young",
            ],
            harvest_season: vec!["Year-round (scheduled cutting)"],
        },
    ]
});

/// The full crop catalog, built on first access.
pub fn catalog() -> &'static [CropProfile] {
    &CATALOG
}

/// Case-insensitive lookup by crop name.
pub fn find(name: &str) -> Option<&'static CropProfile> {
    CATALOG.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Result of spectral signature matching against the catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectralMatch {
    pub crop: &'static str,
    pub confidence: f64,
    pub alternatives: Vec<&'static str>,
}

/// Identify the most likely crop from mean index values.
///
/// Scoring per profile: 25 points if NDVI falls inside the profile's range,
/// 25 for EVI, 20 for SAVI, plus up to 15 + 15 proportional to
/// closeness-to-optimal for NDVI and EVI. The top match becomes the
/// candidate with `confidence = score / 100`; the next three ranked
/// profiles are returned as alternatives.
pub fn identify_crop(ndvi: f64, evi: f64, savi: f64) -> SpectralMatch {
    let mut scored: Vec<(&'static str, f64)> = CATALOG
        .iter()
        .map(|crop| {
            let sig = &crop.signature;
            let mut score = 0.0;
            if sig.ndvi.contains(ndvi) {
                score += 25.0;
            }
            if sig.evi.contains(evi) {
                score += 25.0;
            }
            if sig.savi.contains(savi) {
                score += 20.0;
            }
            score += (1.0 - (ndvi - sig.ndvi.optimal).abs()).max(0.0) * 15.0;
            score += (1.0 - (evi - sig.evi.optimal).abs()).max(0.0) * 15.0;
            (crop.name, score.clamp(0.0, 100.0))
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (crop, score) = scored[0];
    let alternatives = scored.iter().skip(1).take(3).map(|(name, _)| *name).collect();

    SpectralMatch {
        crop,
        confidence: score / 100.0,
        alternatives,
    }
}

/// Management recommendations for an identified crop, keyed to the health
/// score (0-100).
pub fn recommendations(crop_name: &str, health_score: f64) -> Vec<String> {
    let Some(crop) = find(crop_name) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    if health_score < thresholds::POOR_HEALTH_SCORE {
        out.push(format!("Attention: {} health is below par", crop.name));
        let top: Vec<&str> = crop.common_issues.iter().take(3).copied().collect();
        out.push(format!("Check for: {}", top.join(", ")));
    } else if health_score < thresholds::HEALTH_ATTENTION {
        out.push(format!("{} in moderate condition", crop.name));
        out.push(format!("Monitor: {}", crop.common_issues[0]));
    } else {
        out.push(format!("{} in excellent condition", crop.name));
        out.push("Keep current management practices".to_string());
    }
    out.push(format!("Expected harvest: {}", crop.harvest_season.join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn catalog_profiles_are_coherent() {
        for crop in catalog() {
            let sig = &crop.signature;
            for range in [sig.ndvi, sig.evi, sig.savi] {
                assert!(range.min < range.max, "{}: inverted range", crop.name);
                assert!(range.contains(range.optimal), "{}: optimum outside range", crop.name);
            }
            assert!(!crop.growth_stages.is_empty());
            assert!(!crop.common_issues.is_empty());
        }
    }

    #[test]
    fn perfect_soy_signature_scores_full_marks() {
        // Exactly soy's optimal triple: 25 + 25 + 20 + 15 + 15.
        let m = identify_crop(0.7, 0.55, 0.5);
        assert_eq!(m.crop, "Soja");
        assert_relative_eq!(m.confidence, 1.0);
        assert_eq!(m.alternatives.len(), 3);
    }

    #[test]
    fn coffee_signature_prefers_coffee() {
        let m = identify_crop(0.68, 0.58, 0.5);
        assert_eq!(m.crop, "Café");
    }

    #[test]
    fn identification_is_deterministic() {
        let a = identify_crop(0.55, 0.45, 0.4);
        let b = identify_crop(0.55, 0.45, 0.4);
        assert_eq!(a.crop, b.crop);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.alternatives, b.alternatives);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find("soja").is_some());
        assert!(find("SOJA").is_some());
        assert!(find("mandioca").is_none());
    }

    #[test]
    fn recommendations_follow_health_bands() {
        let poor = recommendations("Soja", 30.0);
        assert!(poor[0].contains("below par"));

        let fine = recommendations("Soja", 85.0);
        assert!(fine[0].contains("excellent condition"));

        assert!(recommendations("desconhecida", 50.0).is_empty());
    }
}
