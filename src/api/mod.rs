//! High-level, ergonomic library API: run the spectral pipeline, fuse it
//! with an AI assessment, and assemble complete reports. Prefer these
//! entrypoints over the low-level processing modules when integrating
//! AGRISPEC.
use chrono::{DateTime, Utc};

use crate::core::processing::fusion::{fuse, ClassificationResult};
use crate::core::processing::outlook::{outlook_at, Outlook};
use crate::core::processing::pipeline::{process_bands, SpectralAnalysis};
use crate::error::Result;
use crate::io::ai::AiAssessment;
use crate::io::bands::BandSet;
use crate::io::report::{
    acquisition_window, bbox_around, AnalysisMetadata, AnalysisReport, Coordinates,
    ANALYSIS_METHOD, ANALYSIS_VERSION,
};

/// Decode the six band buffers and compute the joined spectral analysis.
pub fn analyze_spectral(bands: &BandSet) -> Result<SpectralAnalysis> {
    process_bands(bands)
}

/// Full analysis: spectral pipeline plus AI fusion.
///
/// Every call produces a fresh, independent result; the core holds no
/// state between analyses.
pub fn analyze(bands: &BandSet, ai: &AiAssessment) -> Result<ClassificationResult> {
    let spectral = process_bands(bands)?;
    Ok(fuse(&spectral, ai))
}

/// Predictions and monitoring plan for an already-fused result.
pub fn outlook(spectral: &SpectralAnalysis, result: &ClassificationResult) -> Outlook {
    crate::core::processing::outlook::outlook(spectral, result)
}

/// Run the whole flow and assemble the downstream report, stamped with
/// the current time.
pub fn analyze_report(
    bands: &BandSet,
    ai: &AiAssessment,
    location: Coordinates,
) -> Result<AnalysisReport> {
    analyze_report_at(bands, ai, location, Utc::now())
}

/// Deterministic variant of [`analyze_report`] for callers that control
/// the clock.
pub fn analyze_report_at(
    bands: &BandSet,
    ai: &AiAssessment,
    location: Coordinates,
    now: DateTime<Utc>,
) -> Result<AnalysisReport> {
    let spectral = process_bands(bands)?;
    let result = fuse(&spectral, ai);

    // The outlook only means something for farmland.
    let outlook = if result.is_agricultural {
        Some(outlook_at(&spectral, &result, now))
    } else {
        None
    };

    let metadata = AnalysisMetadata {
        bbox: bbox_around(location),
        time_range: acquisition_window(now),
        processing_date: now,
        analysis_version: ANALYSIS_VERSION,
        confidence: result.confidence,
        analysis_method: ANALYSIS_METHOD,
    };

    Ok(AnalysisReport {
        spectral_analysis: spectral,
        area_classification: result,
        outlook,
        ai_analysis: ai.clone(),
        location,
        metadata,
        timestamp: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::io::ai::AiSceneClass;
    use crate::io::bands::HEADER_MARGIN;
    use crate::types::Classification;

    fn buffer_with_payload(payload: &[f32]) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_MARGIN];
        for v in payload {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf.extend_from_slice(&vec![0u8; HEADER_MARGIN]);
        buf
    }

    fn farm_bands() -> BandSet {
        let constant = |v: f32| buffer_with_payload(&[v; 256]);
        BandSet {
            ndvi: constant(0.65),
            evi: constant(0.45),
            savi: constant(0.5),
            urban: constant(0.02),
            water: constant(0.05),
            moisture: constant(0.35),
        }
    }

    #[test]
    fn analyze_runs_end_to_end() {
        let result = analyze(&farm_bands(), &AiAssessment::neutral()).unwrap();
        assert_eq!(result.classification, Classification::AgriculturalExcellent);
        assert!(result.health_score > 90.0);
    }

    #[test]
    fn agricultural_report_carries_an_outlook() {
        let report = analyze_report(
            &farm_bands(),
            &AiAssessment::neutral(),
            Coordinates { lat: -15.6, lng: -56.1 },
        )
        .unwrap();
        assert!(report.outlook.is_some());
        assert!(report.area_classification.return_points.is_some());
    }

    #[test]
    fn urban_report_skips_the_outlook() {
        let mut ai = AiAssessment::neutral();
        ai.classification = AiSceneClass::Urban;
        let mut bands = farm_bands();
        bands.ndvi = buffer_with_payload(&[0.1f32; 256]);

        let report = analyze_report(&bands, &ai, Coordinates { lat: -23.5, lng: -46.6 }).unwrap();
        assert_eq!(report.area_classification.classification, Classification::UrbanDense);
        assert!(report.outlook.is_none());
    }

    #[test]
    fn analyses_are_independent() {
        let bands = farm_bands();
        let ai = AiAssessment::neutral();
        let a = analyze(&bands, &ai).unwrap();
        let b = analyze(&bands, &ai).unwrap();
        assert_eq!(a.classification, b.classification);
        assert_eq!(a.health_score, b.health_score);
        assert_eq!(a.confidence, b.confidence);
    }
}
