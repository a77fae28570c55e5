//! Report assembly and JSON serialization.
//! The report is the crate's downstream artifact: spectral evidence, fused
//! classification, outlook, the AI assessment it consumed, and metadata
//! tagging the analyzed location and time window.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::processing::fusion::ClassificationResult;
use crate::core::processing::outlook::Outlook;
use crate::core::processing::pipeline::SpectralAnalysis;
use crate::error::Result;
use crate::io::ai::AiAssessment;

/// Half-width in degrees of the bounding box around the analyzed point.
pub const BBOX_DELTA: f64 = 0.01;

/// Length of the imagery acquisition window, in days.
pub const ACQUISITION_DAYS: i64 = 30;

pub const ANALYSIS_VERSION: &str = "1.0";
pub const ANALYSIS_METHOD: &str = "ai-visual + spectral + crop-identification";

/// Geographic point the report is tagged with. The core has no
/// coordinate-dependent logic; this is pass-through metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub bbox: [f64; 4],
    pub time_range: TimeRange,
    pub processing_date: DateTime<Utc>,
    pub analysis_version: &'static str,
    pub confidence: f64,
    pub analysis_method: &'static str,
}

/// Complete analysis report for one patch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub spectral_analysis: SpectralAnalysis,
    pub area_classification: ClassificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlook: Option<Outlook>,
    pub ai_analysis: AiAssessment,
    pub location: Coordinates,
    pub metadata: AnalysisMetadata,
    pub timestamp: DateTime<Utc>,
}

/// Bounding box (min lng, min lat, max lng, max lat) around a point.
pub fn bbox_around(location: Coordinates) -> [f64; 4] {
    [
        location.lng - BBOX_DELTA,
        location.lat - BBOX_DELTA,
        location.lng + BBOX_DELTA,
        location.lat + BBOX_DELTA,
    ]
}

/// The acquisition window ending at `now`.
pub fn acquisition_window(now: DateTime<Utc>) -> TimeRange {
    TimeRange {
        from: now - Duration::days(ACQUISITION_DAYS),
        to: now,
    }
}

/// Serialize a report to a JSON string.
pub fn to_json(report: &AnalysisReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// Write a report to a file as JSON.
pub fn write_report(report: &AnalysisReport, output: &Path, pretty: bool) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writer.flush()?;
    info!("report written to {:?}", output);
    Ok(())
}
