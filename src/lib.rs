#![doc = r#"
AGRISPEC — spectral-index analytics for agricultural remote sensing.

This crate turns per-band spectral-index buffers (NDVI, EVI, SAVI, urban,
water, moisture) and an external AI visual assessment into a fused land-use
classification: crop identification, vegetation health score, issue list,
advanced metrics, benchmark gaps, and a monitoring outlook. It powers the
AGRISPEC CLI and can be embedded in your own Rust applications.

The crate is the analytical core only. Imagery acquisition, the vision-AI
call, geocoding, and persistence are external collaborators: they hand the
core its inputs and consume its report.

Quick start: analyze a patch
----------------------------
```rust
use agrispec::{analyze, AiAssessment, BandSet};

fn main() -> agrispec::Result<()> {
    // Raw per-index buffers, e.g. downloaded by your imagery client.
    // Buffers that decode to nothing are replaced by synthetic samples
    // (flagged as such), so the analysis always completes.
    let bands = BandSet::default();

    let result = analyze(&bands, &AiAssessment::neutral())?;
    println!("{} ({:.0}/100)", result.classification, result.health_score);
    Ok(())
}
```

Full report with outlook
------------------------
```rust,no_run
use agrispec::{analyze_report, AiAssessment, BandSet, Coordinates};

fn main() -> agrispec::Result<()> {
    let bands = BandSet::from_dir(std::path::Path::new("/data/patch_bands"))?;
    let ai = AiAssessment::from_json(&std::fs::read_to_string("/data/ai.json")?)?;

    let report = analyze_report(&bands, &ai, Coordinates { lat: -15.6, lng: -56.1 })?;
    agrispec::io::report::write_report(&report, std::path::Path::new("/out/report.json"), true)
}
```

Error handling
--------------
All public functions return `agrispec::Result<T>`; match on `agrispec::Error`
to handle specific cases. Decode failures are never errors: the pipeline
recovers with deterministic synthetic samples and marks the affected
statistics with `is_fallback`.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — enums and core types (e.g. `Classification`, `SpectralIndexKind`).
- [`core`] — threshold table, crop reference database, processing stages.
- [`io`] — band decoding, the AI-assessment boundary, report writing.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use error::{Error, Result};
pub use types::{
    Classification, CropCategory, DominantLandUse, HealthLabel, MonitoringFrequency, Priority,
    RiskLevel, Severity, SpectralIndexKind, VariabilityLevel,
};

// Band decoding and AI boundary
pub use io::ai::AiAssessment;
pub use io::bands::{decode_band, BandSample, BandSet};
pub use io::report::{AnalysisReport, Coordinates};

// Analysis results
pub use core::processing::fusion::{ClassificationResult, CropIdentity, Issue};
pub use core::processing::outlook::Outlook;
pub use core::processing::pipeline::SpectralAnalysis;
pub use core::processing::statistics::{IndexStatistics, VariabilityMetrics};

// High-level API re-exports
pub use api::{analyze, analyze_report, analyze_report_at, analyze_spectral, outlook};
