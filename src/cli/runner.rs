use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use agrispec::api::analyze_report;
use agrispec::io::bands::BandSet;
use agrispec::io::report::{to_json, write_report, Coordinates};
use agrispec::types::SpectralIndexKind;
use agrispec::AiAssessment;

use super::args::CliArgs;
use super::errors::AppError;

fn load_bands(args: &CliArgs) -> Result<BandSet, AppError> {
    let mut bands = match &args.input_dir {
        Some(dir) => BandSet::from_dir(dir)?,
        None => BandSet::default(),
    };

    let explicit: [(SpectralIndexKind, &Option<PathBuf>); 6] = [
        (SpectralIndexKind::Ndvi, &args.ndvi),
        (SpectralIndexKind::Evi, &args.evi),
        (SpectralIndexKind::Savi, &args.savi),
        (SpectralIndexKind::Urban, &args.urban),
        (SpectralIndexKind::Water, &args.water),
        (SpectralIndexKind::Moisture, &args.moisture),
    ];

    for (index, path) in explicit {
        match path {
            Some(p) => *bands.buffer_mut(index) = fs::read(p)?,
            None if args.input_dir.is_none() => {
                return Err(AppError::MissingArgument {
                    arg: format!("--{}", index.to_string().to_lowercase()),
                });
            }
            None => {}
        }
    }

    Ok(bands)
}

fn load_ai(args: &CliArgs) -> Result<AiAssessment, AppError> {
    match &args.ai {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Ok(AiAssessment::from_json(&json)?)
        }
        None => {
            warn!("no AI assessment provided, using the neutral default");
            Ok(AiAssessment::neutral())
        }
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if !(-90.0..=90.0).contains(&args.lat) {
        return Err(AppError::InvalidCoordinate { arg: "--lat", value: args.lat }.into());
    }
    if !(-180.0..=180.0).contains(&args.lng) {
        return Err(AppError::InvalidCoordinate { arg: "--lng", value: args.lng }.into());
    }

    let bands = load_bands(&args)?;
    let ai = load_ai(&args)?;

    info!("analyzing patch at ({}, {})", args.lat, args.lng);
    let report = analyze_report(&bands, &ai, Coordinates { lat: args.lat, lng: args.lng })?;

    let result = &report.area_classification;
    info!(
        "classification: {} ({:.0}% confidence)",
        result.classification,
        result.confidence * 100.0
    );
    info!("health score: {:.0}/100, {} issue(s)", result.health_score, result.issues.len());
    info!("crop: {} ({:.0}% confidence)", result.crop.crop_type, result.crop.confidence * 100.0);

    match &args.output {
        Some(path) => write_report(&report, path, args.pretty)?,
        None => println!("{}", to_json(&report, args.pretty)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_band(dir: &std::path::Path, name: &str, value: f32) {
        let mut buf = vec![0u8; 1000];
        for _ in 0..200 {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf.extend_from_slice(&vec![0u8; 1000]);
        fs::write(dir.join(name), buf).unwrap();
    }

    fn args_for(dir: &std::path::Path, output: PathBuf) -> CliArgs {
        CliArgs {
            input_dir: Some(dir.to_path_buf()),
            ndvi: None,
            evi: None,
            savi: None,
            urban: None,
            water: None,
            moisture: None,
            ai: None,
            lat: -15.6,
            lng: -56.1,
            output: Some(output),
            pretty: false,
            log: false,
        }
    }

    #[test]
    fn runs_end_to_end_from_a_band_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_band(dir.path(), "ndvi.bin", 0.55);
        write_band(dir.path(), "evi.bin", 0.35);
        write_band(dir.path(), "savi.bin", 0.4);
        write_band(dir.path(), "urban.bin", 0.02);
        write_band(dir.path(), "water.bin", 0.05);
        write_band(dir.path(), "moisture.bin", 0.25);

        let output = dir.path().join("report.json");
        run(args_for(dir.path(), output.clone())).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            value["areaClassification"]["classification"],
            "agricultural_healthy"
        );
    }

    #[test]
    fn missing_band_without_input_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_band(dir.path(), "ndvi.bin", 0.55);
        let mut args = args_for(dir.path(), dir.path().join("out.json"));
        args.input_dir = None;
        args.ndvi = Some(dir.path().join("ndvi.bin"));

        let err = run(args).unwrap_err().to_string();
        assert!(err.contains("--evi"));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(dir.path(), dir.path().join("out.json"));
        args.lat = 120.0;
        assert!(run(args).is_err());
    }
}
