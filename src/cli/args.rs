use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agrispec", version, about = "AGRISPEC CLI")]
pub struct CliArgs {
    /// Directory containing the six band buffers with conventional names
    /// (ndvi.bin, evi.bin, savi.bin, urban.bin, water.bin, moisture.bin)
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// NDVI band buffer (overrides the file from --input-dir)
    #[arg(long)]
    pub ndvi: Option<PathBuf>,

    /// EVI band buffer
    #[arg(long)]
    pub evi: Option<PathBuf>,

    /// SAVI band buffer
    #[arg(long)]
    pub savi: Option<PathBuf>,

    /// Urban-index band buffer
    #[arg(long)]
    pub urban: Option<PathBuf>,

    /// Water-index band buffer
    #[arg(long)]
    pub water: Option<PathBuf>,

    /// Moisture-index band buffer
    #[arg(long)]
    pub moisture: Option<PathBuf>,

    /// AI visual-assessment JSON; a neutral default is assumed when absent
    #[arg(long)]
    pub ai: Option<PathBuf>,

    /// Latitude of the analyzed point (report tag only)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the analyzed point (report tag only)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub lng: f64,

    /// Output report path; the report goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
