use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "s2mosaic", version, about = "Cloud-filtered EVI/BAI/NBR quality mosaic")]
pub struct CliArgs {
    /// Scene catalog manifest (JSON)
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Area of interest (GeoJSON Polygon, MultiPolygon, Feature or FeatureCollection)
    #[arg(short, long)]
    pub aoi: PathBuf,

    /// Acquisition year
    #[arg(short, long)]
    pub year: i32,

    /// First month of the window (1-12)
    #[arg(long)]
    pub start_month: u32,

    /// Last month of the window (1-12), inclusive
    #[arg(long)]
    pub end_month: u32,

    /// Output directory for the exported bands
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Output file prefix (overrides config)
    #[arg(long)]
    pub prefix: Option<String>,

    /// JSON config file with `composite` and `export` sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum clearness score for a pixel to be kept (overrides config)
    #[arg(long)]
    pub clearness_threshold: Option<f32>,

    /// AOI buffer distance in CRS units (overrides config)
    #[arg(long)]
    pub buffer: Option<f64>,

    /// Storage scale of the reflectance bands (overrides config)
    #[arg(long)]
    pub scale_factor: Option<f32>,

    /// Lower percentile of the visualization stretch (overrides config)
    #[arg(long)]
    pub stretch_low: Option<f64>,

    /// Upper percentile of the visualization stretch (overrides config)
    #[arg(long)]
    pub stretch_high: Option<f64>,

    /// Enable logging (level from RUST_LOG, default debug)
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
