use tracing::info;
use tracing_subscriber::EnvFilter;

use s2mosaic::{Aoi, Config, DateRange, Error, SceneCatalog, SceneSource, composite, export_composite};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(Error::external)
}

/// Config file (if any) with command-line overrides applied on top
fn load_config(args: &CliArgs) -> Result<Config, AppError> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::MissingConfig { path: path.clone() });
            }
            Config::from_json_file(path)?
        }
        None => Config::default(),
    };

    if let Some(threshold) = args.clearness_threshold {
        config.composite.clearness_threshold = threshold;
    }
    if let Some(buffer) = args.buffer {
        config.composite.aoi_buffer = buffer;
    }
    if let Some(scale) = args.scale_factor {
        config.composite.scale_factor = scale;
    }
    if let Some(prefix) = &args.prefix {
        config.export.prefix = prefix.clone();
    }
    if let Some(low) = args.stretch_low {
        config.export.stretch_low = low;
    }
    if let Some(high) = args.stretch_high {
        config.export.stretch_high = high;
    }

    config.composite.validate()?;
    config.export.validate()?;
    Ok(config)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging()?;
    }

    let config = load_config(&args)?;

    // Reject a malformed window before touching any input
    let range = DateRange::for_months(args.year, args.start_month, args.end_month)?;

    for (arg, path) in [("--catalog", &args.catalog), ("--aoi", &args.aoi)] {
        if !path.exists() {
            return Err(AppError::MissingInput {
                arg,
                path: path.clone(),
            }
            .into());
        }
    }

    let catalog = SceneCatalog::open(&args.catalog)?;
    let aoi = Aoi::from_geojson_file(&args.aoi, config.composite.aoi_buffer)?;

    info!(
        "Compositing {} for {} on {}x{} grid ({})",
        range,
        args.aoi.display(),
        catalog.grid().width,
        catalog.grid().height,
        catalog.grid().crs
    );

    let image = composite(
        args.year,
        args.start_month,
        args.end_month,
        &aoi,
        &catalog,
        &config.composite,
    )?;

    let report = export_composite(
        &image,
        catalog.grid(),
        Some(&range),
        Some(&aoi),
        &args.output_dir,
        &config.export,
    )?;

    info!("Export complete!");
    info!("Rasters: {}", report.rasters.len());
    info!("Sidecars: {}", report.sidecars.len());
    if let Some(path) = &report.aoi {
        info!("AOI: {:?}", path);
    }
    Ok(())
}
