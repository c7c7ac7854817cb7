//! High-level, ergonomic library API: compose a quality mosaic for a month window and
//! an AOI, and export it to per-band rasters. Prefer these entrypoints over the
//! low-level processing modules when integrating s2mosaic.
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::aoi::Aoi;
use crate::core::image::{GridSpec, Image};
use crate::core::params::{CompositeParams, ExportParams};
use crate::core::processing::autoscale::{U16_NODATA, finite_or_nan, percentile_stretch_u16};
use crate::core::processing::pipeline::composite_collection;
use crate::core::processing::temporal::DateRange;
use crate::error::{Error, Result};
use crate::io::catalog::SceneSource;
use crate::io::writers::metadata::{BandSidecar, write_band_sidecar};
use crate::io::writers::tiff::{write_tiff_f32, write_tiff_u16};
use crate::io::writers::vector::write_aoi_geojson;
use crate::io::writers::worldfile::{write_prj_file, write_world_file};
use crate::types::ExportDataType;

/// Compose the quality mosaic of `source` for `year`, months `start_month..=end_month`,
/// clipped to `aoi` grown by `params.aoi_buffer`.
///
/// The month range is validated before the source is queried. An empty window is not an
/// error: the result is undefined (NaN) everywhere.
pub fn composite(
    year: i32,
    start_month: u32,
    end_month: u32,
    aoi: &Aoi,
    source: &dyn SceneSource,
    params: &CompositeParams,
) -> Result<Image> {
    let range = DateRange::for_months(year, start_month, end_month)?;
    params.validate()?;
    info!("Composite window {} ({} days)", range, range.days());

    if aoi.buffer() != params.aoi_buffer {
        debug!("AOI buffer {} replaced by {} from params", aoi.buffer(), params.aoi_buffer);
    }
    let aoi = aoi.with_buffer(params.aoi_buffer)?;

    let grid = source.grid();
    let bounds = aoi.bounds();
    let collection = source.query(&range, bounds.as_ref(), &params.input_bands())?;
    if collection.is_empty() {
        warn!("No scenes for {}; composite will be fully undefined", range);
    }

    let region = aoi.mask(grid);
    composite_collection(&collection, grid.shape(), Some(&region), params)
}

/// Files produced by [`export_composite`]
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub rasters: Vec<PathBuf>,
    pub sidecars: Vec<PathBuf>,
    pub aoi: Option<PathBuf>,
}

/// Export every band of `composite` as `<prefix>_<band>.tif` under `out_dir`.
///
/// Index bands keep native f32 values (non-finite written as NaN); other bands are
/// percentile-stretched to u16 with 0 as no-data. Each raster gets a world file, a
/// `.prj`, and a JSON sidecar. The AOI, when given, is written as GeoJSON.
pub fn export_composite(
    composite: &Image,
    grid: &GridSpec,
    range: Option<&DateRange>,
    aoi: Option<&Aoi>,
    out_dir: &Path,
    params: &ExportParams,
) -> Result<ExportReport> {
    params.validate()?;
    if composite.shape() != grid.shape() {
        return Err(Error::ShapeMismatch {
            context: "export grid".to_string(),
            expected: grid.shape(),
            found: composite.shape(),
        });
    }
    std::fs::create_dir_all(out_dir)?;

    let (rows, cols) = composite.shape();
    let mut report = ExportReport::default();

    for band in composite.bands() {
        let path = out_dir.join(format!("{}_{}.tif", params.prefix, band.name));
        let data_type = ExportDataType::for_band(&band.name);

        let (nodata, stretch, valid_pixels) = match data_type {
            ExportDataType::U16 => {
                let (scaled, stats) = percentile_stretch_u16(&band.data, params.stretch_low, params.stretch_high);
                write_tiff_u16(&path, cols, rows, &scaled)?;
                (U16_NODATA.to_string(), Some([stats.low, stats.high]), stats.valid_count)
            }
            ExportDataType::F32 => {
                let samples = finite_or_nan(&band.data);
                let valid = samples.iter().filter(|v| !v.is_nan()).count();
                write_tiff_f32(&path, cols, rows, &samples)?;
                ("NaN".to_string(), None, valid)
            }
        };
        info!("Exported {} as {} ({} valid pixels): {:?}", band.name, data_type, valid_pixels, path);

        write_world_file(&path, grid.geotransform)?;
        write_prj_file(&path, &grid.crs)?;
        let sidecar = BandSidecar {
            band: band.name.clone(),
            data_type: data_type.to_string(),
            nodata,
            stretch,
            valid_pixels,
            date_range: range.copied(),
            width: cols,
            height: rows,
            geotransform: grid.geotransform,
            crs: grid.crs.clone(),
            created: Utc::now().to_rfc3339(),
            generator: BandSidecar::generator(),
        };
        report.sidecars.push(write_band_sidecar(&path, &sidecar)?);
        report.rasters.push(path);
    }

    if let Some(aoi) = aoi {
        let path = out_dir.join(format!("{}_aoi.geojson", params.prefix));
        write_aoi_geojson(&path, aoi, &grid.crs)?;
        report.aoi = Some(path);
    }

    Ok(report)
}
