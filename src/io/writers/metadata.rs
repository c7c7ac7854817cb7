use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::core::processing::temporal::DateRange;
use crate::error::Result;

/// Metadata written next to each exported band as `<image>.json`
#[derive(Debug, Clone, Serialize)]
pub struct BandSidecar {
    pub band: String,
    /// `uint16` or `float32`
    pub data_type: String,
    /// Sample value marking undefined pixels (`0` or `NaN`)
    pub nodata: String,
    /// Percentile bounds of the visualization stretch, if one was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretch: Option<[f64; 2]>,
    pub valid_pixels: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub width: usize,
    pub height: usize,
    pub geotransform: [f64; 6],
    pub crs: String,
    pub created: String,
    pub generator: String,
}

impl BandSidecar {
    pub fn generator() -> String {
        format!("s2mosaic {}", env!("CARGO_PKG_VERSION"))
    }
}

/// Write `sidecar` as pretty JSON next to `output_image`
pub fn write_band_sidecar(output_image: &Path, sidecar: &BandSidecar) -> Result<PathBuf> {
    let sidecar_path = output_image.with_extension("json");
    let json_string = serde_json::to_string_pretty(sidecar)?;
    std::fs::write(&sidecar_path, json_string)?;
    info!("Created metadata sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}
