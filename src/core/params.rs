use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::processing::indices::IndexCalculator;
use crate::error::{Error, Result};
use crate::types::{SpectralIndex, bands};

/// Minimum clearness score for a pixel to be admissible
pub const DEFAULT_CLEARNESS_THRESHOLD: f32 = 0.6;
/// Outward buffer applied to the AOI, in CRS units
pub const DEFAULT_AOI_BUFFER: f64 = 1000.0;
/// Storage scale of the integer reflectance bands
pub const DEFAULT_SCALE_FACTOR: f32 = 10_000.0;

/// Reflectance band read for each spectral role of the index formulas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexBands {
    pub blue: String,
    pub red: String,
    pub nir: String,
    pub swir2: String,
}

impl Default for IndexBands {
    fn default() -> Self {
        Self {
            blue: bands::BLUE.to_string(),
            red: bands::RED.to_string(),
            nir: bands::NIR.to_string(),
            swir2: bands::SWIR2.to_string(),
        }
    }
}

/// Compositing parameters suitable for config files and per-run overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeParams {
    pub clearness_threshold: f32,
    /// Buffer around the AOI used for the clip; replaces the buffer the AOI was built with
    pub aoi_buffer: f64,
    pub scale_factor: f32,
    /// Bands divided by `scale_factor` before masking
    pub reflectance_bands: Vec<String>,
    pub score_band: String,
    pub indices: Vec<SpectralIndex>,
    /// Input band per spectral role; each must be one of `reflectance_bands`
    pub index_bands: IndexBands,
    /// Bands kept in the final composite, in order
    pub output_bands: Vec<String>,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            clearness_threshold: DEFAULT_CLEARNESS_THRESHOLD,
            aoi_buffer: DEFAULT_AOI_BUFFER,
            scale_factor: DEFAULT_SCALE_FACTOR,
            reflectance_bands: bands::REFLECTANCE.iter().map(|b| b.to_string()).collect(),
            score_band: bands::CLEARNESS.to_string(),
            indices: SpectralIndex::ALL.to_vec(),
            index_bands: IndexBands::default(),
            output_bands: bands::OUTPUT.iter().map(|b| b.to_string()).collect(),
        }
    }
}

impl CompositeParams {
    pub fn validate(&self) -> Result<()> {
        if !self.clearness_threshold.is_finite() || !(0.0..=1.0).contains(&self.clearness_threshold) {
            return Err(Error::InvalidArgument {
                arg: "clearness_threshold",
                value: self.clearness_threshold.to_string(),
            });
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "scale_factor",
                value: self.scale_factor.to_string(),
            });
        }
        if !self.aoi_buffer.is_finite() || self.aoi_buffer < 0.0 {
            return Err(Error::InvalidArgument {
                arg: "aoi_buffer",
                value: self.aoi_buffer.to_string(),
            });
        }
        if self.reflectance_bands.is_empty() {
            return Err(Error::InvalidArgument {
                arg: "reflectance_bands",
                value: "[]".to_string(),
            });
        }
        for idx in &self.indices {
            let calculator = idx.calculator(&self.index_bands);
            for band in calculator.required_bands() {
                if !self.reflectance_bands.iter().any(|b| b == band) {
                    return Err(Error::InvalidArgument {
                        arg: "index_bands",
                        value: format!("{} reads {}, which is not a reflectance band", idx, band),
                    });
                }
            }
        }
        if self.output_bands.is_empty() {
            return Err(Error::InvalidArgument {
                arg: "output_bands",
                value: "[]".to_string(),
            });
        }
        if self.score_band.is_empty() {
            return Err(Error::InvalidArgument {
                arg: "score_band",
                value: String::new(),
            });
        }
        Ok(())
    }

    /// Bands requested from the scene source: reflectance plus the clearness score
    pub fn input_bands(&self) -> Vec<String> {
        let mut names = self.reflectance_bands.clone();
        if !names.contains(&self.score_band) {
            names.push(self.score_band.clone());
        }
        names
    }

    /// Bands carried through the mosaic: inputs followed by the derived indices
    pub fn mosaic_schema(&self) -> Vec<String> {
        let mut names = self.input_bands();
        for idx in &self.indices {
            let name = idx.band_name().to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Export settings for the on-disk composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportParams {
    /// File name prefix, e.g. `composite` -> `composite_B4.tif`
    pub prefix: String,
    /// Lower percentile of the visualization stretch
    pub stretch_low: f64,
    /// Upper percentile of the visualization stretch
    pub stretch_high: f64,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            prefix: "composite".to_string(),
            stretch_low: 2.0,
            stretch_high: 98.0,
        }
    }
}

impl ExportParams {
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(Error::InvalidArgument {
                arg: "prefix",
                value: self.prefix.clone(),
            });
        }
        let in_range = |p: f64| p.is_finite() && (0.0..=100.0).contains(&p);
        if !in_range(self.stretch_low) || !in_range(self.stretch_high) || self.stretch_low >= self.stretch_high {
            return Err(Error::InvalidArgument {
                arg: "stretch",
                value: format!("{}..{}", self.stretch_low, self.stretch_high),
            });
        }
        Ok(())
    }
}

/// Full run configuration as stored in a JSON config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub composite: CompositeParams,
    pub export: ExportParams,
}

impl Config {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        Ok(config)
    }
}
