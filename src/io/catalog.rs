//! Scene sources: the boundary between the compositing core and whatever stores the
//! imagery. `SceneCatalog` reads a local JSON manifest of single-band TIFFs;
//! `MemorySource` serves an in-memory collection.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::image::{Bounds, GridSpec, Image, ImageCollection};
use crate::core::processing::select::select_bands;
use crate::core::processing::temporal::DateRange;
use crate::error::Result;
use crate::io::raster::read_band;

/// Errors encountered when reading a scene catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Scene {scene} has no band {band}")]
    MissingBand { scene: String, band: String },
    #[error("Scene {scene} band {band}: expected {expected:?} pixels, got {found:?}")]
    GridMismatch {
        scene: String,
        band: String,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Provider of raw scenes for a date window and region
pub trait SceneSource {
    /// Grid every returned image is aligned to
    fn grid(&self) -> &GridSpec;

    /// Scenes acquired inside `range` whose footprint meets `bounds`, carrying exactly
    /// `bands`, in a stable order.
    fn query(&self, range: &DateRange, bounds: Option<&Bounds>, bands: &[String]) -> Result<ImageCollection>;
}

/// One scene entry of a catalog manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntry {
    pub id: String,
    pub acquired: NaiveDate,
    /// Band name -> TIFF path, relative to the manifest directory
    pub bands: BTreeMap<String, PathBuf>,
    /// Extent covered by valid data; the whole grid when absent
    #[serde(default)]
    pub footprint: Option<Bounds>,
    /// Raw sample value meaning "no data"
    #[serde(default)]
    pub nodata: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub grid: GridSpec,
    pub scenes: Vec<SceneEntry>,
}

/// Local scene catalog backed by a JSON manifest
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    root: PathBuf,
    grid: GridSpec,
    scenes: Vec<SceneEntry>,
}

impl SceneCatalog {
    pub fn open<P: AsRef<Path>>(manifest: P) -> std::result::Result<Self, CatalogError> {
        let manifest = manifest.as_ref();
        let text = std::fs::read_to_string(manifest)?;
        let root = manifest.parent().map(Path::to_path_buf).unwrap_or_default();
        let catalog = Self::from_manifest_str(&text, root)?;
        info!("Opened catalog {:?}: {} scenes", manifest, catalog.scenes.len());
        Ok(catalog)
    }

    /// Parse a manifest; relative band paths resolve against `root`
    pub fn from_manifest_str(text: &str, root: impl Into<PathBuf>) -> std::result::Result<Self, CatalogError> {
        let manifest: CatalogManifest = serde_json::from_str(text)?;
        Ok(Self::from_manifest(manifest, root))
    }

    pub fn from_manifest(manifest: CatalogManifest, root: impl Into<PathBuf>) -> Self {
        let mut scenes = manifest.scenes;
        scenes.sort_by(|a, b| a.acquired.cmp(&b.acquired).then_with(|| a.id.cmp(&b.id)));
        Self {
            root: root.into(),
            grid: manifest.grid,
            scenes,
        }
    }

    pub fn scenes(&self) -> &[SceneEntry] {
        &self.scenes
    }

    fn load_scene(&self, entry: &SceneEntry, bands: &[String]) -> Result<Image> {
        let mut image = Image::new(entry.id.clone(), self.grid.shape()).with_date(entry.acquired);
        for name in bands {
            let Some(rel) = entry.bands.get(name) else {
                return Err(CatalogError::MissingBand {
                    scene: entry.id.clone(),
                    band: name.clone(),
                }
                .into());
            };
            let mut data = read_band(self.root.join(rel))?;
            if data.dim() != self.grid.shape() {
                return Err(CatalogError::GridMismatch {
                    scene: entry.id.clone(),
                    band: name.clone(),
                    expected: self.grid.shape(),
                    found: data.dim(),
                }
                .into());
            }
            if let Some(nodata) = entry.nodata {
                data.mapv_inplace(|v| if v == nodata { f32::NAN } else { v });
            }
            image.set_band(name.as_str(), data)?;
        }
        debug!("Loaded scene {} ({} bands)", entry.id, bands.len());
        Ok(image)
    }
}

impl SceneSource for SceneCatalog {
    fn grid(&self) -> &GridSpec {
        &self.grid
    }

    fn query(&self, range: &DateRange, bounds: Option<&Bounds>, bands: &[String]) -> Result<ImageCollection> {
        let grid_bounds = self.grid.bounds();
        let matching: Vec<&SceneEntry> = self
            .scenes
            .iter()
            .filter(|s| range.contains(s.acquired))
            .filter(|s| match bounds {
                Some(b) => s.footprint.unwrap_or(grid_bounds).intersects(b),
                None => true,
            })
            .collect();

        if matching.is_empty() {
            warn!("Catalog query {}: no scenes match", range);
        } else {
            info!("Catalog query {}: {} of {} scenes match", range, matching.len(), self.scenes.len());
        }

        let images = matching
            .par_iter()
            .map(|entry| self.load_scene(entry, bands))
            .collect::<Result<Vec<_>>>()?;
        Ok(ImageCollection::new(images))
    }
}

/// In-memory scene source, for embedding and tests
#[derive(Debug, Clone)]
pub struct MemorySource {
    grid: GridSpec,
    collection: ImageCollection,
}

impl MemorySource {
    pub fn new(grid: GridSpec, collection: ImageCollection) -> Self {
        Self { grid, collection }
    }
}

impl SceneSource for MemorySource {
    fn grid(&self) -> &GridSpec {
        &self.grid
    }

    fn query(&self, range: &DateRange, bounds: Option<&Bounds>, bands: &[String]) -> Result<ImageCollection> {
        if bounds.is_some_and(|b| !self.grid.bounds().intersects(b)) {
            return Ok(ImageCollection::default());
        }
        self.collection
            .filter_date(range)
            .iter()
            .map(|img| select_bands(img, bands))
            .collect::<Result<Vec<_>>>()
            .map(ImageCollection::new)
    }
}
