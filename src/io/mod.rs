//! I/O layer: single-band TIFF rasters, the scene sources that feed the pipeline,
//! and `writers` for the exported composite and its sidecars.
pub mod catalog;
pub use catalog::{CatalogError, MemorySource, SceneCatalog, SceneSource};

pub mod raster;
pub use raster::{RasterError, read_band};

pub mod writers;
