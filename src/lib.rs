#![doc = r#"
s2mosaic: cloud-filtered, multi-index Sentinel-2 quality mosaics.

For a month window and an area of interest, this crate picks the clearest observation
per pixel across a stack of scenes. Along the way it normalizes reflectance, masks
pixels below a clearness threshold, and derives three spectral indices: EVI, BAI,
and NBR. The result is a seven-band composite (`B4, B3, B2, B8, EVI, BAI, NBR`) that
can be exported as per-band TIFFs.

Scenes come from a [`SceneSource`]. Two are built in: [`SceneCatalog`], which reads a
local JSON manifest of single-band TIFFs, and [`MemorySource`] for in-memory data.

Quick start: composite and export
---------------------------------
```rust,no_run
use std::path::Path;
use s2mosaic::{Aoi, CompositeParams, DateRange, ExportParams, SceneCatalog, SceneSource};

fn main() -> s2mosaic::Result<()> {
    let params = CompositeParams::default();
    let catalog = SceneCatalog::open("/data/catalog.json")?;
    let aoi = Aoi::from_geojson_file("/data/aoi.geojson", params.aoi_buffer)?;

    // September 2024
    let composite = s2mosaic::composite(2024, 9, 9, &aoi, &catalog, &params)?;

    let range = DateRange::for_months(2024, 9, 9)?;
    let report = s2mosaic::export_composite(
        &composite,
        catalog.grid(),
        Some(&range),
        Some(&aoi),
        Path::new("/out"),
        &ExportParams::default(),
    )?;
    println!("wrote {} rasters", report.rasters.len());
    Ok(())
}
```

Working with the stages directly
--------------------------------
```rust
use ndarray::Array2;
use s2mosaic::{CompositeParams, Image, ImageCollection};
use s2mosaic::core::processing::pipeline::composite_collection;

fn main() -> s2mosaic::Result<()> {
    let scene = Image::new("scene", (1, 1))
        .with_band("B2", Array2::from_elem((1, 1), 500.0))?
        .with_band("B3", Array2::from_elem((1, 1), 800.0))?
        .with_band("B4", Array2::from_elem((1, 1), 600.0))?
        .with_band("B8", Array2::from_elem((1, 1), 3000.0))?
        .with_band("B12", Array2::from_elem((1, 1), 1200.0))?
        .with_band("cs_cdf", Array2::from_elem((1, 1), 0.9))?;

    let params = CompositeParams::default();
    let composite = composite_collection(&ImageCollection::new(vec![scene]), (1, 1), None, &params)?;
    assert_eq!(composite.band_names(), ["B4", "B3", "B2", "B8", "EVI", "BAI", "NBR"]);
    Ok(())
}
```

Error handling
--------------
All public functions return `s2mosaic::Result<T>`. Match on `s2mosaic::Error` to handle
specific cases. Degenerate index arithmetic is not an error (the pixel holds NaN or ±inf),
and neither is an empty scene window.

Useful modules
--------------
- [`api`]: high-level composite and export entry points.
- [`core`]: image model, AOI, parameters, and the processing stages.
- [`io`]: scene sources, TIFF reader, and writers.
- [`types`]: band names, `SpectralIndex`, `ExportDataType`.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::aoi::Aoi;
pub use crate::core::image::{Band, Bounds, GridSpec, Image, ImageCollection};
pub use crate::core::params::{
    CompositeParams, Config, DEFAULT_AOI_BUFFER, DEFAULT_CLEARNESS_THRESHOLD, DEFAULT_SCALE_FACTOR,
    ExportParams, IndexBands,
};
pub use crate::core::processing::temporal::DateRange;
pub use error::{Error, Result};
pub use types::{ExportDataType, SpectralIndex, bands};

pub use io::catalog::{CatalogError, MemorySource, SceneCatalog, SceneSource};
pub use io::raster::{RasterError, read_band};

pub use api::{ExportReport, composite, export_composite};
