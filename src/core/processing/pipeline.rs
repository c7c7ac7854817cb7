use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::image::{Image, ImageCollection};
use crate::core::params::CompositeParams;
use crate::core::processing::indices::add_indices;
use crate::core::processing::mask::{admissible_count, apply_clearness_mask, apply_region_mask};
use crate::core::processing::mosaic::quality_mosaic;
use crate::core::processing::normalize::normalize_reflectance;
use crate::core::processing::select::select_bands;
use crate::error::Result;

/// Normalize, mask, and append indices to one raw scene
pub fn prepare_image(image: &Image, params: &CompositeParams) -> Result<Image> {
    let normalized = normalize_reflectance(image, &params.reflectance_bands, params.scale_factor)?;
    let admissible = admissible_count(&normalized, &params.score_band, params.clearness_threshold)?;
    debug!(
        "Scene {} ({:?}): {} admissible pixels at threshold {}",
        image.id, image.acquired, admissible, params.clearness_threshold
    );
    let masked = apply_clearness_mask(&normalized, &params.score_band, params.clearness_threshold)?;
    add_indices(&masked, &params.indices, &params.index_bands)
}

/// `prepare_image` over every scene, in parallel, keeping collection order
pub fn prepare_collection(collection: &ImageCollection, params: &CompositeParams) -> Result<ImageCollection> {
    let prepared = collection
        .images()
        .par_iter()
        .map(|img| prepare_image(img, params))
        .collect::<Result<Vec<_>>>()?;
    Ok(ImageCollection::new(prepared))
}

/// Full compositing run over an already queried collection:
/// prepare -> quality mosaic -> optional region clip -> band selection.
pub fn composite_collection(
    collection: &ImageCollection,
    shape: (usize, usize),
    region: Option<&Array2<bool>>,
    params: &CompositeParams,
) -> Result<Image> {
    params.validate()?;
    info!("Compositing {} scenes on a {}x{} grid", collection.len(), shape.1, shape.0);

    let prepared = prepare_collection(collection, params)?;
    let mosaic = quality_mosaic(&prepared, &params.score_band, shape, &params.mosaic_schema())?;

    let clipped = match region {
        Some(region) => apply_region_mask(&mosaic, region)?,
        None => mosaic,
    };

    let mut composite = select_bands(&clipped, &params.output_bands)?;
    composite.id = "composite".to_string();
    Ok(composite)
}
