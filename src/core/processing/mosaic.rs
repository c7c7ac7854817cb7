//! Per-pixel quality mosaic: every output pixel copies all bands from the single input
//! image with the highest clearness score at that location.
use ndarray::{Array2, Zip};
use tracing::{debug, info};

use crate::core::image::{Image, ImageCollection};
use crate::error::{Error, Result};

/// Index of the winning image per pixel, `None` where no image has a defined score.
///
/// Images are visited in collection order and only a strictly greater score replaces
/// the current winner, so ties go to the first image.
pub fn select_sources(
    collection: &ImageCollection,
    score_band: &str,
    shape: (usize, usize),
) -> Result<Array2<Option<usize>>> {
    let mut best = Array2::<f32>::from_elem(shape, f32::NAN);
    let mut source = Array2::<Option<usize>>::from_elem(shape, None);

    for (idx, image) in collection.iter().enumerate() {
        check_shape(image, shape)?;
        let score = image.band(score_band)?;
        Zip::from(&mut best)
            .and(&mut source)
            .and(score)
            .par_for_each(|b, src, &s| {
                if s.is_nan() {
                    return;
                }
                if b.is_nan() || s > *b {
                    *b = s;
                    *src = Some(idx);
                }
            });
    }

    Ok(source)
}

/// Collapse `collection` into one image carrying the `schema` bands.
///
/// An empty collection is a valid input and yields an image that is undefined
/// everywhere.
pub fn quality_mosaic<S: AsRef<str>>(
    collection: &ImageCollection,
    score_band: &str,
    shape: (usize, usize),
    schema: &[S],
) -> Result<Image> {
    if collection.is_empty() {
        info!("Quality mosaic: empty collection, result is fully undefined");
        return Ok(Image::undefined("quality_mosaic", shape, schema));
    }

    let sources = select_sources(collection, score_band, shape)?;
    let covered = sources.iter().filter(|s| s.is_some()).count();
    info!(
        "Quality mosaic over {} images: {} of {} pixels covered",
        collection.len(),
        covered,
        sources.len()
    );

    let mut mosaic = Image::new("quality_mosaic", shape);
    for name in schema {
        let name = name.as_ref();
        let inputs: Vec<&Array2<f32>> = collection
            .iter()
            .map(|img| img.band(name))
            .collect::<Result<_>>()?;

        let mut out = Array2::<f32>::from_elem(shape, f32::NAN);
        Zip::indexed(&mut out)
            .and(&sources)
            .par_for_each(|(row, col), v, src| {
                if let Some(i) = *src {
                    *v = inputs[i][[row, col]];
                }
            });
        mosaic.set_band(name, out)?;
        debug!("Quality mosaic: band {} assembled", name);
    }

    Ok(mosaic)
}

fn check_shape(image: &Image, shape: (usize, usize)) -> Result<()> {
    if image.shape() != shape {
        return Err(Error::ShapeMismatch {
            context: format!("mosaic input {}", image.id),
            expected: shape,
            found: image.shape(),
        });
    }
    Ok(())
}
