use ndarray::{Array2, Zip};
use tracing::debug;

use crate::core::image::Image;
use crate::error::{Error, Result};

/// A pixel is admissible when its clearness score reaches the threshold.
/// NaN scores never are.
#[inline]
pub fn is_admissible(score: f32, threshold: f32) -> bool {
    score >= threshold
}

/// Number of admissible pixels in `image`
pub fn admissible_count(image: &Image, score_band: &str, threshold: f32) -> Result<usize> {
    Ok(image
        .band(score_band)?
        .iter()
        .filter(|&&s| is_admissible(s, threshold))
        .count())
}

/// Set every band, the score band included, to NaN where the clearness score is below
/// `threshold`. Applying it twice is the same as applying it once.
pub fn apply_clearness_mask(image: &Image, score_band: &str, threshold: f32) -> Result<Image> {
    let keep = image.band(score_band)?.mapv(|s| is_admissible(s, threshold));
    let out = mask_bands(image, &keep);
    debug!(
        "Clearness mask on {}: {} of {} pixels admissible",
        image.id,
        keep.iter().filter(|&&k| k).count(),
        keep.len()
    );
    Ok(out)
}

/// Set every band to NaN where `region` is false
pub fn apply_region_mask(image: &Image, region: &Array2<bool>) -> Result<Image> {
    if region.dim() != image.shape() {
        return Err(Error::ShapeMismatch {
            context: format!("region mask for {}", image.id),
            expected: image.shape(),
            found: region.dim(),
        });
    }
    Ok(mask_bands(image, region))
}

fn mask_bands(image: &Image, keep: &Array2<bool>) -> Image {
    let mut out = image.clone();
    for band in out.bands_mut() {
        Zip::from(&mut band.data).and(keep).par_for_each(|v, &k| {
            if !k {
                *v = f32::NAN;
            }
        });
    }
    out
}
