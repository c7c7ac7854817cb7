use crate::core::image::Image;
use crate::error::Result;

/// Convert one stored integer sample to surface reflectance
#[inline]
pub fn normalize_value(value: f32, scale_factor: f32) -> f32 {
    value / scale_factor
}

/// Divide each listed band by `scale_factor`. Other bands pass through untouched.
/// No clamping: stored values above the factor give reflectance above 1.0.
pub fn normalize_reflectance<S: AsRef<str>>(
    image: &Image,
    bands: &[S],
    scale_factor: f32,
) -> Result<Image> {
    let mut out = image.clone();
    for name in bands {
        let data = out.band_mut(name.as_ref())?;
        data.par_mapv_inplace(|v| normalize_value(v, scale_factor));
    }
    Ok(out)
}
