use std::collections::HashSet;

use crate::core::image::Image;
use crate::error::{Error, Result};

/// Project `image` onto `names`, in the requested order, with values unchanged.
pub fn select_bands<S: AsRef<str>>(image: &Image, names: &[S]) -> Result<Image> {
    let mut seen = HashSet::with_capacity(names.len());
    let mut out = Image::new(image.id.clone(), image.shape());
    out.acquired = image.acquired;

    for name in names {
        let name = name.as_ref();
        if !seen.insert(name) {
            return Err(Error::DuplicateBand {
                band: name.to_string(),
            });
        }
        out.set_band(name, image.band(name)?.clone())?;
    }
    Ok(out)
}
