//! Spectral index calculators over normalized reflectance.
//!
//! Degenerate denominators are not errors: the IEEE result (NaN or ±inf) is written to
//! the pixel and downstream consumers treat it as undefined.
use ndarray::{Array2, Zip};

use crate::core::image::Image;
use crate::core::params::IndexBands;
use crate::error::Result;
use crate::types::{SpectralIndex, bands};

/// Enhanced Vegetation Index: `2.5 * (NIR - RED) / (NIR + 6 RED - 7.5 BLUE + 1)`
#[inline]
pub fn evi(nir: f32, red: f32, blue: f32) -> f32 {
    // MODIS coefficients
    const G: f32 = 2.5;
    const C1: f32 = 6.0;
    const C2: f32 = 7.5;
    const L: f32 = 1.0;
    G * (nir - red) / (nir + C1 * red - C2 * blue + L)
}

/// Burn Area Index: `1 / ((0.1 - RED)^2 + (0.06 - NIR)^2)`
#[inline]
pub fn bai(red: f32, nir: f32) -> f32 {
    let dr = 0.1 - red;
    let dn = 0.06 - nir;
    1.0 / (dr * dr + dn * dn)
}

/// Normalized Burn Ratio: `(NIR - SWIR2) / (NIR + SWIR2)`
#[inline]
pub fn nbr(nir: f32, swir2: f32) -> f32 {
    (nir - swir2) / (nir + swir2)
}

/// A derived band computed from base reflectance bands
pub trait IndexCalculator: Send + Sync {
    /// Name of the output band
    fn name(&self) -> &str;

    /// Input band names, in the order `calculate` reads them
    fn required_bands(&self) -> Vec<&str>;

    fn calculate(&self, image: &Image) -> Result<Array2<f32>>;
}

/// Enhanced Vegetation Index calculator
pub struct Evi {
    nir: String,
    red: String,
    blue: String,
    name: String,
}

impl Evi {
    pub fn new(nir: &str, red: &str, blue: &str, name: Option<String>) -> Self {
        Self {
            nir: nir.to_string(),
            red: red.to_string(),
            blue: blue.to_string(),
            name: name.unwrap_or_else(|| bands::EVI.to_string()),
        }
    }
}

impl Default for Evi {
    fn default() -> Self {
        Self::new(bands::NIR, bands::RED, bands::BLUE, None)
    }
}

impl IndexCalculator for Evi {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_bands(&self) -> Vec<&str> {
        vec![self.nir.as_str(), self.red.as_str(), self.blue.as_str()]
    }

    fn calculate(&self, image: &Image) -> Result<Array2<f32>> {
        let nir = image.band(&self.nir)?;
        let red = image.band(&self.red)?;
        let blue = image.band(&self.blue)?;

        let mut out = Array2::<f32>::zeros(image.shape());
        Zip::from(&mut out)
            .and(nir)
            .and(red)
            .and(blue)
            .par_for_each(|o, &n, &r, &b| *o = evi(n, r, b));
        Ok(out)
    }
}

/// Burn Area Index calculator
pub struct Bai {
    red: String,
    nir: String,
    name: String,
}

impl Bai {
    pub fn new(red: &str, nir: &str, name: Option<String>) -> Self {
        Self {
            red: red.to_string(),
            nir: nir.to_string(),
            name: name.unwrap_or_else(|| bands::BAI.to_string()),
        }
    }
}

impl Default for Bai {
    fn default() -> Self {
        Self::new(bands::RED, bands::NIR, None)
    }
}

impl IndexCalculator for Bai {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_bands(&self) -> Vec<&str> {
        vec![self.red.as_str(), self.nir.as_str()]
    }

    fn calculate(&self, image: &Image) -> Result<Array2<f32>> {
        let red = image.band(&self.red)?;
        let nir = image.band(&self.nir)?;

        let mut out = Array2::<f32>::zeros(image.shape());
        Zip::from(&mut out)
            .and(red)
            .and(nir)
            .par_for_each(|o, &r, &n| *o = bai(r, n));
        Ok(out)
    }
}

/// Normalized Burn Ratio calculator
pub struct Nbr {
    nir: String,
    swir2: String,
    name: String,
}

impl Nbr {
    pub fn new(nir: &str, swir2: &str, name: Option<String>) -> Self {
        Self {
            nir: nir.to_string(),
            swir2: swir2.to_string(),
            name: name.unwrap_or_else(|| bands::NBR.to_string()),
        }
    }
}

impl Default for Nbr {
    fn default() -> Self {
        Self::new(bands::NIR, bands::SWIR2, None)
    }
}

impl IndexCalculator for Nbr {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_bands(&self) -> Vec<&str> {
        vec![self.nir.as_str(), self.swir2.as_str()]
    }

    fn calculate(&self, image: &Image) -> Result<Array2<f32>> {
        let nir = image.band(&self.nir)?;
        let swir2 = image.band(&self.swir2)?;

        let mut out = Array2::<f32>::zeros(image.shape());
        Zip::from(&mut out)
            .and(nir)
            .and(swir2)
            .par_for_each(|o, &n, &s| *o = nbr(n, s));
        Ok(out)
    }
}

impl SpectralIndex {
    /// Calculator reading the bands `roles` assigns to blue, red, NIR and SWIR2
    pub fn calculator(self, roles: &IndexBands) -> Box<dyn IndexCalculator> {
        match self {
            SpectralIndex::Evi => Box::new(Evi::new(&roles.nir, &roles.red, &roles.blue, None)),
            SpectralIndex::Bai => Box::new(Bai::new(&roles.red, &roles.nir, None)),
            SpectralIndex::Nbr => Box::new(Nbr::new(&roles.nir, &roles.swir2, None)),
        }
    }
}

/// Append the calculator's band, replacing a band of the same name
pub fn add_index(image: &Image, calculator: &dyn IndexCalculator) -> Result<Image> {
    let data = calculator.calculate(image)?;
    let mut out = image.clone();
    out.set_band(calculator.name(), data)?;
    Ok(out)
}

/// Append every listed index. Each reads only base bands, so order does not matter.
pub fn add_indices(image: &Image, indices: &[SpectralIndex], roles: &IndexBands) -> Result<Image> {
    let mut out = image.clone();
    for idx in indices {
        let calculator = idx.calculator(roles);
        let data = calculator.calculate(image)?;
        out.set_band(calculator.name(), data)?;
    }
    Ok(out)
}
