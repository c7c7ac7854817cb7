//! In-memory raster model: named `f32` bands on a shared grid, ordered collections of
//! images, and the grid/bounds types used for georeferencing.
//!
//! Undefined (masked or no-data) samples are stored as `f32::NAN`.
use chrono::NaiveDate;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::core::processing::temporal::DateRange;
use crate::error::{Error, Result};

/// Axis-aligned extent in CRS units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn expand(&self, distance: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - distance,
            min_y: self.min_y - distance,
            max_x: self.max_x + distance,
            max_y: self.max_y + distance,
        }
    }
}

/// Raster grid shared by every image of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
    /// Affine coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// CRS identifier, e.g. `EPSG:32633`
    pub crs: String,
}

impl GridSpec {
    /// `(rows, cols)`, matching `Array2::dim()`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Map coordinates of the center of pixel `(row, col)`
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        let gt = &self.geotransform;
        let px = col as f64 + 0.5;
        let py = row as f64 + 0.5;
        (gt[0] + px * gt[1] + py * gt[2], gt[3] + px * gt[4] + py * gt[5])
    }

    pub fn bounds(&self) -> Bounds {
        let gt = &self.geotransform;
        let (w, h) = (self.width as f64, self.height as f64);
        let corners = [
            (gt[0], gt[3]),
            (gt[0] + w * gt[1], gt[3] + w * gt[4]),
            (gt[0] + h * gt[2], gt[3] + h * gt[5]),
            (gt[0] + w * gt[1] + h * gt[2], gt[3] + w * gt[4] + h * gt[5]),
        ];
        let mut b = Bounds::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y) in corners {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        b
    }
}

/// A named 2-D band
#[derive(Debug, Clone)]
pub struct Band {
    pub name: String,
    pub data: Array2<f32>,
}

/// Multi-band raster with an optional acquisition date
#[derive(Debug, Clone)]
pub struct Image {
    pub id: String,
    pub acquired: Option<NaiveDate>,
    shape: (usize, usize),
    bands: Vec<Band>,
}

impl Image {
    pub fn new(id: impl Into<String>, shape: (usize, usize)) -> Self {
        Self {
            id: id.into(),
            acquired: None,
            shape,
            bands: Vec::new(),
        }
    }

    /// Image with every listed band set to NaN
    pub fn undefined<S: AsRef<str>>(id: impl Into<String>, shape: (usize, usize), names: &[S]) -> Self {
        let mut image = Image::new(id, shape);
        for name in names {
            image.bands.push(Band {
                name: name.as_ref().to_string(),
                data: Array2::from_elem(shape, f32::NAN),
            });
        }
        image
    }

    pub fn with_date(mut self, acquired: NaiveDate) -> Self {
        self.acquired = Some(acquired);
        self
    }

    pub fn with_band(mut self, name: impl Into<String>, data: Array2<f32>) -> Result<Self> {
        self.set_band(name, data)?;
        Ok(self)
    }

    /// Append a band, or replace the band of the same name in place.
    pub fn set_band(&mut self, name: impl Into<String>, data: Array2<f32>) -> Result<()> {
        let name = name.into();
        if data.dim() != self.shape {
            return Err(Error::ShapeMismatch {
                context: format!("band {} of image {}", name, self.id),
                expected: self.shape,
                found: data.dim(),
            });
        }
        match self.bands.iter_mut().find(|b| b.name == name) {
            Some(existing) => existing.data = data,
            None => self.bands.push(Band { name, data }),
        }
        Ok(())
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn band(&self, name: &str) -> Result<&Array2<f32>> {
        self.bands
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.data)
            .ok_or_else(|| self.band_not_found(name))
    }

    pub fn band_mut(&mut self, name: &str) -> Result<&mut Array2<f32>> {
        match self.bands.iter().position(|b| b.name == name) {
            Some(i) => Ok(&mut self.bands[i].data),
            None => Err(self.band_not_found(name)),
        }
    }

    pub fn has_band(&self, name: &str) -> bool {
        self.bands.iter().any(|b| b.name == name)
    }

    pub fn band_names(&self) -> Vec<&str> {
        self.bands.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }

    pub fn bands_mut(&mut self) -> impl Iterator<Item = &mut Band> {
        self.bands.iter_mut()
    }

    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    /// True when at least one band holds a finite value at `(row, col)`
    pub fn is_defined_at(&self, row: usize, col: usize) -> bool {
        self.bands.iter().any(|b| b.data[[row, col]].is_finite())
    }

    /// Number of pixels where `band` holds a finite value
    pub fn defined_count(&self, band: &str) -> Result<usize> {
        Ok(self.band(band)?.iter().filter(|v| v.is_finite()).count())
    }

    fn band_not_found(&self, name: &str) -> Error {
        Error::BandNotFound {
            band: name.to_string(),
            available: self.band_names().join(", "),
        }
    }
}

/// Ordered set of images sharing a band schema. Order decides mosaic tie-breaks.
#[derive(Debug, Clone, Default)]
pub struct ImageCollection {
    images: Vec<Image>,
}

impl ImageCollection {
    pub fn new(images: Vec<Image>) -> Self {
        Self { images }
    }

    pub fn push(&mut self, image: Image) {
        self.images.push(image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.images.iter()
    }

    pub fn into_images(self) -> Vec<Image> {
        self.images
    }

    /// Keep images acquired inside `range`; undated images are dropped.
    pub fn filter_date(&self, range: &DateRange) -> ImageCollection {
        ImageCollection {
            images: self
                .images
                .iter()
                .filter(|img| img.acquired.is_some_and(|d| range.contains(d)))
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<Image> for ImageCollection {
    fn from_iter<I: IntoIterator<Item = Image>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ImageCollection {
    type Item = Image;
    type IntoIter = std::vec::IntoIter<Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}
