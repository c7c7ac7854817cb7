// Shared builders for the integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use ndarray::Array2;
use s2mosaic::{GridSpec, Image, bands};

/// 10 m UTM grid anchored at (500000, 4200000)
pub fn grid(width: usize, height: usize) -> GridSpec {
    GridSpec {
        width,
        height,
        geotransform: [500_000.0, 10.0, 0.0, 4_200_000.0, 0.0, -10.0],
        crs: "EPSG:32633".to_string(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Raw scene with constant integer reflectance `[B2, B3, B4, B8, B12]` and the given
/// clearness score grid
pub fn raw_scene(id: &str, acquired: NaiveDate, raw: [f32; 5], score: Array2<f32>) -> Image {
    let shape = score.dim();
    let mut image = Image::new(id, shape).with_date(acquired);
    for (name, value) in bands::REFLECTANCE.iter().zip(raw) {
        image.set_band(*name, Array2::from_elem(shape, value)).unwrap();
    }
    image.set_band(bands::CLEARNESS, score).unwrap();
    image
}

/// Score grid from a per-pixel function
pub fn score_grid(shape: (usize, usize), f: impl Fn(usize, usize) -> f32) -> Array2<f32> {
    Array2::from_shape_fn(shape, |(r, c)| f(r, c))
}

/// Bitwise equality that also treats any two NaNs as equal
pub fn same(a: f32, b: f32) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

pub fn same_array(a: &Array2<f32>, b: &Array2<f32>) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(&x, &y)| same(x, y))
}

pub fn same_image(a: &Image, b: &Image) -> bool {
    a.band_names() == b.band_names()
        && a.bands()
            .zip(b.bands())
            .all(|(x, y)| same_array(&x.data, &y.data))
}
