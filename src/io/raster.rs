use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array2;
use thiserror::Error;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

/// Errors encountered when reading or writing single-band rasters
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),
    #[error("Unsupported raster layout: {0}")]
    UnsupportedLayout(String),
    #[error("Unsupported sample format in {0}")]
    UnsupportedSampleFormat(String),
    #[error("Sample count mismatch: expected {expected}, got {found}")]
    SampleCount { expected: usize, found: usize },
}

/// Read a single-band grayscale TIFF as an f32 array of shape (height, width).
/// Integer and float sample types are converted as-is, without rescaling.
pub fn read_band<P: AsRef<Path>>(path: P) -> Result<Array2<f32>, RasterError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;
    let (width, height) = decoder.dimensions()?;

    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => {
            return Err(RasterError::UnsupportedLayout(format!(
                "{:?} in {}, expected single-band gray",
                other,
                path.display()
            )));
        }
    }

    let samples: Vec<f32> = match decoder.read_image()? {
        DecodingResult::U8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|x| x as f32).collect(),
        #[allow(unreachable_patterns)]
        _ => return Err(RasterError::UnsupportedSampleFormat(path.display().to_string())),
    };

    let (cols, rows) = (width as usize, height as usize);
    let found = samples.len();
    let array = Array2::from_shape_vec((rows, cols), samples)
        .map_err(|_| RasterError::SampleCount {
            expected: rows * cols,
            found,
        })?;
    debug!("Read {}x{} band from {}", cols, rows, path.display());
    Ok(array)
}
