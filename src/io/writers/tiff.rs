use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};

use crate::io::raster::RasterError;

fn check_len(cols: usize, rows: usize, found: usize) -> Result<(), RasterError> {
    if cols * rows != found {
        return Err(RasterError::SampleCount {
            expected: cols * rows,
            found,
        });
    }
    Ok(())
}

/// Write a single-band 16-bit unsigned TIFF from row-major samples
pub fn write_tiff_u16(output: &Path, cols: usize, rows: usize, data: &[u16]) -> Result<(), RasterError> {
    check_len(cols, rows, data.len())?;
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(output)?))?;
    encoder.write_image::<colortype::Gray16>(cols as u32, rows as u32, data)?;
    Ok(())
}

/// Write a single-band 32-bit float TIFF from row-major samples
pub fn write_tiff_f32(output: &Path, cols: usize, rows: usize, data: &[f32]) -> Result<(), RasterError> {
    check_len(cols, rows, data.len())?;
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(output)?))?;
    encoder.write_image::<colortype::Gray32Float>(cols as u32, rows as u32, data)?;
    Ok(())
}
