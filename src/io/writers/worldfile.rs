use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a `.tfw` world file next to the TIFF using the provided geotransform.
/// The world file stores the transform in pixel-center convention.
pub fn write_world_file(output_image: &Path, geotransform: [f64; 6]) -> std::io::Result<PathBuf> {
    let world_path = output_image.with_extension("tfw");

    // A: pixel size in X, D: rotation about Y, B: rotation about X, E: pixel size Y
    // C, F: center of upper-left pixel
    let a = geotransform[1];
    let d = geotransform[4];
    let b = geotransform[2];
    let e = geotransform[5];
    let c = geotransform[0] + 0.5 * a + 0.5 * b;
    let f = geotransform[3] + 0.5 * d + 0.5 * e;

    let mut file = File::create(&world_path)?;
    for value in [a, d, b, e, c, f] {
        writeln!(file, "{:.12}", value)?;
    }
    Ok(world_path)
}

/// Write a .prj file with the provided projection (WKT or EPSG:XXXX)
pub fn write_prj_file(output_image: &Path, projection: &str) -> std::io::Result<PathBuf> {
    let prj_path = output_image.with_extension("prj");
    std::fs::write(&prj_path, projection.as_bytes())?;
    Ok(prj_path)
}
