use std::path::Path;

use tracing::info;

use crate::core::aoi::Aoi;
use crate::error::Result;

/// Write the AOI boundary as a single-feature GeoJSON collection
pub fn write_aoi_geojson(output: &Path, aoi: &Aoi, crs: &str) -> Result<()> {
    let document = serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "buffer": aoi.buffer(),
                "crs": crs,
            },
            "geometry": aoi.to_geojson(),
        }],
    });
    std::fs::write(output, serde_json::to_string_pretty(&document)?)?;
    info!("Wrote AOI vector: {:?}", output);
    Ok(())
}
