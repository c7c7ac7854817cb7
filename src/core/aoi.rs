//! Area of interest: a polygonal boundary grown by a fixed buffer distance, loaded from
//! GeoJSON and rasterized onto the compositing grid.
use std::path::Path;

use geo::{BoundingRect, Contains, Coord, EuclideanDistance, LineString, MultiPolygon, Point, Polygon};
use ndarray::{Array2, Zip};
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::image::{Bounds, GridSpec};
use crate::error::{Error, Result};

type Ring = Vec<[f64; 2]>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum GeoJsonGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    geometry: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeoJsonDocument {
    Geometry(GeoJsonGeometry),
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

#[derive(Debug, Clone)]
pub struct Aoi {
    geometry: MultiPolygon<f64>,
    buffer: f64,
}

impl Aoi {
    pub fn new(geometry: MultiPolygon<f64>, buffer: f64) -> Result<Self> {
        if !buffer.is_finite() || buffer < 0.0 {
            return Err(Error::InvalidArgument {
                arg: "aoi_buffer",
                value: buffer.to_string(),
            });
        }
        if geometry.0.is_empty() {
            return Err(Error::Aoi("geometry has no polygons".to_string()));
        }
        // A closed ring needs at least 4 positions
        if geometry.0.iter().any(|poly| poly.exterior().0.len() < 4) {
            return Err(Error::Aoi("polygon exterior ring must have at least 4 positions".to_string()));
        }
        Ok(Self { geometry, buffer })
    }

    /// Axis-aligned rectangle, handy for tests and quick runs
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64, buffer: f64) -> Result<Self> {
        let ring = LineString::from(vec![
            (min_x, min_y),
            (max_x, min_y),
            (max_x, max_y),
            (min_x, max_y),
            (min_x, min_y),
        ]);
        Self::new(MultiPolygon::new(vec![Polygon::new(ring, vec![])]), buffer)
    }

    pub fn from_geojson_str(text: &str, buffer: f64) -> Result<Self> {
        let document: GeoJsonDocument = serde_json::from_str(text)
            .map_err(|e| Error::Aoi(format!("expected a polygonal GeoJSON geometry, feature or collection: {e}")))?;
        let polygons = match document {
            GeoJsonDocument::Geometry(geometry) => geometry_polygons(geometry),
            GeoJsonDocument::Feature(feature) => feature_polygons(feature)?,
            GeoJsonDocument::FeatureCollection { features } => {
                let mut polygons = Vec::new();
                for feature in features {
                    polygons.extend(feature_polygons(feature)?);
                }
                polygons
            }
        };
        Self::new(MultiPolygon::new(polygons), buffer)
    }

    pub fn from_geojson_file<P: AsRef<Path>>(path: P, buffer: f64) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let aoi = Self::from_geojson_str(&text, buffer)?;
        info!(
            "Loaded AOI from {:?}: {} polygon(s), buffer {}",
            path.as_ref(),
            aoi.geometry.0.len(),
            buffer
        );
        Ok(aoi)
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    /// Same geometry with another buffer distance
    pub fn with_buffer(&self, buffer: f64) -> Result<Self> {
        Self::new(self.geometry.clone(), buffer)
    }

    /// Bounding box of the buffered geometry
    pub fn bounds(&self) -> Option<Bounds> {
        self.geometry.bounding_rect().map(|r| {
            Bounds::new(r.min().x, r.min().y, r.max().x, r.max().y).expand(self.buffer)
        })
    }

    /// True inside a polygon (holes excluded) or within `buffer` of one
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        self.geometry.0.iter().any(|poly| {
            poly.contains(&point) || (self.buffer > 0.0 && point.euclidean_distance(poly) <= self.buffer)
        })
    }

    /// Pixel-center membership on `grid`
    pub fn mask(&self, grid: &GridSpec) -> Array2<bool> {
        let bounds = self.bounds();
        let mut mask = Array2::from_elem(grid.shape(), false);
        Zip::indexed(&mut mask).par_for_each(|(row, col), m| {
            let (x, y) = grid.pixel_center(row, col);
            if bounds.is_some_and(|b| b.contains_point(x, y)) {
                *m = self.contains(x, y);
            }
        });
        debug!(
            "AOI mask: {} of {} pixels inside",
            mask.iter().filter(|&&m| m).count(),
            mask.len()
        );
        mask
    }

    /// Un-buffered geometry as a GeoJSON `MultiPolygon` value
    pub fn to_geojson(&self) -> serde_json::Value {
        let ring_coords = |ring: &LineString<f64>| -> Vec<[f64; 2]> {
            ring.coords().map(|c| [c.x, c.y]).collect()
        };
        let polygons: Vec<Vec<Vec<[f64; 2]>>> = self
            .geometry
            .0
            .iter()
            .map(|poly| {
                std::iter::once(poly.exterior())
                    .chain(poly.interiors().iter())
                    .map(ring_coords)
                    .collect()
            })
            .collect();
        serde_json::json!({
            "type": "MultiPolygon",
            "coordinates": polygons,
        })
    }
}

fn feature_polygons(feature: GeoJsonFeature) -> Result<Vec<Polygon<f64>>> {
    let geometry: GeoJsonGeometry = serde_json::from_value(feature.geometry)
        .map_err(|e| Error::Aoi(format!("feature geometry must be Polygon or MultiPolygon: {e}")))?;
    Ok(geometry_polygons(geometry))
}

fn geometry_polygons(geometry: GeoJsonGeometry) -> Vec<Polygon<f64>> {
    match geometry {
        GeoJsonGeometry::Polygon(rings) => vec![rings_to_polygon(rings)],
        GeoJsonGeometry::MultiPolygon(polys) => polys.into_iter().map(rings_to_polygon).collect(),
    }
}

fn rings_to_polygon(rings: Vec<Ring>) -> Polygon<f64> {
    let mut rings = rings.into_iter().map(|ring| {
        LineString::new(ring.into_iter().map(|[x, y]| Coord { x, y }).collect())
    });
    let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
    Polygon::new(exterior, rings.collect())
}
