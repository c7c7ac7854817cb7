//! Per-pixel compositing stages, in pipeline order: temporal filter, reflectance
//! normalization, clearness masking, spectral indices, quality mosaic, and band
//! selection. `autoscale` prepares visualization bands for export.
pub mod autoscale;
pub mod indices;
pub mod mask;
pub mod mosaic;
pub mod normalize;
pub mod pipeline;
pub mod select;
pub mod temporal;
