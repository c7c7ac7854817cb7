//! Core compositing building blocks: the in-memory image model, AOI handling,
//! parameters, and the per-pixel processing stages. These are internal primitives
//! consumed by the high-level `api` module.
pub mod aoi;
pub mod image;
pub mod params;
pub mod processing;
