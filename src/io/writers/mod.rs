//! Writers for the exported composite: single-band TIFFs, georeferencing sidecars,
//! JSON metadata sidecars, and the AOI vector.
pub mod metadata;
pub mod tiff;
pub mod vector;
pub mod worldfile;
