//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, raster, and catalog errors, and provides semantic variants
//! for date-range validation, band lookups, and shape checks.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Raster error: {0}")]
    Raster(#[from] crate::io::RasterError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::io::CatalogError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Month must be within 1..=12, got: {month}")]
    InvalidMonth { month: u32 },

    #[error("End month {end} is before start month {start}")]
    InvalidMonthRange { start: u32, end: u32 },

    #[error("Date out of range: year={year}, month={month}")]
    InvalidDate { year: i32, month: u32 },

    #[error("Band not found: {band}. Available: {available}")]
    BandNotFound { band: String, available: String },

    #[error("Band requested more than once: {band}")]
    DuplicateBand { band: String },

    #[error("Shape mismatch in {context}: expected {expected:?}, got {found:?}")]
    ShapeMismatch {
        context: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("AOI error: {0}")]
    Aoi(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }
}
