use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config file not found: {path:?}")]
    MissingConfig { path: PathBuf },

    #[error("Input not found: {arg}={path:?}")]
    MissingInput { arg: &'static str, path: PathBuf },

    #[error("Composite error: {0}")]
    Composite(#[from] s2mosaic::Error),
}
