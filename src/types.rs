//! Shared types and band-name conventions used across s2mosaic.
//! Includes `SpectralIndex`, `ExportDataType`, and the Sentinel-2 band names of the
//! default schema.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Sentinel-2 band names used by the default schema.
pub mod bands {
    pub const BLUE: &str = "B2";
    pub const GREEN: &str = "B3";
    pub const RED: &str = "B4";
    pub const NIR: &str = "B8";
    pub const SWIR2: &str = "B12";
    /// Per-pixel clearness score in [0, 1]
    pub const CLEARNESS: &str = "cs_cdf";

    pub const EVI: &str = "EVI";
    pub const BAI: &str = "BAI";
    pub const NBR: &str = "NBR";

    /// Surface-reflectance bands stored at the integer scale factor
    pub const REFLECTANCE: [&str; 5] = [BLUE, GREEN, RED, NIR, SWIR2];

    /// Output schema of the composite, in order
    pub const OUTPUT: [&str; 7] = [RED, GREEN, BLUE, NIR, EVI, BAI, NBR];
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug, Serialize, Deserialize)]
pub enum SpectralIndex {
    /// Enhanced Vegetation Index
    Evi,
    /// Burn Area Index
    Bai,
    /// Normalized Burn Ratio
    Nbr,
}

impl SpectralIndex {
    pub const ALL: [SpectralIndex; 3] = [SpectralIndex::Evi, SpectralIndex::Bai, SpectralIndex::Nbr];

    /// Name of the band the index is written to
    pub fn band_name(self) -> &'static str {
        match self {
            SpectralIndex::Evi => bands::EVI,
            SpectralIndex::Bai => bands::BAI,
            SpectralIndex::Nbr => bands::NBR,
        }
    }

    pub fn from_band_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|idx| idx.band_name() == name)
    }
}

impl std::fmt::Display for SpectralIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SpectralIndex::Evi => "EVI",
            SpectralIndex::Bai => "BAI",
            SpectralIndex::Nbr => "NBR",
        };
        write!(f, "{}", s)
    }
}

/// Sample type used when a band is exported
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum ExportDataType {
    /// Percentile-stretched visualization band, 0 = no-data
    U16,
    /// Native floating point, NaN = no-data
    F32,
}

impl ExportDataType {
    /// Index bands keep their native values; everything else is stretched for display.
    pub fn for_band(name: &str) -> Self {
        match SpectralIndex::from_band_name(name) {
            Some(_) => ExportDataType::F32,
            None => ExportDataType::U16,
        }
    }
}

impl std::fmt::Display for ExportDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportDataType::U16 => write!(f, "uint16"),
            ExportDataType::F32 => write!(f, "float32"),
        }
    }
}
