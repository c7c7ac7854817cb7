mod common;

use common::same_array;
use ndarray::{Array2, array};
use s2mosaic::core::processing::indices::{
    Bai, Evi, IndexCalculator, Nbr, add_index, add_indices, bai, evi, nbr,
};
use s2mosaic::{Error, Image, IndexBands, SpectralIndex, bands};

/// Normalized reflectance image with the bands the indices read
fn reflectance_image() -> Image {
    Image::new("test", (2, 2))
        .with_band(bands::BLUE, array![[0.05, 0.04], [0.2, 0.03]])
        .unwrap()
        .with_band(bands::RED, array![[0.1, 0.08], [0.0, 0.1]])
        .unwrap()
        .with_band(bands::NIR, array![[0.5, 0.3], [0.5, 0.06]])
        .unwrap()
        .with_band(bands::SWIR2, array![[0.25, 0.1], [0.0, 0.2]])
        .unwrap()
}

/// EVI follows the MODIS coefficients
#[test]
fn test_evi_known_value() {
    // 2.5 * 0.4 / (0.5 + 0.6 - 0.375 + 1.0)
    let value = evi(0.5, 0.1, 0.05);
    assert!((value - 1.0 / 1.725).abs() < 1e-5, "EVI was {}", value);
}

/// BAI is the inverse squared distance to the (0.1, 0.06) burn point
#[test]
fn test_bai_known_value() {
    // 1 / (0.05^2 + 0.24^2)
    let value = bai(0.05, 0.3);
    assert!((value - 1.0 / 0.0601).abs() < 1e-2, "BAI was {}", value);
}

/// NBR is the normalized NIR/SWIR2 difference
#[test]
fn test_nbr_known_value() {
    let value = nbr(0.5, 0.25);
    assert!((value - 1.0 / 3.0).abs() < 1e-6);
    assert!(nbr(0.3, 0.3).abs() < f32::EPSILON);
}

/// Zero denominators give IEEE results, not errors
#[test]
fn test_degenerate_denominators() {
    let b = bai(0.1, 0.06);
    assert!(b.is_infinite() && b > 0.0);

    assert!(nbr(0.0, 0.0).is_nan());

    // 0.5 + 0 - 7.5 * 0.2 + 1 == 0
    assert!(!evi(0.5, 0.0, 0.2).is_finite());
}

/// Inputs whose f32 results are exact pin the formulas to fixed bit patterns
#[test]
fn test_formulas_exact_bits() {
    assert_eq!(nbr(0.75, 0.25).to_bits(), 0.5f32.to_bits());
    assert_eq!(nbr(0.25, 0.75).to_bits(), (-0.5f32).to_bits());
    // 1.25 / 1.5
    assert_eq!(evi(0.5, 0.0, 0.0).to_bits(), (5.0f32 / 6.0).to_bits());
    // (0.1 - 0.1)^2 + (0.06 - 0.56)^2 == 0.25
    assert_eq!(bai(0.1, 0.56).to_bits(), 4.0f32.to_bits());
}

/// Calculators apply the scalar formula to every pixel
#[test]
fn test_calculators_match_scalar_formulas() {
    let image = reflectance_image();
    let nir = image.band(bands::NIR).unwrap();
    let red = image.band(bands::RED).unwrap();
    let blue = image.band(bands::BLUE).unwrap();
    let swir2 = image.band(bands::SWIR2).unwrap();

    let evi_out = Evi::default().calculate(&image).unwrap();
    let bai_out = Bai::default().calculate(&image).unwrap();
    let nbr_out = Nbr::default().calculate(&image).unwrap();

    for ((r, c), _) in nir.indexed_iter() {
        let (n, rd, b, s) = (nir[[r, c]], red[[r, c]], blue[[r, c]], swir2[[r, c]]);
        assert!(common::same(evi_out[[r, c]], evi(n, rd, b)));
        assert!(common::same(bai_out[[r, c]], bai(rd, n)));
        assert!(common::same(nbr_out[[r, c]], nbr(n, s)));
    }

    // (1, 0) is the EVI zero-denominator pixel, (1, 1) the BAI burn point
    assert!(!evi_out[[1, 0]].is_finite());
    assert!(bai_out[[1, 1]].is_infinite());
}

/// Default calculators read the Sentinel-2 bands and write the index band
#[test]
fn test_calculator_band_names() {
    let evi_calc = Evi::default();
    assert_eq!(evi_calc.name(), "EVI");
    assert_eq!(evi_calc.required_bands(), ["B8", "B4", "B2"]);
    assert_eq!(Bai::default().required_bands(), ["B4", "B8"]);
    assert_eq!(Nbr::default().required_bands(), ["B8", "B12"]);

    let custom = Nbr::new("nir", "swir", Some("burn".to_string()));
    assert_eq!(custom.name(), "burn");
    assert_eq!(SpectralIndex::Bai.calculator(&IndexBands::default()).name(), "BAI");
}

/// Calculators built from role names read the bands those roles point at
#[test]
fn test_calculator_from_roles() {
    let roles = IndexBands {
        blue: "blue".to_string(),
        red: "red".to_string(),
        nir: "nir".to_string(),
        swir2: "swir".to_string(),
    };
    assert_eq!(SpectralIndex::Evi.calculator(&roles).required_bands(), ["nir", "red", "blue"]);
    assert_eq!(SpectralIndex::Bai.calculator(&roles).required_bands(), ["red", "nir"]);
    assert_eq!(SpectralIndex::Nbr.calculator(&roles).required_bands(), ["nir", "swir"]);

    let image = Image::new("renamed", (1, 1))
        .with_band("nir", Array2::from_elem((1, 1), 0.75))
        .unwrap()
        .with_band("swir", Array2::from_elem((1, 1), 0.25))
        .unwrap();
    let out = add_indices(&image, &[SpectralIndex::Nbr], &roles).unwrap();
    assert_eq!(out.band("NBR").unwrap()[[0, 0]], 0.5);
}

/// A missing input band is reported by name
#[test]
fn test_missing_band_error() {
    let image = Image::new("partial", (1, 1))
        .with_band(bands::NIR, Array2::from_elem((1, 1), 0.4))
        .unwrap();
    match Evi::default().calculate(&image) {
        Err(Error::BandNotFound { band, .. }) => assert_eq!(band, "B4"),
        other => panic!("expected BandNotFound, got {:?}", other),
    }
}

/// Re-adding an index replaces the existing band instead of duplicating it
#[test]
fn test_add_index_replaces_band() {
    let image = reflectance_image();
    let once = add_index(&image, &Evi::default()).unwrap();
    let twice = add_index(&once, &Evi::default()).unwrap();
    assert_eq!(once.num_bands(), image.num_bands() + 1);
    assert_eq!(twice.num_bands(), once.num_bands());
    assert!(same_array(once.band("EVI").unwrap(), twice.band("EVI").unwrap()));
}

/// Index values do not depend on the order the indices are added in
#[test]
fn test_index_order_insensitive() {
    let image = reflectance_image();
    let roles = IndexBands::default();
    let forward = add_indices(&image, &[SpectralIndex::Evi, SpectralIndex::Bai, SpectralIndex::Nbr], &roles).unwrap();
    let shuffled = add_indices(&image, &[SpectralIndex::Nbr, SpectralIndex::Evi, SpectralIndex::Bai], &roles).unwrap();

    for name in ["EVI", "BAI", "NBR"] {
        assert!(same_array(forward.band(name).unwrap(), shuffled.band(name).unwrap()));
    }
    // Base bands untouched
    for name in [bands::BLUE, bands::RED, bands::NIR, bands::SWIR2] {
        assert!(same_array(forward.band(name).unwrap(), image.band(name).unwrap()));
    }
}
