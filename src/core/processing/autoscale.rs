use ndarray::Array2;
use tracing::debug;

/// Sample value written for undefined pixels in stretched output
pub const U16_NODATA: u16 = 0;

/// Percentile bounds used for a linear stretch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchStats {
    pub valid_count: usize,
    pub low: f64,
    pub high: f64,
}

/// Estimate percentiles (0..=100) of the finite samples of `band` without sorting.
/// Two passes: min/max, then a fixed-bin histogram whose CDF is inverted with linear
/// interpolation inside the bin. Returns `None` when no sample is finite.
pub fn histogram_percentiles(band: &Array2<f32>, percentiles: &[f64]) -> Option<Vec<f64>> {
    let mut count: u64 = 0;
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for &v in band.iter().filter(|v| v.is_finite()) {
        let v = v as f64;
        count += 1;
        if v < min_v { min_v = v; }
        if v > max_v { max_v = v; }
    }
    if count == 0 {
        return None;
    }

    let span = max_v - min_v;
    if span.abs() < f64::EPSILON {
        return Some(vec![min_v; percentiles.len()]);
    }

    const NUM_BINS: usize = 4096;
    let mut hist = vec![0u64; NUM_BINS];
    let inv_span = 1.0 / span;
    for &v in band.iter().filter(|v| v.is_finite()) {
        let t = ((v as f64 - min_v) * inv_span).clamp(0.0, 1.0);
        let idx = ((t * NUM_BINS as f64) as usize).min(NUM_BINS - 1);
        hist[idx] += 1;
    }

    let bin_width = span / NUM_BINS as f64;
    let estimate = |p: f64| -> f64 {
        let mut target = ((p / 100.0).clamp(0.0, 1.0) * count as f64).floor() as u64;
        if target >= count { target = count - 1; }

        let mut cumsum: u64 = 0;
        for (b, &h) in hist.iter().enumerate() {
            let next = cumsum + h;
            if target < next {
                let frac = (target - cumsum) as f64 / h as f64;
                return min_v + (b as f64 + frac) * bin_width;
            }
            cumsum = next;
        }
        max_v
    };

    Some(percentiles.iter().map(|&p| estimate(p)).collect())
}

/// Linear stretch of `band` between its `low_pct` and `high_pct` percentiles.
///
/// Finite samples map into `1..=65535` (clamped at the bounds); NaN and infinite
/// samples map to [`U16_NODATA`]. Output is row-major.
pub fn percentile_stretch_u16(band: &Array2<f32>, low_pct: f64, high_pct: f64) -> (Vec<u16>, StretchStats) {
    let valid_count = band.iter().filter(|v| v.is_finite()).count();
    let Some(bounds) = histogram_percentiles(band, &[low_pct, high_pct]) else {
        debug!("Stretch: no finite samples, writing all no-data");
        return (
            vec![U16_NODATA; band.len()],
            StretchStats { valid_count: 0, low: 0.0, high: 0.0 },
        );
    };
    let (low, high) = (bounds[0], bounds[1]);
    let span = high - low;

    let scaled = band
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return U16_NODATA;
            }
            let t = if span > 0.0 {
                ((v as f64 - low) / span).clamp(0.0, 1.0)
            } else {
                0.5
            };
            (1.0 + t * 65534.0).round() as u16
        })
        .collect();

    debug!("Stretch: {} valid samples, bounds [{:.6}, {:.6}]", valid_count, low, high);
    (scaled, StretchStats { valid_count, low, high })
}

/// Row-major f32 samples with every non-finite value written as NaN
pub fn finite_or_nan(band: &Array2<f32>) -> Vec<f32> {
    band.iter()
        .map(|&v| if v.is_finite() { v } else { f32::NAN })
        .collect()
}
