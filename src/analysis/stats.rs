//! Numeric reduction over sample series.

use crate::models::SeriesStats;

/// Coerce a raw cell to a sample.
///
/// Blank, non-numeric and non-finite cells are rejected so they never
/// reach the reduction.
pub fn parse_sample(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Compute min/max/mean/population standard deviation.
///
/// Returns `None` for an empty series, and for a series whose mean or
/// spread does not fit in an `f64`.
pub fn summarize(samples: &[f64]) -> Option<SeriesStats> {
    let (&first, rest) = samples.split_first()?;

    let (min, max) = rest
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    // Running mean and sum of squared deviations (Welford), so large
    // samples are never summed or squared directly.
    let (mut mean, mut m2) = (0.0f64, 0.0f64);
    for (i, &v) in samples.iter().enumerate() {
        let delta = v - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (v - mean);
    }

    let count = samples.len();
    let std = if count == 1 {
        0.0
    } else {
        (m2 / count as f64).sqrt()
    };

    if !mean.is_finite() || !std.is_finite() {
        return None;
    }

    Some(SeriesStats {
        min,
        max,
        // Rounding can push the mean a ulp outside the observed range.
        mean: mean.clamp(min, max),
        std,
        count,
    })
}

/// Multiply every sample by `factor`, dropping samples that overflow.
pub fn scale(samples: &mut Vec<f64>, factor: f64) {
    if factor != 1.0 {
        samples.iter_mut().for_each(|v| *v *= factor);
        samples.retain(|v| v.is_finite());
    }
}
