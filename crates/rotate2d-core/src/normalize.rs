//! Quantile-based display normalization shared by all views.
//!
//! Composites are clipped to `[0, q]`, where `q` is a high quantile of all
//! channel values (90th percentile by default), then divided by `q` so the
//! result lies in `[0, 1]`.

use tracing::warn;

use crate::error::{AlignError, Result};

/// Default quantile used to pick the display ceiling.
pub const DEFAULT_DISPLAY_QUANTILE: f64 = 0.9;

/// Quantile of `values` with linear interpolation between closest ranks.
///
/// `q` is clamped to `[0, 1]`. Returns `NaN` for an empty slice or if any
/// value is `NaN`.
pub fn quantile(values: &[f32], q: f64) -> f32 {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return f32::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    let (a, b) = (sorted[lo] as f64, sorted[hi] as f64);
    (a + (b - a) * frac) as f32
}

/// Display ceiling for `values`.
///
/// # Errors
///
/// Returns [`AlignError::DegenerateDisplayRange`] if the quantile is not a
/// positive finite number (for example an all-zero composite).
pub fn display_ceiling(values: &[f32], q: f64) -> Result<f32> {
    let ceiling = quantile(values, q);
    if ceiling.is_finite() && ceiling > 0.0 {
        Ok(ceiling)
    } else {
        Err(AlignError::DegenerateDisplayRange(ceiling))
    }
}

/// Clip `values` to `[0, ceiling]` and rescale to `[0, 1]` in place.
///
/// A degenerate range blanks the values to zero instead of producing `NaN`
/// or infinities. Returns the ceiling used, or `None` if the values were
/// blanked.
pub fn normalize_display(values: &mut [f32], q: f64) -> Option<f32> {
    match display_ceiling(values, q) {
        Ok(ceiling) => {
            for v in values.iter_mut() {
                *v = v.clamp(0.0, ceiling) / ceiling;
            }
            Some(ceiling)
        }
        Err(err) => {
            warn!(%err, "blanking composite");
            values.fill(0.0);
            None
        }
    }
}
