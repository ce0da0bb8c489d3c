//! Min-max rescaling of raw anomaly measures onto an integer risk range.

use riskscope_rules::NormalizationRange;

/// Rescale `raw` against the batch's own min and max onto `[range.lo, range.hi]`.
///
/// Inverted: the lowest (most anomalous) raw score maps to `hi`, the highest
/// to `lo`. Results are truncated toward zero, not rounded. A batch without
/// spread maps every record to the range midpoint.
pub fn normalize(raw: &[f64], range: NormalizationRange) -> Vec<i64> {
    if raw.is_empty() {
        return Vec::new();
    }

    let (min, max) = raw
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = max - min;

    if span <= 0.0 {
        tracing::debug!(count = raw.len(), value = min, "raw scores have no spread, using midpoint");
        return vec![range.midpoint(); raw.len()];
    }

    let width = (range.hi - range.lo) as f64;
    raw.iter()
        .map(|&r| {
            let scaled = range.lo as f64 + (max - r) / span * width;
            (scaled as i64).max(range.lo).min(range.hi)
        })
        .collect()
}
