/// Bounds used by every clamped score.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Percentage of `numerator` over `denominator`, or `None` when the
/// denominator is zero.
pub fn pct(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64 * 100.0)
}

/// Clamps into `[min, max]`. Non-finite input collapses to `min`.
pub fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    value.max(min).min(max)
}

pub fn clamp(value: f64) -> f64 {
    clamp_range(value, SCORE_MIN, SCORE_MAX)
}
