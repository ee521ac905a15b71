// Season weights: how much each historical season counts, most recent first.

/// Compute normalized weights for `n` seasons ordered most recent first.
///
/// A `decay` in (0, 1) gives geometric decay (`decay^i`); anything else gives
/// linear decay (`n, n-1, .., 1`). The result sums to 1.0; `n == 0` yields an
/// empty vector.
pub fn season_weights(n: usize, decay: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }

    let raw: Vec<f64> = if decay > 0.0 && decay < 1.0 {
        (0..n).map(|i| decay.powi(i as i32)).collect()
    } else {
        (0..n).map(|i| (n - i) as f64).collect()
    };

    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}
