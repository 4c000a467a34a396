/// Reward distance over risk distance, rounded to 2 decimals.
///
/// A zero stop distance yields 0.0 rather than an error; such a setup is
/// degenerate and fails any positive `min_rr` gate downstream.
pub fn rr(entry: f64, stop: f64, target: f64) -> f64 {
    let risk = (entry - stop).abs();
    let reward = (target - entry).abs();
    if risk == 0.0 {
        return 0.0;
    }
    round2(reward / risk)
}

/// Exact halves go to the even neighbour, so 1.125 becomes 1.12.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

pub fn round5(v: f64) -> f64 {
    (v * 100_000.0).round_ties_even() / 100_000.0
}
