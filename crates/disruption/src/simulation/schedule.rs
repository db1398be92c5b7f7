//! Output schedule and disruption timing.

/// Output times: 0 followed by `n_outputs - 1` log-spaced times from `first`
/// to `last`
///
/// # Examples
///
/// ```
/// use disruption::simulation::output_times;
///
/// let times = output_times(1.0e-2, 1.0e2, 6);
/// assert_eq!(times.len(), 6);
/// assert_eq!(times[0], 0.0);
/// assert!((times[1] - 1.0e-2).abs() < 1e-15);
/// assert!((times[3] - 1.0).abs() < 1e-12);
/// assert_eq!(times[5], 1.0e2);
/// ```
pub fn output_times(first: f64, last: f64, n_outputs: usize) -> Vec<f64> {
    let n_log = n_outputs.saturating_sub(1);
    let (lo, hi) = (first.log10(), last.log10());

    let mut times = Vec::with_capacity(n_outputs);
    if n_outputs > 0 {
        times.push(0.0);
    }
    times.extend((0..n_log).map(|i| {
        if n_log == 1 {
            first
        } else if i + 1 == n_log {
            last
        } else {
            10f64.powf(lo + (hi - lo) * i as f64 / (n_log - 1) as f64)
        }
    }));
    times
}

/// Whether `time` lies within `epsilon` after a multiple of `interval`,
/// excluding the first interval
pub fn is_disruption_time(time: f64, interval: f64, epsilon: f64) -> bool {
    time % interval < epsilon && time > interval
}
