/// Simple moving average over `series` (oldest first).
///
/// The output has the same length as the input. Element `i` is the arithmetic
/// mean of `series[i + 1 - period..=i]` when that full window exists and `None`
/// otherwise; partial windows are never averaged. A `period` of zero yields
/// an all-`None` series.
pub fn moving_average(series: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = series.len();
    let mut result = vec![None; n];
    if period == 0 || n < period {
        return result;
    }

    for (i, slot) in result.iter_mut().enumerate().skip(period - 1) {
        let window = &series[i + 1 - period..=i];
        *slot = Some(window.iter().sum::<f64>() / period as f64);
    }
    result
}

/// Simple moving average over a series that may itself contain undefined values.
///
/// A window containing any `None` produces `None`.
pub fn moving_average_opt(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let n = series.len();
    let mut result = vec![None; n];
    if period == 0 || n < period {
        return result;
    }

    for (i, slot) in result.iter_mut().enumerate().skip(period - 1) {
        let window = &series[i + 1 - period..=i];
        *slot = window
            .iter()
            .copied()
            .sum::<Option<f64>>()
            .map(|sum| sum / period as f64);
    }
    result
}
