use super::sma::moving_average_opt;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

/// Stochastic oscillator output: `%K` and its `%D` smoothing, one entry per input bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Stochastic {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// Stochastic oscillator (%K, %D) over high/low/close series (oldest first).
///
/// `%K[i] = 100 * (close[i] - lowest_low) / (highest_high - lowest_low)` over the
/// trailing `k_period` window, `None` until the window is full or when the range
/// is flat. `%D` is the simple moving average of `%K` over `d_period` and is only
/// defined where every `%K` in its window is.
///
/// Outputs are as long as `closes`. Indices past the end of a shorter `highs` or
/// `lows` series are `None`.
pub fn stochastic_oscillator(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
) -> Stochastic {
    let n = closes.len();
    let usable = n.min(highs.len()).min(lows.len());
    let mut k = vec![None; n];

    if k_period > 0 && usable >= k_period {
        for (i, slot) in k.iter_mut().enumerate().take(usable).skip(k_period - 1) {
            let start = i + 1 - k_period;
            let lowest_low = lows[start..=i].iter().copied().fold(f64::INFINITY, f64::min);
            let highest_high = highs[start..=i]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            let range = highest_high - lowest_low;
            // Flat range: %K has no meaning
            if range == 0.0 || !range.is_finite() {
                continue;
            }
            *slot = Some(100.0 * (closes[i] - lowest_low) / range);
        }
    }

    let d = moving_average_opt(&k, d_period);
    Stochastic { k, d }
}

/// `stochastic_oscillator` with the standard 14/3 periods.
pub fn stochastic_oscillator_default(highs: &[f64], lows: &[f64], closes: &[f64]) -> Stochastic {
    stochastic_oscillator(highs, lows, closes, DEFAULT_K_PERIOD, DEFAULT_D_PERIOD)
}
