use serde::{Deserialize, Serialize};

use common::Bar;

use crate::indicators::{moving_average, stochastic_oscillator, DEFAULT_D_PERIOD, DEFAULT_K_PERIOD};

/// Lookback windows used by the annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPeriods {
    /// Short moving average (MA2).
    pub ma_fast: usize,
    /// Medium moving average (MA5).
    pub ma_slow: usize,
    /// Long-term trend moving average (MA200).
    pub ma_trend: usize,
    pub k_period: usize,
    pub d_period: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            ma_fast: 2,
            ma_slow: 5,
            ma_trend: 200,
            k_period: DEFAULT_K_PERIOD,
            d_period: DEFAULT_D_PERIOD,
        }
    }
}

impl IndicatorPeriods {
    /// Bars needed before every derived field on the last two bars can be defined.
    pub fn required_history(&self) -> usize {
        let stochastic = self.k_period + self.d_period.saturating_sub(1);
        self.ma_fast.max(self.ma_slow).max(self.ma_trend).max(stochastic) + 1
    }
}

/// A bar together with the indicator values computed at its index.
/// `None` marks a value whose lookback window is not fully available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    pub bar: Bar,
    pub ma_fast: Option<f64>,
    pub ma_slow: Option<f64>,
    pub ma_trend: Option<f64>,
    pub k: Option<f64>,
    pub d: Option<f64>,
}

/// Compute every indicator for `bars`, returning a new sequence of the same
/// length and order. The input is only read.
pub fn annotate(bars: &[Bar], periods: &IndicatorPeriods) -> Vec<AnnotatedBar> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let ma_fast = moving_average(&closes, periods.ma_fast);
    let ma_slow = moving_average(&closes, periods.ma_slow);
    let ma_trend = moving_average(&closes, periods.ma_trend);
    let stoch = stochastic_oscillator(&highs, &lows, &closes, periods.k_period, periods.d_period);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| AnnotatedBar {
            bar: *bar,
            ma_fast: ma_fast[i],
            ma_slow: ma_slow[i],
            ma_trend: ma_trend[i],
            k: stoch.k[i],
            d: stoch.d[i],
        })
        .collect()
}
