use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{Bar, Decision, Error, Result, TradeDirection};

use crate::annotate::{annotate, AnnotatedBar, IndicatorPeriods};

/// Parameters for the MA crossover + stochastic rule sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    pub periods: IndicatorPeriods,
    /// CALL requires %K strictly below this level.
    pub oversold: f64,
    /// PUT requires %K strictly above this level.
    pub overbought: f64,
    /// Expiration attached to CALL/PUT decisions.
    pub expiration: String,
    /// Static confidence label attached to CALL/PUT decisions.
    pub confidence: String,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            periods: IndicatorPeriods::default(),
            oversold: 20.0,
            overbought: 80.0,
            expiration: "1 minute".to_string(),
            confidence: "High (99%)".to_string(),
        }
    }
}

impl SignalParams {
    /// Minimum sequence length before either rule set may fire.
    pub fn min_bars(&self) -> usize {
        self.periods.ma_trend + 1
    }

    fn call_criteria(&self) -> String {
        let p = &self.periods;
        format!(
            "Price > {} MA, {} MA crossed above {} MA, Stochastic below {} & turning up",
            p.ma_trend, p.ma_fast, p.ma_slow, self.oversold
        )
    }

    fn put_criteria(&self) -> String {
        let p = &self.periods;
        format!(
            "Price < {} MA, {} MA crossed below {} MA, Stochastic above {} & turning down",
            p.ma_trend, p.ma_fast, p.ma_slow, self.overbought
        )
    }

    fn decision(&self, direction: TradeDirection) -> Decision {
        let entry_criteria = match direction {
            TradeDirection::Call => self.call_criteria(),
            TradeDirection::Put => self.put_criteria(),
            TradeDirection::NoTrade => return Decision::no_trade(),
        };
        Decision {
            direction,
            entry_criteria,
            expiration: self.expiration.clone(),
            confidence: self.confidence.clone(),
        }
    }
}

// Comparisons against an undefined operand are false.

fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

fn le(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a <= b)
}

fn ge(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a >= b)
}

/// Bullish rule set: price above the trend MA, fast MA crossing above the slow
/// MA on `last`, and %K rising while still below the oversold level.
pub fn call_fires(prev: &AnnotatedBar, last: &AnnotatedBar, params: &SignalParams) -> bool {
    gt(Some(last.bar.close), last.ma_trend)
        && le(prev.ma_fast, prev.ma_slow)
        && gt(last.ma_fast, last.ma_slow)
        && lt(prev.k, last.k)
        && lt(last.k, Some(params.oversold))
}

/// Bearish mirror of [`call_fires`].
pub fn put_fires(prev: &AnnotatedBar, last: &AnnotatedBar, params: &SignalParams) -> bool {
    lt(Some(last.bar.close), last.ma_trend)
        && ge(prev.ma_fast, prev.ma_slow)
        && lt(last.ma_fast, last.ma_slow)
        && gt(prev.k, last.k)
        && gt(last.k, Some(params.overbought))
}

/// Classify the latest bar of an annotated sequence.
///
/// Fails with `Error::InvalidInput` for fewer than two bars. Sequences shorter
/// than [`SignalParams::min_bars`] and any rule touching an undefined value
/// degrade to NO TRADE.
pub fn evaluate(annotated: &[AnnotatedBar], params: &SignalParams) -> Result<Decision> {
    let n = annotated.len();
    if n < 2 {
        return Err(Error::InvalidInput(format!(
            "need at least 2 bars to evaluate a signal, got {n}"
        )));
    }

    if n < params.min_bars() {
        debug!(bars = n, required = params.min_bars(), "Insufficient history for trend MA");
        return Ok(Decision::no_trade());
    }

    let last = &annotated[n - 1];
    let prev = &annotated[n - 2];

    let direction = if call_fires(prev, last, params) {
        TradeDirection::Call
    } else if put_fires(prev, last, params) {
        TradeDirection::Put
    } else {
        TradeDirection::NoTrade
    };

    debug!(
        %direction,
        close = last.bar.close,
        ma_trend = ?last.ma_trend,
        ma_fast = ?last.ma_fast,
        ma_slow = ?last.ma_slow,
        k = ?last.k,
        prev_k = ?prev.k,
        "Signal evaluated"
    );

    Ok(params.decision(direction))
}

/// Validate raw bars, annotate them, and evaluate the latest one.
///
/// Rejects sequences shorter than two bars and bars carrying NaN or infinite
/// prices with `Error::InvalidInput`.
pub fn analyze(bars: &[Bar], params: &SignalParams) -> Result<Decision> {
    if bars.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "need at least 2 bars to evaluate a signal, got {}",
            bars.len()
        )));
    }
    if let Some(index) = bars.iter().position(|b| !b.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "bar {index} has a non-numeric price: {:?}",
            bars[index]
        )));
    }

    let annotated = annotate(bars, &params.periods);
    evaluate(&annotated, params)
}
