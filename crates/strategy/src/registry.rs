use std::collections::HashMap;

use tracing::info;

use common::{Bar, Decision, Error, Result};

use crate::config::{StrategyConfig, StrategyFileConfig};
use crate::signal::{analyze, SignalParams};
use crate::Strategy;

/// Holds all configured strategy instances and evaluates bar sequences against them.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Build the registry from config. Unknown strategy types and ill-typed
    /// parameters are reported as `Error::Config`.
    pub fn from_config(file_cfg: &StrategyFileConfig) -> Result<Self> {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();

        for cfg in &file_cfg.strategies {
            let strategy = build_strategy(cfg)?;
            info!(name = %strategy.name(), "Registered strategy");
            strategies.push(strategy);
        }

        Ok(Self { strategies })
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Evaluate every registered strategy against the same sequence.
    pub fn evaluate(&self, bars: &[Bar]) -> Vec<(String, Result<Decision>)> {
        self.strategies
            .iter()
            .map(|s| (s.name().to_string(), s.evaluate(bars)))
            .collect()
    }
}

// ─── Strategy builders ────────────────────────────────────────────────────────

fn build_strategy(cfg: &StrategyConfig) -> Result<Box<dyn Strategy>> {
    match cfg.strategy_type.as_str() {
        "ma_stochastic" => {
            let params = signal_params(&cfg.params)?;
            Ok(Box::new(MaStochasticStrategy::new(cfg.name.clone(), params)))
        }
        other => Err(Error::Config(format!(
            "Unknown strategy type '{other}' for '{}'",
            cfg.name
        ))),
    }
}

fn signal_params(params: &HashMap<String, toml::Value>) -> Result<SignalParams> {
    let defaults = SignalParams::default();
    let mut out = defaults.clone();
    let p = &mut out.periods;
    p.ma_fast = param_usize(params, "ma_fast", defaults.periods.ma_fast)?;
    p.ma_slow = param_usize(params, "ma_slow", defaults.periods.ma_slow)?;
    p.ma_trend = param_usize(params, "ma_trend", defaults.periods.ma_trend)?;
    p.k_period = param_usize(params, "k_period", defaults.periods.k_period)?;
    p.d_period = param_usize(params, "d_period", defaults.periods.d_period)?;
    out.oversold = param_f64(params, "oversold", defaults.oversold)?;
    out.overbought = param_f64(params, "overbought", defaults.overbought)?;
    out.expiration = param_str(params, "expiration", &defaults.expiration)?;
    out.confidence = param_str(params, "confidence", &defaults.confidence)?;
    Ok(out)
}

fn param_f64(params: &HashMap<String, toml::Value>, key: &str, default: f64) -> Result<f64> {
    match params.get(key) {
        None => Ok(default),
        Some(toml::Value::Float(v)) => Ok(*v),
        Some(toml::Value::Integer(v)) => Ok(*v as f64),
        Some(other) => Err(Error::Config(format!("param '{key}' must be a number, got {other}"))),
    }
}

fn param_usize(params: &HashMap<String, toml::Value>, key: &str, default: usize) -> Result<usize> {
    match params.get(key) {
        None => Ok(default),
        Some(toml::Value::Integer(v)) if *v > 0 => Ok(*v as usize),
        Some(other) => Err(Error::Config(format!(
            "param '{key}' must be a positive integer, got {other}"
        ))),
    }
}

fn param_str(params: &HashMap<String, toml::Value>, key: &str, default: &str) -> Result<String> {
    match params.get(key) {
        None => Ok(default.to_string()),
        Some(toml::Value::String(v)) => Ok(v.clone()),
        Some(other) => Err(Error::Config(format!("param '{key}' must be a string, got {other}"))),
    }
}

// ─── Concrete strategy types ──────────────────────────────────────────────────

/// MA crossover filtered by the trend MA and confirmed by the stochastic oscillator.
struct MaStochasticStrategy {
    name: String,
    params: SignalParams,
}

impl MaStochasticStrategy {
    fn new(name: String, params: SignalParams) -> Self {
        Self { name, params }
    }
}

impl Strategy for MaStochasticStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, bars: &[Bar]) -> Result<Decision> {
        analyze(bars, &self.params)
    }
}
