use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use common::{Error, Result};

/// Top-level strategy config file (TOML).
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// type = "ma_stochastic"
/// name = "EURUSD 1m"
///
/// [strategy.params]
/// ma_fast = 2
/// ma_slow = 5
/// ma_trend = 200
/// k_period = 14
/// d_period = 3
/// oversold = 20.0
/// overbought = 80.0
/// expiration = "1 minute"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    #[serde(rename = "strategy")]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Strategy type identifier. Only "ma_stochastic" exists today.
    #[serde(rename = "type")]
    pub strategy_type: String,
    /// Human-readable name shown in logs and output.
    pub name: String,
    /// Indicator-specific parameters. Missing keys take their defaults.
    #[serde(default)]
    pub params: HashMap<String, toml::Value>,
}

impl Default for StrategyFileConfig {
    fn default() -> Self {
        Self {
            strategies: vec![StrategyConfig {
                strategy_type: "ma_stochastic".to_string(),
                name: "MA crossover + stochastic".to_string(),
                params: HashMap::new(),
            }],
        }
    }
}

impl StrategyFileConfig {
    /// Parse a TOML document.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse strategy config: {e}")))
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Load from `path`, falling back to a single default strategy when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No strategy config found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_tables() {
        let cfg = StrategyFileConfig::parse(
            r#"
            [[strategy]]
            type = "ma_stochastic"
            name = "fast"

            [strategy.params]
            ma_trend = 100
            oversold = 25.0

            [[strategy]]
            type = "ma_stochastic"
            name = "plain"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.strategies.len(), 2);
        assert_eq!(cfg.strategies[0].name, "fast");
        assert_eq!(cfg.strategies[0].params["ma_trend"].as_integer(), Some(100));
        assert!(cfg.strategies[1].params.is_empty());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            StrategyFileConfig::parse("[[strategy]]\nname = 3"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let cfg = StrategyFileConfig::load_or_default("/definitely/not/here.toml").unwrap();
        assert_eq!(cfg.strategies.len(), 1);
        assert_eq!(cfg.strategies[0].strategy_type, "ma_stochastic");
    }
}
