use std::str::FromStr;

use crate::{Error, OutputFormat, Result};

/// All configuration loaded from environment variables at startup.
/// Every variable is optional; malformed values are reported as `Error::Config`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of mock bars to generate per run.
    pub bars: usize,
    /// Seed for the mock feed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Strategy config file path.
    pub strategy_config_path: String,
    pub output: OutputFormat,
}

impl Config {
    pub const DEFAULT_BARS: usize = 220;
    pub const DEFAULT_STRATEGY_CONFIG_PATH: &'static str = "config/strategies.toml";

    /// Load all configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output = match lookup("SIGNAL_OUTPUT") {
            None => OutputFormat::default(),
            Some(v) => match v.trim().to_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                other => {
                    return Err(Error::Config(format!(
                        "SIGNAL_OUTPUT must be 'text' or 'json', got: '{other}'"
                    )))
                }
            },
        };

        let bars = parsed(&lookup, "SIGNAL_BARS")?.unwrap_or(Self::DEFAULT_BARS);
        if bars < 2 {
            return Err(Error::Config(format!("SIGNAL_BARS must be at least 2, got: {bars}")));
        }

        Ok(Config {
            bars,
            seed: parsed(&lookup, "SIGNAL_SEED")?,
            strategy_config_path: lookup("STRATEGY_CONFIG_PATH")
                .unwrap_or_else(|| Self::DEFAULT_STRATEGY_CONFIG_PATH.to_string()),
            output,
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| Error::Config(format!("{key} has invalid value '{raw}': {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bars, 220);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.strategy_config_path, "config/strategies.toml");
        assert_eq!(cfg.output, OutputFormat::Text);
    }

    #[test]
    fn reads_all_variables() {
        let cfg = Config::from_lookup(lookup(&[
            ("SIGNAL_BARS", "300"),
            ("SIGNAL_SEED", "42"),
            ("STRATEGY_CONFIG_PATH", "/tmp/s.toml"),
            ("SIGNAL_OUTPUT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(cfg.bars, 300);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.strategy_config_path, "/tmp/s.toml");
        assert_eq!(cfg.output, OutputFormat::Json);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("SIGNAL_BARS", "lots")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SIGNAL_BARS", "1")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SIGNAL_OUTPUT", "xml")])),
            Err(Error::Config(_))
        ));
    }
}
