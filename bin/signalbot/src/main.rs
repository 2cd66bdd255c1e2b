use std::io::Write;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{Config, Decision, OutputFormat};
use mockfeed::MockFeed;
use strategy::{StrategyFileConfig, StrategyRegistry};

fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env()?;
    info!(bars = cfg.bars, seed = ?cfg.seed, output = %cfg.output, "SignalBot starting");

    // ── Strategies ────────────────────────────────────────────────────────────
    let strategy_file = StrategyFileConfig::load_or_default(&cfg.strategy_config_path)?;
    let registry = StrategyRegistry::from_config(&strategy_file)?;

    // ── Bars ──────────────────────────────────────────────────────────────────
    let mut feed = match cfg.seed {
        Some(seed) => MockFeed::seeded(seed),
        None => MockFeed::from_entropy(),
    };
    let bars = feed.take_bars(cfg.bars);

    // ── Evaluate ──────────────────────────────────────────────────────────────
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (name, result) in registry.evaluate(&bars) {
        match result {
            Ok(decision) => {
                info!(strategy = %name, direction = %decision.direction, "Decision ready");
                render(&mut out, &name, &decision, cfg.output)?;
            }
            Err(e) => warn!(strategy = %name, error = %e, "Evaluation failed"),
        }
    }
    Ok(())
}

fn render(
    out: &mut impl Write,
    name: &str,
    decision: &Decision,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "\n=== Trading Signal ({name}) ===")?;
            for (key, value) in decision.fields() {
                writeln!(out, "{key}: {value}")?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(decision)?)?;
        }
    }
    Ok(())
}
