pub mod annotate;
pub mod config;
pub mod indicators;
pub mod registry;
pub mod signal;

pub use annotate::{annotate, AnnotatedBar, IndicatorPeriods};
pub use config::{StrategyConfig, StrategyFileConfig};
pub use registry::StrategyRegistry;
pub use signal::{analyze, evaluate, SignalParams};

use common::{Bar, Decision, Result};

/// All strategy implementations must satisfy this trait.
pub trait Strategy: Send + Sync {
    /// Human-readable name of this strategy instance.
    fn name(&self) -> &str;

    /// Evaluate an ordered bar sequence (oldest first) and produce a decision.
    ///
    /// Returns `Err` only for malformed input; missing history yields NO TRADE.
    fn evaluate(&self, bars: &[Bar]) -> Result<Decision>;
}
