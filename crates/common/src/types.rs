use serde::{Deserialize, Serialize};

/// One OHLC price observation for a fixed time interval.
///
/// Produced by a data source (live feed, file, or `mockfeed`) and never
/// mutated afterwards. `low <= open, close <= high` is expected but not
/// enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { open, high, low, close }
    }

    /// True when every price field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

/// Direction of a binary-option trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    #[serde(rename = "CALL")]
    Call,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "NO TRADE")]
    NoTrade,
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeDirection::Call => write!(f, "CALL"),
            TradeDirection::Put => write!(f, "PUT"),
            TradeDirection::NoTrade => write!(f, "NO TRADE"),
        }
    }
}

/// Decision record emitted once per evaluation.
///
/// Serializes with the four human-readable keys consumed by presentation
/// layers (`"Trade Direction"`, `"Entry Criteria"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(rename = "Trade Direction")]
    pub direction: TradeDirection,
    #[serde(rename = "Entry Criteria")]
    pub entry_criteria: String,
    #[serde(rename = "Expiration Time")]
    pub expiration: String,
    #[serde(rename = "Confidence Level")]
    pub confidence: String,
}

impl Decision {
    pub const NOT_MET: &'static str = "Conditions not met";
    pub const NOT_APPLICABLE: &'static str = "N/A";

    /// The default record when no rule set fires.
    pub fn no_trade() -> Self {
        Self {
            direction: TradeDirection::NoTrade,
            entry_criteria: Self::NOT_MET.to_string(),
            expiration: Self::NOT_APPLICABLE.to_string(),
            confidence: Self::NOT_APPLICABLE.to_string(),
        }
    }

    pub fn is_trade(&self) -> bool {
        self.direction != TradeDirection::NoTrade
    }

    /// Key/value pairs in presentation order.
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            ("Trade Direction", self.direction.to_string()),
            ("Entry Criteria", self.entry_criteria.clone()),
            ("Expiration Time", self.expiration.clone()),
            ("Confidence Level", self.confidence.clone()),
        ]
    }
}

/// How the binary renders decision records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
