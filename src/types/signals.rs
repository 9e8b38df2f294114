use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a derived indicator, with its window parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "indicator", content = "period")]
pub enum IndicatorKind {
    Rsi(usize),
    Atr(usize),
    Sma(usize),
    RollingMax(usize),
    ZScore(usize),
    RelativeMomentum(usize),
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Rsi(p) => write!(f, "RSI-{}", p),
            IndicatorKind::Atr(p) => write!(f, "ATR-{}", p),
            IndicatorKind::Sma(p) => write!(f, "SMA-{}", p),
            IndicatorKind::RollingMax(p) => write!(f, "MAX-{}", p),
            IndicatorKind::ZScore(p) => write!(f, "Z-{}", p),
            IndicatorKind::RelativeMomentum(p) => write!(f, "RelMomentum-{}", p),
        }
    }
}

/// Point-in-time indicator reading at the latest observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    #[serde(flatten)]
    pub kind: IndicatorKind,
    pub value: f64,
}

impl IndicatorValue {
    pub fn new(kind: IndicatorKind, value: f64) -> Self {
        Self { kind, value }
    }
}

/// Why a module fell back to its sentinel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Provider returned nothing, failed, or the series was too short.
    DataUnavailable,
    /// A ratio or standardization had a zero denominator.
    NumericUndefined,
}

// =============================================================================
// Risk regime
// =============================================================================

/// Aggregate market regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegimeStatus {
    #[serde(rename = "RISK-ON")]
    RiskOn,
    #[serde(rename = "RISK-OFF")]
    RiskOff,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl RegimeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RegimeStatus::RiskOn => "RISK-ON",
            RegimeStatus::RiskOff => "RISK-OFF",
            RegimeStatus::Unknown => "UNKNOWN",
        }
    }
}

/// One boolean regime condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub label: String,
    pub pass: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRegime {
    pub status: RegimeStatus,
    pub details: Vec<Gate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl RiskRegime {
    pub fn unknown(failure: FailureKind) -> Self {
        Self {
            status: RegimeStatus::Unknown,
            details: Vec::new(),
            failure: Some(failure),
        }
    }
}

// =============================================================================
// Mean reversion
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeanReversionAction {
    /// Overbought: take profits.
    Exit,
    /// Below the long-term average: no new entries.
    RiskOff,
    /// Oversold dip inside an intact trend.
    StrongBuy,
    Hold,
    Error,
}

impl MeanReversionAction {
    pub fn label(&self) -> &'static str {
        match self {
            MeanReversionAction::Exit => "EXIT",
            MeanReversionAction::RiskOff => "RISK_OFF",
            MeanReversionAction::StrongBuy => "STRONG_BUY",
            MeanReversionAction::Hold => "HOLD",
            MeanReversionAction::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeanReversionSignal {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub rsi2: f64,
    pub sma200: f64,
    pub signal: MeanReversionAction,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl MeanReversionSignal {
    pub fn error(symbol: &str, name: &str, failure: FailureKind) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price: 0.0,
            rsi2: 0.0,
            sma200: 0.0,
            signal: MeanReversionAction::Error,
            rationale: "Data unavailable".to_string(),
            failure: Some(failure),
        }
    }
}

// =============================================================================
// Volatility index extremes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VixAction {
    AggressiveBuy,
    ScaleIn,
    TrimProfits,
    Neutral,
    Error,
}

impl VixAction {
    pub fn label(&self) -> &'static str {
        match self {
            VixAction::AggressiveBuy => "AGGRESSIVE_BUY",
            VixAction::ScaleIn => "SCALE_IN",
            VixAction::TrimProfits => "TRIM_PROFITS",
            VixAction::Neutral => "NEUTRAL",
            VixAction::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VixSignal {
    pub symbol: String,
    pub vix: f64,
    pub z_score: f64,
    pub signal: VixAction,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl VixSignal {
    pub fn error(symbol: &str, failure: FailureKind) -> Self {
        Self {
            symbol: symbol.to_string(),
            vix: 0.0,
            z_score: 0.0,
            signal: VixAction::Error,
            rationale: "Data unavailable".to_string(),
            failure: Some(failure),
        }
    }
}

// =============================================================================
// Sector rotation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorRank {
    pub symbol: String,
    pub name: String,
    /// Signed percentage, e.g. "+1.23%".
    pub gain: String,
    /// Raw relative momentum (fraction, not percent).
    pub momentum: f64,
    pub is_positive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorRotation {
    #[serde(rename = "top3")]
    pub top_3: Vec<SectorRank>,
    pub all_ranked: Vec<SectorRank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl SectorRotation {
    pub fn empty(failure: FailureKind) -> Self {
        Self {
            top_3: Vec::new(),
            all_ranked: Vec::new(),
            failure: Some(failure),
        }
    }
}

// =============================================================================
// Trend following
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendStatus {
    Buy,
    Sell,
    Hold,
}

impl TrendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TrendStatus::Buy => "BUY",
            TrendStatus::Sell => "SELL",
            TrendStatus::Hold => "HOLD",
        }
    }
}

/// Order of the trend list in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendOrdering {
    /// Asset-list declaration order.
    #[default]
    Declaration,
    /// Descending by current RSI-14.
    Oscillator,
}

impl TrendOrdering {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "declaration" | "declared" | "list" => Some(Self::Declaration),
            "oscillator" | "rsi" => Some(Self::Oscillator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSignal {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    /// Trailing stop: 50-session high minus ten ATR-14.
    pub stop: f64,
    pub status: TrendStatus,
    pub reason: String,
    pub rsi14: f64,
    pub indicators: Vec<IndicatorValue>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Everything one dashboard render needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub regime: RiskRegime,
    pub mean_reversion: MeanReversionSignal,
    pub vix: VixSignal,
    pub sectors: SectorRotation,
    pub trends: Vec<TrendSignal>,
    /// Unix timestamp (milliseconds) when assembled.
    pub generated_at: i64,
}
