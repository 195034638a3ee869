//! Output document consumed by the dashboard front end.
//!
//! Field names and casing are part of the JSON contract; do not rename.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Directional risk signal of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Green,
    Amber,
    Red,
    Neutral,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Green => "green",
            Signal::Amber => "amber",
            Signal::Red => "red",
            Signal::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// Categorical reading of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Risk-On")]
    RiskOn,
    Neutral,
    Caution,
    #[serde(rename = "Risk-Off")]
    RiskOff,
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLabel::RiskOn => "Risk-On",
            RiskLabel::Neutral => "Neutral",
            RiskLabel::Caution => "Caution",
            RiskLabel::RiskOff => "Risk-Off",
        };
        f.write_str(s)
    }
}

/// Evaluation outcome for one indicator. `None` fields mean the data was
/// unavailable or insufficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub name: String,
    pub value: Option<f64>,
    pub delta: Option<f64>,
    pub z: Option<f64>,
    pub signal: Signal,
    pub source: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskState {
    pub score: u8,
    pub label: RiskLabel,
    pub drivers: Vec<IndicatorResult>,
}

/// Per-region verdict strings shown in the region header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionVerdict {
    pub cycle: String,
    pub inflation: String,
    pub financial: String,
}

impl RegionVerdict {
    /// Fixed verdict used until per-region scoring exists.
    pub fn mixed() -> Self {
        Self {
            cycle: "Mixed".to_string(),
            inflation: "Mixed".to_string(),
            financial: "Mixed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub title: String,
    pub items: Vec<IndicatorResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBlock {
    pub id: String,
    pub name: String,
    pub verdict: RegionVerdict,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDocument {
    pub last_updated_utc: String,
    pub risk_state: RiskState,
    pub regions: Vec<RegionBlock>,
}
