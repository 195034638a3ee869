//! Scoring parameters: z-score window, signal thresholds and label cutoffs.
//!
//! Every field has a default, so the `scoring` section of a catalog may be
//! omitted entirely or override single values.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Minimum history length for a z-score.
    #[serde(default = "default_min_history")]
    pub min_history: usize,
    /// Trailing observations fed to the normalizer (one trading year).
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default)]
    pub thresholds: SignalThresholds,
    #[serde(default)]
    pub labels: LabelThresholds,
    /// Score reported when no indicator produced a value.
    #[serde(default = "default_neutral_score")]
    pub neutral_score: u8,
    /// Number of drivers listed in the risk state.
    #[serde(default = "default_max_drivers")]
    pub max_drivers: usize,
    /// Decimal places kept for value, delta and z.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_min_history() -> usize {
    10
}

fn default_window() -> usize {
    252
}

fn default_neutral_score() -> u8 {
    50
}

fn default_max_drivers() -> usize {
    8
}

fn default_precision() -> u32 {
    4
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_history: default_min_history(),
            window: default_window(),
            thresholds: SignalThresholds::default(),
            labels: LabelThresholds::default(),
            neutral_score: default_neutral_score(),
            max_drivers: default_max_drivers(),
            precision: default_precision(),
        }
    }
}

/// |z| cutoffs for the signal classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// Below this |z| the signal is neutral.
    #[serde(default = "default_neutral_band")]
    pub neutral_band: f64,
    /// Beyond this |z| (in the stress direction) the signal is red.
    #[serde(default = "default_strong")]
    pub strong: f64,
}

fn default_neutral_band() -> f64 {
    0.5
}

fn default_strong() -> f64 {
    1.5
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            neutral_band: default_neutral_band(),
            strong: default_strong(),
        }
    }
}

/// Score cutoffs for the risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelThresholds {
    /// Scores at or above this are Risk-Off.
    #[serde(default = "default_risk_off")]
    pub risk_off: u8,
    /// Scores at or above this (and below `risk_off`) are Caution.
    #[serde(default = "default_caution")]
    pub caution: u8,
    /// Scores at or below this are Risk-On.
    #[serde(default = "default_risk_on")]
    pub risk_on: u8,
}

fn default_risk_off() -> u8 {
    75
}

fn default_caution() -> u8 {
    60
}

fn default_risk_on() -> u8 {
    35
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            risk_off: default_risk_off(),
            caution: default_caution(),
            risk_on: default_risk_on(),
        }
    }
}

impl ScoringConfig {
    /// Reject parameter sets that would make the bucket rules overlap.
    pub fn validate(&self) -> Result<()> {
        if self.min_history == 0 {
            return Err(CoreError::Validation(
                "scoring.min_history must be at least 1".to_string(),
            ));
        }
        if self.window < self.min_history {
            return Err(CoreError::Validation(format!(
                "scoring.window ({}) is shorter than scoring.min_history ({})",
                self.window, self.min_history
            )));
        }
        let t = &self.thresholds;
        if !(t.neutral_band.is_finite() && t.strong.is_finite()) || t.neutral_band < 0.0 {
            return Err(CoreError::Validation(
                "scoring.thresholds must be finite and non-negative".to_string(),
            ));
        }
        if t.neutral_band > t.strong {
            return Err(CoreError::Validation(format!(
                "scoring.thresholds.neutral_band ({}) exceeds strong ({})",
                t.neutral_band, t.strong
            )));
        }
        let l = &self.labels;
        if l.risk_off > 100 || l.caution > l.risk_off || l.risk_on >= l.caution {
            return Err(CoreError::Validation(format!(
                "scoring.labels must satisfy risk_on < caution <= risk_off <= 100 (got {}/{}/{})",
                l.risk_on, l.caution, l.risk_off
            )));
        }
        if self.neutral_score > 100 {
            return Err(CoreError::Validation(
                "scoring.neutral_score must be within 0..=100".to_string(),
            ));
        }
        Ok(())
    }
}
