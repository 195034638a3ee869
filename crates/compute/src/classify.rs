//! Z-score to risk signal.
//!
//! Buckets are lopsided when high readings are risk-off: anything below `-neutral_band` is green, with no separate
//! strong-green tier. The low-is-risk-off branch has both red and amber.

use riskgauge_core::{Signal, SignalThresholds};

pub fn classify(z: Option<f64>, high_is_risk_off: bool, thresholds: &SignalThresholds) -> Signal {
    let Some(z) = z else {
        return Signal::Neutral;
    };
    let band = thresholds.neutral_band;
    let strong = thresholds.strong;

    if z.abs() < band {
        return Signal::Neutral;
    }

    if high_is_risk_off {
        if z > strong {
            Signal::Red
        } else if z > band {
            Signal::Amber
        } else if z < -band {
            Signal::Green
        } else {
            Signal::Neutral
        }
    } else if z < -strong {
        Signal::Red
    } else if z < -band {
        Signal::Amber
    } else if z > band {
        Signal::Green
    } else {
        Signal::Neutral
    }
}
