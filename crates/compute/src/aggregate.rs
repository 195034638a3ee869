//! Weighted composite score across indicators.

use tracing::debug;

use riskgauge_core::{IndicatorResult, LabelThresholds, RiskLabel, ScoringConfig, Signal};

/// Ordinal stress value of a signal: green −1, neutral 0, amber 1, red 2.
pub fn score_from_signal(signal: Signal) -> i32 {
    match signal {
        Signal::Green => -1,
        Signal::Neutral => 0,
        Signal::Amber => 1,
        Signal::Red => 2,
    }
}

/// Result of aggregating all contributing indicators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub score: u8,
    pub label: RiskLabel,
    /// Sum of weights of indicators that produced a value.
    pub total_weight: f64,
    /// Weighted sum of signal scores over the same indicators.
    pub total_score: f64,
    /// Number of indicators that produced a value.
    pub contributing: usize,
}

/// Label for a 0..=100 score. `risk_off` is checked before `risk_on`.
pub fn risk_label(score: u8, labels: &LabelThresholds) -> RiskLabel {
    if score >= labels.risk_off {
        RiskLabel::RiskOff
    } else if score >= labels.caution {
        RiskLabel::Caution
    } else if score <= labels.risk_on {
        RiskLabel::RiskOn
    } else {
        RiskLabel::Neutral
    }
}

/// Combine `(weight, result)` pairs into one score and label.
///
/// Only results with a value contribute weight. With no contributing
/// weight the configured neutral score is used. The average signal score
/// lies in [-1, 2] and is mapped linearly onto 0..=100, rounding halves
/// to even.
pub fn aggregate<'a, I>(items: I, config: &ScoringConfig) -> Aggregate
where
    I: IntoIterator<Item = (f64, &'a IndicatorResult)>,
{
    let mut total_weight = 0.0;
    let mut total_score = 0.0;
    let mut contributing = 0usize;

    for (weight, result) in items {
        if result.value.is_none() {
            continue;
        }
        total_weight += weight;
        total_score += weight * f64::from(score_from_signal(result.signal));
        contributing += 1;
    }

    let score = if total_weight > 0.0 {
        let avg = total_score / total_weight;
        ((avg + 1.0) / 3.0 * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
    } else {
        config.neutral_score
    };
    let label = risk_label(score, &config.labels);

    debug!(contributing, total_weight, total_score, score, %label, "aggregated risk score");

    Aggregate {
        score,
        label,
        total_weight,
        total_score,
        contributing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(signal: Signal, value: Option<f64>) -> IndicatorResult {
        IndicatorResult {
            name: "x".to_string(),
            value,
            delta: None,
            z: None,
            signal,
            source: "fred".to_string(),
            id: None,
        }
    }

    fn run(items: &[(f64, IndicatorResult)]) -> Aggregate {
        aggregate(items.iter().map(|(w, r)| (*w, r)), &ScoringConfig::default())
    }

    #[test]
    fn red_and_green_average_to_neutral() {
        let agg = run(&[
            (1.0, result(Signal::Red, Some(1.0))),
            (1.0, result(Signal::Green, Some(1.0))),
        ]);
        assert_eq!(agg.total_weight, 2.0);
        assert_eq!(agg.total_score, 1.0);
        assert_eq!(agg.score, 50);
        assert_eq!(agg.label, RiskLabel::Neutral);
    }

    #[test]
    fn no_contributing_weight_defaults_to_fifty() {
        let agg = run(&[
            (1.0, result(Signal::Neutral, None)),
            (3.0, result(Signal::Neutral, None)),
        ]);
        assert_eq!(agg.total_weight, 0.0);
        assert_eq!(agg.contributing, 0);
        assert_eq!(agg.score, 50);
        assert_eq!(agg.label, RiskLabel::Neutral);

        assert_eq!(run(&[]).score, 50);
    }

    #[test]
    fn null_values_carry_no_weight() {
        let agg = run(&[
            (1.0, result(Signal::Red, Some(2.0))),
            (5.0, result(Signal::Green, None)),
        ]);
        assert_eq!(agg.total_weight, 1.0);
        assert_eq!(agg.score, 100);
        assert_eq!(agg.label, RiskLabel::RiskOff);
    }

    #[test]
    fn extremes() {
        let all_green = run(&[(1.0, result(Signal::Green, Some(0.0)))]);
        assert_eq!(all_green.score, 0);
        assert_eq!(all_green.label, RiskLabel::RiskOn);

        let all_amber = run(&[(2.0, result(Signal::Amber, Some(0.0)))]);
        assert_eq!(all_amber.score, 67);
        assert_eq!(all_amber.label, RiskLabel::Caution);
    }

    #[test]
    fn weights_shift_the_average() {
        // avg = (3*2 + 1*-1) / 4 = 1.25 -> (2.25 / 3) * 100 = 75
        let agg = run(&[
            (3.0, result(Signal::Red, Some(1.0))),
            (1.0, result(Signal::Green, Some(1.0))),
        ]);
        assert_eq!(agg.score, 75);
        assert_eq!(agg.label, RiskLabel::RiskOff);
    }

    #[test]
    fn label_boundaries() {
        let l = LabelThresholds::default();
        assert_eq!(risk_label(100, &l), RiskLabel::RiskOff);
        assert_eq!(risk_label(75, &l), RiskLabel::RiskOff);
        assert_eq!(risk_label(74, &l), RiskLabel::Caution);
        assert_eq!(risk_label(60, &l), RiskLabel::Caution);
        assert_eq!(risk_label(59, &l), RiskLabel::Neutral);
        assert_eq!(risk_label(36, &l), RiskLabel::Neutral);
        assert_eq!(risk_label(35, &l), RiskLabel::RiskOn);
        assert_eq!(risk_label(0, &l), RiskLabel::RiskOn);
    }

    #[test]
    fn every_score_has_exactly_one_label() {
        let l = LabelThresholds::default();
        for score in 0..=100u8 {
            let label = risk_label(score, &l);
            let expected = if score >= 75 {
                RiskLabel::RiskOff
            } else if score >= 60 {
                RiskLabel::Caution
            } else if score <= 35 {
                RiskLabel::RiskOn
            } else {
                RiskLabel::Neutral
            };
            assert_eq!(label, expected, "score {score}");
        }
    }
}
