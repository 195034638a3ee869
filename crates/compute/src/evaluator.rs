//! Per-indicator evaluation with failure isolation.
//!
//! Any data problem for one indicator (no fetcher for its source, fetch
//! error or timeout, too few observations) yields a result with null
//! value/delta/z and a neutral signal. Nothing here returns an error.

use std::time::Duration;

use tracing::{debug, warn};

use riskgauge_core::{IndicatorDescriptor, IndicatorResult, Observation, ScoringConfig, Signal};
use riskgauge_ingest::{FetchError, SourceRegistry};

use crate::classify::classify;
use crate::normalize::zscore;

/// Evaluates indicators against the registered sources.
pub struct IndicatorEvaluator {
    registry: SourceRegistry,
    scoring: ScoringConfig,
    fetch_timeout: Duration,
}

impl IndicatorEvaluator {
    pub fn new(registry: SourceRegistry, scoring: ScoringConfig, fetch_timeout: Duration) -> Self {
        Self {
            registry,
            scoring,
            fetch_timeout,
        }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Fetch and evaluate one indicator.
    pub async fn evaluate(&self, descriptor: &IndicatorDescriptor) -> IndicatorResult {
        let Some(fetcher) = self.registry.get(&descriptor.source) else {
            debug!(
                indicator = %descriptor.name,
                source = %descriptor.source,
                "no fetcher for source; reporting no data"
            );
            return unavailable(descriptor);
        };

        let fetched = match tokio::time::timeout(self.fetch_timeout, fetcher.fetch(descriptor)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout)),
        };

        match fetched {
            Ok(series) => evaluate_series(descriptor, &series, &self.scoring),
            Err(e) => {
                warn!(
                    indicator = %descriptor.name,
                    source = fetcher.source_name(),
                    error = %e,
                    "fetch failed; reporting no data"
                );
                unavailable(descriptor)
            }
        }
    }
}

/// Result for an indicator whose data could not be used.
pub fn unavailable(descriptor: &IndicatorDescriptor) -> IndicatorResult {
    IndicatorResult {
        name: descriptor.name.clone(),
        value: None,
        delta: None,
        z: None,
        signal: Signal::Neutral,
        source: descriptor.source.as_str().to_string(),
        id: descriptor.id().map(str::to_string),
    }
}

/// Evaluate an already-fetched series (ascending by date).
///
/// The z-score window is the trailing `scoring.window` values and includes
/// the latest observation.
pub fn evaluate_series(
    descriptor: &IndicatorDescriptor,
    series: &[Observation],
    scoring: &ScoringConfig,
) -> IndicatorResult {
    let [.., prev, last] = series else {
        debug!(
            indicator = %descriptor.name,
            observations = series.len(),
            "fewer than two observations"
        );
        return unavailable(descriptor);
    };

    let latest = last.value;
    let delta = latest - prev.value;

    let start = series.len().saturating_sub(scoring.window);
    let window: Vec<f64> = series[start..].iter().map(|o| o.value).collect();
    let z = zscore(&window, latest, scoring.min_history);
    let signal = classify(z, descriptor.high_is_risk_off, &scoring.thresholds);

    let precision = scoring.precision;
    IndicatorResult {
        name: descriptor.name.clone(),
        value: Some(round_to(latest, precision)),
        delta: Some(round_to(delta, precision)),
        z: z.map(|z| round_to(z, precision)),
        signal,
        source: descriptor.source.as_str().to_string(),
        id: descriptor.id().map(str::to_string),
    }
}

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value, ties to even, so `1.03125` becomes
/// `1.0312` and `2.00005` (stored just below the tie) becomes `2.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use riskgauge_core::SourceKind;
    use riskgauge_ingest::SeriesFetcher;

    struct StaticFetcher {
        series: Vec<Observation>,
    }

    #[async_trait]
    impl SeriesFetcher for StaticFetcher {
        async fn fetch(&self, _d: &IndicatorDescriptor) -> Result<Vec<Observation>, FetchError> {
            Ok(self.series.clone())
        }
        fn source_name(&self) -> &str {
            "static"
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl SeriesFetcher for FailingFetcher {
        async fn fetch(&self, _d: &IndicatorDescriptor) -> Result<Vec<Observation>, FetchError> {
            Err(FetchError::Api("503 Service Unavailable".to_string()))
        }
        fn source_name(&self) -> &str {
            "failing"
        }
    }

    struct HangingFetcher;

    #[async_trait]
    impl SeriesFetcher for HangingFetcher {
        async fn fetch(&self, _d: &IndicatorDescriptor) -> Result<Vec<Observation>, FetchError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
        fn source_name(&self) -> &str {
            "hanging"
        }
    }

    fn series(values: &[f64]) -> Vec<Observation> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Observation::new(format!("2026-01-{:02}", i + 1), *v))
            .collect()
    }

    fn fred(name: &str) -> IndicatorDescriptor {
        let mut d = IndicatorDescriptor::new(name, SourceKind::Fred);
        d.series_id = Some(format!("{name}_ID"));
        d
    }

    fn evaluator_with(fetcher: Box<dyn SeriesFetcher>) -> IndicatorEvaluator {
        let mut registry = SourceRegistry::empty();
        registry.register(SourceKind::Fred, fetcher);
        IndicatorEvaluator::new(registry, ScoringConfig::default(), Duration::from_secs(5))
    }

    #[test]
    fn latest_delta_and_z() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 20.0];
        let result = evaluate_series(&fred("CPI"), &series(&values), &ScoringConfig::default());
        assert_eq!(result.value, Some(20.0));
        assert_eq!(result.delta, Some(10.0));
        // mean 75/11, population stddev over the 11-point window
        let z = result.z.unwrap();
        assert!((z - 2.6429).abs() < 1e-9, "z={z}");
        assert_eq!(result.signal, Signal::Red);
        assert_eq!(result.source, "fred");
        assert_eq!(result.id.as_deref(), Some("CPI_ID"));
    }

    #[test]
    fn short_history_keeps_value_but_no_z() {
        let result = evaluate_series(&fred("x"), &series(&[1.0, 1.5, 1.25]), &ScoringConfig::default());
        assert_eq!(result.value, Some(1.25));
        assert_eq!(result.delta, Some(-0.25));
        assert_eq!(result.z, None);
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[test]
    fn fewer_than_two_points_is_unavailable() {
        for values in [&[][..], &[3.0][..]] {
            let result = evaluate_series(&fred("x"), &series(values), &ScoringConfig::default());
            assert_eq!(result.value, None);
            assert_eq!(result.delta, None);
            assert_eq!(result.z, None);
            assert_eq!(result.signal, Signal::Neutral);
        }
    }

    #[test]
    fn window_limits_history() {
        // 300 points: the first 48 are far away and must fall outside the window.
        let mut values = vec![1000.0; 48];
        values.extend((0..252).map(|i| f64::from(i % 2)));
        let scoring = ScoringConfig::default();
        let result = evaluate_series(&fred("x"), &series(&values), &scoring);
        // Window alternates 0/1: mean 0.5, stddev 0.5, latest 1 -> z = 1.
        assert_eq!(result.z, Some(1.0));
        assert_eq!(result.signal, Signal::Amber);
    }

    #[test]
    fn low_is_risk_off_direction() {
        let mut d = fred("claims");
        d.high_is_risk_off = false;
        let values = [10.0, 9.0, 11.0, 10.0, 9.0, 11.0, 10.0, 9.0, 11.0, 10.0, 2.0];
        let result = evaluate_series(&d, &series(&values), &ScoringConfig::default());
        assert!(result.z.unwrap() < -1.5);
        assert_eq!(result.signal, Signal::Red);
    }

    #[test]
    fn rounding_to_four_places() {
        assert_eq!(round_to(1.234_56, 4), 1.2346);
        assert_eq!(round_to(-0.000_04, 4), -0.0);
        assert_eq!(round_to(12.0, 4), 12.0);
    }

    #[test]
    fn rounding_is_exact_with_ties_to_even() {
        assert_eq!(round_to(1.03125, 4), 1.0312);
        assert_eq!(round_to(1.03135, 4), 1.0313);
        assert_eq!(round_to(2.00005, 4), 2.0);
        assert_eq!(round_to(-1.03125, 4), -1.0312);
        assert_eq!(round_to(0.125, 2), 0.12);
    }

    #[tokio::test]
    async fn unsupported_source_is_unavailable() {
        let evaluator = evaluator_with(Box::new(FailingFetcher));
        let d = IndicatorDescriptor::new("PMI", SourceKind::Unsupported("oecd".into()));
        let result = evaluator.evaluate(&d).await;
        assert_eq!(result.value, None);
        assert_eq!(result.signal, Signal::Neutral);
        assert_eq!(result.source, "oecd");
        assert_eq!(result.id, None);
    }

    #[tokio::test]
    async fn fetch_error_is_unavailable() {
        let evaluator = evaluator_with(Box::new(FailingFetcher));
        let result = evaluator.evaluate(&fred("HY")).await;
        assert_eq!((result.value, result.delta, result.z), (None, None, None));
        assert_eq!(result.signal, Signal::Neutral);
        assert_eq!(result.id.as_deref(), Some("HY_ID"));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_fetch_times_out() {
        let evaluator = evaluator_with(Box::new(HangingFetcher));
        let result = evaluator.evaluate(&fred("slow")).await;
        assert_eq!(result.value, None);
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[tokio::test]
    async fn fetched_series_is_evaluated() {
        let evaluator = evaluator_with(Box::new(StaticFetcher {
            series: series(&[5.0, 6.0]),
        }));
        let result = evaluator.evaluate(&fred("rate")).await;
        assert_eq!(result.value, Some(6.0));
        assert_eq!(result.delta, Some(1.0));
        assert_eq!(result.z, None);
    }
}
