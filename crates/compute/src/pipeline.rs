//! End-to-end run over a catalog: evaluate, aggregate, report.

use std::time::Instant;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::info;

use riskgauge_core::{Catalog, Config, DashboardDocument, IndicatorDescriptor, IndicatorResult};
use riskgauge_ingest::SourceRegistry;

use crate::aggregate::aggregate;
use crate::evaluator::IndicatorEvaluator;
use crate::report::build_document;

pub struct Pipeline {
    evaluator: IndicatorEvaluator,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(evaluator: IndicatorEvaluator, concurrency: usize) -> Self {
        Self {
            evaluator,
            concurrency: concurrency.max(1),
        }
    }

    /// Wire the built-in sources and the catalog's scoring parameters.
    pub fn from_config(config: &Config, catalog: &Catalog) -> Self {
        let registry = SourceRegistry::from_config(config);
        let evaluator =
            IndicatorEvaluator::new(registry, catalog.scoring.clone(), config.fetch.timeout());
        Self::new(evaluator, config.fetch.concurrency)
    }

    /// Evaluate every indicator, results in input order.
    ///
    /// Up to `concurrency` fetches run at once; `buffered` yields in input
    /// order regardless of completion order.
    pub async fn evaluate_all(&self, drivers: &[IndicatorDescriptor]) -> Vec<IndicatorResult> {
        stream::iter(drivers)
            .map(|d| self.evaluator.evaluate(d))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    pub async fn run(&self, drivers: &[IndicatorDescriptor]) -> DashboardDocument {
        let started = Instant::now();
        let results = self.evaluate_all(drivers).await;

        let scoring = self.evaluator.scoring();
        let aggregate = aggregate(
            drivers.iter().map(|d| d.weight).zip(&results),
            scoring,
        );

        let available = results.iter().filter(|r| r.value.is_some()).count();
        info!(
            indicators = drivers.len(),
            available,
            score = aggregate.score,
            label = %aggregate.label,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "risk state computed"
        );

        build_document(drivers, &results, &aggregate, scoring.max_drivers, Utc::now())
    }
}
