//! Indicator evaluation and aggregation pipeline.
//!
//! Stages, leaf-first:
//! - [`normalize`]: z-score of the latest value against its trailing window
//! - [`classify`]: z-score to directional risk signal
//! - [`evaluator`]: per-indicator fetch + compute with failure isolation
//! - [`aggregate`]: weighted composite score and label
//! - [`report`]: driver ranking, region/block grouping, final document
//! - [`pipeline`]: runs all of the above over a catalog

pub mod aggregate;
pub mod classify;
pub mod evaluator;
pub mod normalize;
pub mod pipeline;
pub mod report;

pub use aggregate::{aggregate, risk_label, score_from_signal, Aggregate};
pub use classify::classify;
pub use evaluator::IndicatorEvaluator;
pub use normalize::zscore;
pub use pipeline::Pipeline;
