//! Fetcher trait definition and shared error types.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use riskgauge_core::{IndicatorDescriptor, Observation};

/// Errors that can occur while retrieving a series.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Could not find headers '{date_col}' and '{value_col}' in {location}")]
    MissingHeaders {
        date_col: String,
        value_col: String,
        location: String,
    },

    #[error("Indicator '{0}' has no series_id/url for its source")]
    MissingLocator(String),

    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Trait for indicator data sources (FRED, spreadsheets, ...).
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    /// Retrieve the full series for an indicator, ascending by date.
    async fn fetch(&self, descriptor: &IndicatorDescriptor) -> Result<Vec<Observation>, FetchError>;

    /// Human-readable name for this source (e.g. "fred").
    fn source_name(&self) -> &str;
}
