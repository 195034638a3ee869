use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use riskgauge_core::config::FredConfig;
use riskgauge_core::{IndicatorDescriptor, Observation};

use crate::parse::parse_json_number;
use crate::traits::{FetchError, SeriesFetcher};

/// FRED `series/observations` backend.
///
/// Requests are made with `sort_order=asc`, so the returned series is
/// already ascending by date.
pub struct FredFetcher {
    client: Client,
    api_key: String,
    base_url: String,
    limit: u32,
}

impl FredFetcher {
    pub fn new(api_key: String, base_url: String, limit: u32) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url,
            limit,
        }
    }

    /// Build from env config. Returns `None` when no API key is set.
    pub fn from_config(config: &FredConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self::new(
            api_key,
            config.base_url.clone(),
            config.observation_limit,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    #[serde(default)]
    date: String,
    #[serde(default)]
    value: serde_json::Value,
}

/// Convert a raw payload, dropping observations without a usable value.
fn into_series(payload: ObservationsResponse) -> Vec<Observation> {
    payload
        .observations
        .into_iter()
        .filter_map(|o| parse_json_number(&o.value).map(|v| Observation::new(o.date, v)))
        .collect()
}

/// Parse a FRED observations JSON body.
pub fn parse_observations(body: &str) -> Result<Vec<Observation>, FetchError> {
    let payload: ObservationsResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    Ok(into_series(payload))
}

#[async_trait]
impl SeriesFetcher for FredFetcher {
    async fn fetch(&self, descriptor: &IndicatorDescriptor) -> Result<Vec<Observation>, FetchError> {
        let series_id = descriptor
            .series_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FetchError::MissingLocator(descriptor.name.clone()))?;

        let limit = self.limit.to_string();
        // The request URL carries the API key; strip it from any error.
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "asc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Http(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api(format!("{status}: {body}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.without_url()))?;
        let series = parse_observations(&body)?;

        debug!(series_id, observations = series.len(), "fetched FRED series");
        Ok(series)
    }

    fn source_name(&self) -> &str {
        "fred"
    }
}
