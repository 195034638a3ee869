//! Maps catalog source kinds to fetcher implementations.
//!
//! A kind with no registered fetcher (an unsupported tag, or FRED without
//! an API key) is simply absent; callers treat that as "no data".

use std::collections::HashMap;

use tracing::info;

use riskgauge_core::{Config, SourceKind};

use crate::fred::FredFetcher;
use crate::spreadsheet::SpreadsheetFetcher;
use crate::traits::SeriesFetcher;

pub struct SourceRegistry {
    fetchers: HashMap<SourceKind, Box<dyn SeriesFetcher>>,
}

impl SourceRegistry {
    /// Create a registry with no sources.
    pub fn empty() -> Self {
        Self {
            fetchers: HashMap::new(),
        }
    }

    /// Register the built-in sources that the environment allows.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::empty();

        match FredFetcher::from_config(&config.fred) {
            Some(fred) => registry.register(SourceKind::Fred, Box::new(fred)),
            None => info!("FRED_API_KEY not set; FRED indicators will report no data"),
        }
        registry.register(SourceKind::RbnzXlsx, Box::new(SpreadsheetFetcher::new()));

        registry
    }

    /// Register (or replace) the fetcher for a source kind.
    pub fn register(&mut self, kind: SourceKind, fetcher: Box<dyn SeriesFetcher>) {
        self.fetchers.insert(kind, fetcher);
    }

    pub fn get(&self, kind: &SourceKind) -> Option<&dyn SeriesFetcher> {
        self.fetchers.get(kind).map(|f| f.as_ref())
    }

    pub fn contains(&self, kind: &SourceKind) -> bool {
        self.fetchers.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.fetchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
