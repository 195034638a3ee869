//! Series acquisition for riskgauge.
//!
//! This crate provides:
//! - `SeriesFetcher` trait for pluggable indicator sources
//! - FRED API and spreadsheet (xlsx) fetcher implementations
//! - `SourceRegistry` that maps catalog source kinds to fetchers

pub mod fred;
pub mod parse;
pub mod registry;
pub mod spreadsheet;
pub mod traits;

pub use fred::FredFetcher;
pub use registry::SourceRegistry;
pub use spreadsheet::SpreadsheetFetcher;
pub use traits::{FetchError, SeriesFetcher};
