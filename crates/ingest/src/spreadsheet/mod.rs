//! Spreadsheet-backed series (RBNZ statistical workbooks).
//!
//! The workbook is downloaded by URL, one worksheet is selected by index or
//! name, and a date column plus one value column are located by header text.

pub mod grid;

use std::io::Cursor;
use std::iter;
use std::time::Duration;

use async_trait::async_trait;
use calamine::{open_workbook_from_rs, Data, DataType, Range, Reader, Xlsx, XlsxError};
use reqwest::Client;
use tracing::debug;

use riskgauge_core::{IndicatorDescriptor, Observation, SheetRef};

use crate::traits::{FetchError, SeriesFetcher};

pub use grid::{extract_series, find_header, Cell, HeaderMatch};

/// Downloads xlsx workbooks and extracts one column as a series.
pub struct SpreadsheetFetcher {
    client: Client,
}

impl SpreadsheetFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(45))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(FetchError::Api(format!("{status} fetching {url}")));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for SpreadsheetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Open xlsx bytes and convert the selected worksheet into a [`Cell`] grid.
///
/// The grid is anchored at A1: leading blank rows and columns before the
/// first used cell are filled with [`Cell::Empty`].
pub fn read_grid(bytes: Vec<u8>, sheet: &SheetRef) -> Result<Vec<Vec<Cell>>, FetchError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: XlsxError| FetchError::Spreadsheet(e.to_string()))?;

    let range: Range<Data> = match sheet {
        SheetRef::Index(idx) => workbook
            .worksheet_range_at(*idx)
            .ok_or_else(|| FetchError::Spreadsheet(format!("no worksheet at index {idx}")))?
            .map_err(|e| FetchError::Spreadsheet(e.to_string()))?,
        SheetRef::Name(name) => workbook
            .worksheet_range(name)
            .map_err(|e| FetchError::Spreadsheet(format!("worksheet '{name}': {e}")))?,
    };

    let (first_row, first_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut grid: Vec<Vec<Cell>> = iter::repeat_with(Vec::new).take(first_row).collect();
    grid.extend(range.rows().map(|row| {
        iter::repeat(Cell::Empty)
            .take(first_col)
            .chain(row.iter().map(to_cell))
            .collect()
    }));
    Ok(grid)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => {
            data.as_date().map(Cell::Date).unwrap_or(Cell::Empty)
        }
    }
}

#[async_trait]
impl SeriesFetcher for SpreadsheetFetcher {
    async fn fetch(&self, descriptor: &IndicatorDescriptor) -> Result<Vec<Observation>, FetchError> {
        let url = descriptor
            .url
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FetchError::MissingLocator(descriptor.name.clone()))?;

        let bytes = self.download(url).await?;
        let sheet = descriptor.sheet.clone();
        // Workbook parsing is CPU-bound; keep it off the async workers.
        let grid = tokio::task::spawn_blocking(move || read_grid(bytes, &sheet))
            .await
            .map_err(|e| FetchError::Spreadsheet(e.to_string()))??;

        let series = extract_series(&grid, &descriptor.date_col, &descriptor.value_col)
            .ok_or_else(|| FetchError::MissingHeaders {
                date_col: descriptor.date_col.clone(),
                value_col: descriptor.value_col.clone(),
                location: url.to_string(),
            })?;

        debug!(url, observations = series.len(), "fetched spreadsheet series");
        Ok(series)
    }

    fn source_name(&self) -> &str {
        "rbnz_xlsx"
    }
}
