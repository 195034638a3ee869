//! Column extraction from a worksheet grid by fuzzy header matching.
//!
//! Kept independent of the workbook reader so it can be exercised with
//! hand-built grids.

use chrono::NaiveDate;

use riskgauge_core::Observation;

use crate::parse::parse_number;

/// Rows scanned when looking for the header row.
const HEADER_SCAN_ROWS: usize = 31;
/// Columns scanned per header candidate row.
const HEADER_SCAN_COLS: usize = 80;

/// Reader-agnostic worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    fn matches(&self, needle: &str) -> bool {
        match self {
            Cell::Text(s) => s.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Text(s) => parse_number(s),
            _ => None,
        }
    }

    fn as_date_string(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// Column positions of the located header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
    pub row: usize,
    pub date_col: usize,
    pub value_col: usize,
}

/// Find the header row within the first rows of the grid.
///
/// A cell matches when it is text containing the hint (case-insensitive);
/// the last matching cell of a row wins. Column matches carry over to later
/// rows, so the header row is the first row by which both columns have been
/// seen.
pub fn find_header(grid: &[Vec<Cell>], date_hint: &str, value_hint: &str) -> Option<HeaderMatch> {
    let mut date_col = None;
    let mut value_col = None;

    for (row_idx, row) in grid.iter().take(HEADER_SCAN_ROWS).enumerate() {
        for (col_idx, cell) in row.iter().take(HEADER_SCAN_COLS).enumerate() {
            if cell.matches(date_hint) {
                date_col = Some(col_idx);
            }
            if cell.matches(value_hint) {
                value_col = Some(col_idx);
            }
        }
        if let (Some(date_col), Some(value_col)) = (date_col, value_col) {
            return Some(HeaderMatch {
                row: row_idx,
                date_col,
                value_col,
            });
        }
    }
    None
}

/// Extract a dated series below the header row, sorted by date string.
///
/// Rows with an empty date or a non-numeric value are skipped. Returns
/// `None` when the header row cannot be located.
pub fn extract_series(
    grid: &[Vec<Cell>],
    date_hint: &str,
    value_hint: &str,
) -> Option<Vec<Observation>> {
    let header = find_header(grid, date_hint, value_hint)?;

    let mut series: Vec<Observation> = grid
        .iter()
        .skip(header.row + 1)
        .filter_map(|row| {
            let date = row.get(header.date_col)?.as_date_string()?;
            let value = row.get(header.value_col)?.as_number()?;
            Some(Observation::new(date, value))
        })
        .collect();

    series.sort_by(|a, b| a.date.cmp(&b.date));
    Some(series)
}
