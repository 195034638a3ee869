use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an indicator's series comes from.
///
/// Tags match exactly. Anything else, including a differently cased
/// `"FRED"`, is kept verbatim as [`SourceKind::Unsupported`] so a catalog
/// can list placeholder sources without failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceKind {
    /// FRED `series/observations` API (needs an API key).
    Fred,
    /// Spreadsheet published by the RBNZ, fetched by URL.
    RbnzXlsx,
    Unsupported(String),
}

impl SourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            SourceKind::Fred => "fred",
            SourceKind::RbnzXlsx => "rbnz_xlsx",
            SourceKind::Unsupported(tag) => tag,
        }
    }
}

impl From<String> for SourceKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "fred" => SourceKind::Fred,
            "rbnz_xlsx" => SourceKind::RbnzXlsx,
            _ => SourceKind::Unsupported(tag),
        }
    }
}

impl From<SourceKind> for String {
    fn from(kind: SourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worksheet selector for spreadsheet sources: position or tab name.
///
/// A numeric string such as `"2"` is read as a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "RawSheet")]
pub enum SheetRef {
    Index(usize),
    Name(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSheet {
    Index(usize),
    Name(String),
}

impl From<RawSheet> for SheetRef {
    fn from(raw: RawSheet) -> Self {
        match raw {
            RawSheet::Index(idx) => SheetRef::Index(idx),
            RawSheet::Name(name) => match name.trim().parse() {
                Ok(idx) => SheetRef::Index(idx),
                Err(_) => SheetRef::Name(name),
            },
        }
    }
}

impl Default for SheetRef {
    fn default() -> Self {
        SheetRef::Index(0)
    }
}

/// One tracked indicator as declared in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDescriptor {
    pub name: String,
    pub source: SourceKind,

    /// Series identifier for API-backed sources.
    #[serde(default)]
    pub series_id: Option<String>,
    /// Document URL for spreadsheet-backed sources.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub sheet: SheetRef,
    /// Header hint for the date column (substring, case-insensitive).
    #[serde(default = "default_date_col")]
    pub date_col: String,
    /// Header hint for the value column (substring, case-insensitive).
    #[serde(default)]
    pub value_col: String,

    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_block")]
    pub block: String,
    /// When true, elevated readings indicate stress.
    #[serde(default = "default_high_is_risk_off")]
    pub high_is_risk_off: bool,
}

fn default_date_col() -> String {
    "Date".to_string()
}

fn default_weight() -> f64 {
    1.0
}

fn default_region() -> String {
    "Global".to_string()
}

fn default_block() -> String {
    "Other".to_string()
}

fn default_high_is_risk_off() -> bool {
    true
}

impl IndicatorDescriptor {
    /// Minimal descriptor with every optional field at its default.
    pub fn new(name: impl Into<String>, source: SourceKind) -> Self {
        Self {
            name: name.into(),
            source,
            series_id: None,
            url: None,
            sheet: SheetRef::default(),
            date_col: default_date_col(),
            value_col: String::new(),
            weight: default_weight(),
            region: default_region(),
            block: default_block(),
            high_is_risk_off: default_high_is_risk_off(),
        }
    }

    /// Identifier reported in results: the series id, else the URL.
    pub fn id(&self) -> Option<&str> {
        self.series_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.url.as_deref().filter(|s| !s.is_empty()))
    }
}
