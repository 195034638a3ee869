//! Indicator catalog loader.
//!
//! The catalog lists every tracked indicator under `drivers` plus an optional
//! `scoring` section. JSON and YAML files are accepted (chosen by extension).
//! Structural problems fail the load; a missing series id or URL only warns,
//! since the affected indicator degrades to a neutral result at fetch time.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CoreError, Result};
use crate::indicator::{IndicatorDescriptor, SourceKind};
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub drivers: Vec<IndicatorDescriptor>,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl Catalog {
    /// Read, parse and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let catalog = match ext.as_str() {
            "json" => Self::from_json(&content)?,
            "yml" | "yaml" => Self::from_yaml(&content)?,
            other => {
                return Err(CoreError::UnsupportedFormat(format!(
                    "{} (extension {:?})",
                    path.display(),
                    other
                )))
            }
        };

        info!(
            path = %path.display(),
            indicators = catalog.drivers.len(),
            "loaded indicator catalog"
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        let mut seen = HashSet::new();
        for (idx, d) in self.drivers.iter().enumerate() {
            if d.name.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "drivers[{idx}]: name must not be empty"
                )));
            }
            if !d.weight.is_finite() || d.weight < 0.0 {
                return Err(CoreError::Validation(format!(
                    "drivers[{idx}] ({}): weight must be a finite number >= 0, got {}",
                    d.name, d.weight
                )));
            }
            if !seen.insert(d.name.as_str()) {
                warn!(indicator = %d.name, "duplicate indicator name in catalog");
            }

            let missing_locator = match d.source {
                SourceKind::Fred => d.series_id.as_deref().map_or(true, str::is_empty),
                SourceKind::RbnzXlsx => d.url.as_deref().map_or(true, str::is_empty),
                SourceKind::Unsupported(_) => false,
            };
            if missing_locator {
                warn!(
                    indicator = %d.name,
                    source = %d.source,
                    "indicator has no series_id/url; it will report no data"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::SheetRef;

    const CATALOG_JSON: &str = r#"{
      "drivers": [
        {"name": "US HY OAS", "source": "fred", "series_id": "BAMLH0A0HYM2",
         "region": "United States", "block": "financial", "weight": 2},
        {"name": "NZ TWI", "source": "rbnz_xlsx", "url": "https://www.rbnz.govt.nz/b1.xlsx",
         "value_col": "TWI", "region": "New Zealand", "high_is_risk_off": false},
        {"name": "Euro area PMI", "source": "ecb"}
      ]
    }"#;

    #[test]
    fn parse_json_catalog() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.drivers.len(), 3);
        assert_eq!(catalog.scoring, ScoringConfig::default());

        let hy = &catalog.drivers[0];
        assert_eq!(hy.source, SourceKind::Fred);
        assert_eq!(hy.weight, 2.0);
        assert_eq!(hy.block, "financial");

        let twi = &catalog.drivers[1];
        assert_eq!(twi.source, SourceKind::RbnzXlsx);
        assert_eq!(twi.value_col, "TWI");
        assert_eq!(twi.sheet, SheetRef::Index(0));
        assert!(!twi.high_is_risk_off);
        assert_eq!(twi.block, "Other");

        let pmi = &catalog.drivers[2];
        assert_eq!(pmi.source, SourceKind::Unsupported("ecb".to_string()));
        assert_eq!(pmi.region, "Global");
    }

    #[test]
    fn parse_yaml_catalog_with_scoring() {
        let yaml = r#"
drivers:
  - name: VIX
    source: fred
    series_id: VIXCLS
scoring:
  window: 126
  labels:
    caution: 65
"#;
        let catalog = Catalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.drivers[0].name, "VIX");
        assert_eq!(catalog.scoring.window, 126);
        assert_eq!(catalog.scoring.labels.caution, 65);
        assert_eq!(catalog.scoring.labels.risk_off, 75);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let json = r#"{"drivers": [{"name": "x", "source": "fred", "series_id": "X", "weight": -1}]}"#;
        assert!(matches!(Catalog::from_json(json), Err(CoreError::Validation(_))));
    }

    #[test]
    fn empty_name_is_rejected() {
        let json = r#"{"drivers": [{"name": " ", "source": "fred", "series_id": "X"}]}"#;
        assert!(matches!(Catalog::from_json(json), Err(CoreError::Validation(_))));
    }

    #[test]
    fn missing_drivers_key_is_a_parse_error() {
        assert!(matches!(Catalog::from_json("{}"), Err(CoreError::Json(_))));
    }

    #[test]
    fn load_from_file_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let json_path = dir.path().join("indicators.json");
        fs::write(&json_path, CATALOG_JSON).unwrap();
        assert_eq!(Catalog::load(&json_path).unwrap().drivers.len(), 3);

        let txt_path = dir.path().join("indicators.txt");
        fs::write(&txt_path, CATALOG_JSON).unwrap();
        assert!(matches!(
            Catalog::load(&txt_path),
            Err(CoreError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
