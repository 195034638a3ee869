use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use riskgauge_core::DashboardDocument;

/// Render the document as pretty-printed JSON.
pub fn render(doc: &DashboardDocument) -> Result<String> {
    let mut json = serde_json::to_string_pretty(doc).context("failed to serialize dashboard")?;
    json.push('\n');
    Ok(json)
}

/// Write the document, creating parent directories as needed.
pub fn write_document(path: &Path, doc: &DashboardDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output dir: {}", parent.display()))?;
    }
    let json = render(doc)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "dashboard written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskgauge_core::{RiskLabel, RiskState};

    fn doc() -> DashboardDocument {
        DashboardDocument {
            last_updated_utc: "2026-10-17T08:30:00.000000Z".to_string(),
            risk_state: RiskState {
                score: 50,
                label: RiskLabel::Neutral,
                drivers: Vec::new(),
            },
            regions: Vec::new(),
        }
    }

    #[test]
    fn writes_into_new_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("public/data/dashboard.json");
        write_document(&path, &doc()).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["risk_state"]["score"], 50);
        assert_eq!(written["risk_state"]["label"], "Neutral");
        assert_eq!(written["regions"], serde_json::json!([]));
    }

    #[test]
    fn render_is_indented() {
        let json = render(&doc()).unwrap();
        assert!(json.starts_with("{\n  \"last_updated_utc\""));
        assert!(json.ends_with("}\n"));
    }
}
