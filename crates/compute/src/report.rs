//! Dashboard document assembly: top drivers and region/block grouping.

use std::cmp::Reverse;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

use riskgauge_core::{
    Block, DashboardDocument, IndicatorDescriptor, IndicatorResult, RegionBlock, RegionVerdict,
    RiskState,
};

use crate::aggregate::{score_from_signal, Aggregate};

/// Most alarming indicators first, ties broken by name; at most `limit`.
pub fn top_drivers(results: &[IndicatorResult], limit: usize) -> Vec<IndicatorResult> {
    let mut ranked: Vec<&IndicatorResult> = results.iter().collect();
    ranked.sort_by(|a, b| {
        (Reverse(score_from_signal(a.signal)), &a.name)
            .cmp(&(Reverse(score_from_signal(b.signal)), &b.name))
    });
    ranked.into_iter().take(limit).cloned().collect()
}

/// URL-friendly region id: lower-case with spaces replaced by hyphens.
pub fn region_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Group results by their descriptor's region and block.
///
/// Blocks keep first-seen order within a region and items keep input
/// order; regions are sorted by name. `descriptors` and `results` are
/// paired by position.
pub fn group_regions(
    descriptors: &[IndicatorDescriptor],
    results: &[IndicatorResult],
) -> Vec<RegionBlock> {
    let mut by_region: IndexMap<&str, IndexMap<&str, Vec<IndicatorResult>>> = IndexMap::new();

    for (descriptor, result) in descriptors.iter().zip(results) {
        by_region
            .entry(descriptor.region.as_str())
            .or_default()
            .entry(descriptor.block.as_str())
            .or_default()
            .push(result.clone());
    }

    let mut regions: Vec<RegionBlock> = by_region
        .into_iter()
        .map(|(region, blocks)| RegionBlock {
            id: region_slug(region),
            name: region.to_string(),
            verdict: RegionVerdict::mixed(),
            blocks: blocks
                .into_iter()
                .map(|(title, items)| Block {
                    title: title.to_string(),
                    items,
                })
                .collect(),
        })
        .collect();

    regions.sort_by(|a, b| a.name.cmp(&b.name));
    regions
}

/// ISO-8601 UTC timestamp with a literal `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Assemble the final document.
pub fn build_document(
    descriptors: &[IndicatorDescriptor],
    results: &[IndicatorResult],
    aggregate: &Aggregate,
    max_drivers: usize,
    generated_at: DateTime<Utc>,
) -> DashboardDocument {
    DashboardDocument {
        last_updated_utc: format_timestamp(generated_at),
        risk_state: RiskState {
            score: aggregate.score,
            label: aggregate.label,
            drivers: top_drivers(results, max_drivers),
        },
        regions: group_regions(descriptors, results),
    }
}
