use super::params::AggregationParams;
use crate::core::{ElementId, ElementIndex};
use crate::corridor::metrics::mean;
use crate::corridor::Corridor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// An eligible element the index could not use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedElement {
    pub index: ElementIndex,
    pub id: ElementId,
    pub reason: String,
}

/// Outcome of one aggregation run. Read-only once produced.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationResult {
    /// Sorted by mean priority descending, ties by corridor id
    pub corridors: Vec<Corridor>,
    /// Indices of elements at or above the resolved threshold
    pub eligible: Vec<ElementIndex>,
    /// Eligible elements that ended up in no corridor
    pub orphans: Vec<ElementIndex>,
    /// Eligible elements with unusable geometry (also listed as orphans)
    pub excluded: Vec<ExcludedElement>,
    /// Every point element of the input, for point-mode map layers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_points: Option<Vec<ElementIndex>>,
    /// Threshold actually applied, after percentile resolution
    pub resolved_threshold: Option<f64>,
    pub params: AggregationParams,
    pub created_at: DateTime<Utc>,
}

impl AggregationResult {
    pub fn corridor(&self, corridor_id: &str) -> Option<&Corridor> {
        self.corridors
            .iter()
            .find(|c| c.corridor_id.as_str() == corridor_id)
    }

    /// Member ids of a corridor, in the corridor's member order.
    pub fn members(&self, corridor_id: &str) -> Option<&[ElementId]> {
        self.corridor(corridor_id).map(|c| c.member_ids.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.corridors.is_empty()
    }

    pub fn summary(&self) -> AggregationSummary {
        let mut by_primary = BTreeMap::new();
        let mut by_severity = BTreeMap::new();
        for classification in self.corridors.iter().filter_map(|c| c.classification) {
            *by_primary
                .entry(classification.primary.as_str())
                .or_insert(0) += 1;
            *by_severity
                .entry(classification.severity.as_str())
                .or_insert(0) += 1;
        }

        AggregationSummary {
            corridor_count: self.corridors.len(),
            total_length_m: self.corridors.iter().map(|c| c.length_m).sum(),
            mean_priority: mean(self.corridors.iter().map(Corridor::mean_priority)),
            eligible_count: self.eligible.len(),
            orphan_count: self.orphans.len(),
            by_primary,
            by_severity,
        }
    }
}

/// Headline numbers for a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationSummary {
    pub corridor_count: usize,
    pub total_length_m: f64,
    pub mean_priority: Option<f64>,
    pub eligible_count: usize,
    pub orphan_count: usize,
    pub by_primary: BTreeMap<&'static str, usize>,
    pub by_severity: BTreeMap<&'static str, usize>,
}
