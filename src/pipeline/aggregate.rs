//! The aggregation run: filter, connect, partition, build, classify.

use super::params::AggregationParams;
use super::result::{AggregationResult, ExcludedElement};
use crate::classification::CorridorClassifier;
use crate::components::extract_components;
use crate::config::ClassificationConfig;
use crate::core::{Element, ElementIndex, Error, GeometryKind, Result};
use crate::corridor::{Corridor, CorridorBuilder};
use crate::observability::{set_mode, set_phase, AggregationPhase};
use crate::spatial::{projection_for, screen, ConnectivityMode};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};

/// Runs the engine over an element snapshot.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    classifier: CorridorClassifier,
}

impl Aggregator {
    pub fn new(classification: ClassificationConfig) -> Self {
        Self {
            classifier: CorridorClassifier::new(classification),
        }
    }

    pub fn classifier(&self) -> &CorridorClassifier {
        &self.classifier
    }

    /// Aggregate `elements` into corridors.
    ///
    /// An input with nothing eligible yields an empty result. Only invalid
    /// parameters and duplicate element ids are errors.
    pub fn run(
        &self,
        elements: &[Element],
        params: &AggregationParams,
        created_at: DateTime<Utc>,
    ) -> Result<AggregationResult> {
        params.validate()?;
        check_unique_ids(elements)?;

        let mode = params.mode();
        let _span = tracing::debug_span!("aggregate", %mode, elements = elements.len()).entered();
        let _mode = set_mode(mode.to_string());

        let (eligible, resolved_threshold) = {
            let _phase = set_phase(AggregationPhase::Eligibility);
            let threshold = params.threshold.resolve(elements);
            (eligible_indices(elements, threshold), threshold)
        };
        let (candidates, exclusions) = screen(elements, &eligible, mode);
        log::info!(
            "{} of {} elements eligible for {} aggregation ({} indexable)",
            eligible.len(),
            elements.len(),
            mode,
            candidates.len()
        );

        let mut corridors = match projection_for(&candidates) {
            None => Vec::new(),
            Some(projection) => {
                let edges = {
                    let _phase = set_phase(AggregationPhase::Indexing);
                    params.connectivity().connected_pairs(&candidates, &projection)
                };
                let components = {
                    let _phase = set_phase(AggregationPhase::ComponentExtraction);
                    let nodes: Vec<ElementIndex> = candidates.iter().map(|c| c.index).collect();
                    extract_components(&nodes, &edges)
                };
                let _phase = set_phase(AggregationPhase::CorridorBuilding);
                CorridorBuilder::new(elements, projection, mode, params.floor(), created_at)
                    .build_all(&components)
            }
        };

        {
            let _phase = set_phase(AggregationPhase::Classification);
            corridors
                .par_iter_mut()
                .for_each(|corridor| self.classifier.annotate(corridor));
        }
        sort_corridors(&mut corridors);

        let members: HashSet<ElementIndex> = corridors
            .iter()
            .flat_map(|c| c.member_indices.iter().copied())
            .collect();
        let orphans: Vec<ElementIndex> = eligible
            .iter()
            .copied()
            .filter(|i| !members.contains(i))
            .collect();
        let excluded = exclusions
            .into_iter()
            .map(|(index, reason)| ExcludedElement {
                index,
                id: elements[index].id.clone(),
                reason: reason.to_string(),
            })
            .collect();

        log::info!(
            "Built {} corridors, {} orphaned elements",
            corridors.len(),
            orphans.len()
        );

        Ok(AggregationResult {
            corridors,
            eligible,
            orphans,
            excluded,
            all_points: (mode == ConnectivityMode::Point).then(|| point_indices(elements)),
            resolved_threshold,
            params: *params,
            created_at,
        })
    }
}

/// Indices with a present priority at or above `threshold`, ascending.
pub fn eligible_indices(elements: &[Element], threshold: Option<f64>) -> Vec<ElementIndex> {
    let Some(threshold) = threshold else {
        return Vec::new();
    };
    elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.priority().is_some_and(|p| p >= threshold))
        .map(|(i, _)| i)
        .collect()
}

fn point_indices(elements: &[Element]) -> Vec<ElementIndex> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.geometry.kind() == GeometryKind::Point)
        .map(|(i, _)| i)
        .collect()
}

/// Mean priority descending; absent means last; ties by corridor id.
pub fn sort_corridors(corridors: &mut [Corridor]) {
    corridors.sort_by(|a, b| {
        let pa = a.mean_priority().unwrap_or(f64::NEG_INFINITY);
        let pb = b.mean_priority().unwrap_or(f64::NEG_INFINITY);
        pb.total_cmp(&pa)
            .then_with(|| a.corridor_id.cmp(&b.corridor_id))
    });
}

/// Element ids must be unique within one run.
pub fn check_unique_ids(elements: &[Element]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for element in elements {
        if !seen.insert(&element.id) {
            return Err(Error::Input(format!(
                "duplicate element id `{}`",
                element.id
            )));
        }
    }
    Ok(())
}
