//! Corridors: connected components turned into renderable aggregates.

pub mod builder;
pub mod identity;
pub mod merge;
pub mod metrics;

pub use builder::{CorridorBuilder, SizeFloor};
pub use identity::{corridor_id, CorridorId};
pub use metrics::CorridorMetrics;

use crate::classification::{Classification, InterventionPlan};
use crate::core::{BoundingBox, ElementId, ElementIndex, Geometry};
use crate::spatial::ConnectivityMode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A derived, read-only aggregate of connected elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Corridor {
    pub corridor_id: CorridorId,
    pub mode: ConnectivityMode,
    /// Ascending by id for segments; path order for points
    pub member_ids: Vec<ElementId>,
    /// Ascending run-wide indices
    pub member_indices: Vec<ElementIndex>,
    pub geometry: Geometry,
    pub length_m: f64,
    pub member_count: usize,
    #[serde(flatten)]
    pub metrics: CorridorMetrics,
    pub bbox: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interventions: Option<InterventionPlan>,
    pub created_at: DateTime<Utc>,
}

impl Corridor {
    /// Member count under its segment-mode name.
    pub fn segment_count(&self) -> Option<usize> {
        (self.mode == ConnectivityMode::Segment).then_some(self.member_count)
    }

    /// Member count under its point-mode name.
    pub fn num_points(&self) -> Option<usize> {
        (self.mode == ConnectivityMode::Point).then_some(self.member_count)
    }

    pub fn mean_priority(&self) -> Option<f64> {
        self.metrics.mean_priority
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.member_ids.contains(id)
    }
}
