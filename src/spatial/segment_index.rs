//! Segment connectivity over R-trees.
//!
//! Two trees are built per run, both in projected meters: one over the
//! endpoints of every line part, one over the envelope of every element.
//! Endpoint proximity is answered by the first, touching or crossing
//! geometry by the second followed by an exact intersection test.

use super::{finalize, Candidate, ConnectivityIndex, ConnectivityMode, LocalProjection, Meters};
use super::{SEARCH_MARGIN_M, SEARCH_SLACK};
use crate::core::Edge;
use crate::spatial::projection::planar_distance;
use geo::{Intersects, LineString};
use rayon::prelude::*;
use rstar::primitives::GeomWithData;
use rstar::{RTree, RTreeObject, AABB};
use std::collections::BTreeSet;

type EndpointEntry = GeomWithData<Meters, usize>;

/// Connects segments that touch, cross, or have endpoints within tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentConnectivity {
    tolerance_m: f64,
}

impl SegmentConnectivity {
    pub fn new(tolerance_m: f64) -> Self {
        Self { tolerance_m }
    }

    pub fn tolerance_m(&self) -> f64 {
        self.tolerance_m
    }
}

/// One candidate's geometry in projected meters.
struct ProjectedLine {
    parts: Vec<LineString<f64>>,
    endpoints: Vec<Meters>,
    envelope: AABB<Meters>,
}

impl ProjectedLine {
    fn new(candidate: &Candidate<'_>, projection: &LocalProjection) -> Self {
        let parts: Vec<Vec<Meters>> = candidate
            .geometry
            .line_parts()
            .into_iter()
            .map(|part| projection.project_all(part))
            .collect();

        let endpoints = parts
            .iter()
            .filter_map(|part| Some([*part.first()?, *part.last()?]))
            .flatten()
            .collect();

        let (lower, upper) = parts.iter().flatten().fold(
            ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]),
            |(lo, hi), p| {
                (
                    [lo[0].min(p[0]), lo[1].min(p[1])],
                    [hi[0].max(p[0]), hi[1].max(p[1])],
                )
            },
        );

        Self {
            parts: parts.into_iter().map(LineString::from).collect(),
            endpoints,
            envelope: AABB::from_corners(lower, upper),
        }
    }

    fn intersects(&self, other: &ProjectedLine) -> bool {
        self.parts
            .iter()
            .any(|a| other.parts.iter().any(|b| a.intersects(b)))
    }
}

struct IndexedEnvelope {
    slot: usize,
    envelope: AABB<Meters>,
}

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<Meters>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl ConnectivityIndex for SegmentConnectivity {
    fn mode(&self) -> ConnectivityMode {
        ConnectivityMode::Segment
    }

    fn connected_pairs(
        &self,
        candidates: &[Candidate<'_>],
        projection: &LocalProjection,
    ) -> Vec<Edge> {
        if candidates.len() < 2 {
            return Vec::new();
        }

        let lines: Vec<ProjectedLine> = candidates
            .iter()
            .map(|c| ProjectedLine::new(c, projection))
            .collect();

        let endpoint_tree: RTree<EndpointEntry> = RTree::bulk_load(
            lines
                .iter()
                .enumerate()
                .flat_map(|(slot, line)| {
                    line.endpoints
                        .iter()
                        .map(move |p| GeomWithData::new(*p, slot))
                })
                .collect(),
        );
        let envelope_tree: RTree<IndexedEnvelope> = RTree::bulk_load(
            lines
                .iter()
                .enumerate()
                .map(|(slot, line)| IndexedEnvelope {
                    slot,
                    envelope: line.envelope,
                })
                .collect(),
        );

        let search_radius = self.tolerance_m * (1.0 + SEARCH_SLACK) + SEARCH_MARGIN_M;
        let search_radius_sq = search_radius * search_radius;
        let tolerance = self.tolerance_m;

        let edges: Vec<Edge> = (0..lines.len())
            .into_par_iter()
            .flat_map_iter(|slot| {
                let line = &lines[slot];
                let mut neighbours = BTreeSet::new();

                for endpoint in &line.endpoints {
                    for hit in endpoint_tree.locate_within_distance(*endpoint, search_radius_sq) {
                        if hit.data > slot && planar_distance(endpoint, hit.geom()) <= tolerance {
                            neighbours.insert(hit.data);
                        }
                    }
                }

                for hit in envelope_tree.locate_in_envelope_intersecting(&line.envelope) {
                    if hit.slot > slot
                        && !neighbours.contains(&hit.slot)
                        && line.intersects(&lines[hit.slot])
                    {
                        neighbours.insert(hit.slot);
                    }
                }

                neighbours
                    .into_iter()
                    .map(move |other| Edge::new(candidates[slot].index, candidates[other].index))
            })
            .collect();

        log::debug!(
            "Segment index: {} candidates, {} connected pairs (tolerance {} m)",
            candidates.len(),
            edges.len(),
            tolerance
        );
        finalize(edges)
    }
}
