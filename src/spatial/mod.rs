//! Spatial connectivity between elements.
//!
//! Both operating modes reduce to the same contract: given the indexable
//! elements of a run and a shared local projection, return every unordered
//! pair that is directly connected. Pairs come back sorted and deduplicated
//! so the result never depends on query order or thread scheduling.

pub mod point_index;
pub mod projection;
pub mod segment_index;

pub use point_index::PointConnectivity;
pub use projection::{haversine_m, LocalProjection, Meters, METERS_PER_DEGREE};
pub use segment_index::SegmentConnectivity;

use crate::core::{Edge, Element, ElementIndex, Geometry, GeometryKind, Malformed};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate radii are widened by this fraction before exact verification.
pub(crate) const SEARCH_SLACK: f64 = 0.01;
/// Absolute widening of candidate radii, in meters.
pub(crate) const SEARCH_MARGIN_M: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityMode {
    /// Line segments joined by touching geometry or nearby endpoints
    Segment,
    /// Points joined by distance
    Point,
}

impl ConnectivityMode {
    pub fn expected_geometry(&self) -> GeometryKind {
        match self {
            ConnectivityMode::Segment => GeometryKind::Line,
            ConnectivityMode::Point => GeometryKind::Point,
        }
    }
}

impl fmt::Display for ConnectivityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Segment => write!(f, "segment"),
            Self::Point => write!(f, "point"),
        }
    }
}

/// An element admitted to the index, addressed by its run-wide index.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub index: ElementIndex,
    pub geometry: &'a Geometry,
}

/// Why an element was kept out of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Malformed(Malformed),
    WrongKind {
        expected: GeometryKind,
        found: GeometryKind,
    },
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Malformed(reason) => write!(f, "{}", reason),
            Exclusion::WrongKind { expected, found } => {
                write!(f, "expected {:?} geometry, found {:?}", expected, found)
            }
        }
    }
}

/// Connectivity rule for one operating mode.
pub trait ConnectivityIndex: Sync {
    fn mode(&self) -> ConnectivityMode;

    /// Every directly connected pair among `candidates`, as run-wide indices.
    fn connected_pairs(&self, candidates: &[Candidate<'_>], projection: &LocalProjection)
        -> Vec<Edge>;
}

/// Split the given element indices into indexable candidates and exclusions.
///
/// A malformed element is logged and reported, never fatal to the run.
pub fn screen<'a>(
    elements: &'a [Element],
    indices: &[ElementIndex],
    mode: ConnectivityMode,
) -> (Vec<Candidate<'a>>, Vec<(ElementIndex, Exclusion)>) {
    let expected = mode.expected_geometry();
    let mut candidates = Vec::with_capacity(indices.len());
    let mut excluded = Vec::new();

    for &index in indices {
        let geometry = &elements[index].geometry;
        let verdict = match geometry.validate() {
            Err(reason) => Err(Exclusion::Malformed(reason)),
            Ok(()) if geometry.kind() != expected => Err(Exclusion::WrongKind {
                expected,
                found: geometry.kind(),
            }),
            Ok(()) => Ok(()),
        };
        match verdict {
            Ok(()) => candidates.push(Candidate { index, geometry }),
            Err(exclusion) => {
                log::warn!(
                    "Excluding element {} from {} index: {}",
                    elements[index].id,
                    mode,
                    exclusion
                );
                excluded.push((index, exclusion));
            }
        }
    }

    (candidates, excluded)
}

/// Projection anchored at the mean coordinate of the candidates.
pub fn projection_for(candidates: &[Candidate<'_>]) -> Option<LocalProjection> {
    LocalProjection::centered_on(candidates.iter().flat_map(|c| c.geometry.coords()))
}

pub(crate) fn finalize(mut edges: Vec<Edge>) -> Vec<Edge> {
    edges.sort_unstable();
    edges.dedup();
    edges
}
