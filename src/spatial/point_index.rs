//! Point connectivity over a k-d tree.
//!
//! The tree answers range queries in projected meters; every candidate pair
//! is then confirmed with the great-circle distance before it becomes an
//! edge, so projection error can only cost a wider search, never a wrong
//! edge.

use super::{finalize, Candidate, ConnectivityIndex, ConnectivityMode, LocalProjection, Meters};
use super::{SEARCH_MARGIN_M, SEARCH_SLACK};
use crate::core::{Edge, Geometry, LonLat};
use crate::spatial::haversine_m;
use kiddo::{KdTree, SquaredEuclidean};
use rayon::prelude::*;
use std::collections::HashMap;

/// Fixed rotation of the index frame, in radians.
///
/// Sampled points often sit on an axis-aligned grid. The k-d tree cannot
/// split a bucket whose entries all share one axis value, so positions are
/// rotated off the grid before insertion. Rotation preserves distances.
const INDEX_ROTATION: f64 = 0.577_215_664_901_532_9;

/// Connects points whose great-circle distance is at most `d_max_m`.
///
/// The k-d search radius is widened by the projection's stretch over the
/// input's latitude span, so inputs far from the projection origin lose no
/// pairs; only the search grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointConnectivity {
    d_max_m: f64,
}

impl PointConnectivity {
    pub fn new(d_max_m: f64) -> Self {
        Self { d_max_m }
    }

    pub fn d_max_m(&self) -> f64 {
        self.d_max_m
    }
}

fn point_of(candidate: &Candidate<'_>) -> Option<LonLat> {
    match candidate.geometry {
        Geometry::Point(c) => Some(*c),
        _ => None,
    }
}

/// Position of `coord` in the rotated frame used by every k-d tree.
pub(crate) fn index_position(projection: &LocalProjection, coord: &LonLat) -> Meters {
    let p = projection.project(coord);
    let (sin, cos) = INDEX_ROTATION.sin_cos();
    [p[0] * cos - p[1] * sin, p[0] * sin + p[1] * cos]
}

/// Entries sharing one exact position.
///
/// A k-d tree bucket cannot hold more entries on one axis value than its
/// capacity, so every tree in the crate stores sites rather than raw points.
pub(crate) struct Site {
    pub(crate) position: Meters,
    pub(crate) coord: LonLat,
    /// In the order the entries were given
    pub(crate) slots: Vec<usize>,
}

pub(crate) fn group_sites(coords: &[(usize, LonLat)], projection: &LocalProjection) -> Vec<Site> {
    let mut sites: Vec<Site> = Vec::new();
    let mut by_position: HashMap<[u64; 2], usize> = HashMap::new();

    for &(slot, coord) in coords {
        let position = index_position(projection, &coord);
        let key = [position[0].to_bits(), position[1].to_bits()];
        match by_position.get(&key) {
            Some(&site) => sites[site].slots.push(slot),
            None => {
                by_position.insert(key, sites.len());
                sites.push(Site {
                    position,
                    coord,
                    slots: vec![slot],
                });
            }
        }
    }
    sites
}

impl ConnectivityIndex for PointConnectivity {
    fn mode(&self) -> ConnectivityMode {
        ConnectivityMode::Point
    }

    fn connected_pairs(
        &self,
        candidates: &[Candidate<'_>],
        projection: &LocalProjection,
    ) -> Vec<Edge> {
        if candidates.len() < 2 {
            return Vec::new();
        }

        let coords: Vec<(usize, LonLat)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(slot, c)| point_of(c).map(|coord| (slot, coord)))
            .collect();
        let sites = group_sites(&coords, projection);

        let mut tree: KdTree<f64, 2> = KdTree::with_capacity(sites.len());
        for (i, site) in sites.iter().enumerate() {
            tree.add(&site.position, i as u64);
        }

        let stretch = projection.max_stretch(sites.iter().map(|site| &site.coord));
        let search_radius = self.d_max_m * stretch * (1.0 + SEARCH_SLACK) + SEARCH_MARGIN_M;
        let d_max = self.d_max_m;

        let edges: Vec<Edge> = (0..sites.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let site = &sites[i];
                let mut found = Vec::new();

                // Coincident candidates are always connected to each other.
                for (k, &a) in site.slots.iter().enumerate() {
                    for &b in &site.slots[k + 1..] {
                        found.push(Edge::new(candidates[a].index, candidates[b].index));
                    }
                }

                let hits = tree.within::<SquaredEuclidean>(&site.position, search_radius * search_radius);
                for hit in hits {
                    let j = hit.item as usize;
                    if j <= i || haversine_m(&site.coord, &sites[j].coord) > d_max {
                        continue;
                    }
                    for &a in &site.slots {
                        for &b in &sites[j].slots {
                            found.push(Edge::new(candidates[a].index, candidates[b].index));
                        }
                    }
                }
                found
            })
            .collect();

        log::debug!(
            "Point index: {} candidates at {} sites, {} connected pairs (d_max {} m, stretch {:.3})",
            candidates.len(),
            sites.len(),
            edges.len(),
            d_max,
            stretch
        );
        finalize(edges)
    }
}
