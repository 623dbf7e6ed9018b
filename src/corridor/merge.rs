//! Geometry merging for corridors.
//!
//! Segment members are chained end to end wherever an endpoint of one part
//! meets an endpoint of another within the snap distance. Parts that only
//! connect through a wider tolerance gap or a crossing stay separate, so the
//! merged geometry never invents a link no member contains.

use crate::core::{Geometry, LonLat};
use crate::spatial::point_index::group_sites;
use crate::spatial::projection::planar_distance;
use crate::spatial::{LocalProjection, Meters};
use kiddo::{KdTree, SquaredEuclidean};
use rstar::primitives::GeomWithData;
use rstar::RTree;
use std::collections::VecDeque;

/// Endpoints closer than this, in meters, are treated as one node.
pub const MERGE_SNAP_M: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum End {
    Start,
    Finish,
}

impl End {
    fn opposite(self) -> End {
        match self {
            End::Start => End::Finish,
            End::Finish => End::Start,
        }
    }
}

type EndpointEntry = GeomWithData<Meters, (usize, End)>;

struct PartEnds {
    start: Meters,
    finish: Meters,
}

impl PartEnds {
    fn at(&self, end: End) -> Meters {
        match end {
            End::Start => self.start,
            End::Finish => self.finish,
        }
    }
}

/// Chain line parts into as few continuous parts as their endpoints allow.
///
/// Parts are consumed in the order given; each chain grows from the lowest
/// unused part, first at its tail and then at its head, always taking the
/// lowest-numbered free part that meets the current end.
pub fn merge_lines(parts: Vec<Vec<LonLat>>, projection: &LocalProjection) -> Vec<Vec<LonLat>> {
    let parts: Vec<Vec<LonLat>> = parts.into_iter().filter(|p| p.len() >= 2).collect();
    let ends: Vec<PartEnds> = parts
        .iter()
        .map(|p| PartEnds {
            start: projection.project(&p[0]),
            finish: projection.project(&p[p.len() - 1]),
        })
        .collect();

    let tree: RTree<EndpointEntry> = RTree::bulk_load(
        ends.iter()
            .enumerate()
            .flat_map(|(i, e)| {
                [
                    GeomWithData::new(e.start, (i, End::Start)),
                    GeomWithData::new(e.finish, (i, End::Finish)),
                ]
            })
            .collect(),
    );

    let mut used = vec![false; parts.len()];
    let mut merged = Vec::new();

    for seed in 0..parts.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let mut chain: VecDeque<LonLat> = parts[seed].iter().copied().collect();

        let mut tail = ends[seed].finish;
        while let Some((next, end)) = free_part_at(&tree, &used, tail) {
            used[next] = true;
            let part = &parts[next];
            match end {
                End::Start => chain.extend(part[1..].iter().copied()),
                End::Finish => chain.extend(part[..part.len() - 1].iter().rev().copied()),
            }
            tail = ends[next].at(end.opposite());
        }

        let mut head = ends[seed].start;
        while let Some((next, end)) = free_part_at(&tree, &used, head) {
            used[next] = true;
            let part = &parts[next];
            let prefix: Vec<LonLat> = match end {
                End::Finish => part[..part.len() - 1].to_vec(),
                End::Start => part[1..].iter().rev().copied().collect(),
            };
            for coord in prefix.into_iter().rev() {
                chain.push_front(coord);
            }
            head = ends[next].at(end.opposite());
        }

        merged.push(chain.into_iter().collect());
    }
    merged
}

fn free_part_at(tree: &RTree<EndpointEntry>, used: &[bool], at: Meters) -> Option<(usize, End)> {
    tree.locate_within_distance(at, MERGE_SNAP_M * MERGE_SNAP_M)
        .map(|hit| hit.data)
        .filter(|&(part, _)| !used[part])
        .min()
}

/// Order points into a renderable path by nearest-neighbour chaining.
///
/// The walk starts at the westernmost point (ties broken by latitude, then
/// by position in the input) and repeatedly steps to the closest point not
/// yet visited. Coincident points are visited together, in input order.
/// Returns positions into `points`.
pub fn nearest_neighbour_order(points: &[LonLat], projection: &LocalProjection) -> Vec<usize> {
    let Some(start) = (0..points.len()).min_by(|&a, &b| {
        points[a][0]
            .total_cmp(&points[b][0])
            .then(points[a][1].total_cmp(&points[b][1]))
            .then(a.cmp(&b))
    }) else {
        return Vec::new();
    };

    let located: Vec<(usize, LonLat)> = points.iter().copied().enumerate().collect();
    let sites = group_sites(&located, projection);
    let Some(mut current) = sites.iter().position(|site| site.slots.contains(&start)) else {
        return Vec::new();
    };

    let mut tree: KdTree<f64, 2> = KdTree::with_capacity(sites.len());
    for (i, site) in sites.iter().enumerate() {
        tree.add(&site.position, i as u64);
    }

    let mut order = Vec::with_capacity(points.len());
    loop {
        tree.remove(&sites[current].position, current as u64);
        order.extend_from_slice(&sites[current].slots);
        if order.len() >= points.len() {
            break;
        }
        let nearest = tree.nearest_one::<SquaredEuclidean>(&sites[current].position);
        current = nearest.item as usize;
    }
    order
}

/// Planar length of a path through `points` in the given order.
pub fn path_length(points: &[LonLat], order: &[usize], projection: &LocalProjection) -> f64 {
    order
        .windows(2)
        .map(|pair| {
            planar_distance(
                &projection.project(&points[pair[0]]),
                &projection.project(&points[pair[1]]),
            )
        })
        .sum()
}

/// Renderable geometry for an ordered point path.
pub fn point_path_geometry(points: &[LonLat], order: &[usize]) -> Option<Geometry> {
    match order {
        [] => None,
        [only] => Some(Geometry::Point(points[*only])),
        _ => Some(Geometry::LineString(
            order.iter().map(|&i| points[i]).collect(),
        )),
    }
}
