use super::identity::corridor_id;
use super::merge::{merge_lines, nearest_neighbour_order, path_length, point_path_geometry};
use super::metrics::CorridorMetrics;
use super::Corridor;
use crate::core::{BoundingBox, Element, ElementId, ElementIndex, Geometry, LonLat};
use crate::spatial::{ConnectivityMode, LocalProjection};
use chrono::{DateTime, Utc};
use rayon::prelude::*;

/// Smallest component that still becomes a corridor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeFloor {
    MinLength(f64),
    MinMembers(usize),
}

impl SizeFloor {
    pub fn admits(&self, length_m: f64, member_count: usize) -> bool {
        match *self {
            SizeFloor::MinLength(min) => length_m >= min,
            SizeFloor::MinMembers(min) => member_count >= min,
        }
    }
}

/// Merged shape of a component before the floor is applied.
struct Shape {
    geometry: Geometry,
    length_m: f64,
    member_ids: Vec<ElementId>,
}

/// Turns components into corridors for one aggregation run.
pub struct CorridorBuilder<'a> {
    elements: &'a [Element],
    projection: LocalProjection,
    mode: ConnectivityMode,
    floor: SizeFloor,
    created_at: DateTime<Utc>,
}

impl<'a> CorridorBuilder<'a> {
    pub fn new(
        elements: &'a [Element],
        projection: LocalProjection,
        mode: ConnectivityMode,
        floor: SizeFloor,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            elements,
            projection,
            mode,
            floor,
            created_at,
        }
    }

    /// Corridor for one component, or `None` if it falls below the floor.
    ///
    /// Members are visited in id order, so merged geometry and means do not
    /// depend on where the elements sat in the input.
    pub fn build(&self, component: &[ElementIndex]) -> Option<Corridor> {
        let mut members: Vec<&Element> = component.iter().map(|&i| &self.elements[i]).collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));

        let shape = match self.mode {
            ConnectivityMode::Segment => self.segment_shape(&members),
            ConnectivityMode::Point => self.point_shape(&members),
        }?;

        if !self.floor.admits(shape.length_m, members.len()) {
            log::debug!(
                "Dropping component of {} members ({:.1} m) below {:?}",
                members.len(),
                shape.length_m,
                self.floor
            );
            return None;
        }

        let bbox = BoundingBox::from_coords(members.iter().flat_map(|e| e.geometry.coords()))?;
        let mut member_indices = component.to_vec();
        member_indices.sort_unstable();

        Some(Corridor {
            corridor_id: corridor_id(members.iter().map(|e| &e.id)),
            mode: self.mode,
            member_count: members.len(),
            member_ids: shape.member_ids,
            member_indices,
            geometry: shape.geometry,
            length_m: shape.length_m,
            metrics: CorridorMetrics::from_members(&members),
            bbox,
            classification: None,
            interventions: None,
            created_at: self.created_at,
        })
    }

    /// Build every component in parallel; output keeps component order.
    pub fn build_all(&self, components: &[Vec<ElementIndex>]) -> Vec<Corridor> {
        components
            .par_iter()
            .filter_map(|component| self.build(component))
            .collect()
    }

    fn segment_shape(&self, members: &[&Element]) -> Option<Shape> {
        let parts: Vec<Vec<LonLat>> = members
            .iter()
            .flat_map(|e| e.geometry.line_parts())
            .map(<[LonLat]>::to_vec)
            .collect();
        let length_m = parts.iter().map(|p| self.projection.length_m(p)).sum();
        let geometry = Geometry::from_parts(merge_lines(parts, &self.projection))?;

        Some(Shape {
            geometry,
            length_m,
            member_ids: members.iter().map(|e| e.id.clone()).collect(),
        })
    }

    fn point_shape(&self, members: &[&Element]) -> Option<Shape> {
        let located: Vec<(&Element, LonLat)> = members
            .iter()
            .filter_map(|e| match e.geometry {
                Geometry::Point(c) => Some((*e, c)),
                _ => None,
            })
            .collect();
        let points: Vec<LonLat> = located.iter().map(|(_, c)| *c).collect();

        let order = nearest_neighbour_order(&points, &self.projection);
        let geometry = point_path_geometry(&points, &order)?;

        Some(Shape {
            geometry,
            length_m: path_length(&points, &order, &self.projection),
            member_ids: order.iter().map(|&i| located[i].0.id.clone()).collect(),
        })
    }
}
