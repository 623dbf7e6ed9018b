pub mod errors;
pub mod geometry;
pub mod types;

pub use errors::{Error, Result, ResultExt};
pub use geometry::{BoundingBox, Geometry, GeometryKind, LonLat, Malformed};
pub use types::{Element, ElementId, ExposureAttributes};

/// Index of an element within the collection handed to one aggregation run.
pub type ElementIndex = usize;

/// Unordered pair of element indices, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub ElementIndex, pub ElementIndex);

impl Edge {
    pub fn new(a: ElementIndex, b: ElementIndex) -> Self {
        if a <= b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }
}
