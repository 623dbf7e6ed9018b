//! Geographic geometry carried by elements and corridors.
//!
//! Coordinates are WGS84 `[lon, lat]` pairs. The serialized form mirrors the
//! `type`/`coordinates` layout of GeoJSON geometries so callers can embed a
//! corridor's geometry in a feature without conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 coordinate as `[lon, lat]`.
pub type LonLat = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(LonLat),
    LineString(Vec<LonLat>),
    MultiLineString(Vec<Vec<LonLat>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Line,
}

/// Why a geometry cannot be indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    Empty,
    TooFewCoordinates,
    NonFinite,
    OutOfRange,
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "geometry has no coordinates"),
            Self::TooFewCoordinates => write!(f, "line part has fewer than two coordinates"),
            Self::NonFinite => write!(f, "coordinate is not finite"),
            Self::OutOfRange => write!(f, "coordinate is outside WGS84 bounds"),
        }
    }
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => GeometryKind::Line,
        }
    }

    /// Check that every coordinate is usable and every line part has a length.
    pub fn validate(&self) -> Result<(), Malformed> {
        match self {
            Geometry::Point(c) => validate_coord(c),
            Geometry::LineString(coords) => validate_part(coords),
            Geometry::MultiLineString(parts) => {
                if parts.is_empty() {
                    return Err(Malformed::Empty);
                }
                parts.iter().try_for_each(|p| validate_part(p))
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Line parts of the geometry; a point has none.
    pub fn line_parts(&self) -> Vec<&[LonLat]> {
        match self {
            Geometry::Point(_) => Vec::new(),
            Geometry::LineString(coords) => vec![coords.as_slice()],
            Geometry::MultiLineString(parts) => parts.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Start and end coordinate of every line part, or the point itself.
    pub fn endpoints(&self) -> Vec<LonLat> {
        match self {
            Geometry::Point(c) => vec![*c],
            _ => self
                .line_parts()
                .into_iter()
                .filter_map(|part| Some([*part.first()?, *part.last()?]))
                .flatten()
                .collect(),
        }
    }

    pub fn coords(&self) -> Box<dyn Iterator<Item = &LonLat> + '_> {
        match self {
            Geometry::Point(c) => Box::new(std::iter::once(c)),
            Geometry::LineString(coords) => Box::new(coords.iter()),
            Geometry::MultiLineString(parts) => Box::new(parts.iter().flatten()),
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_coords(self.coords())
    }

    /// Build a line geometry from parts, collapsing a single part to a `LineString`.
    pub fn from_parts(mut parts: Vec<Vec<LonLat>>) -> Option<Self> {
        match parts.len() {
            0 => None,
            1 => parts.pop().map(Geometry::LineString),
            _ => Some(Geometry::MultiLineString(parts)),
        }
    }
}

fn validate_coord(c: &LonLat) -> Result<(), Malformed> {
    let [lon, lat] = *c;
    if !lon.is_finite() || !lat.is_finite() {
        return Err(Malformed::NonFinite);
    }
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(Malformed::OutOfRange);
    }
    Ok(())
}

fn validate_part(coords: &[LonLat]) -> Result<(), Malformed> {
    match coords.len() {
        0 => Err(Malformed::Empty),
        1 => Err(Malformed::TooFewCoordinates),
        _ => coords.iter().try_for_each(validate_coord),
    }
}

/// Axis-aligned bounds in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a LonLat>) -> Option<Self> {
        coords.into_iter().fold(None, |acc, &[lon, lat]| {
            Some(match acc {
                None => BoundingBox {
                    min_lon: lon,
                    min_lat: lat,
                    max_lon: lon,
                    max_lat: lat,
                },
                Some(b) => b.expand_to(lon, lat),
            })
        })
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        self.expand_to(other.min_lon, other.min_lat)
            .expand_to(other.max_lon, other.max_lat)
    }

    fn expand_to(&self, lon: f64, lat: f64) -> BoundingBox {
        BoundingBox {
            min_lon: self.min_lon.min(lon),
            min_lat: self.min_lat.min(lat),
            max_lon: self.max_lon.max(lon),
            max_lat: self.max_lat.max(lat),
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}
