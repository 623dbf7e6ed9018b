// Shared fixtures for corridormap integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use corridormap::core::{Element, ExposureAttributes, Geometry, LonLat};
use corridormap::spatial::METERS_PER_DEGREE;

/// Reference latitude and longitude for fixtures (central Delhi).
pub const LAT: f64 = 28.6;
pub const LON: f64 = 77.2;

/// Coordinate `east_m` meters east and `north_m` meters north of the origin.
pub fn at(east_m: f64, north_m: f64) -> LonLat {
    [
        LON + east_m / (METERS_PER_DEGREE * LAT.to_radians().cos()),
        LAT + north_m / METERS_PER_DEGREE,
    ]
}

/// East-west segment along the reference latitude.
pub fn segment(id: &str, from_m: f64, to_m: f64, priority: f64) -> Element {
    Element::new(
        id,
        Geometry::LineString(vec![at(from_m, 0.0), at(to_m, 0.0)]),
    )
    .with_priority(priority)
}

pub fn point(id: &str, east_m: f64, north_m: f64, priority: f64) -> Element {
    Element::new(id, Geometry::Point(at(east_m, north_m))).with_priority(priority)
}

pub fn with_exposure(element: Element, heat: f64, ndvi: f64, aqi: Option<f64>) -> Element {
    let priority = element.priority();
    element.with_attributes(ExposureAttributes {
        priority_score: priority,
        heat_norm: Some(heat),
        ndvi_norm: Some(ndvi),
        green_deficit_norm: None,
        aqi_norm: aqi,
    })
}

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}
