//! Local metric projection and great-circle distance.
//!
//! At city scale a local equirectangular projection is accurate to well under
//! a meter per kilometer, provided longitude is scaled by the cosine of the
//! reference latitude. Measuring in raw degrees would make distances depend
//! on direction and latitude.

use crate::core::LonLat;
use geo::{EuclideanDistance, EuclideanLength, HaversineDistance, LineString, Point};

/// Mean Earth radius in meters, the radius geo's haversine measures with.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Latitudes beyond this are clamped when bounding projection stretch.
const MAX_STRETCH_LAT: f64 = 89.0;

/// Meters per degree of latitude on the mean sphere.
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Planar `[x, y]` in meters relative to the projection origin.
pub type Meters = [f64; 2];

/// Equirectangular projection anchored at a reference latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    origin: LonLat,
    cos_lat: f64,
}

impl LocalProjection {
    pub fn new(origin: LonLat) -> Self {
        Self {
            origin,
            cos_lat: origin[1].to_radians().cos(),
        }
    }

    /// Anchor at the mean of the given coordinates; `None` for an empty input.
    pub fn centered_on<'a>(coords: impl IntoIterator<Item = &'a LonLat>) -> Option<Self> {
        let (sum_lon, sum_lat, n) = coords
            .into_iter()
            .fold((0.0, 0.0, 0usize), |(lon, lat, n), c| {
                (lon + c[0], lat + c[1], n + 1)
            });
        (n > 0).then(|| Self::new([sum_lon / n as f64, sum_lat / n as f64]))
    }

    pub fn origin(&self) -> LonLat {
        self.origin
    }

    pub fn project(&self, c: &LonLat) -> Meters {
        [
            (c[0] - self.origin[0]) * self.cos_lat * METERS_PER_DEGREE,
            (c[1] - self.origin[1]) * METERS_PER_DEGREE,
        ]
    }

    pub fn unproject(&self, m: &Meters) -> LonLat {
        [
            self.origin[0] + m[0] / (self.cos_lat * METERS_PER_DEGREE),
            self.origin[1] + m[1] / METERS_PER_DEGREE,
        ]
    }

    pub fn project_all(&self, coords: &[LonLat]) -> Vec<Meters> {
        coords.iter().map(|c| self.project(c)).collect()
    }

    /// Planar distance between two geographic coordinates.
    pub fn distance_m(&self, a: &LonLat, b: &LonLat) -> f64 {
        planar_distance(&self.project(a), &self.project(b))
    }

    /// Length of a poly-line measured in the projected plane.
    pub fn length_m(&self, coords: &[LonLat]) -> f64 {
        polyline_length(&self.project_all(coords))
    }

    /// Upper bound on projected over true distance among `coords`.
    ///
    /// East-west distances are scaled by the origin's cosine instead of the
    /// local one, so pairs poleward of the origin project longer than they
    /// are. Never less than 1.
    pub fn max_stretch<'a>(&self, coords: impl IntoIterator<Item = &'a LonLat>) -> f64 {
        let widest = coords
            .into_iter()
            .map(|c| c[1].abs())
            .fold(0.0, f64::max)
            .min(MAX_STRETCH_LAT);
        (self.cos_lat / widest.to_radians().cos()).max(1.0)
    }
}

pub fn planar_distance(a: &Meters, b: &Meters) -> f64 {
    Point::from(*a).euclidean_distance(&Point::from(*b))
}

pub fn polyline_length(points: &[Meters]) -> f64 {
    LineString::from(points.to_vec()).euclidean_length()
}

/// Great-circle distance in meters.
pub fn haversine_m(a: &LonLat, b: &LonLat) -> f64 {
    Point::from(*a).haversine_distance(&Point::from(*b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: LonLat = [77.209, 28.6139];

    #[test]
    fn test_project_unproject_round_trip() {
        let projection = LocalProjection::new(DELHI);
        let point = [77.25, 28.65];
        let back = projection.unproject(&projection.project(&point));
        assert!((back[0] - point[0]).abs() < 1e-9);
        assert!((back[1] - point[1]).abs() < 1e-9);
    }

    #[test]
    fn test_longitude_scaled_by_latitude() {
        let projection = LocalProjection::new(DELHI);
        let east = projection.distance_m(&DELHI, &[DELHI[0] + 0.01, DELHI[1]]);
        let north = projection.distance_m(&DELHI, &[DELHI[0], DELHI[1] + 0.01]);
        assert!(east < north);
        assert!((east / north - DELHI[1].to_radians().cos()).abs() < 1e-9);
    }

    #[test]
    fn test_planar_matches_haversine_at_city_scale() {
        let projection = LocalProjection::new(DELHI);
        let other = [77.23, 28.63];
        let planar = projection.distance_m(&DELHI, &other);
        let great_circle = haversine_m(&DELHI, &other);
        assert!((planar - great_circle).abs() < 1.0, "{} vs {}", planar, great_circle);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let d = haversine_m(&[0.0, 0.0], &[0.0, 1.0]);
        assert!((d - METERS_PER_DEGREE).abs() < 1e-6);
    }

    #[test]
    fn test_centered_on_mean() {
        let coords = [[77.0, 28.0], [78.0, 29.0]];
        let projection = LocalProjection::centered_on(coords.iter()).unwrap();
        assert_eq!(projection.origin(), [77.5, 28.5]);
        assert!(LocalProjection::centered_on(std::iter::empty::<&LonLat>()).is_none());
    }

    #[test]
    fn test_stretch_grows_poleward_of_origin() {
        let projection = LocalProjection::new([10.0, 40.0]);
        let stretch = projection.max_stretch([[10.0, 20.0], [10.0, 60.0]].iter());
        let expected = 40f64.to_radians().cos() / 60f64.to_radians().cos();
        assert!((stretch - expected).abs() < 1e-12);

        let equatorward = projection.max_stretch([[10.0, 20.0], [10.0, 35.0]].iter());
        assert_eq!(equatorward, 1.0);
    }

    #[test]
    fn test_polyline_length_sums_legs() {
        let points = [[0.0, 0.0], [3.0, 4.0], [3.0, 10.0]];
        assert_eq!(polyline_length(&points), 11.0);
    }
}
