//! Capped-linear normalization of raw environmental readings.
//!
//! Raster sampling and station lookups happen outside this crate; these
//! helpers only map the scalar readings they produce onto [0, 1].

use crate::config::NormalizationConfig;

/// Map `value` linearly from `[min, max]` onto `[0, 1]`, clamping outside.
///
/// Non-finite readings and degenerate ranges yield `None` rather than a
/// sentinel so callers can propagate absence.
pub fn normalize_range(value: f64, min: f64, max: f64) -> Option<f64> {
    if !value.is_finite() || !(max > min) {
        return None;
    }
    Some(((value - min) / (max - min)).clamp(0.0, 1.0))
}

/// `1 - ndvi_norm`: higher means less vegetation.
pub fn green_deficit(ndvi_norm: f64) -> f64 {
    1.0 - ndvi_norm
}

/// Capped-linear AQI map: ≤ 50 → 0, ≥ 300 → 1, linear between.
pub fn normalize_aqi(raw: f64) -> Option<f64> {
    let config = NormalizationConfig::default();
    normalize_range(raw, config.aqi_floor, config.aqi_ceiling)
}

/// Normalizer bound to a configured set of ranges.
#[derive(Debug, Clone, Default)]
pub struct ReadingNormalizer {
    config: NormalizationConfig,
}

impl ReadingNormalizer {
    pub fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    pub fn ndvi(&self, raw: f64) -> Option<f64> {
        normalize_range(raw, self.config.ndvi_min, self.config.ndvi_max)
    }

    pub fn heat(&self, lst_celsius: f64) -> Option<f64> {
        normalize_range(lst_celsius, self.config.lst_min, self.config.lst_max)
    }

    pub fn aqi(&self, raw: f64) -> Option<f64> {
        normalize_range(raw, self.config.aqi_floor, self.config.aqi_ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_aqi_reference_points() {
        assert_eq!(normalize_aqi(30.0), Some(0.0));
        assert_eq!(normalize_aqi(50.0), Some(0.0));
        assert_eq!(normalize_aqi(175.0), Some(0.5));
        assert_eq!(normalize_aqi(300.0), Some(1.0));
        assert_eq!(normalize_aqi(400.0), Some(1.0));
    }

    #[test]
    fn test_non_finite_reading_is_absent() {
        assert_eq!(normalize_aqi(f64::NAN), None);
        assert_eq!(normalize_range(f64::INFINITY, 0.0, 1.0), None);
    }

    #[test]
    fn test_degenerate_range_is_absent() {
        assert_eq!(normalize_range(1.0, 2.0, 2.0), None);
    }

    #[test]
    fn test_configured_ranges() {
        let normalizer = ReadingNormalizer::default();
        assert_eq!(normalizer.heat(26.5), Some(0.5));
        assert_eq!(normalizer.heat(35.0), Some(1.0));
        assert!((normalizer.ndvi(0.3).unwrap() - 0.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn normalized_always_in_unit_interval(value in -1000.0..1000.0f64) {
            let n = normalize_aqi(value).unwrap();
            prop_assert!((0.0..=1.0).contains(&n));
        }

        #[test]
        fn normalization_is_monotonic(a in 0.0..500.0f64, b in 0.0..500.0f64) {
            let (na, nb) = (normalize_aqi(a).unwrap(), normalize_aqi(b).unwrap());
            if a <= b {
                prop_assert!(na <= nb);
            }
        }
    }
}
