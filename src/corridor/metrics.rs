use crate::core::Element;
use serde::{Deserialize, Serialize};

/// Mean of each exposure attribute across a corridor's members.
///
/// A mean covers only the members that carry the attribute; when none do it
/// is absent rather than zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorridorMetrics {
    pub mean_priority: Option<f64>,
    pub mean_heat: Option<f64>,
    pub mean_ndvi: Option<f64>,
    pub mean_green_deficit: Option<f64>,
    pub mean_aqi: Option<f64>,
}

impl CorridorMetrics {
    /// Members are summed in the order given.
    pub fn from_members(members: &[&Element]) -> Self {
        Self {
            mean_priority: mean(members.iter().map(|e| e.attributes.priority())),
            mean_heat: mean(members.iter().map(|e| e.attributes.heat())),
            mean_ndvi: mean(members.iter().map(|e| e.attributes.ndvi())),
            mean_green_deficit: mean(members.iter().map(|e| e.attributes.green_deficit())),
            mean_aqi: mean(members.iter().map(|e| e.attributes.aqi())),
        }
    }
}

// Pure function: mean of the present values
pub fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExposureAttributes, Geometry};

    #[test]
    fn test_mean_skips_absent_values() {
        assert_eq!(mean([Some(0.2), None, Some(0.4)]), Some(0.30000000000000004));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn test_absent_attribute_stays_absent() {
        let a = Element::new("a", Geometry::Point([77.2, 28.6])).with_attributes(
            ExposureAttributes {
                priority_score: Some(0.8),
                heat_norm: Some(0.6),
                ..Default::default()
            },
        );
        let b = Element::new("b", Geometry::Point([77.2, 28.6])).with_priority(0.6);

        let metrics = CorridorMetrics::from_members(&[&a, &b]);
        assert_eq!(metrics.mean_priority, Some(0.7));
        assert_eq!(metrics.mean_heat, Some(0.6));
        assert_eq!(metrics.mean_aqi, None);
        assert_eq!(metrics.mean_green_deficit, None);
    }
}
