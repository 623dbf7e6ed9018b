use super::geometry::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier supplied by whoever produced the element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalized exposure attributes of an element.
///
/// Every value is optional; absence is `None`, never zero. Non-finite values
/// read through the accessors are treated as absent as well.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExposureAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_norm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndvi_norm: Option<f64>,
    /// Explicit green deficit; when absent it is derived from `ndvi_norm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green_deficit_norm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi_norm: Option<f64>,
}

impl ExposureAttributes {
    pub fn priority(&self) -> Option<f64> {
        finite(self.priority_score)
    }

    pub fn heat(&self) -> Option<f64> {
        finite(self.heat_norm)
    }

    pub fn ndvi(&self) -> Option<f64> {
        finite(self.ndvi_norm)
    }

    pub fn aqi(&self) -> Option<f64> {
        finite(self.aqi_norm)
    }

    pub fn green_deficit(&self) -> Option<f64> {
        finite(self.green_deficit_norm)
            .or_else(|| self.ndvi().map(crate::scoring::green_deficit))
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// A road segment or sampled point handed to the engine.
///
/// Elements are read-only inputs: the engine references them by index and
/// never mutates, merges or drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub geometry: Geometry,
    #[serde(flatten)]
    pub attributes: ExposureAttributes,
}

impl Element {
    pub fn new(id: impl Into<ElementId>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            attributes: ExposureAttributes::default(),
        }
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.attributes.priority_score = Some(priority);
        self
    }

    pub fn with_attributes(mut self, attributes: ExposureAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn priority(&self) -> Option<f64> {
        self.attributes.priority()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_green_deficit_prefers_explicit_value() {
        let attrs = ExposureAttributes {
            ndvi_norm: Some(0.25),
            green_deficit_norm: Some(0.9),
            ..Default::default()
        };
        assert_eq!(attrs.green_deficit(), Some(0.9));
    }

    #[test]
    fn test_green_deficit_derived_from_ndvi() {
        let attrs = ExposureAttributes {
            ndvi_norm: Some(0.25),
            ..Default::default()
        };
        assert_eq!(attrs.green_deficit(), Some(0.75));
    }

    #[test]
    fn test_nan_reads_as_absent() {
        let attrs = ExposureAttributes {
            priority_score: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(attrs.priority(), None);
    }

    #[test]
    fn test_element_json_uses_flat_attributes() {
        let json = r#"{
            "id": "seg-1",
            "geometry": {"type": "Point", "coordinates": [77.2, 28.6]},
            "priority_score": 0.8,
            "aqi_norm": null
        }"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.id.as_str(), "seg-1");
        assert_eq!(element.priority(), Some(0.8));
        assert_eq!(element.attributes.aqi(), None);
    }
}
