//! Scoring configuration for multi-exposure prioritization
//!
//! This module contains the scoring-related configuration types:
//! - Exposure weights for the full formula (heat, green deficit, AQI)
//! - Fallback weights used when no AQI reading is available
//! - Normalization ranges for raw NDVI, land-surface temperature and AQI

use serde::{Deserialize, Serialize};

/// Exposure weights configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureWeights {
    /// Weight for normalized heat (0.0-1.0)
    #[serde(default = "default_heat_weight")]
    pub heat: f64,

    /// Weight for green deficit, `1 - ndvi_norm` (0.0-1.0)
    #[serde(default = "default_green_deficit_weight")]
    pub green_deficit: f64,

    /// Weight for normalized AQI (0.0-1.0)
    #[serde(default = "default_aqi_weight")]
    pub aqi: f64,

    /// Heat weight when AQI is absent
    #[serde(default = "default_fallback_heat_weight")]
    pub fallback_heat: f64,

    /// Green deficit weight when AQI is absent
    #[serde(default = "default_fallback_green_deficit_weight")]
    pub fallback_green_deficit: f64,
}

impl Default for ExposureWeights {
    fn default() -> Self {
        Self {
            heat: default_heat_weight(),
            green_deficit: default_green_deficit_weight(),
            aqi: default_aqi_weight(),
            fallback_heat: default_fallback_heat_weight(),
            fallback_green_deficit: default_fallback_green_deficit_weight(),
        }
    }
}

impl ExposureWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    // Pure function: Validate a weight group sums to 1.0
    pub fn validate_group_sum(group: &str, weights: &[f64]) -> Result<(), String> {
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 0.001 {
            Err(format!(
                "{} weights must sum to 1.0, but sum to {:.3}",
                group, sum
            ))
        } else {
            Ok(())
        }
    }

    // Pure function: Collect all weight validations
    pub fn collect_weight_validations(&self) -> Vec<Result<(), String>> {
        vec![
            Self::validate_weight(self.heat, "Heat"),
            Self::validate_weight(self.green_deficit, "Green deficit"),
            Self::validate_weight(self.aqi, "AQI"),
            Self::validate_weight(self.fallback_heat, "Fallback heat"),
            Self::validate_weight(self.fallback_green_deficit, "Fallback green deficit"),
        ]
    }

    /// Validate that both weight groups sum to 1.0 (with small tolerance for floating point)
    pub fn validate(&self) -> Result<(), String> {
        for validation in self.collect_weight_validations() {
            validation?;
        }

        Self::validate_group_sum("Exposure", &[self.heat, self.green_deficit, self.aqi])?;
        Self::validate_group_sum(
            "Fallback",
            &[self.fallback_heat, self.fallback_green_deficit],
        )?;

        Ok(())
    }

    /// Normalize weights to ensure each group sums to exactly 1.0
    pub fn normalize(&mut self) {
        let sum = self.heat + self.green_deficit + self.aqi;
        if sum > 0.0 && (sum - 1.0).abs() > 0.001 {
            self.heat /= sum;
            self.green_deficit /= sum;
            self.aqi /= sum;
        }

        let fallback_sum = self.fallback_heat + self.fallback_green_deficit;
        if fallback_sum > 0.0 && (fallback_sum - 1.0).abs() > 0.001 {
            self.fallback_heat /= fallback_sum;
            self.fallback_green_deficit /= fallback_sum;
        }
    }
}

// Heat remains the dominant term; AQI acts as an additive modifier
pub fn default_heat_weight() -> f64 {
    0.45
}
pub fn default_green_deficit_weight() -> f64 {
    0.35
}
pub fn default_aqi_weight() -> f64 {
    0.20
}
pub fn default_fallback_heat_weight() -> f64 {
    0.60
}
pub fn default_fallback_green_deficit_weight() -> f64 {
    0.40
}

/// Ranges used to map raw readings onto [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default = "default_ndvi_min")]
    pub ndvi_min: f64,
    #[serde(default = "default_ndvi_max")]
    pub ndvi_max: f64,

    /// Land-surface temperature range in degrees Celsius
    #[serde(default = "default_lst_min")]
    pub lst_min: f64,
    #[serde(default = "default_lst_max")]
    pub lst_max: f64,

    /// Raw AQI at or below this maps to 0
    #[serde(default = "default_aqi_floor")]
    pub aqi_floor: f64,
    /// Raw AQI at or above this maps to 1
    #[serde(default = "default_aqi_ceiling")]
    pub aqi_ceiling: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            ndvi_min: default_ndvi_min(),
            ndvi_max: default_ndvi_max(),
            lst_min: default_lst_min(),
            lst_max: default_lst_max(),
            aqi_floor: default_aqi_floor(),
            aqi_ceiling: default_aqi_ceiling(),
        }
    }
}

impl NormalizationConfig {
    pub fn validate(&self) -> Result<(), String> {
        let ranges = [
            ("NDVI", self.ndvi_min, self.ndvi_max),
            ("LST", self.lst_min, self.lst_max),
            ("AQI", self.aqi_floor, self.aqi_ceiling),
        ];
        for (name, min, max) in ranges {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(format!(
                    "{} range must be finite with min < max, got [{}, {}]",
                    name, min, max
                ));
            }
        }
        Ok(())
    }
}

fn default_ndvi_min() -> f64 {
    -0.2
}
fn default_ndvi_max() -> f64 {
    0.8
}
fn default_lst_min() -> f64 {
    24.0
}
fn default_lst_max() -> f64 {
    29.0
}
fn default_aqi_floor() -> f64 {
    50.0
}
fn default_aqi_ceiling() -> f64 {
    300.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_validate() {
        assert!(ExposureWeights::default().validate().is_ok());
        assert!(NormalizationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let weights = ExposureWeights {
            heat: 1.2,
            ..Default::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(err.contains("Heat"), "{}", err);
    }

    #[test]
    fn test_group_sum_rejected() {
        let weights = ExposureWeights {
            heat: 0.5,
            green_deficit: 0.5,
            aqi: 0.5,
            ..Default::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(err.contains("Exposure weights must sum to 1.0"), "{}", err);
    }

    #[test]
    fn test_normalize_rescales_each_group() {
        let mut weights = ExposureWeights {
            heat: 0.5,
            green_deficit: 0.25,
            aqi: 0.25,
            fallback_heat: 0.3,
            fallback_green_deficit: 0.3,
        };
        weights.normalize();
        assert!((weights.heat - 0.5).abs() < 1e-12);
        assert!((weights.fallback_heat - 0.5).abs() < 1e-12);
        assert!((weights.fallback_green_deficit - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_leaves_valid_defaults_untouched() {
        let mut weights = ExposureWeights::default();
        weights.normalize();
        assert_eq!(weights, ExposureWeights::default());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = NormalizationConfig {
            lst_min: 30.0,
            lst_max: 24.0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().starts_with("LST range"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let weights: ExposureWeights = toml::from_str("heat = 0.5\naqi = 0.15").unwrap();
        assert_eq!(weights.heat, 0.5);
        assert_eq!(weights.green_deficit, 0.35);
        assert_eq!(weights.fallback_heat, 0.60);
    }
}
