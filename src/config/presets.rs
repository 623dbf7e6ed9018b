//! Aggregation presets.
//!
//! - **Strict**: only the most exposed elements, long corridors
//! - **Balanced**: the defaults
//! - **Lenient**: lower threshold, wider gaps, shorter corridors

use serde::{Deserialize, Serialize};

use super::aggregation::AggregationConfig;
use super::core::CorridormapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetLevel {
    Strict,
    Balanced,
    Lenient,
}

impl PresetLevel {
    pub fn aggregation(self) -> AggregationConfig {
        match self {
            PresetLevel::Strict => AggregationConfig {
                priority_threshold: 0.80,
                connectivity_tolerance_m: 5.0,
                min_length_m: 400.0,
                d_max_m: 20.0,
                n_min: 5,
            },
            PresetLevel::Balanced => AggregationConfig::default(),
            PresetLevel::Lenient => AggregationConfig {
                priority_threshold: 0.60,
                connectivity_tolerance_m: 20.0,
                min_length_m: 100.0,
                d_max_m: 50.0,
                n_min: 2,
            },
        }
    }

    pub fn to_config(self) -> CorridormapConfig {
        CorridormapConfig {
            aggregation: Some(self.aggregation()),
            ..Default::default()
        }
    }

    /// Parse preset from string name (returns Option instead of Result).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(PresetLevel::Strict),
            "balanced" => Some(PresetLevel::Balanced),
            "lenient" | "permissive" => Some(PresetLevel::Lenient),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PresetLevel::Strict => "strict",
            PresetLevel::Balanced => "balanced",
            PresetLevel::Lenient => "lenient",
        }
    }
}

impl std::fmt::Display for PresetLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresetLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetLevel::parse(s).ok_or_else(|| {
            format!(
                "Invalid preset level: '{}'. Valid options: strict, balanced, lenient",
                s
            )
        })
    }
}

/// Merge a preset with a loaded config; tables present in `config` win.
pub fn merge_preset_with_config(preset: PresetLevel, config: CorridormapConfig) -> CorridormapConfig {
    let preset_config = preset.to_config();

    CorridormapConfig {
        aggregation: config.aggregation.or(preset_config.aggregation),
        scoring: config.scoring.or(preset_config.scoring),
        normalization: config.normalization.or(preset_config.normalization),
        classification: config.classification.or(preset_config.classification),
        output: config.output.or(preset_config.output),
    }
}
