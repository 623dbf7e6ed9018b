use serde::{Deserialize, Serialize};

use super::aggregation::AggregationConfig;
use super::classification::ClassificationConfig;
use super::scoring::{ExposureWeights, NormalizationConfig};

/// Root configuration structure for corridormap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CorridormapConfig {
    /// Default aggregation parameters
    #[serde(default)]
    pub aggregation: Option<AggregationConfig>,

    /// Exposure weights for priority scoring
    #[serde(default)]
    pub scoring: Option<ExposureWeights>,

    /// Ranges for normalizing raw readings
    #[serde(default)]
    pub normalization: Option<NormalizationConfig>,

    /// Corridor classification thresholds
    #[serde(default)]
    pub classification: Option<ClassificationConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl CorridormapConfig {
    pub fn aggregation(&self) -> AggregationConfig {
        self.aggregation.clone().unwrap_or_default()
    }

    pub fn scoring(&self) -> ExposureWeights {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn normalization(&self) -> NormalizationConfig {
        self.normalization.clone().unwrap_or_default()
    }

    pub fn classification(&self) -> ClassificationConfig {
        self.classification.clone().unwrap_or_default()
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.as_ref()?.default_format.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
