//! Default aggregation parameters
//!
//! Values here seed the CLI and the session when a caller does not supply
//! its own. Command-line flags always take precedence.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Minimum priority score for an element to join a corridor
    #[serde(default = "default_priority_threshold")]
    pub priority_threshold: f64,

    /// Segment mode: endpoint distance still counted as connected (meters)
    #[serde(default = "default_connectivity_tolerance_m")]
    pub connectivity_tolerance_m: f64,

    /// Segment mode: shortest corridor kept (meters)
    #[serde(default = "default_min_length_m")]
    pub min_length_m: f64,

    /// Point mode: largest gap between connected points (meters)
    #[serde(default = "default_d_max_m")]
    pub d_max_m: f64,

    /// Point mode: fewest points a corridor may have
    #[serde(default = "default_n_min")]
    pub n_min: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            priority_threshold: default_priority_threshold(),
            connectivity_tolerance_m: default_connectivity_tolerance_m(),
            min_length_m: default_min_length_m(),
            d_max_m: default_d_max_m(),
            n_min: default_n_min(),
        }
    }
}

pub fn default_priority_threshold() -> f64 {
    0.70
}
pub fn default_connectivity_tolerance_m() -> f64 {
    10.0
}
pub fn default_min_length_m() -> f64 {
    200.0
}
pub fn default_d_max_m() -> f64 {
    30.0
}
pub fn default_n_min() -> usize {
    3
}
