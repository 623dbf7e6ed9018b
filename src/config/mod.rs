//! Configuration loaded from `.corridormap.toml`.
//!
//! Every table is optional. Missing tables and keys fall back to defaults,
//! and invalid tables are replaced by defaults with a warning.

mod aggregation;
mod classification;
mod core;
mod loader;
pub mod presets;
mod scoring;

pub use aggregation::{
    default_connectivity_tolerance_m, default_d_max_m, default_min_length_m, default_n_min,
    default_priority_threshold, AggregationConfig,
};
pub use classification::ClassificationConfig;
pub use core::{CorridormapConfig, OutputConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use presets::{merge_preset_with_config, PresetLevel};
pub use scoring::{
    default_aqi_weight, default_fallback_green_deficit_weight, default_fallback_heat_weight,
    default_green_deficit_weight, default_heat_weight, ExposureWeights, NormalizationConfig,
};
