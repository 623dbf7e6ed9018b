use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# corridormap configuration

[aggregation]
priority_threshold = 0.70
connectivity_tolerance_m = 10.0
min_length_m = 200.0
d_max_m = 30.0
n_min = 3

[scoring]
heat = 0.45
green_deficit = 0.35
aqi = 0.20
fallback_heat = 0.60
fallback_green_deficit = 0.40

[normalization]
ndvi_min = -0.2
ndvi_max = 0.8
lst_min = 24.0
lst_max = 29.0
aqi_floor = 50.0
aqi_ceiling = 300.0

[classification]
heat_share = 0.45
pollution_share = 0.40
green_share = 0.35
critical_priority = 0.70
high_priority = 0.50
missing_green_deficit = 0.5

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        parse_and_validate_config, AggregationConfig, ClassificationConfig, ExposureWeights,
        NormalizationConfig,
    };
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_built_in_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.aggregation(), AggregationConfig::default());
        assert_eq!(config.scoring(), ExposureWeights::default());
        assert_eq!(config.normalization(), NormalizationConfig::default());
        assert_eq!(config.classification(), ClassificationConfig::default());
        assert_eq!(config.default_format(), Some("terminal"));
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        init_config_in(dir.path(), false).unwrap();
        assert!(init_config_in(dir.path(), false).is_err());
        assert!(init_config_in(dir.path(), true).is_ok());
    }
}
