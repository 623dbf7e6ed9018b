use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::classification::ClassificationConfig;
use super::core::CorridormapConfig;
use super::scoring::{ExposureWeights, NormalizationConfig};

pub const CONFIG_FILE_NAME: &str = ".corridormap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read and parse config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a config file and repair invalid tables.
///
/// Invalid weights, ranges or thresholds are replaced by their defaults with
/// a warning; only a TOML syntax error fails the parse.
pub fn parse_and_validate_config(contents: &str) -> Result<CorridormapConfig, String> {
    let mut config = toml::from_str::<CorridormapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(ref mut scoring) = config.scoring {
        if let Err(e) = scoring.validate() {
            log::warn!("Invalid scoring weights: {}. Using defaults.", e);
            config.scoring = Some(ExposureWeights::default());
        } else {
            scoring.normalize(); // Ensure exact sum of 1.0
        }
    }

    if let Some(Err(e)) = config.normalization.as_ref().map(NormalizationConfig::validate) {
        log::warn!("Invalid normalization ranges: {}. Using defaults.", e);
        config.normalization = Some(NormalizationConfig::default());
    }

    if let Some(Err(e)) = config.classification.as_ref().map(ClassificationConfig::validate) {
        log::warn!("Invalid classification thresholds: {}. Using defaults.", e);
        config.classification = Some(ClassificationConfig::default());
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CorridormapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file.
pub fn load_config_from(start: PathBuf) -> CorridormapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CorridormapConfig::default()
        })
}

/// Load an explicitly named config file; unlike discovery, failure is an error.
pub fn load_config_file(path: &Path) -> crate::core::Result<CorridormapConfig> {
    let contents = read_config_file(path)
        .map_err(|e| crate::core::Error::file_system("Cannot read config file", path, e))?;
    parse_and_validate_config(&contents).map_err(crate::core::Error::Configuration)
}

pub fn load_config() -> CorridormapConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            CorridormapConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [aggregation]
            priority_threshold = 0.65
            min_length_m = 150.0

            [scoring]
            heat = 0.5
            green_deficit = 0.3
            aqi = 0.2

            [classification]
            heat_share = 0.5
        "#})
        .unwrap();

        let aggregation = config.aggregation();
        assert_eq!(aggregation.priority_threshold, 0.65);
        assert_eq!(aggregation.connectivity_tolerance_m, 10.0);
        assert_eq!(config.scoring().heat, 0.5);
        assert_eq!(config.classification().heat_share, 0.5);
    }

    #[test]
    fn test_invalid_weights_fall_back_to_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [scoring]
            heat = 1.5
        "#})
        .unwrap();
        assert_eq!(config.scoring(), ExposureWeights::default());
    }

    #[test]
    fn test_invalid_normalization_falls_back_to_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [normalization]
            aqi_floor = 300.0
            aqi_ceiling = 50.0
        "#})
        .unwrap();
        assert_eq!(config.normalization(), NormalizationConfig::default());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = parse_and_validate_config("[aggregation").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_config_found_in_ancestor() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[aggregation]\nn_min = 7\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(load_config_from(nested).aggregation().n_min, 7);
    }

    #[test]
    fn test_explicit_config_file_errors_are_reported() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("custom.toml");
        assert!(load_config_file(&path).is_err());

        std::fs::write(&path, "[aggregation]\nd_max_m = 45.0\n").unwrap();
        assert_eq!(load_config_file(&path).unwrap().aggregation().d_max_m, 45.0);
    }

    #[test]
    fn test_directory_ancestors_limited() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}
