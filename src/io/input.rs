//! Element collections handed over as JSON.

use crate::core::{Element, Error, Result};
use std::path::Path;

/// Parse an element collection from JSON text.
pub fn parse_elements(contents: &str) -> Result<Vec<Element>> {
    serde_json::from_str(contents).map_err(|e| Error::Input(format!("malformed element JSON: {}", e)))
}

/// Read an element collection from a JSON file.
pub fn load_elements(path: &Path) -> Result<Vec<Element>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system("Cannot read element file", path, e))?;
    let elements = parse_elements(&contents)?;
    log::info!("Loaded {} elements from {}", elements.len(), path.display());
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Geometry;
    use indoc::indoc;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_mixed_geometries() {
        let json = indoc! {r#"
            [
              {
                "id": "seg-1",
                "geometry": {"type": "LineString", "coordinates": [[77.2, 28.6], [77.21, 28.6]]},
                "priority_score": 0.82,
                "heat_norm": 0.9
              },
              {"id": "pt-1", "geometry": {"type": "Point", "coordinates": [77.2, 28.6]}}
            ]
        "#};
        let elements = parse_elements(json).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].priority(), Some(0.82));
        assert_eq!(elements[0].attributes.heat(), Some(0.9));
        assert_eq!(elements[1].geometry, Geometry::Point([77.2, 28.6]));
        assert_eq!(elements[1].priority(), None);
    }

    #[test]
    fn test_malformed_json_is_input_error() {
        let err = parse_elements("[{\"id\": 3}]").unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "geometry": {{"type": "Point", "coordinates": [1.0, 2.0]}}}}]"#
        )
        .unwrap();
        let elements = load_elements(file.path()).unwrap();
        assert_eq!(elements[0].id.as_str(), "a");
    }

    #[test]
    fn test_missing_file_is_file_system_error() {
        let err = load_elements(Path::new("/nonexistent/elements.json")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }
}
