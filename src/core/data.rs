//! RON data file helpers.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::de::DeserializeOwned;

use super::error::DataLoadError;

/// Read and parse a RON file.
pub fn read_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    parse_ron(&path.display().to_string(), &contents)
}

/// Parse RON text; `path` is only used for error reporting.
pub fn parse_ron<T: DeserializeOwned>(path: &str, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })
}

/// Load a RON file, falling back to defaults when it is missing or broken.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &str) -> T {
    match read_ron(path) {
        Ok(value) => {
            info!("Loaded {}", path);
            value
        }
        Err(e @ DataLoadError::ParseError { .. }) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        speed: f32,
        #[serde(default)]
        label: String,
    }

    #[test]
    fn parses_ron_with_defaults() {
        let sample: Sample = parse_ron("inline", "(speed: 2.5)").unwrap();
        assert_eq!(
            sample,
            Sample {
                speed: 2.5,
                label: String::new()
            }
        );
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let err = parse_ron::<Sample>("broken.ron", "(speed: )").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { ref path, .. } if path == "broken.ron"));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let err = read_ron::<Sample>("assets/data/does_not_exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::ReadError { .. }));

        let sample: Sample = load_or_default("assets/data/does_not_exist.ron");
        assert_eq!(sample, Sample::default());
    }
}
