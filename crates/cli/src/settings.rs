use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use photoblur_core::shared::constants::{BACKGROUND_BLUR_STRENGTH, DEFAULT_BLUR_STRENGTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_strength: i32,
    pub backdrop_strength: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_strength: DEFAULT_BLUR_STRENGTH,
            backdrop_strength: BACKGROUND_BLUR_STRENGTH,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("PhotoBlur").join("settings.json"))
    }

    /// Loads from `path`, or from the per-user config file when `None`.
    pub fn load(path: Option<&Path>) -> Self {
        match path.map(Path::to_path_buf).or_else(Self::config_path) {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("No config directory on this platform, using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {e}, using defaults", path.display());
                return Self::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Invalid settings {}: {e}, using defaults", path.display());
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_strength, 10);
        assert_eq!(settings.backdrop_strength, 40);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "default_strength": 3 }"#).unwrap();

        let settings = Settings::load(Some(&path));
        assert_eq!(settings.default_strength, 3);
        assert_eq!(settings.backdrop_strength, 40);
    }

    #[test]
    fn test_invalid_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_serialization_field_names() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"default_strength\":10"));
        assert!(json.contains("\"backdrop_strength\":40"));
    }
}
