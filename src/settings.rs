//! Host settings and preferences
//!
//! Persisted as JSON next to the high score file. Missing fields take their
//! defaults so older files keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::highscores::StoreError;

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the instructions screen before the first game
    pub show_intro: bool,
    /// Drop audio cues instead of playing them
    pub muted: bool,
    /// High score file
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_intro: true,
            muted: false,
            high_score_path: PathBuf::from("highscore.json"),
        }
    }
}

impl Settings {
    /// Load settings, using defaults when the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not read settings {}: {}", path.display(), err);
                }
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Malformed settings {}, using defaults: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.show_intro);
        assert!(!settings.muted);
        assert_eq!(settings.high_score_path, PathBuf::from("highscore.json"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(settings.muted);
        assert!(settings.show_intro);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("maze-round-settings-{}.json", std::process::id()));
        let settings = Settings {
            show_intro: false,
            muted: true,
            high_score_path: PathBuf::from("scores/best.json"),
        };
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_error_names_no_other_file() {
        let dir = std::env::temp_dir().join(format!("maze-round-settings-dir-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        // Writing over a directory fails
        let err = Settings::default().save(&dir).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!err.to_string().contains("high score"));
        std::fs::remove_dir(&dir).unwrap();
    }

    #[test]
    fn test_missing_or_bad_file_uses_defaults() {
        let missing = std::env::temp_dir().join("maze-round-no-such-settings.json");
        assert_eq!(Settings::load(&missing), Settings::default());

        let bad = std::env::temp_dir().join(format!("maze-round-bad-settings-{}.json", std::process::id()));
        std::fs::write(&bad, "{ nope").unwrap();
        assert_eq!(Settings::load(&bad), Settings::default());
        std::fs::remove_file(&bad).unwrap();
    }
}
