use crate::model::GridSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DATA_DIR_ENV: &str = "BOMBGRID_DATA_DIR";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_database_file")]
    pub database_file: String,

    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    #[serde(default)]
    pub last_player_name: Option<String>,

    #[serde(default)]
    pub last_grid_size: Option<GridSize>,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_database_file() -> String {
    "leaderboard.db".to_string()
}
fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            database_file: default_database_file(),
            frame_interval_ms: default_frame_interval_ms(),
            last_player_name: None,
            last_grid_size: None,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    /// Reads settings from `path`, writing defaults there when the file is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&contents) {
                settings.migrate();
                return settings;
            }
            log::warn!(target: "settings", "Ignoring unreadable settings file {:?}", path);
        }
        let default = Settings::default();
        if let Err(err) = default.save_to(path) {
            log::warn!(target: "settings", "Could not write default settings to {:?}: {}", path, err);
        }
        default
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    pub fn data_dir() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn settings_path() -> PathBuf {
        Self::data_dir().join(SETTINGS_FILE)
    }

    pub fn database_path(&self) -> PathBuf {
        Self::data_dir().join(&self.database_file)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn temp_settings_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("bombgrid-settings-{}", uuid::Uuid::new_v4()))
            .join(SETTINGS_FILE)
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let path = temp_settings_path();

        let settings = Settings::load_from(&path);

        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_settings_path();
        let settings = Settings {
            last_player_name: Some("ada".to_string()),
            last_grid_size: Some(GridSize::new(6).unwrap()),
            frame_interval_ms: 33,
            ..Settings::default()
        };

        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_uses_defaults_and_migrates() {
        let settings: Settings = serde_json::from_str(r#"{"version": 0}"#).unwrap();
        assert_eq!(settings.database_file, "leaderboard.db");
        assert_eq!(settings.frame_interval(), Duration::from_millis(16));

        let path = temp_settings_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"version": 0, "frame_interval_ms": 0}"#).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.frame_interval(), Duration::from_millis(1));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        std::env::set_var("SEED", "1234");
        std::env::set_var("DEBUG", "1");
        std::env::set_var(DATA_DIR_ENV, "/tmp/bombgrid-data");

        assert_eq!(Settings::seed_from_env(), Some(1234));
        assert!(Settings::is_debug_mode());
        assert_eq!(
            Settings::default().database_path(),
            PathBuf::from("/tmp/bombgrid-data/leaderboard.db")
        );

        std::env::set_var("SEED", "not-a-number");
        assert_eq!(Settings::seed_from_env(), None);

        std::env::remove_var("SEED");
        std::env::remove_var("DEBUG");
        std::env::remove_var(DATA_DIR_ENV);
        assert!(!Settings::is_debug_mode());
        assert_eq!(
            Settings::default().database_path(),
            PathBuf::from("./leaderboard.db")
        );
    }
}
