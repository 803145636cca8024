use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_PORT, EARTHQUAKE_FEED_URL, PLATES_FEED_URL};
use crate::layers::MapVariant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub variant: MapVariant,
    pub earthquake_feed: String,
    pub plates_feed: String,
    #[serde(default)]
    pub auto_open_browser: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            variant: MapVariant::default(),
            earthquake_feed: EARTHQUAKE_FEED_URL.to_string(),
            plates_feed: PLATES_FEED_URL.to_string(),
            auto_open_browser: false,
        }
    }
}

impl Settings {
    /// Loads the config next to the executable.
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::config_path())
    }

    /// Reads `config_path`, or writes the defaults there on first run.
    pub fn load_or_init(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let settings = Settings::default();
            match settings.save_to(config_path) {
                Ok(()) => info!(path = %config_path.display(), "wrote default config"),
                Err(e) => warn!(path = %config_path.display(), error = %e, "could not write default config"),
            }
            return Ok(settings);
        }
        Self::load_from(config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    /// `key = value` lines; `#` starts a comment line. Values that don't
    /// parse keep their defaults.
    pub fn parse(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim(), value.trim().trim_matches('"'));
            }
        }

        if let Some(port_str) = config_map.get("port") {
            match port_str.parse::<u16>() {
                Ok(port) => settings.port = port,
                Err(_) => warn!(value = %port_str, "ignoring invalid port"),
            }
        }
        if let Some(variant_str) = config_map.get("variant") {
            match variant_str.parse::<MapVariant>() {
                Ok(variant) => settings.variant = variant,
                Err(e) => warn!(error = %e, "ignoring invalid variant"),
            }
        }
        if let Some(feed) = config_map.get("earthquake_feed").filter(|s| !s.is_empty()) {
            settings.earthquake_feed = feed.to_string();
        }
        if let Some(feed) = config_map.get("plates_feed").filter(|s| !s.is_empty()) {
            settings.plates_feed = feed.to_string();
        }
        if let Some(auto_open_str) = config_map.get("auto_open_browser") {
            if let Ok(auto_open) = auto_open_str.parse::<bool>() {
                settings.auto_open_browser = auto_open;
            }
        }

        settings
    }

    pub fn to_ini(&self) -> String {
        let mut content = String::new();
        content.push_str("# QuakeMap Configuration File\n");
        content.push_str("# variant: basic (earthquakes only) or tectonic (adds plate boundaries)\n");
        content.push_str(&format!("port = {}\n", self.port));
        content.push_str(&format!("variant = {}\n", self.variant));
        content.push_str(&format!("earthquake_feed = \"{}\"\n", self.earthquake_feed));
        content.push_str(&format!("plates_feed = \"{}\"\n", self.plates_feed));
        content.push_str(&format!("auto_open_browser = {}\n", self.auto_open_browser));
        content
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }
        std::fs::write(config_path, self.to_ini()).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(CONFIG_FILE_NAME);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Settings::parse(""), Settings::default());
        assert_eq!(Settings::default().variant, MapVariant::Tectonic);
        assert_eq!(Settings::default().port, 3001);
    }

    #[test]
    fn parses_keys_and_ignores_comments() {
        let settings = Settings::parse(
            "# comment\n\
             port = 8080\n\
             variant = basic\n\
             earthquake_feed = \"data/week.geojson\"\n\
             unknown_key = 1\n\
             auto_open_browser = true\n",
        );
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.variant, MapVariant::Basic);
        assert_eq!(settings.earthquake_feed, "data/week.geojson");
        assert_eq!(settings.plates_feed, PLATES_FEED_URL);
        assert!(settings.auto_open_browser);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let settings = Settings::parse("port = ninety\nvariant = satellite\nauto_open_browser = maybe\n");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn feed_urls_with_equals_signs_survive() {
        let settings = Settings::parse(
            "earthquake_feed = https://example.org/query?format=geojson&minmagnitude=2.5\n",
        );
        assert_eq!(
            settings.earthquake_feed,
            "https://example.org/query?format=geojson&minmagnitude=2.5"
        );
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let settings = Settings {
            port: 4100,
            variant: MapVariant::Basic,
            earthquake_feed: "fixtures/quakes.geojson".into(),
            plates_feed: "fixtures/plates.geojson".into(),
            auto_open_browser: true,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn first_run_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let settings = Settings::load_or_init(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn existing_config_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "port = 4200\nvariant = basic\n").unwrap();

        let settings = Settings::load_or_init(&path).unwrap();
        assert_eq!(settings.port, 4200);
        assert_eq!(settings.variant, MapVariant::Basic);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "port = 4200\nvariant = basic\n");
    }

    #[test]
    fn missing_file_is_an_error_for_load_from() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load_from(&dir.path().join("absent.ini")).is_err());
    }
}
