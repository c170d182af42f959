use crate::query::session::DEFAULT_TOOL;
use crate::utils::paths::DEFAULT_DATABASE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "csx";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "csx.log";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Result pane below the editor view (true) or to its right (false)
    #[serde(default = "default_split_horizontal")]
    pub split_horizontal: bool,

    /// cscope executable name or path
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Database file looked up inside the symbol directory
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Editor used to open results; falls back to $EDITOR, then vi
    #[serde(default)]
    pub editor: Option<String>,

    /// Symbol directory to validate at start-up
    #[serde(default)]
    pub index_directory: Option<String>,
}

fn default_split_horizontal() -> bool {
    true
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

fn default_database_file() -> String {
    DEFAULT_DATABASE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            split_horizontal: default_split_horizontal(),
            tool: default_tool(),
            database_file: default_database_file(),
            editor: None,
            index_directory: None,
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the app data directory
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Editor command: config, then $EDITOR, then vi
    pub fn effective_editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the path of the log file written while the TUI owns the terminal
pub fn get_log_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(LOG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert!(config.split_horizontal);
        assert_eq!(config.tool, "cscope");
        assert_eq!(config.database_file, "cscope.out");
        assert_eq!(config.index_directory, None);
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig {
            split_horizontal: false,
            tool: "/usr/local/bin/cscope".to_string(),
            database_file: "cscope.out".to_string(),
            editor: Some("nvim".to_string()),
            index_directory: Some("~/src/linux".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"split_horizontal": false}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(!config.split_horizontal);
        assert_eq!(config.tool, "cscope");
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = AppConfig {
            editor: Some("emacs -nw".to_string()),
            ..AppConfig::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_configured_editor_wins() {
        let config = AppConfig {
            editor: Some("nano".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.effective_editor(), "nano");
    }
}
