//! Configuration loading and persistence.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "EVENTLY_BASE_URL";

/// Default config template (with comments).
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template stay present while the user's
/// values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for evently configuration and data directories.
    //!
    //! EVENTLY_HOME resolution order:
    //! 1. EVENTLY_HOME environment variable (if set)
    //! 2. ~/.config/evently (default)

    use std::path::PathBuf;

    /// Returns the evently home directory.
    pub fn evently_home() -> PathBuf {
        if let Ok(home) = std::env::var("EVENTLY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".evently"),
            |h| h.join(".config").join("evently"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        evently_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        evently_home().join("session.json")
    }

    /// Returns the directory that holds log files.
    pub fn logs_dir() -> PathBuf {
        evently_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the event service (all endpoint paths are appended to it)
    pub base_url: String,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u64,

    /// Delay before the composer navigates to the listing after a successful create
    pub redirect_delay_ms: u64,

    /// Log filter directive
    pub log_filter: String,
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;
    const DEFAULT_LOG_FILTER: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the base URL with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the chosen URL is not well-formed.
    pub fn effective_base_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var(BASE_URL_ENV) {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        let trimmed = self.base_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }

        Ok(Self::DEFAULT_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Saves only the `base_url` field to the config file.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url(url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), url)
    }

    /// Saves only the `base_url` field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url_to(path: &Path, url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        validate_url(url)?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["base_url"] = value(url);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            redirect_delay_ms: Self::DEFAULT_REDIRECT_DELAY_MS,
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.redirect_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "base_url = \"http://events.test/api\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://events.test/api");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_default_template_matches_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("http://localhost:5000/api"));
        assert!(contents.contains("# Request timeout"));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_save_base_url_preserves_other_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "redirect_delay_ms = 500\n").unwrap();

        Config::save_base_url_to(&config_path, "https://api.example.com").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.redirect_delay_ms, 500);
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Log filter"));
    }

    #[test]
    fn test_save_base_url_rejects_invalid_url() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        assert!(Config::save_base_url_to(&config_path, "not a url").is_err());
        assert!(!config_path.exists());
    }

    #[test]
    fn test_timeout_zero_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_effective_base_url_trims_trailing_slash() {
        let config = Config {
            base_url: "http://events.test/api/".to_string(),
            ..Default::default()
        };
        // EVENTLY_BASE_URL is not set by the test harness.
        if std::env::var(BASE_URL_ENV).is_err() {
            assert_eq!(
                config.effective_base_url().unwrap(),
                "http://events.test/api"
            );
        }
    }
}
