//! Search configuration.
//!
//! Loaded from `~/.config/ytsearch/config.toml` (Unix) or
//! `%APPDATA%/ytsearch/config.toml` (Windows). Every field has a default, so a
//! missing file or a partial file is fine. A handful of environment variables
//! override whatever the file says.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://youtube.com";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const ENV_BASE_URL: &str = "YTSEARCH_BASE_URL";
pub const ENV_MAX_ATTEMPTS: &str = "YTSEARCH_MAX_ATTEMPTS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Scheme and host the `/results` path is appended to.
    pub base_url: String,
    /// Fetches attempted before giving up on seeing the payload marker.
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_ms: u64,
    pub request_timeout_ms: u64,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: 500,
            backoff_multiplier: 1.6,
            max_backoff_ms: 8_000,
            request_timeout_ms: 15_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

impl SearchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Delay before retry number `retry` (0-based), capped at `max_backoff_ms`.
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.max(1.0).powi(retry as i32);
        let delay_ms = (self.initial_backoff_ms as f64 * factor).min(self.max_backoff_ms as f64);
        Duration::from_millis(delay_ms as u64)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_attempts == 0 {
            return Err(SearchError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("invalid base_url '{}': {}", self.base_url, e)))?;
        Ok(())
    }

    /// Applies `YTSEARCH_*` environment overrides through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            self.max_attempts = raw.trim().parse().map_err(|_| {
                SearchError::Config(format!("{ENV_MAX_ATTEMPTS} must be a number, got '{raw}'"))
            })?;
        }
        Ok(())
    }

    pub fn apply_env(&mut self) -> Result<(), SearchError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }
}

/// Reads [`SearchConfig`] from a TOML file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new_default() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join("ytsearch").join("config.toml"),
        }
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File contents merged over defaults; defaults alone when the file is missing.
    pub fn load(&self) -> Result<SearchConfig, SearchError> {
        let config = self.read()?;
        config.validate()?;
        Ok(config)
    }

    /// File contents, then environment overrides, validated once at the end.
    pub fn load_with_env(&self) -> Result<SearchConfig, SearchError> {
        self.load_with_env_from(|key| std::env::var(key).ok())
    }

    pub fn load_with_env_from<F>(&self, lookup: F) -> Result<SearchConfig, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.read()?;
        config.apply_env_with(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn read(&self) -> Result<SearchConfig, SearchError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SearchConfig::default()),
            Err(e) => Err(SearchError::Io(e)),
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nope.toml"));
        assert_eq!(store.load().unwrap(), SearchConfig::default());
    }

    #[test]
    fn test_partial_file_merges_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_attempts = 2\nbase_url = \"http://127.0.0.1:8080\"").unwrap();

        let config = ConfigStore::new(file.path().to_path_buf()).load().unwrap();
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.initial_backoff_ms, 500);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_attempts = \"many\"").unwrap();

        let err = ConfigStore::new(file.path().to_path_buf()).load().unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = SearchConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SearchError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "http://localhost:9000"),
            (ENV_MAX_ATTEMPTS, "7"),
        ]);
        let mut config = SearchConfig::default();
        config
            .apply_env_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.max_attempts, 7);

        let err = config
            .apply_env_with(|key| (key == ENV_MAX_ATTEMPTS).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_env_fixes_invalid_file_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_attempts = 0").unwrap();
        let store = ConfigStore::new(file.path().to_path_buf());

        assert!(matches!(store.load(), Err(SearchError::Config(_))));
        assert!(matches!(
            store.load_with_env_from(|_| None),
            Err(SearchError::Config(_))
        ));

        let config = store
            .load_with_env_from(|key| (key == ENV_MAX_ATTEMPTS).then(|| "3".to_string()))
            .unwrap();
        assert_eq!(config.max_attempts, 3);
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let config = SearchConfig {
            initial_backoff_ms: 100,
            backoff_multiplier: 2.0,
            max_backoff_ms: 500,
            ..Default::default()
        };
        assert_eq!(config.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(config.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(config.backoff_delay(2), Duration::from_millis(400));
        assert_eq!(config.backoff_delay(3), Duration::from_millis(500));
    }
}
