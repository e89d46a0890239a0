//! CLI configuration
//!
//! Stored as TOML at `$FLAVORGRAPH_CONFIG`, or `flavorgraph/config.toml`
//! under the platform config directory. Provider keys can also come from
//! `GEMINI_API_KEY` and `CURSOR_API_KEY`, which win over the file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use flavorgraph_llm::{CursorConfig, GeminiConfig};

pub const CONFIG_ENV: &str = "FLAVORGRAPH_CONFIG";
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
pub const CURSOR_KEY_ENV: &str = "CURSOR_API_KEY";

/// Location of the config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flavorgraph")
        .join("config.toml")
}

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flavorgraph")
}

/// Which provider answers free-text searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    Cursor,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "cursor" => Some(Self::Cursor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Cursor => "cursor",
        }
    }
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Pairing dataset used when `--dataset` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub cursor: CursorConfig,
}

const KEYS: &[&str] = &[
    "provider",
    "dataset",
    "data_dir",
    "gemini.api_key",
    "gemini.model",
    "gemini.base_url",
    "gemini.timeout_secs",
    "cursor.api_key",
    "cursor.repository",
    "cursor.ref",
    "cursor.base_url",
    "cursor.poll_interval_ms",
    "cursor.max_wait_secs",
];

fn is_secret(key: &str) -> bool {
    key.ends_with("api_key")
}

impl Config {
    /// Load the config file for read-only use; an invalid file yields defaults
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring config: {:#}", e);
            Self::default()
        })
    }

    /// Load the config file, failing when it exists but cannot be used
    ///
    /// Every load-then-save path goes through here so a broken file is never
    /// replaced by defaults.
    pub fn try_load() -> anyhow::Result<Self> {
        Self::try_load_from(&config_file_path())
    }

    pub fn try_load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        toml::from_str(&raw).with_context(|| {
            format!("Invalid config at {}; fix or remove it first", path.display())
        })
    }

    /// Config file values with environment overrides applied
    pub fn with_env(mut self) -> Self {
        if let Some(key) = env_value(GEMINI_KEY_ENV) {
            self.gemini.api_key = Some(key);
        }
        if let Some(key) = env_value(CURSOR_KEY_ENV) {
            self.cursor.api_key = Some(key);
        }
        self
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_file_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Set `key` in the file at `path` and save it, returning the masked value
    ///
    /// Leaves the file untouched when it does not parse or the value is rejected.
    pub fn update_file(path: &Path, key: &str, value: &str) -> anyhow::Result<String> {
        let mut config = Self::try_load_from(path)?;
        config.set(key, value)?;
        config.save_to(path)?;
        Ok(config.get_masked(key).unwrap_or_default())
    }

    /// Write a default config file, refusing to replace one unless `force`
    pub fn init_file(path: &Path, force: bool) -> anyhow::Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "Config file already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }
        Self::default().save_to(path)
    }

    /// Every key with its display value, API keys masked
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .map(|key| (*key, self.get_masked(key).unwrap_or_default()))
            .collect()
    }

    /// Raw value of `key`, or an error naming the known keys
    pub fn require(&self, key: &str) -> anyhow::Result<String> {
        self.get(key).with_context(|| {
            format!("Unknown config key: {}. Available keys: {}", key, KEYS.join(", "))
        })
    }

    pub fn keys() -> &'static [&'static str] {
        KEYS
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "provider" => self.provider.as_str().to_string(),
            "dataset" => display_path(&self.dataset),
            "data_dir" => display_path(&self.data_dir),
            "gemini.api_key" => self.gemini.api_key.clone().unwrap_or_default(),
            "gemini.model" => self.gemini.model.clone(),
            "gemini.base_url" => self.gemini.base_url.clone(),
            "gemini.timeout_secs" => self.gemini.timeout_secs.to_string(),
            "cursor.api_key" => self.cursor.api_key.clone().unwrap_or_default(),
            "cursor.repository" => self.cursor.repository.clone().unwrap_or_default(),
            "cursor.ref" => self.cursor.git_ref.clone(),
            "cursor.base_url" => self.cursor.base_url.clone(),
            "cursor.poll_interval_ms" => self.cursor.poll_interval_ms.to_string(),
            "cursor.max_wait_secs" => self.cursor.max_wait_secs.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Value for display, with API keys masked
    pub fn get_masked(&self, key: &str) -> Option<String> {
        let value = self.get(key)?;
        if value.is_empty() {
            return Some("(not set)".to_string());
        }
        if is_secret(key) {
            let tail: String = value
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return Some(format!("****{}", tail));
        }
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = value.trim();
        let optional = || (!value.is_empty()).then(|| value.to_string());
        match key {
            "provider" => {
                self.provider = ProviderKind::parse(value)
                    .with_context(|| format!("Unknown provider '{}' (gemini, cursor)", value))?
            }
            "dataset" => self.dataset = optional().map(PathBuf::from),
            "data_dir" => self.data_dir = optional().map(PathBuf::from),
            "gemini.api_key" => self.gemini.api_key = optional(),
            "gemini.model" => self.gemini.model = value.to_string(),
            "gemini.base_url" => self.gemini.base_url = value.to_string(),
            "gemini.timeout_secs" => self.gemini.timeout_secs = parse_number(key, value)?,
            "cursor.api_key" => self.cursor.api_key = optional(),
            "cursor.repository" => self.cursor.repository = optional(),
            "cursor.ref" => self.cursor.git_ref = value.to_string(),
            "cursor.base_url" => self.cursor.base_url = value.to_string(),
            "cursor.poll_interval_ms" => self.cursor.poll_interval_ms = parse_number(key, value)?,
            "cursor.max_wait_secs" => self.cursor.max_wait_secs = parse_number(key, value)?,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn parse_number(key: &str, value: &str) -> anyhow::Result<u64> {
    value
        .parse()
        .with_context(|| format!("{} expects a whole number, got '{}'", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("provider", "Cursor").unwrap();
        config.set("cursor.repository", "https://github.com/a/b").unwrap();
        config.set("cursor.max_wait_secs", "60").unwrap();

        assert_eq!(config.get("provider").as_deref(), Some("cursor"));
        assert_eq!(config.cursor.repository.as_deref(), Some("https://github.com/a/b"));
        assert_eq!(config.cursor.max_wait_secs, 60);
        assert!(config.set("cursor.max_wait_secs", "soon").is_err());
        assert!(config.set("nope", "x").is_err());
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_every_key_readable() {
        let config = Config::default();
        for key in Config::keys() {
            assert!(config.get(key).is_some(), "{} not readable", key);
        }
    }

    #[test]
    fn test_masked_secret() {
        let mut config = Config::default();
        assert_eq!(config.get_masked("gemini.api_key").as_deref(), Some("(not set)"));

        config.set("gemini.api_key", "abcdef123456").unwrap();
        assert_eq!(config.get_masked("gemini.api_key").as_deref(), Some("****3456"));
    }

    #[test]
    fn test_update_file_keeps_other_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "provider = \"cursor\"\ndataset = \"/data/pairings.json\"\n[cursor]\nrepository = \"https://github.com/a/b\"\n",
        )
        .unwrap();

        let shown = Config::update_file(&path, "gemini.api_key", "abcdef123456").unwrap();
        assert_eq!(shown, "****3456");

        let config = Config::try_load_from(&path).unwrap();
        assert_eq!(config.provider, ProviderKind::Cursor);
        assert_eq!(config.dataset, Some(PathBuf::from("/data/pairings.json")));
        assert_eq!(config.cursor.repository.as_deref(), Some("https://github.com/a/b"));
        assert_eq!(config.gemini.api_key.as_deref(), Some("abcdef123456"));
    }

    #[test]
    fn test_invalid_file_is_never_overwritten() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let raw = "provider = \"cursor\"\ndataset = \"/data/pairings.json\"\n[cursor]\nmax_wait_secs = \"oops\"\n";
        std::fs::write(&path, raw).unwrap();

        assert!(Config::try_load_from(&path).is_err());
        assert!(Config::update_file(&path, "gemini.api_key", "k").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::try_load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.provider, ProviderKind::Gemini);
    }

    #[test]
    fn test_init_file_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init_file(&path, false).unwrap();
        assert!(Config::init_file(&path, false).is_err());
        Config::init_file(&path, true).unwrap();
    }

    #[test]
    fn test_entries_mask_secrets() {
        let mut config = Config::default();
        config.set("cursor.api_key", "key_live_9876").unwrap();

        let entries = config.entries();
        assert_eq!(entries.len(), Config::keys().len());
        let cursor_key = entries.iter().find(|(k, _)| *k == "cursor.api_key").unwrap();
        assert_eq!(cursor_key.1, "****9876");
        assert!(config.require("bogus").is_err());
    }

    #[test]
    fn test_toml_roundtrip_keeps_defaults() {
        let config: Config = toml::from_str("provider = \"cursor\"\n[gemini]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.provider, ProviderKind::Cursor);
        assert_eq!(config.gemini.api_key.as_deref(), Some("k"));
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.cursor.git_ref, "main");

        let raw = toml::to_string_pretty(&config).unwrap();
        assert!(raw.contains("provider = \"cursor\""));
    }
}
