//! # sentinel-config
//!
//! Configuration management for the token sentinel.
//!
//! Loads configuration from:
//! 1. `~/.sentinel/config.toml` (global)
//! 2. `.sentinel/config.toml` (project-local, overrides global)
//! 3. Environment variables (highest priority)

pub mod logging;
pub mod path;
pub mod testing;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Token id scanned when nothing else is configured.
pub const DEFAULT_TOKEN_ID: i64 = 2;

/// Token id the stub matcher reports as a match.
pub const DEFAULT_TARGET_ID: i64 = 2;

/// File name of the status record.
pub const STATUS_FILE_NAME: &str = "status.json";

/// Project-relative config location.
pub const PROJECT_CONFIG_PATH: &str = ".sentinel/config.toml";

pub const ENV_TOKEN_ID: &str = "SENTINEL_TOKEN_ID";
pub const ENV_TARGET_ID: &str = "SENTINEL_TARGET_ID";
pub const ENV_STATUS_PATH: &str = "SENTINEL_STATUS_PATH";
pub const ENV_LOG_LEVEL: &str = "SENTINEL_LOG_LEVEL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load config from standard locations
    pub fn load() -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        let mut config = Self::load_from(global.as_deref(), Path::new(PROJECT_CONFIG_PATH))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load and merge the global and project files, without environment overrides.
    ///
    /// Files are merged key by key before deserializing, so any key the project
    /// sets wins and unset keys fall through to the global file. Missing files
    /// are skipped.
    pub fn load_from(global: Option<&Path>, project: &Path) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();
        let mut source = project.to_path_buf();

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("Loading global config from {:?}", global_path);
                merged = Self::read_table(global_path)?;
                source = global_path.to_path_buf();
            }
        }

        if project.exists() {
            debug!("Loading project config from {:?}", project);
            let project_table = Self::read_table(project)?;
            merge_tables(&mut merged, project_table);
            source = project.to_path_buf();
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|source_err| ConfigError::Toml {
                path: source,
                source: source_err,
            })
    }

    fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table: toml::Table = contents.parse().map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        // Surface type errors against the file that carries them
        Config::deserialize(toml::Value::Table(table.clone())).map_err(|source| {
            ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(table)
    }

    /// Global config path: ~/.sentinel/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".sentinel/config.toml"))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Unparseable numeric values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup(ENV_TOKEN_ID).and_then(|v| v.trim().parse().ok()) {
            self.scan.token_id = id;
        }
        if let Some(id) = lookup(ENV_TARGET_ID).and_then(|v| v.trim().parse().ok()) {
            self.scan.target_id = id;
        }
        if let Some(path) = lookup(ENV_STATUS_PATH).filter(|v| !v.is_empty()) {
            self.output.status_path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.log.level = level;
        }
    }

    /// Generate default config TOML string
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        Config::default().to_toml()
    }

    /// Render this config as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Overlay `overlay` onto `base`; nested tables merge, other values replace.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Token id scanned when none is given on the command line
    pub token_id: i64,
    /// Token id the sentinel matcher treats as a match
    pub target_id: i64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            token_id: DEFAULT_TOKEN_ID,
            target_id: DEFAULT_TARGET_ID,
        }
    }
}

/// Status output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Status file location (None = `status.json` beside the executable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter level: error, warn, info, debug or trace
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.token_id, 2);
        assert_eq!(config.scan.target_id, 2);
        assert!(config.output.status_path.is_none());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml().unwrap();
        assert!(toml_str.contains("[scan]"));
        assert!(toml_str.contains("token_id = 2"));
        assert!(toml_str.contains("[log]"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.output.status_path = Some(PathBuf::from("/srv/sentinel/status.json"));
        let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.output.status_path, config.output.status_path);
        assert_eq!(parsed.scan.token_id, config.scan.token_id);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            (ENV_TOKEN_ID, "7"),
            (ENV_TARGET_ID, " 9 "),
            (ENV_STATUS_PATH, "/tmp/out.json"),
            (ENV_LOG_LEVEL, "debug"),
        ]));
        assert_eq!(config.scan.token_id, 7);
        assert_eq!(config.scan.target_id, 9);
        assert_eq!(
            config.output.status_path,
            Some(PathBuf::from("/tmp/out.json"))
        );
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[(ENV_TOKEN_ID, "two"), (ENV_STATUS_PATH, "")]));
        assert_eq!(config.scan.token_id, DEFAULT_TOKEN_ID);
        assert!(config.output.status_path.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_to_toml_reports_unencodable_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut config = Config::default();
        config.output.status_path = Some(PathBuf::from(OsStr::from_bytes(b"/tmp/\xff.json")));
        assert!(config.to_toml().is_err());
    }

    fn table(text: &str) -> toml::Table {
        text.parse().unwrap()
    }

    #[test]
    fn test_merge_tables_project_keys_win() {
        let mut merged = table(
            "[scan]\ntoken_id = 11\ntarget_id = 11\n[output]\nstatus_path = \"/global/status.json\"\n",
        );
        merge_tables(&mut merged, table("[scan]\ntoken_id = 2\n[log]\nlevel = \"warn\"\n"));

        let config: Config = toml::Value::Table(merged).try_into().unwrap();
        assert_eq!(config.scan.token_id, 2);
        // Unset in the project, so the global value falls through
        assert_eq!(config.scan.target_id, 11);
        assert_eq!(
            config.output.status_path,
            Some(PathBuf::from("/global/status.json"))
        );
        assert_eq!(config.log.level, "warn");
    }
}
