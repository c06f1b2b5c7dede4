//! Test environment abstraction for isolated testing.
//!
//! Provides `TestEnvironment` to manage:
//! - An isolated project directory
//! - A fake home directory for global config
//! - A per-test status file path
//!
//! # Usage
//!
//! ```ignore
//! use sentinel_config::testing::TestEnvironment;
//!
//! #[test]
//! fn test_something() {
//!     let env = TestEnvironment::new().unwrap();
//!     // env.status_path(), env.project_root, env.home_dir are all isolated
//! }
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use tempfile::TempDir;

use crate::{Config, ENV_STATUS_PATH, PROJECT_CONFIG_PATH, STATUS_FILE_NAME};

/// Atomic counter for unique test IDs
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Isolated test environment with unique paths
pub struct TestEnvironment {
    /// Temporary directory (dropped on cleanup)
    _temp_dir: TempDir,
    /// Working directory for the test (project config lives under it)
    pub project_root: PathBuf,
    /// Stand-in for `$HOME`
    pub home_dir: PathBuf,
    /// Directory receiving status output
    pub output_dir: PathBuf,
    /// Unique test ID
    pub test_id: u32,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> anyhow::Result<Self> {
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        let project_root = root.join("project");
        let home_dir = root.join("home");
        let output_dir = root.join(format!("out-{}", test_id));

        std::fs::create_dir_all(&project_root)?;
        std::fs::create_dir_all(&home_dir)?;
        std::fs::create_dir_all(&output_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
            home_dir,
            output_dir,
            test_id,
        })
    }

    /// Status file path inside the isolated output directory
    pub fn status_path(&self) -> PathBuf {
        self.output_dir.join(STATUS_FILE_NAME)
    }

    /// Project config path (`<project>/.sentinel/config.toml`)
    pub fn project_config_path(&self) -> PathBuf {
        self.project_root.join(PROJECT_CONFIG_PATH)
    }

    /// Global config path under the fake home directory
    pub fn global_config_path(&self) -> PathBuf {
        self.home_dir.join(".sentinel/config.toml")
    }

    /// Write a project config file
    pub fn write_project_config(&self, contents: &str) -> anyhow::Result<PathBuf> {
        Self::write_file(self.project_config_path(), contents)
    }

    /// Write a global config file
    pub fn write_global_config(&self, contents: &str) -> anyhow::Result<PathBuf> {
        Self::write_file(self.global_config_path(), contents)
    }

    fn write_file(path: PathBuf, contents: &str) -> anyhow::Result<PathBuf> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Load config the way the binary would from inside this environment,
    /// minus process environment overrides.
    pub fn load_config(&self) -> Result<Config, crate::ConfigError> {
        Config::load_from(
            Some(&self.global_config_path()),
            &self.project_config_path(),
        )
    }

    /// Environment variables for spawning the CLI in isolation.
    pub fn cli_env(&self) -> Vec<(String, String)> {
        vec![
            ("HOME".to_string(), self.home_dir.display().to_string()),
            (
                ENV_STATUS_PATH.to_string(),
                self.status_path().display().to_string(),
            ),
        ]
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new().expect("Failed to create test environment")
    }
}
