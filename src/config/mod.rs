//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/hwrng-stats/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::format::get_formatter;
use crate::harness::DegeneratePolicy;
use crate::source::available_sources;
use crate::stats::{ChiSquaredTest, RunsTest};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Entropy source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Chi-squared test parameters
    #[serde(default)]
    pub chi_squared: ChiSquaredConfig,

    /// Runs test parameters
    #[serde(default)]
    pub runs: RunsConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Entropy source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Backend name: device, pseudo or replay
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Device to read (device backend) or captured dump (replay backend)
    #[serde(default = "default_path")]
    pub path: String,

    /// Seed for the pseudo backend; unseeded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Chi-squared test parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChiSquaredConfig {
    /// Words per trial (N)
    #[serde(default = "default_chi_squared_sample_size")]
    pub sample_size: usize,

    /// Residue classes (K)
    #[serde(default = "default_chi_squared_classes")]
    pub classes: usize,

    /// Critical value for K - 1 degrees of freedom (T)
    #[serde(default = "default_chi_squared_threshold")]
    pub threshold: f64,

    /// Trials per run (R)
    #[serde(default = "default_chi_squared_repetitions")]
    pub repetitions: usize,
}

/// Runs test parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunsConfig {
    /// Words per trial (N)
    #[serde(default = "default_runs_sample_size")]
    pub sample_size: usize,

    /// Critical z value (T)
    #[serde(default = "default_runs_threshold")]
    pub threshold: f64,

    /// Trials per run (R)
    #[serde(default = "default_runs_repetitions")]
    pub repetitions: usize,

    /// Handling of samples with an empty bin
    #[serde(default)]
    pub degenerate: DegeneratePolicy,
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format: text or json
    #[serde(default = "default_format")]
    pub format: String,
}

// Default value functions for serde
fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}
fn default_path() -> String {
    DEFAULT_DEVICE_PATH.to_string()
}
fn default_chi_squared_sample_size() -> usize {
    DEFAULT_CHI_SQUARED_SAMPLE_SIZE
}
fn default_chi_squared_classes() -> usize {
    DEFAULT_CHI_SQUARED_CLASSES
}
fn default_chi_squared_threshold() -> f64 {
    DEFAULT_CHI_SQUARED_THRESHOLD
}
fn default_chi_squared_repetitions() -> usize {
    DEFAULT_CHI_SQUARED_REPETITIONS
}
fn default_runs_sample_size() -> usize {
    DEFAULT_RUNS_SAMPLE_SIZE
}
fn default_runs_threshold() -> f64 {
    DEFAULT_RUNS_THRESHOLD
}
fn default_runs_repetitions() -> usize {
    DEFAULT_RUNS_REPETITIONS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_path(),
            seed: None,
        }
    }
}

impl Default for ChiSquaredConfig {
    fn default() -> Self {
        Self {
            sample_size: default_chi_squared_sample_size(),
            classes: default_chi_squared_classes(),
            threshold: default_chi_squared_threshold(),
            repetitions: default_chi_squared_repetitions(),
        }
    }
}

impl Default for RunsConfig {
    fn default() -> Self {
        Self {
            sample_size: default_runs_sample_size(),
            threshold: default_runs_threshold(),
            repetitions: default_runs_repetitions(),
            degenerate: DegeneratePolicy::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it with defaults if missing
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Check that every section describes something runnable
    pub fn validate(&self) -> Result<()> {
        self.validate_chi_squared()?;
        self.validate_runs()
    }

    /// Check the sections the chi-squared command reads
    pub fn validate_chi_squared(&self) -> Result<()> {
        self.validate_common()?;
        ChiSquaredTest::from_config(&self.chi_squared)?;
        check_repetitions(self.chi_squared.repetitions)
    }

    /// Check the sections the runs command reads
    pub fn validate_runs(&self) -> Result<()> {
        self.validate_common()?;
        RunsTest::from_config(&self.runs)?;
        check_repetitions(self.runs.repetitions)
    }

    /// Source and output settings shared by both test commands
    fn validate_common(&self) -> Result<()> {
        let backend = self.source.backend.to_lowercase();
        if !available_sources().iter().any(|s| s.name == backend) {
            return Err(Error::Config(format!(
                "Unknown entropy source: {}",
                self.source.backend
            )));
        }

        if get_formatter(&self.output.format).is_none() {
            return Err(Error::Config(format!(
                "Unknown output format: {}",
                self.output.format
            )));
        }

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["source", "backend"] => Some(self.source.backend.clone()),
            ["source", "path"] => Some(self.source.path.clone()),
            ["source", "seed"] => Some(
                self.source
                    .seed
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            ),

            ["chi_squared", "sample_size"] => Some(self.chi_squared.sample_size.to_string()),
            ["chi_squared", "classes"] => Some(self.chi_squared.classes.to_string()),
            ["chi_squared", "threshold"] => Some(self.chi_squared.threshold.to_string()),
            ["chi_squared", "repetitions"] => Some(self.chi_squared.repetitions.to_string()),

            ["runs", "sample_size"] => Some(self.runs.sample_size.to_string()),
            ["runs", "threshold"] => Some(self.runs.threshold.to_string()),
            ["runs", "repetitions"] => Some(self.runs.repetitions.to_string()),
            ["runs", "degenerate"] => Some(self.runs.degenerate.to_string()),

            ["output", "format"] => Some(self.output.format.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["source", "backend"] => {
                self.source.backend = value.to_string();
            }
            ["source", "path"] => {
                self.source.path = value.to_string();
            }
            ["source", "seed"] => {
                self.source.seed = match value {
                    "" | "none" => None,
                    _ => Some(value.parse().map_err(|_| {
                        Error::Config(format!("Invalid seed value: {}", value))
                    })?),
                };
            }

            ["chi_squared", "sample_size"] => {
                self.chi_squared.sample_size = parse_count(value, "sample size")?;
            }
            ["chi_squared", "classes"] => {
                self.chi_squared.classes = parse_count(value, "class count")?;
            }
            ["chi_squared", "threshold"] => {
                self.chi_squared.threshold = parse_threshold(value)?;
            }
            ["chi_squared", "repetitions"] => {
                self.chi_squared.repetitions = parse_count(value, "repetitions")?;
            }

            ["runs", "sample_size"] => {
                self.runs.sample_size = parse_count(value, "sample size")?;
            }
            ["runs", "threshold"] => {
                self.runs.threshold = parse_threshold(value)?;
            }
            ["runs", "repetitions"] => {
                self.runs.repetitions = parse_count(value, "repetitions")?;
            }
            ["runs", "degenerate"] => {
                self.runs.degenerate = value.parse()?;
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "source.backend",
            "source.path",
            "source.seed",
            "chi_squared.sample_size",
            "chi_squared.classes",
            "chi_squared.threshold",
            "chi_squared.repetitions",
            "runs.sample_size",
            "runs.threshold",
            "runs.repetitions",
            "runs.degenerate",
            "output.format",
        ]
    }
}

fn check_repetitions(repetitions: usize) -> Result<()> {
    if repetitions == 0 {
        return Err(Error::Config("Repetitions must be at least 1".to_string()));
    }
    Ok(())
}

fn parse_count(value: &str, what: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

fn parse_threshold(value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid threshold value: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.source.backend, "device");
        assert_eq!(config.source.path, "/dev/hwrng");
        assert_eq!(config.source.seed, None);

        assert_eq!(config.chi_squared.sample_size, 10_000);
        assert_eq!(config.chi_squared.classes, 10);
        assert_eq!(config.chi_squared.threshold, 16.919);
        assert_eq!(config.chi_squared.repetitions, 100);

        assert_eq!(config.runs.sample_size, 1_000);
        assert_eq!(config.runs.threshold, 1.96);
        assert_eq!(config.runs.repetitions, 500);
        assert_eq!(config.runs.degenerate, DegeneratePolicy::Fail);

        assert_eq!(config.output.format, "text");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("source.backend"), Some("device".to_string()));

        config.set("source.backend", "pseudo").unwrap();
        assert_eq!(config.get("source.backend"), Some("pseudo".to_string()));

        config.set("chi_squared.classes", "16").unwrap();
        assert_eq!(config.chi_squared.classes, 16);

        config.set("runs.threshold", "2.576").unwrap();
        assert_eq!(config.get("runs.threshold"), Some("2.576".to_string()));

        config.set("runs.degenerate", "skip").unwrap();
        assert_eq!(config.runs.degenerate, DegeneratePolicy::Skip);
    }

    #[test]
    fn test_seed_get_set() {
        let mut config = Config::default();
        assert_eq!(config.get("source.seed"), Some(String::new()));

        config.set("source.seed", "42").unwrap();
        assert_eq!(config.source.seed, Some(42));
        assert_eq!(config.get("source.seed"), Some("42".to_string()));

        config.set("source.seed", "none").unwrap();
        assert_eq!(config.source.seed, None);
    }

    #[test]
    fn test_every_key_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "{} should be readable", key);
        }
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("chi_squared.sample_size", "lots").is_err());
        assert!(config.set("runs.threshold", "high").is_err());
        assert!(config.set("runs.degenerate", "shrug").is_err());
        assert!(config.set("source.seed", "-1").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.chi_squared.classes = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.runs.sample_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.runs.repetitions = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.source.backend = "lava-lamp".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_scoped_to_command() {
        let mut config = Config::default();
        config.runs.sample_size = 0;
        assert!(config.validate_chi_squared().is_ok());
        assert!(config.validate_runs().is_err());

        let mut config = Config::default();
        config.chi_squared.threshold = -3.0;
        assert!(config.validate_runs().is_ok());
        assert!(config.validate_chi_squared().is_err());

        // Shared sections still apply to both
        let mut config = Config::default();
        config.output.format = "csv".to_string();
        assert!(config.validate_chi_squared().is_err());
        assert!(config.validate_runs().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.source.backend = "pseudo".to_string();
        config.source.seed = Some(9);
        config.runs.repetitions = 50;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[runs]\nrepetitions = 20\ndegenerate = \"non-exceeding\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.runs.repetitions, 20);
        assert_eq!(config.runs.degenerate, DegeneratePolicy::NonExceeding);
        assert_eq!(config.runs.sample_size, 1_000);
        assert_eq!(config.chi_squared, ChiSquaredConfig::default());
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[runs\nrepetitions = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[source]"));
        assert!(toml.contains("[chi_squared]"));
        assert!(toml.contains("[runs]"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("degenerate = \"fail\""));
        assert!(!toml.contains("seed"));
    }
}
