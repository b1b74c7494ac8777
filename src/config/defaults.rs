//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default entropy backend
pub const DEFAULT_BACKEND: &str = "device";

/// Default device path (also the dump file for the replay backend)
pub const DEFAULT_DEVICE_PATH: &str = crate::constants::device::HWRNG_PATH;

/// Chi-squared: words per trial
pub const DEFAULT_CHI_SQUARED_SAMPLE_SIZE: usize = 10_000;

/// Chi-squared: residue classes
pub const DEFAULT_CHI_SQUARED_CLASSES: usize = 10;

/// Chi-squared: critical value for 9 degrees of freedom at the 5% level
pub const DEFAULT_CHI_SQUARED_THRESHOLD: f64 = 16.919;

/// Chi-squared: trials per run
pub const DEFAULT_CHI_SQUARED_REPETITIONS: usize = 100;

/// Runs test: words per trial
pub const DEFAULT_RUNS_SAMPLE_SIZE: usize = 1_000;

/// Runs test: two-tailed z critical value at the 5% level
pub const DEFAULT_RUNS_THRESHOLD: f64 = 1.96;

/// Runs test: trials per run
pub const DEFAULT_RUNS_REPETITIONS: usize = 500;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "hwrng-stats";
