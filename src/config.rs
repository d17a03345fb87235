//! Configuration file loading.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::size::parse_size;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Output location.
    #[serde(default)]
    pub output: OutputConfig,

    /// Defaults offered by the prompts and used with `--no-input`.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Raw file writer tuning.
    #[serde(default)]
    pub writer: WriterConfig,
}

/// Output location configuration.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Fixed destination directory. The working directory is used when unset.
    pub dir: Option<PathBuf>,
}

/// Default request values from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Filename template, may contain `{n}`.
    pub filename: String,
    /// Number of files.
    pub count: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { filename: "dummy{n}".to_string(), count: 1, width: 1920, height: 1080 }
    }
}

/// Raw writer configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Chunk size as a size string (e.g. `"1MB"`).
    pub chunk_size: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { chunk_size: "1MB".to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if one of
    /// its values is out of range.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
        config.validate().map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.defaults.count == 0 {
            return Err("defaults.count must be at least 1".into());
        }
        if self.defaults.width == 0 || self.defaults.height == 0 {
            return Err("defaults.width and defaults.height must be at least 1".into());
        }
        self.chunk_size().map(|_| ())
    }

    /// Raw writer chunk size in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `writer.chunk_size` is not a size string, is zero,
    /// or does not fit in memory.
    pub fn chunk_size(&self) -> Result<usize, String> {
        let bytes = parse_size(&self.writer.chunk_size).map_err(|e| e.to_string())?;
        if bytes == 0 {
            return Err("writer.chunk_size must be greater than zero".into());
        }
        usize::try_from(bytes).map_err(|_| format!("writer.chunk_size {bytes} is too large"))
    }

    /// Destination directory: explicit override, then `output.dir`, then the
    /// working directory.
    #[must_use]
    pub fn output_dir(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.output.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "DUMMYGEN_CONFIG";

/// Where to read configuration from: `--config`, else `$DUMMYGEN_CONFIG`,
/// else the per-user file under `$HOME`.
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    explicit
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| user_config_path(std::env::var_os("HOME").as_deref()))
}

/// `<home>/.config/dummygen/config.toml`, or `dummygen.toml` in the working
/// directory when there is no home.
fn user_config_path(home: Option<&OsStr>) -> PathBuf {
    home.map_or_else(
        || PathBuf::from("dummygen.toml"),
        |home| Path::new(home).join(".config").join("dummygen").join("config.toml"),
    )
}
