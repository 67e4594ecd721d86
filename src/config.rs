//! Layered configuration.
//!
//! Settings are merged from, lowest to highest priority:
//!
//! 1. built-in defaults ([`Config::default`])
//! 2. `config.toml` in the platform config directory
//!    (e.g. `~/.config/dup/config.toml` on Linux)
//! 3. environment variables prefixed with `DUP_` (e.g. `DUP_CHUNK_SIZE`)
//! 4. command-line flags ([`ScanOptions::from_cli`])

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::DEFAULT_CHUNK_SIZE;
use crate::error::DupError;

/// Persistent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bytes read from each file per comparison step.
    pub chunk_size: u64,
    /// Move duplicates to the trash instead of removing them.
    pub trash: bool,
    /// Default report format.
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE as u64,
            trash: false,
            output: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Load defaults, the user config file (if present) and `DUP_` variables.
    ///
    /// # Errors
    ///
    /// [`DupError::Config`] if a source is malformed or the result is invalid.
    pub fn load() -> Result<Self, DupError> {
        Self::load_from(Self::config_path().as_deref())
    }

    /// Like [`Config::load`] but reading the TOML file at `path` instead.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// [`DupError::Config`] if a source is malformed or the result is invalid.
    pub fn load_from(path: Option<&Path>) -> Result<Self, DupError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed("DUP_"));

        let config: Config = figment.extract().map_err(|e| DupError::Config {
            path: path.map_or_else(|| PathBuf::from("<environment>"), Path::to_path_buf),
            message: e.to_string(),
        })?;
        config.validate().map_err(|message| DupError::Config {
            path: path.map_or_else(|| PathBuf::from("<environment>"), Path::to_path_buf),
            message,
        })?;
        Ok(config)
    }

    /// Reject settings the engine cannot use.
    ///
    /// # Errors
    ///
    /// A message describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be at least 1 byte".to_string());
        }
        if usize::try_from(self.chunk_size).is_err() {
            return Err(format!("chunk_size {} is too large", self.chunk_size));
        }
        Ok(())
    }

    /// Platform-specific location of `config.toml`.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dup").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Directories in input order
    pub dirs: Vec<PathBuf>,
    /// Cross-directory-only comparison
    pub cross: bool,
    /// Recursive listing
    pub recursive: bool,
    /// Comparison chunk size in bytes
    pub chunk_size: usize,
    /// Report format
    pub output: OutputFormat,
    /// Move to trash instead of permanent deletion
    pub trash: bool,
    /// Delete without prompting
    pub assume_yes: bool,
    /// Never prompt or delete
    pub dry_run: bool,
    /// Wrap the table to this many columns
    pub table_width: Option<usize>,
}

impl ScanOptions {
    /// Merge CLI flags over `config`.
    ///
    /// # Errors
    ///
    /// [`DupError::InvalidArguments`] for a zero or oversized `--chunk-size`.
    pub fn from_cli(cli: &Cli, config: &Config) -> Result<Self, DupError> {
        let chunk_size = cli.chunk_size.unwrap_or(config.chunk_size);
        if chunk_size == 0 {
            return Err(DupError::InvalidArguments(
                "Chunk size must be at least 1 byte.".to_string(),
            ));
        }
        let chunk_size = usize::try_from(chunk_size).map_err(|_| {
            DupError::InvalidArguments(format!("Chunk size {chunk_size} is too large."))
        })?;

        Ok(Self {
            dirs: cli.dirs.clone(),
            cross: cli.cross,
            recursive: cli.recursive,
            chunk_size,
            output: cli.output.unwrap_or(config.output),
            trash: cli.trash || config.trash,
            assume_yes: cli.yes,
            dry_run: cli.dry_run,
            table_width: None,
        })
    }
}
