//! Configuration handling for the nwalign CLI
//!
//! Supports loading configuration from nwalign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use clap::ValueEnum;
use nwalign_core::{Aligner, BuiltinMatrix, SubstitutionMatrix, AMINO_ACID_ALPHABET_SIZE, DEFAULT_GAP_PENALTY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::CliResult;

pub const DEFAULT_CONFIG_FILE: &str = "nwalign.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub align: AlignConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Score added for every gap column (zero or negative)
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: i32,

    /// Bundled substitution matrix
    #[serde(default)]
    pub matrix: BuiltinMatrix,

    /// Custom matrix resource; takes precedence over `matrix`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix_path: Option<PathBuf>,

    /// Alphabet size expected in `matrix_path`
    #[serde(default = "default_matrix_size")]
    pub matrix_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Columns per block in text output
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Default value functions
fn default_gap_penalty() -> i32 { DEFAULT_GAP_PENALTY }
fn default_matrix_size() -> usize { AMINO_ACID_ALPHABET_SIZE }
fn default_line_width() -> usize { 60 }

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            gap_penalty: default_gap_penalty(),
            matrix: BuiltinMatrix::default(),
            matrix_path: None,
            matrix_size: default_matrix_size(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            line_width: default_line_width(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config)
            .expect("Failed to serialize default configuration")
    }
}

impl AlignConfig {
    /// Load the configured matrix: the custom resource if one is set, else the bundled table
    pub fn load_matrix(&self) -> CliResult<SubstitutionMatrix> {
        match &self.matrix_path {
            Some(path) => {
                if !path.exists() {
                    return Err(crate::error::CliError::file_not_found(path.clone()));
                }
                Ok(SubstitutionMatrix::from_file_with_size(path, self.matrix_size)?)
            }
            None => Ok(self.matrix.load()),
        }
    }

    /// Build an aligner from the configured gap penalty and matrix
    pub fn build_aligner(&self) -> CliResult<Aligner> {
        if self.gap_penalty > 0 {
            log::warn!(
                "Gap penalty {} is positive; gaps will be rewarded instead of penalized",
                self.gap_penalty
            );
        }

        let matrix = self.load_matrix()?;
        log::info!("Using matrix {} with gap penalty {}", matrix.name(), self.gap_penalty);

        Ok(Aligner::new()
            .with_gap_penalty(self.gap_penalty)
            .with_matrix(Arc::new(matrix)))
    }
}
