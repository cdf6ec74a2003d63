//! Error handling for the nwalign CLI

use nwalign_core::AlignError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nwalign CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Substitution matrix error: {message}")]
    Matrix { message: String },

    #[error("Invalid residue: {message}")]
    InvalidResidue { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat { message: message.into() }
    }

    pub fn parse<S: Into<String>>(file: S, message: S) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn matrix<S: Into<String>>(message: S) -> Self {
        Self::Matrix { message: message.into() }
    }

    pub fn invalid_residue<S: Into<String>>(message: S) -> Self {
        Self::InvalidResidue { message: message.into() }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::io(format!("JSON serialization error: {}", err))
    }
}

impl From<AlignError> for CliError {
    fn from(err: AlignError) -> Self {
        match err {
            AlignError::Format { .. } => Self::matrix(err.to_string()),
            AlignError::Lookup { .. } => Self::invalid_residue(err.to_string()),
            AlignError::Io(io) => Self::io(io.to_string()),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::InvalidFormat { .. } | CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Sequence files must be FASTA or FASTQ; only the first record is used\n\
                 • Pass a sequence directly with --s1/--s2 or --target/--reference"
            );
        }

        CliError::Matrix { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • The first line must list the alphabet as one contiguous string\n\
                 • Follow it with exactly one row of whitespace-separated integers per symbol\n\
                 • Use --matrix-size when the alphabet is not the 20 standard amino acids\n\
                 • Run 'nwalign matrix --show blosum62' to see a valid example"
            );
        }

        CliError::InvalidResidue { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Residues are matched case-sensitively; convert sequences to upper case\n\
                 • Ambiguity codes (B, Z, X) and stop symbols (*) are not in the standard alphabet\n\
                 • Supply a custom matrix with --matrix-file to extend the alphabet"
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your nwalign.toml configuration file\n\
                 • Use 'nwalign config --example' to generate a sample configuration\n\
                 • Verify that all configuration values are valid"
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
