//! Error types for matrix construction and alignment

use thiserror::Error;

/// Errors raised while loading a substitution matrix or aligning sequences
#[derive(Debug, Error)]
pub enum AlignError {
    /// The matrix resource is malformed
    #[error("{}", format_message(.line, .message))]
    Format {
        /// 1-based resource line at fault, when one can be named
        line: Option<usize>,
        message: String,
    },

    /// A symbol is not part of the matrix alphabet
    #[error("invalid symbol '{symbol}': expected one of {alphabet}")]
    Lookup { symbol: char, alphabet: String },

    /// The matrix resource could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_message(line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("Matrix format error at line {}: {}", line, message),
        None => format!("Matrix format error: {}", message),
    }
}

impl AlignError {
    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format {
            line: None,
            message: message.into(),
        }
    }

    pub fn format_at<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Format {
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn lookup(symbol: char, alphabet: &[char]) -> Self {
        Self::Lookup {
            symbol,
            alphabet: alphabet.iter().collect(),
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}

/// Result type for matrix and alignment operations
pub type Result<T> = std::result::Result<T, AlignError>;
