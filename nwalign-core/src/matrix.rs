//! Substitution matrices
//!
//! A matrix is read from a plain text resource: the first line lists the N
//! alphabet symbols as one contiguous string, followed by N rows of N
//! whitespace-separated integer scores. Row `i` scores `alphabet[i]` against
//! every `alphabet[j]` in order. BLOSUM62 and BLOSUM50 ship with the crate.

use crate::alignment::GAP;
use crate::error::{AlignError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Alphabet size of the standard one-letter amino acid codes
pub const AMINO_ACID_ALPHABET_SIZE: usize = 20;

const BLOSUM62_TABLE: &str = include_str!("../data/blosum62.txt");
const BLOSUM50_TABLE: &str = include_str!("../data/blosum50.txt");

static SHARED_DEFAULT: OnceLock<Arc<SubstitutionMatrix>> = OnceLock::new();

/// Square score table over a fixed alphabet. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    name: String,
    alphabet: Vec<char>,
    /// size x size scores, row-major
    scores: Vec<i32>,
}

impl SubstitutionMatrix {
    /// Parse a matrix resource whose alphabet must hold exactly `expected_size` symbols.
    ///
    /// Nothing is constructed unless every line validates. Scores are kept
    /// exactly as given; no symmetry is imposed.
    pub fn parse(text: &str, expected_size: usize) -> Result<Self> {
        if expected_size == 0 {
            return Err(AlignError::format("alphabet size must be at least 1"));
        }

        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != expected_size + 1 {
            return Err(AlignError::format(format!(
                "expected exactly {} lines (one alphabet line and {} score rows), found {}",
                expected_size + 1,
                expected_size,
                lines.len()
            )));
        }

        let alphabet: Vec<char> = lines[0].trim().chars().collect();
        if alphabet.len() != expected_size {
            return Err(AlignError::format_at(
                1,
                format!(
                    "alphabet line must contain exactly {} symbols, found {}",
                    expected_size,
                    alphabet.len()
                ),
            ));
        }
        for (i, symbol) in alphabet.iter().enumerate() {
            if *symbol == GAP {
                return Err(AlignError::format_at(
                    1,
                    format!("alphabet may not contain the gap symbol '{}'", GAP),
                ));
            }
            if alphabet[..i].contains(symbol) {
                return Err(AlignError::format_at(
                    1,
                    format!("alphabet symbol '{}' appears more than once", symbol),
                ));
            }
        }

        let mut scores = Vec::with_capacity(expected_size * expected_size);
        for (row, line) in lines[1..].iter().enumerate() {
            let line_no = row + 2;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != expected_size {
                return Err(AlignError::format_at(
                    line_no,
                    format!("expected {} scores, found {}", expected_size, fields.len()),
                ));
            }
            for field in fields {
                let value = field.parse::<i32>().map_err(|_| {
                    AlignError::format_at(line_no, format!("'{}' is not an integer score", field))
                })?;
                scores.push(value);
            }
        }

        Ok(Self {
            name: "custom".to_string(),
            alphabet,
            scores,
        })
    }

    /// Read a matrix resource from any reader
    pub fn from_reader<R: Read>(mut reader: R, expected_size: usize) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text, expected_size)
    }

    /// Load a 20-symbol amino acid matrix from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with_size(path, AMINO_ACID_ALPHABET_SIZE)
    }

    /// Load a matrix of arbitrary alphabet size from a file. The matrix is
    /// named after the file stem.
    pub fn from_file_with_size<P: AsRef<Path>>(path: P, expected_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let matrix = Self::parse(&text, expected_size)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| matrix.name.clone());
        log::debug!("Loaded {}x{} matrix '{}' from {}", expected_size, expected_size, name, path.display());
        Ok(matrix.with_name(name))
    }

    /// Rename the matrix
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// The bundled BLOSUM62 table
    pub fn blosum62() -> Self {
        BuiltinMatrix::Blosum62.load()
    }

    /// The bundled BLOSUM50 table
    pub fn blosum50() -> Self {
        BuiltinMatrix::Blosum50.load()
    }

    /// Process-wide BLOSUM62 instance, built on first use and shared read-only
    pub fn shared_default() -> Arc<SubstitutionMatrix> {
        SHARED_DEFAULT
            .get_or_init(|| Arc::new(Self::blosum62()))
            .clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Number of alphabet symbols (N)
    pub fn size(&self) -> usize {
        self.alphabet.len()
    }

    /// Row/column index of `symbol`, or a lookup error if it is not in the alphabet
    pub fn index_of(&self, symbol: char) -> Result<usize> {
        self.alphabet
            .iter()
            .position(|&s| s == symbol)
            .ok_or_else(|| AlignError::lookup(symbol, &self.alphabet))
    }

    /// Substitution score of `a` against `b`
    pub fn score(&self, a: char, b: char) -> Result<i32> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Ok(self.score_at(i, j))
    }

    /// Score by alphabet indices. Indices must come from [`Self::index_of`].
    pub(crate) fn score_at(&self, i: usize, j: usize) -> i32 {
        self.scores[i * self.alphabet.len() + j]
    }

    /// Resolve every symbol of `sequence` to its alphabet index
    pub fn encode(&self, sequence: &str) -> Result<Vec<usize>> {
        sequence.chars().map(|c| self.index_of(c)).collect()
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (i + 1..n).all(|j| self.score_at(i, j) == self.score_at(j, i)))
    }
}

impl Default for SubstitutionMatrix {
    fn default() -> Self {
        Self::blosum62()
    }
}

impl FromStr for SubstitutionMatrix {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, AMINO_ACID_ALPHABET_SIZE)
    }
}

/// Writes the matrix back in its resource format
impl fmt::Display for SubstitutionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alphabet: String = self.alphabet.iter().collect();
        writeln!(f, "{}", alphabet)?;
        for row in self.scores.chunks(self.alphabet.len()) {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>2}", v)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Matrices bundled with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinMatrix {
    #[default]
    Blosum62,
    Blosum50,
}

impl BuiltinMatrix {
    pub const ALL: [BuiltinMatrix; 2] = [BuiltinMatrix::Blosum62, BuiltinMatrix::Blosum50];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinMatrix::Blosum62 => "BLOSUM62",
            BuiltinMatrix::Blosum50 => "BLOSUM50",
        }
    }

    fn table(&self) -> &'static str {
        match self {
            BuiltinMatrix::Blosum62 => BLOSUM62_TABLE,
            BuiltinMatrix::Blosum50 => BLOSUM50_TABLE,
        }
    }

    /// Parse the bundled table
    pub fn load(&self) -> SubstitutionMatrix {
        SubstitutionMatrix::parse(self.table(), AMINO_ACID_ALPHABET_SIZE)
            .expect("bundled substitution matrix is well-formed")
            .with_name(self.name())
    }
}

impl fmt::Display for BuiltinMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinMatrix {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blosum62" => Ok(BuiltinMatrix::Blosum62),
            "blosum50" => Ok(BuiltinMatrix::Blosum50),
            other => Err(format!(
                "unknown matrix '{}' (available: blosum62, blosum50)",
                other
            )),
        }
    }
}
