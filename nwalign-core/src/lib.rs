//! nwalign core library
//!
//! Substitution matrices, Needleman-Wunsch global alignment with a linear gap
//! penalty, and residue substitution calls derived from an alignment.
//!
//! ```
//! use nwalign_core::{align, SubstitutionMatrix};
//!
//! let matrix = SubstitutionMatrix::blosum50();
//! let aln = align("HEAGAWGHEE", "PAWHEAE", -8, &matrix).unwrap();
//! assert_eq!(aln.score(), 1);
//! assert_eq!(aln.aligned_s1(), "HEAGAWGHE-E");
//! ```

pub mod error;
pub mod matrix;
pub mod alignment;
pub mod aligner;
pub mod variants;

// Re-export commonly used types and functions
pub use error::{AlignError, Result};
pub use matrix::{BuiltinMatrix, SubstitutionMatrix, AMINO_ACID_ALPHABET_SIZE};
pub use alignment::{Alignment, GAP};
pub use aligner::{align, align_default, fill, Aligner, DpMatrix, Move, DEFAULT_GAP_PENALTY};
pub use variants::{call_substitutions, substitutions, Substitution};

/// Version information for the nwalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
