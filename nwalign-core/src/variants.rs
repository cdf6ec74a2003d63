//! Residue substitutions of a target sequence relative to a reference
//!
//! Positions are 1-based and count the target's own residues, so a call can
//! be mapped straight onto the target's numbering.

use crate::aligner::Aligner;
use crate::alignment::{Alignment, GAP};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A column where target and reference carry different residues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// 1-based residue number in the target
    pub position: usize,
    pub reference: char,
    pub target: char,
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.reference, self.target)
    }
}

/// Collect substitutions from an alignment of target (s1) against reference (s2).
/// Gap columns advance the target numbering when the target has a residue but
/// never produce a call.
pub fn substitutions(alignment: &Alignment) -> Vec<Substitution> {
    let mut calls = Vec::new();
    let mut position = 0;

    for (target, reference) in alignment.columns() {
        if target != GAP {
            position += 1;
        }
        if target != GAP && reference != GAP && target != reference {
            calls.push(Substitution {
                position,
                reference,
                target,
            });
        }
    }

    calls
}

/// Align `target` against `reference` and report every substituted residue
pub fn call_substitutions(target: &str, reference: &str, aligner: &Aligner) -> Result<Vec<Substitution>> {
    let alignment = aligner.align(target, reference)?;

    debug_assert_eq!(alignment.ungapped_s1(), target);
    debug_assert_eq!(alignment.ungapped_s2(), reference);
    debug_assert_eq!(
        alignment.aligned_s1().chars().count(),
        alignment.aligned_s2().chars().count()
    );

    let calls = substitutions(&alignment);
    log::debug!(
        "{} substitutions over {} alignment columns",
        calls.len(),
        alignment.len()
    );
    Ok(calls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_skips_target_gaps() {
        // target HEAGAWGHE-E against reference -PA--W-HEAE
        let aligner = Aligner::new().with_matrix(std::sync::Arc::new(
            crate::matrix::SubstitutionMatrix::blosum50(),
        ));
        let calls = call_substitutions("HEAGAWGHEE", "PAWHEAE", &aligner).unwrap();
        assert_eq!(
            calls,
            vec![Substitution {
                position: 2,
                reference: 'P',
                target: 'E',
            }]
        );
        assert_eq!(calls[0].to_string(), "P->E");
    }

    #[test]
    fn test_point_mutations() {
        let calls = call_substitutions("MKTAYIAKQR", "MKTAWIAKHR", &Aligner::default()).unwrap();
        let rendered: Vec<String> = calls
            .iter()
            .map(|c| format!("{}{}", c.position, c))
            .collect();
        assert_eq!(rendered, vec!["5W->Y", "9H->Q"]);
    }

    #[test]
    fn test_identical_sequences_have_no_calls() {
        let calls = call_substitutions("PAWHEAE", "PAWHEAE", &Aligner::default()).unwrap();
        assert!(calls.is_empty());
    }

    #[test]
    fn test_lookup_error_is_propagated() {
        let err = call_substitutions("PAWBEAE", "PAWHEAE", &Aligner::default()).unwrap_err();
        assert!(err.is_lookup());
    }
}
