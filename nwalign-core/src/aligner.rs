//! Needleman-Wunsch global alignment with a constant per-residue gap penalty
//!
//! `s1` runs down the rows of the DP grid and `s2` across the columns. Each
//! cell keeps the best score for the two prefixes plus a backtrack pointer;
//! the traceback walks pointers from the bottom-right corner to the origin.

use crate::alignment::{Alignment, GAP};
use crate::error::Result;
use crate::matrix::SubstitutionMatrix;
use std::sync::Arc;

/// Gap penalty used when the caller does not supply one
pub const DEFAULT_GAP_PENALTY: i32 = -8;

/// Backtrack pointer of a DP cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Origin cell (0, 0)
    Terminal,
    /// Residue pair, from (i-1, j-1)
    Diagonal,
    /// Gap in s1 consuming one residue of s2, from (i, j-1)
    Left,
    /// Gap in s2 consuming one residue of s1, from (i-1, j)
    Up,
}

/// Filled score and pointer grids for one pair of sequences.
///
/// Cells hold `i64` so that any `i32` gap penalty or matrix score summed
/// along a path of allocatable length stays in range.
#[derive(Debug, Clone)]
pub struct DpMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<i64>,
    moves: Vec<Move>,
}

impl DpMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            scores: vec![0; rows * cols],
            moves: vec![Move::Terminal; rows * cols],
        }
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// len(s1) + 1
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// len(s2) + 1
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn score(&self, i: usize, j: usize) -> i64 {
        self.scores[self.idx(i, j)]
    }

    pub fn pointer(&self, i: usize, j: usize) -> Move {
        self.moves[self.idx(i, j)]
    }

    /// Optimal global score
    pub fn final_score(&self) -> i64 {
        self.score(self.rows - 1, self.cols - 1)
    }
}

/// Fill the score and backtrack grids for `s1` (rows) against `s2` (columns).
///
/// Every residue is resolved against the matrix alphabet before the fill
/// starts; an unknown symbol fails the call with a lookup error.
pub fn fill(s1: &str, s2: &str, gap_penalty: i32, matrix: &SubstitutionMatrix) -> Result<DpMatrix> {
    let q = matrix.encode(s1)?;
    let t = matrix.encode(s2)?;

    let gap = i64::from(gap_penalty);
    let mut dp = DpMatrix::new(q.len() + 1, t.len() + 1);

    for i in 1..dp.rows {
        let k = dp.idx(i, 0);
        dp.scores[k] = i as i64 * gap;
        dp.moves[k] = Move::Up;
    }
    for j in 1..dp.cols {
        let k = dp.idx(0, j);
        dp.scores[k] = j as i64 * gap;
        dp.moves[k] = Move::Left;
    }

    for i in 1..dp.rows {
        for j in 1..dp.cols {
            let diagonal = dp.score(i - 1, j - 1) + i64::from(matrix.score_at(q[i - 1], t[j - 1]));
            let left = dp.score(i, j - 1) + gap;
            let up = dp.score(i - 1, j) + gap;

            // Diagonal only on a strict win; left must strictly beat up.
            let (best, step) = if diagonal > left && diagonal > up {
                (diagonal, Move::Diagonal)
            } else if left > up {
                (left, Move::Left)
            } else {
                (up, Move::Up)
            };

            let k = dp.idx(i, j);
            dp.scores[k] = best;
            dp.moves[k] = step;
        }
    }

    Ok(dp)
}

/// Globally align `s1` against `s2`.
///
/// Removing [`GAP`] from either output string gives back the corresponding
/// input, and both output strings have the same length. Empty inputs are
/// allowed and align entirely against gaps.
pub fn align(s1: &str, s2: &str, gap_penalty: i32, matrix: &SubstitutionMatrix) -> Result<Alignment> {
    log::debug!(
        "Aligning {} x {} residues (gap penalty {}, matrix {})",
        s1.chars().count(),
        s2.chars().count(),
        gap_penalty,
        matrix.name()
    );

    let dp = fill(s1, s2, gap_penalty, matrix)?;
    let alignment = traceback(&dp, s1, s2);

    log::trace!("Alignment score {} over {} columns", alignment.score(), alignment.len());
    Ok(alignment)
}

/// Align with [`DEFAULT_GAP_PENALTY`] and the shared BLOSUM62 matrix
pub fn align_default(s1: &str, s2: &str) -> Result<Alignment> {
    align(s1, s2, DEFAULT_GAP_PENALTY, &SubstitutionMatrix::shared_default())
}

fn traceback(dp: &DpMatrix, s1: &str, s2: &str) -> Alignment {
    let q: Vec<char> = s1.chars().collect();
    let t: Vec<char> = s2.chars().collect();

    let capacity = q.len() + t.len();
    let mut top = Vec::with_capacity(capacity);
    let mut bottom = Vec::with_capacity(capacity);

    let mut i = q.len();
    let mut j = t.len();
    loop {
        match dp.pointer(i, j) {
            Move::Terminal => break,
            Move::Diagonal => {
                top.push(q[i - 1]);
                bottom.push(t[j - 1]);
                i -= 1;
                j -= 1;
            }
            Move::Left => {
                top.push(GAP);
                bottom.push(t[j - 1]);
                j -= 1;
            }
            Move::Up => {
                top.push(q[i - 1]);
                bottom.push(GAP);
                i -= 1;
            }
        }
    }

    Alignment::new(
        top.into_iter().rev().collect(),
        bottom.into_iter().rev().collect(),
        dp.final_score(),
    )
}

/// Gap penalty and matrix bundled for repeated use.
///
/// Cloning shares the matrix; an `Aligner` can be used from many threads at once.
#[derive(Debug, Clone)]
pub struct Aligner {
    gap_penalty: i32,
    matrix: Arc<SubstitutionMatrix>,
}

impl Aligner {
    pub fn new() -> Self {
        Self {
            gap_penalty: DEFAULT_GAP_PENALTY,
            matrix: SubstitutionMatrix::shared_default(),
        }
    }

    pub fn with_gap_penalty(mut self, gap_penalty: i32) -> Self {
        self.gap_penalty = gap_penalty;
        self
    }

    pub fn with_matrix(mut self, matrix: Arc<SubstitutionMatrix>) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn gap_penalty(&self) -> i32 {
        self.gap_penalty
    }

    pub fn matrix(&self) -> &SubstitutionMatrix {
        &self.matrix
    }

    pub fn align(&self, s1: &str, s2: &str) -> Result<Alignment> {
        align(s1, s2, self.gap_penalty, &self.matrix)
    }

    pub fn fill(&self, s1: &str, s2: &str) -> Result<DpMatrix> {
        fill(s1, s2, self.gap_penalty, &self.matrix)
    }
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignError;

    fn two_letter(text: &str) -> SubstitutionMatrix {
        SubstitutionMatrix::parse(text, 2).unwrap()
    }

    #[test]
    fn test_textbook_pair_blosum50() {
        let matrix = SubstitutionMatrix::blosum50();
        let aln = align("HEAGAWGHEE", "PAWHEAE", -8, &matrix).unwrap();
        assert_eq!(aln.score(), 1);
        assert_eq!(aln.aligned_s1(), "HEAGAWGHE-E");
        assert_eq!(aln.aligned_s2(), "-PA--W-HEAE");
    }

    #[test]
    fn test_textbook_pair_blosum62() {
        let aln = align_default("HEAGAWGHEE", "PAWHEAE").unwrap();
        assert_eq!(aln.score(), -8);
        assert_eq!(aln.aligned_s1(), "HEAGAWGHE-E");
        assert_eq!(aln.aligned_s2(), "-PA--W-HEAE");
    }

    #[test]
    fn test_border_initialization() {
        let dp = fill("PAW", "HE", -8, &SubstitutionMatrix::blosum62()).unwrap();
        assert_eq!(dp.rows(), 4);
        assert_eq!(dp.cols(), 3);
        assert_eq!(dp.pointer(0, 0), Move::Terminal);
        assert_eq!(dp.score(0, 0), 0);
        for i in 1..4 {
            assert_eq!(dp.score(i, 0), -8 * i as i64);
            assert_eq!(dp.pointer(i, 0), Move::Up);
        }
        for j in 1..3 {
            assert_eq!(dp.score(0, j), -8 * j as i64);
            assert_eq!(dp.pointer(0, j), Move::Left);
        }
    }

    #[test]
    fn test_three_way_tie_picks_up() {
        // diagonal = -2 + 0, left = up = -1 + -1
        let matrix = two_letter("AB\n-2 -2\n-2 -2\n");
        let dp = fill("A", "A", -1, &matrix).unwrap();
        assert_eq!(dp.pointer(1, 1), Move::Up);

        let aln = align("A", "A", -1, &matrix).unwrap();
        assert_eq!(aln.aligned_s1(), "-A");
        assert_eq!(aln.aligned_s2(), "A-");
        assert_eq!(aln.score(), -2);
    }

    #[test]
    fn test_diagonal_tied_with_left_loses() {
        // At (1, 2): diagonal = -2 + 1, left = 1 + -2, up = -4 + -2
        let matrix = two_letter("AB\n1 -1\n-1 1\n");
        let dp = fill("A", "AA", -2, &matrix).unwrap();
        assert_eq!(dp.score(1, 1), 1);
        assert_eq!(dp.pointer(1, 1), Move::Diagonal);
        assert_eq!(dp.pointer(1, 2), Move::Left);

        let aln = align("A", "AA", -2, &matrix).unwrap();
        assert_eq!(aln.aligned_s1(), "A-");
        assert_eq!(aln.aligned_s2(), "AA");
        assert_eq!(aln.score(), -1);
    }

    #[test]
    fn test_left_up_tie_prefers_up() {
        let matrix = two_letter("AB\n3 -1\n-1 3\n");
        let aln = align("AAB", "AB", -1, &matrix).unwrap();
        assert_eq!(aln.score(), 5);
        assert_eq!(aln.aligned_s1(), "AAB");
        assert_eq!(aln.aligned_s2(), "A-B");
    }

    #[test]
    fn test_gap_in_second_sequence() {
        let matrix = two_letter("AB\n3 -1\n-1 3\n");
        let aln = align("ABBA", "ABA", -2, &matrix).unwrap();
        assert_eq!(aln.score(), 7);
        assert_eq!(aln.aligned_s1(), "ABBA");
        assert_eq!(aln.aligned_s2(), "AB-A");
    }

    #[test]
    fn test_empty_inputs() {
        let matrix = SubstitutionMatrix::blosum62();
        let aln = align("", "PAW", -8, &matrix).unwrap();
        assert_eq!(aln.aligned_s1(), "---");
        assert_eq!(aln.aligned_s2(), "PAW");
        assert_eq!(aln.score(), -24);

        let aln = align("PAW", "", -8, &matrix).unwrap();
        assert_eq!(aln.aligned_s1(), "PAW");
        assert_eq!(aln.aligned_s2(), "---");

        let aln = align("", "", -8, &matrix).unwrap();
        assert!(aln.is_empty());
        assert_eq!(aln.score(), 0);
    }

    #[test]
    fn test_extreme_gap_penalties_do_not_overflow() {
        let matrix = SubstitutionMatrix::blosum62();
        let aln = align("AA", "", -2_000_000_000, &matrix).unwrap();
        assert_eq!((aln.aligned_s1(), aln.aligned_s2()), ("AA", "--"));
        assert_eq!(aln.score(), -4_000_000_000);

        let aln = align("AA", "AA", i32::MIN, &matrix).unwrap();
        assert_eq!((aln.aligned_s1(), aln.aligned_s2()), ("AA", "AA"));
        assert_eq!(aln.score(), 8);

        // Both one-gap paths tie at 2 * i32::MAX; up wins.
        let aln = align("A", "A", i32::MAX, &matrix).unwrap();
        assert_eq!((aln.aligned_s1(), aln.aligned_s2()), ("-A", "A-"));
        assert_eq!(aln.score(), 2 * i64::from(i32::MAX));
    }

    #[test]
    fn test_single_residues() {
        let matrix = SubstitutionMatrix::blosum62();
        let aln = align("W", "A", -8, &matrix).unwrap();
        assert_eq!((aln.aligned_s1(), aln.aligned_s2()), ("W", "A"));
        assert_eq!(aln.score(), -3);

        let aln = align("WA", "A", -8, &matrix).unwrap();
        assert_eq!((aln.aligned_s1(), aln.aligned_s2()), ("WA", "-A"));
        assert_eq!(aln.score(), -4);
    }

    #[test]
    fn test_identity_has_no_gaps() {
        let aln = align_default("MKTAYIAKQR", "MKTAYIAKQR").unwrap();
        assert_eq!(aln.aligned_s1(), "MKTAYIAKQR");
        assert_eq!(aln.aligned_s2(), "MKTAYIAKQR");
        assert_eq!(aln.score(), 49);
    }

    #[test]
    fn test_unknown_residue_propagates_lookup_error() {
        let err = align_default("HEAGXW", "PAW").unwrap_err();
        assert!(err.is_lookup());
        let err = align_default("PAW", "paw").unwrap_err();
        assert!(err.is_lookup());
    }

    #[test]
    fn test_unknown_residue_rejected_against_empty_sequence() {
        // No residue pair is ever scored here, but the symbol is still checked.
        let err = align_default("AX", "").unwrap_err();
        assert!(matches!(err, AlignError::Lookup { symbol: 'X', .. }));
        let err = align_default("", "AX").unwrap_err();
        assert!(err.is_lookup());
    }

    #[test]
    fn test_aligner_configuration() {
        let aligner = Aligner::new()
            .with_gap_penalty(-4)
            .with_matrix(Arc::new(SubstitutionMatrix::blosum62()));
        assert_eq!(aligner.gap_penalty(), -4);
        assert_eq!(aligner.matrix().name(), "BLOSUM62");

        let aln = aligner.align("MKVLAAGIVALLLAAGCSS", "MKVLAGIVALLAAGCS").unwrap();
        assert_eq!(aln.ungapped_s1(), "MKVLAAGIVALLLAAGCSS");
        assert_eq!(aln.ungapped_s2(), "MKVLAGIVALLAAGCS");
        assert_eq!(aln.score(), aligner.fill("MKVLAAGIVALLLAAGCSS", "MKVLAGIVALLAAGCS").unwrap().final_score());
    }

    #[test]
    fn test_default_aligner_matches_free_function() {
        let aligner = Aligner::default();
        assert_eq!(aligner.gap_penalty(), DEFAULT_GAP_PENALTY);
        assert_eq!(
            aligner.align("HEAGAWGHEE", "PAWHEAE").unwrap(),
            align_default("HEAGAWGHEE", "PAWHEAE").unwrap()
        );
    }
}
