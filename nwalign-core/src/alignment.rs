//! Gapped pairwise alignment result

use serde::Serialize;
use std::fmt;

/// Symbol inserted where one sequence has no residue
pub const GAP: char = '-';

const DEFAULT_DISPLAY_WIDTH: usize = 60;

/// Two equal-length gapped strings plus the optimal global score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    aligned_s1: String,
    aligned_s2: String,
    score: i64,
}

impl Alignment {
    pub(crate) fn new(aligned_s1: String, aligned_s2: String, score: i64) -> Self {
        debug_assert_eq!(aligned_s1.chars().count(), aligned_s2.chars().count());
        Self {
            aligned_s1,
            aligned_s2,
            score,
        }
    }

    pub fn aligned_s1(&self) -> &str {
        &self.aligned_s1
    }

    pub fn aligned_s2(&self) -> &str {
        &self.aligned_s2
    }

    /// Score of the optimal path (bottom-right DP cell)
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.aligned_s1.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_s1.is_empty()
    }

    /// Column-wise pairs, left to right
    pub fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.aligned_s1.chars().zip(self.aligned_s2.chars())
    }

    /// First sequence with gaps removed
    pub fn ungapped_s1(&self) -> String {
        self.aligned_s1.chars().filter(|&c| c != GAP).collect()
    }

    /// Second sequence with gaps removed
    pub fn ungapped_s2(&self) -> String {
        self.aligned_s2.chars().filter(|&c| c != GAP).collect()
    }

    pub fn into_pair(self) -> (String, String) {
        (self.aligned_s1, self.aligned_s2)
    }

    /// Columns with the same residue on both sides
    pub fn matches(&self) -> usize {
        self.columns()
            .filter(|&(a, b)| a != GAP && b != GAP && a == b)
            .count()
    }

    /// Columns pairing two different residues
    pub fn mismatches(&self) -> usize {
        self.columns()
            .filter(|&(a, b)| a != GAP && b != GAP && a != b)
            .count()
    }

    /// Columns with a gap on either side
    pub fn gaps(&self) -> usize {
        self.columns().filter(|&(a, b)| a == GAP || b == GAP).count()
    }

    /// Fraction of columns that are identical residue pairs (0.0 when empty)
    pub fn identity(&self) -> f64 {
        let columns = self.len();
        if columns == 0 {
            return 0.0;
        }
        self.matches() as f64 / columns as f64
    }

    /// `|` for identical pairs, `.` for mismatches, space for gap columns
    pub fn midline(&self) -> String {
        self.columns()
            .map(|(a, b)| {
                if a == GAP || b == GAP {
                    ' '
                } else if a == b {
                    '|'
                } else {
                    '.'
                }
            })
            .collect()
    }

    /// Three-line blocks (s1, midline, s2) wrapped at `width` columns
    pub fn render(&self, width: usize) -> String {
        let width = width.max(1);
        let top: Vec<char> = self.aligned_s1.chars().collect();
        let mid: Vec<char> = self.midline().chars().collect();
        let bottom: Vec<char> = self.aligned_s2.chars().collect();

        let mut out = String::new();
        for (block, start) in (0..top.len()).step_by(width).enumerate() {
            let end = (start + width).min(top.len());
            if block > 0 {
                out.push('\n');
            }
            for row in [&top, &mid, &bottom] {
                out.extend(&row[start..end]);
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_DISPLAY_WIDTH))
    }
}
