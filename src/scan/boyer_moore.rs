//! Boyer-Moore exact search
//!
//! The pattern is compared right-to-left against each alignment. On a
//! mismatch the alignment advances by the larger of two precomputed shifts:
//!
//! - bad-character rule: line the mismatched text symbol up with its last
//!   occurrence in the pattern
//! - good-suffix rule: line the already-matched suffix up with its next
//!   occurrence (or the longest border) in the pattern
//!
//! Results are identical to a naive scan, overlapping matches included.

use crate::alphabet::Alphabet;
use crate::error::{Result, SeqError};

/// Preprocessed pattern for Boyer-Moore search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoyerMoore {
    alphabet: Alphabet,
    pattern: Vec<u8>,
    /// Last index of each symbol in the pattern, -1 if absent
    occ: [isize; 256],
    /// Border positions from the good-suffix preprocessing
    f: Vec<usize>,
    /// Good-suffix shifts
    s: Vec<usize>,
}

impl BoyerMoore {
    /// Preprocess `pattern` for search over `alphabet`.
    ///
    /// An empty pattern has degenerate good-suffix tables and is rejected.
    pub fn new(alphabet: &Alphabet, pattern: &[u8]) -> Result<Self> {
        if pattern.is_empty() {
            return Err(SeqError::EmptyInput("Boyer-Moore pattern is empty"));
        }
        alphabet.validate(pattern)?;

        let occ = bad_character_table(pattern);
        let (f, s) = good_suffix_tables(pattern);

        Ok(Self {
            alphabet: alphabet.clone(),
            pattern: pattern.to_vec(),
            occ,
            f,
            s,
        })
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Last index of `symbol` in the pattern, or -1
    pub fn last_occurrence(&self, symbol: u8) -> isize {
        self.occ[symbol as usize]
    }

    /// Border table `f`, length `|pattern| + 1`
    pub fn border_table(&self) -> &[usize] {
        &self.f
    }

    /// Good-suffix shift table `s`, length `|pattern| + 1`
    pub fn shift_table(&self) -> &[usize] {
        &self.s
    }

    /// Start offsets of every occurrence of the pattern in `text`, ascending.
    ///
    /// The text is checked against the alphabet before scanning.
    pub fn search(&self, text: &[u8]) -> Result<Vec<usize>> {
        self.alphabet.validate(text)?;

        let m = self.pattern.len();
        let n = text.len();
        let mut res = Vec::new();
        let mut i = 0;

        while i + m <= n {
            let mut j = m as isize - 1;
            while j >= 0 && self.pattern[j as usize] == text[i + j as usize] {
                j -= 1;
            }

            if j < 0 {
                res.push(i);
                i += self.s[0];
            } else {
                let c = text[i + j as usize];
                let good_suffix = self.s[j as usize + 1] as isize;
                let bad_char = j - self.occ[c as usize];
                i += good_suffix.max(bad_char) as usize;
            }
        }

        Ok(res)
    }
}

fn bad_character_table(pattern: &[u8]) -> [isize; 256] {
    let mut occ = [-1isize; 256];
    for (i, &c) in pattern.iter().enumerate() {
        occ[c as usize] = i as isize;
    }
    occ
}

/// Two-pass good-suffix preprocessing.
///
/// The first pass matches the pattern against itself right-to-left to fill
/// the border table `f`, recording shifts for suffixes that reoccur. The
/// second pass fills the remaining shifts from the widest border `f[0]`.
fn good_suffix_tables(pattern: &[u8]) -> (Vec<usize>, Vec<usize>) {
    let m = pattern.len();
    let mut f = vec![0usize; m + 1];
    let mut s = vec![0usize; m + 1];

    let mut i = m;
    let mut j = m + 1;
    f[i] = j;
    while i > 0 {
        while j <= m && pattern[i - 1] != pattern[j - 1] {
            if s[j] == 0 {
                s[j] = j - i;
            }
            j = f[j];
        }
        i -= 1;
        j -= 1;
        f[i] = j;
    }

    j = f[0];
    for i in 0..=m {
        if s[i] == 0 {
            s[i] = j;
        }
        if i == j {
            j = f[j];
        }
    }

    (f, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_dna() {
        let bm = BoyerMoore::new(&Alphabet::new(b"ACTG").unwrap(), b"ACCA").unwrap();
        let res = bm
            .search(b"ATAGAACCAATGAACCATGATGAACCATGGATACCCAACCACC")
            .unwrap();
        assert_eq!(res, vec![5, 13, 23, 37]);
    }

    #[test]
    fn test_good_suffix_tables() {
        let alphabet = Alphabet::new(b"ab").unwrap();
        let bm = BoyerMoore::new(&alphabet, b"abbabab").unwrap();
        assert_eq!(bm.border_table(), &[5, 6, 4, 5, 6, 7, 7, 8]);
        assert_eq!(bm.shift_table(), &[5, 5, 5, 5, 2, 5, 4, 1]);
    }

    #[test]
    fn test_bad_character_table() {
        let bm = BoyerMoore::new(&Alphabet::dna(), b"ACCA").unwrap();
        assert_eq!(bm.last_occurrence(b'A'), 3);
        assert_eq!(bm.last_occurrence(b'C'), 2);
        assert_eq!(bm.last_occurrence(b'G'), -1);
    }

    #[test]
    fn test_overlapping_matches() {
        let bm = BoyerMoore::new(&Alphabet::dna(), b"AA").unwrap();
        assert_eq!(bm.search(b"AAAAA").unwrap(), vec![0, 1, 2, 3]);

        let bm = BoyerMoore::new(&Alphabet::dna(), b"ACAC").unwrap();
        assert_eq!(bm.search(b"ACACACAC").unwrap(), vec![0, 2, 4]);
    }

    #[test]
    fn test_text_shorter_than_pattern() {
        let bm = BoyerMoore::new(&Alphabet::dna(), b"GATTACA").unwrap();
        assert!(bm.search(b"GATT").unwrap().is_empty());
        assert!(bm.search(b"").unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_pattern() {
        let bm = BoyerMoore::new(&Alphabet::dna(), b"G").unwrap();
        assert_eq!(bm.search(b"GAGTG").unwrap(), vec![0, 2, 4]);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(
            BoyerMoore::new(&Alphabet::dna(), b""),
            Err(SeqError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_invalid_symbols() {
        let dna = Alphabet::dna();
        assert!(matches!(
            BoyerMoore::new(&dna, b"ACU"),
            Err(SeqError::InvalidSymbol { symbol: b'U', position: 2 })
        ));

        let bm = BoyerMoore::new(&dna, b"AC").unwrap();
        assert!(matches!(
            bm.search(b"ACNAC"),
            Err(SeqError::InvalidSymbol { symbol: b'N', position: 2 })
        ));
    }
}
