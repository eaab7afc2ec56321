//! Burrows-Wheeler Transform
//!
//! `bwt[i]` is the last symbol of the i-th smallest cyclic rotation of the
//! text. No sentinel is added; a text that ends with a unique terminator
//! (`$` by default) can be recovered from the transform alone.
//!
//! Search walks the pattern backwards, narrowing a range of sorted rotations
//! with the LF-mapping. Mapping rows back to text offsets needs the suffix
//! array, which is only recorded when requested at build time. With it,
//! rows whose match would wrap past the end of the text are dropped, so
//! results equal a plain substring search. Without it, rows are counted as
//! rotations.
//!
//! Construction sorts full rotations by direct comparison, so it costs
//! `O(n^2 log n)` in the worst case. Fine for sequences up to a few hundred
//! thousand symbols.

use crate::config::BwtConfig;
use crate::error::{Result, SeqError};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Burrows-Wheeler transform with its LF-mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bwt {
    bwt: Vec<u8>,
    first_column: Vec<u8>,
    /// Row of the first column holding the same occurrence as `bwt[i]`
    lf: Vec<usize>,
    /// Start offset of each sorted rotation
    suffix_array: Option<Vec<usize>>,
    terminator: u8,
}

impl Bwt {
    /// Transform `text`, optionally recording the suffix array
    pub fn build(text: &[u8], build_suffix_array: bool) -> Result<Self> {
        let config = BwtConfig {
            build_suffix_array,
            ..BwtConfig::default()
        };
        Self::with_config(text, &config)
    }

    /// Transform `text` with explicit configuration
    pub fn with_config(text: &[u8], config: &BwtConfig) -> Result<Self> {
        if text.is_empty() {
            return Err(SeqError::EmptyInput("cannot transform an empty text"));
        }

        let n = text.len();
        let rotations = sort_rotations(text, config.parallel_sort_threshold);
        let bwt: Vec<u8> = rotations
            .iter()
            .map(|&start| text[(start + n - 1) % n])
            .collect();

        let suffix_array = config.build_suffix_array.then_some(rotations);
        Ok(Self::from_parts(bwt, suffix_array, config.terminator))
    }

    /// Wrap an existing transform, e.g. one read back from elsewhere.
    ///
    /// Without the suffix array only row-level search and inversion work.
    pub fn from_transformed(bwt: &[u8], terminator: u8) -> Result<Self> {
        if bwt.is_empty() {
            return Err(SeqError::EmptyInput("transform is empty"));
        }
        Ok(Self::from_parts(bwt.to_vec(), None, terminator))
    }

    fn from_parts(bwt: Vec<u8>, suffix_array: Option<Vec<usize>>, terminator: u8) -> Self {
        let c_table = build_c_table(&bwt);

        let mut first_column = Vec::with_capacity(bwt.len());
        for symbol in 0..=255u8 {
            let count = c_table[symbol as usize + 1] - c_table[symbol as usize];
            first_column.extend(std::iter::repeat_n(symbol, count));
        }

        let mut seen = [0usize; 256];
        let lf = bwt
            .iter()
            .map(|&c| {
                let row = c_table[c as usize] + seen[c as usize];
                seen[c as usize] += 1;
                row
            })
            .collect();

        Self {
            bwt,
            first_column,
            lf,
            suffix_array,
            terminator,
        }
    }

    /// The transformed sequence (last column of the rotation matrix)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bwt
    }

    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    pub fn terminator(&self) -> u8 {
        self.terminator
    }

    /// First column of the rotation matrix: the transform's symbols sorted
    pub fn first_column(&self) -> &[u8] {
        &self.first_column
    }

    /// LF-mapping: for each row, the first-column row holding the same
    /// occurrence of `bwt[row]`
    pub fn last_to_first(&self) -> &[usize] {
        &self.lf
    }

    /// Rotation start offsets in sorted order, if recorded
    pub fn suffix_array(&self) -> Option<&[usize]> {
        self.suffix_array.as_deref()
    }

    /// Recover the text from the transform.
    ///
    /// Starts at the row ending with the terminator and follows occurrence
    /// ranks forward through the text. The result equals the original text
    /// when it ended with a unique terminator; otherwise it is the rotation
    /// starting right after the first terminator.
    pub fn inverse(&self) -> Result<Vec<u8>> {
        let start = memchr::memchr(self.terminator, &self.bwt)
            .ok_or(SeqError::MissingTerminator(self.terminator))?;

        let mut first_to_last = vec![0usize; self.lf.len()];
        for (row, &target) in self.lf.iter().enumerate() {
            first_to_last[target] = row;
        }

        let mut res = Vec::with_capacity(self.bwt.len());
        let mut row = start;
        for _ in 0..self.bwt.len() {
            res.push(self.first_column[row]);
            row = first_to_last[row];
        }
        Ok(res)
    }

    /// Sorted rotation rows that start with `pattern`, ascending.
    ///
    /// Empty when the pattern is empty or does not occur. When the suffix
    /// array is recorded, rows whose match wraps around the end of the text
    /// are left out.
    pub fn backward_search(&self, pattern: &[u8]) -> Vec<usize> {
        self.matching_rows(pattern)
            .map(|rows| {
                rows.filter(|&row| self.fits_in_text(row, pattern.len()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of rows [`Bwt::backward_search`] reports for `pattern`
    pub fn count(&self, pattern: &[u8]) -> usize {
        match self.matching_rows(pattern) {
            Some(rows) if self.suffix_array.is_some() => rows
                .filter(|&row| self.fits_in_text(row, pattern.len()))
                .count(),
            Some(rows) => rows.end() - rows.start() + 1,
            None => 0,
        }
    }

    /// Text offsets where `pattern` starts, ascending
    pub fn backward_search_positions(&self, pattern: &[u8]) -> Result<Vec<usize>> {
        let sa = self
            .suffix_array
            .as_ref()
            .ok_or(SeqError::MissingSuffixArray)?;

        let mut positions: Vec<usize> = self
            .backward_search(pattern)
            .into_iter()
            .map(|row| sa[row])
            .collect();
        positions.sort_unstable();
        Ok(positions)
    }

    /// Whether the rotation at `row` holds `len` symbols before wrapping.
    ///
    /// Always true without a suffix array.
    fn fits_in_text(&self, row: usize, len: usize) -> bool {
        self.suffix_array
            .as_ref()
            .is_none_or(|sa| sa[row] + len <= self.bwt.len())
    }

    fn matching_rows(&self, pattern: &[u8]) -> Option<RangeInclusive<usize>> {
        if pattern.is_empty() {
            return None;
        }

        let mut top = 0;
        let mut bottom = self.bwt.len() - 1;
        for &symbol in pattern.iter().rev() {
            let window = &self.bwt[top..=bottom];
            let first = memchr::memchr(symbol, window)?;
            let last = memchr::memrchr(symbol, window)?;
            let (new_top, new_bottom) = (self.lf[top + first], self.lf[top + last]);
            top = new_top;
            bottom = new_bottom;
        }
        Some(top..=bottom)
    }
}

/// Start offsets of all cyclic rotations of `text`, in sorted order.
///
/// The sort is stable, so identical rotations of a periodic text keep
/// ascending offset order and rebuilding is deterministic.
fn sort_rotations(text: &[u8], parallel_threshold: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..text.len()).collect();

    if text.len() > parallel_threshold {
        order.par_sort_by(|&a, &b| compare_rotations(text, a, b));
    } else {
        order.sort_by(|&a, &b| compare_rotations(text, a, b));
    }

    order
}

/// Compare the rotations of `text` starting at `a` and `b`
#[inline]
fn compare_rotations(text: &[u8], a: usize, b: usize) -> Ordering {
    let rot_a = text[a..].iter().chain(&text[..a]);
    let rot_b = text[b..].iter().chain(&text[..b]);
    rot_a.cmp(rot_b)
}

/// Build C-Table: `c[s]` = number of symbols smaller than `s`.
///
/// Has 257 entries so `c[s + 1] - c[s]` is the count of `s`.
fn build_c_table(bwt: &[u8]) -> [usize; 257] {
    let mut counts = [0usize; 256];
    for &c in bwt {
        counts[c as usize] += 1;
    }

    let mut c_table = [0usize; 257];
    for i in 0..256 {
        c_table[i + 1] = c_table[i] + counts[i];
    }
    c_table
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &[u8] = b"TAGACAGAGA$";

    #[test]
    fn test_transform() {
        let bw = Bwt::build(TEXT, false).unwrap();
        assert_eq!(bw.as_bytes(), b"AGGGTCAAAA$");
        assert_eq!(bw.len(), TEXT.len());
        assert!(bw.suffix_array().is_none());
    }

    #[test]
    fn test_suffix_array() {
        let bw = Bwt::build(TEXT, true).unwrap();
        assert_eq!(
            bw.suffix_array().unwrap(),
            &[10, 9, 3, 7, 1, 5, 4, 8, 2, 6, 0]
        );
    }

    #[test]
    fn test_banana() {
        let bw = Bwt::build(b"banana$", true).unwrap();
        assert_eq!(bw.as_bytes(), b"annb$aa");
        assert_eq!(bw.suffix_array().unwrap(), &[6, 5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_first_column() {
        let bw = Bwt::build(TEXT, false).unwrap();
        assert_eq!(bw.first_column(), b"$AAAAACGGGT");
    }

    #[test]
    fn test_last_to_first() {
        let bw = Bwt::build(TEXT, false).unwrap();
        assert_eq!(bw.last_to_first(), &[1, 7, 8, 9, 10, 6, 2, 3, 4, 5, 0]);
    }

    #[test]
    fn test_inverse() {
        let bw = Bwt::build(TEXT, false).unwrap();
        assert_eq!(bw.inverse().unwrap(), TEXT);

        let bw = Bwt::from_transformed(b"ACG$GTAAAAC", b'$').unwrap();
        assert_eq!(bw.inverse().unwrap(), b"ACTAGAGACA$");
    }

    #[test]
    fn test_inverse_without_terminator() {
        let bw = Bwt::build(b"banana", false).unwrap();
        assert!(matches!(
            bw.inverse(),
            Err(SeqError::MissingTerminator(b'$'))
        ));
    }

    #[test]
    fn test_backward_search_rows() {
        let bw = Bwt::build(TEXT, false).unwrap();
        assert_eq!(bw.backward_search(b"AGA"), vec![3, 4, 5]);
        assert_eq!(bw.backward_search(b"CAG"), vec![6]);
        assert_eq!(bw.count(b"A"), 5);
        assert!(bw.backward_search(b"TT").is_empty());
        assert!(bw.backward_search(b"").is_empty());
        assert_eq!(bw.count(b"X"), 0);
    }

    #[test]
    fn test_backward_search_positions() {
        let bw = Bwt::build(TEXT, true).unwrap();
        assert_eq!(bw.backward_search_positions(b"AGA").unwrap(), vec![1, 5, 7]);
        assert_eq!(bw.backward_search_positions(b"GA").unwrap(), vec![2, 6, 8]);
        assert_eq!(bw.backward_search_positions(b"$").unwrap(), vec![10]);
        assert!(bw.backward_search_positions(b"GG").unwrap().is_empty());
    }

    #[test]
    fn test_wrapped_matches_are_dropped() {
        let bw = Bwt::build(TEXT, true).unwrap();
        assert!(bw.backward_search_positions(b"A$T").unwrap().is_empty());
        assert!(bw.backward_search(b"A$T").is_empty());
        assert_eq!(bw.count(b"A$T"), 0);
        assert_eq!(bw.backward_search_positions(b"A$").unwrap(), vec![9]);
        assert_eq!(bw.count(b"A$"), 1);

        // Rows alone cannot tell a wrapped rotation from a real match
        let rows_only = Bwt::build(TEXT, false).unwrap();
        assert_eq!(rows_only.count(b"A$T"), 1);
    }

    #[test]
    fn test_unterminated_text_has_no_wrapped_matches() {
        let bw = Bwt::build(b"CAAC", true).unwrap();
        assert!(bw.backward_search_positions(b"CC").unwrap().is_empty());
        assert_eq!(bw.count(b"CC"), 0);
        assert_eq!(bw.backward_search_positions(b"AA").unwrap(), vec![1]);
        assert_eq!(bw.backward_search_positions(b"AC").unwrap(), vec![2]);
    }

    #[test]
    fn test_positions_need_suffix_array() {
        let bw = Bwt::build(TEXT, false).unwrap();
        assert!(matches!(
            bw.backward_search_positions(b"AGA"),
            Err(SeqError::MissingSuffixArray)
        ));
    }

    #[test]
    fn test_periodic_text_is_deterministic() {
        let a = Bwt::build(b"ABAB", true).unwrap();
        let b = Bwt::build(b"ABAB", true).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), b"BBAA");
        assert_eq!(a.suffix_array().unwrap(), &[0, 2, 1, 3]);
    }

    #[test]
    fn test_parallel_sort_matches_sequential() {
        let text: Vec<u8> = b"GATTACA".iter().cycle().take(200).copied().chain([b'$']).collect();
        let sequential = Bwt::with_config(
            &text,
            &BwtConfig {
                build_suffix_array: true,
                ..BwtConfig::default()
            },
        )
        .unwrap();
        let parallel = Bwt::with_config(
            &text,
            &BwtConfig {
                build_suffix_array: true,
                parallel_sort_threshold: 0,
                ..BwtConfig::default()
            },
        )
        .unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(parallel.inverse().unwrap(), text);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(Bwt::build(b"", false), Err(SeqError::EmptyInput(_))));
        assert!(Bwt::from_transformed(b"", b'$').is_err());
    }

    #[test]
    fn test_c_table() {
        let c_table = build_c_table(b"$AAB");
        assert_eq!(c_table[b'$' as usize], 0);
        assert_eq!(c_table[b'A' as usize], 1);
        assert_eq!(c_table[b'B' as usize], 3);
        assert_eq!(c_table[256], 4);
    }
}
