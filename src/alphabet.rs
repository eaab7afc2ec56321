//! Alphabets of single-byte symbols.
//!
//! Pattern preprocessors ([`Automaton`](crate::Automaton) and
//! [`BoyerMoore`](crate::BoyerMoore)) are built against an explicit alphabet
//! and reject any symbol outside it instead of silently defaulting.

use crate::error::{Result, SeqError};
use std::fmt;

/// Nucleotide symbols
pub const DNA: &[u8] = b"ACGT";

/// One-letter amino acid codes
pub const PROTEIN: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// An ordered, duplicate-free set of byte symbols.
///
/// Symbol order is the order of first appearance in the constructor input.
/// Membership is a table lookup.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    member: [bool; 256],
}

impl Alphabet {
    /// Create an alphabet from a list of symbols.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn new(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(SeqError::EmptyInput("alphabet has no symbols"));
        }

        let mut member = [false; 256];
        let mut ordered = Vec::with_capacity(symbols.len());
        for &symbol in symbols {
            if !member[symbol as usize] {
                member[symbol as usize] = true;
                ordered.push(symbol);
            }
        }

        Ok(Self {
            symbols: ordered,
            member,
        })
    }

    /// The four nucleotides `ACGT`
    pub fn dna() -> Self {
        Self::from_static(DNA)
    }

    /// The twenty standard amino acids
    pub fn protein() -> Self {
        Self::from_static(PROTEIN)
    }

    /// Infer the alphabet of a text: its distinct bytes in ascending order.
    pub fn from_text(text: &[u8]) -> Result<Self> {
        let mut seen = [false; 256];
        for &b in text {
            seen[b as usize] = true;
        }
        let symbols: Vec<u8> = (0..=255u8).filter(|&b| seen[b as usize]).collect();
        Self::new(&symbols)
    }

    fn from_static(symbols: &'static [u8]) -> Self {
        let mut member = [false; 256];
        for &symbol in symbols {
            member[symbol as usize] = true;
        }
        Self {
            symbols: symbols.to_vec(),
            member,
        }
    }

    /// Whether `symbol` belongs to the alphabet
    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.member[symbol as usize]
    }

    /// Symbols in alphabet order
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check that every byte of `seq` belongs to the alphabet.
    ///
    /// Reports the first offending symbol and its position.
    pub fn validate(&self, seq: &[u8]) -> Result<()> {
        match seq.iter().position(|&b| !self.contains(b)) {
            Some(position) => Err(SeqError::invalid_symbol(seq[position], position)),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet")
            .field(&String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_order() {
        let alphabet = Alphabet::new(b"CACG").unwrap();
        assert_eq!(alphabet.symbols(), b"CAG");
        assert_eq!(alphabet.len(), 3);
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        assert!(matches!(
            Alphabet::new(b""),
            Err(SeqError::EmptyInput(_))
        ));
        assert!(Alphabet::from_text(b"").is_err());
    }

    #[test]
    fn test_presets() {
        let dna = Alphabet::dna();
        assert!(dna.contains(b'G'));
        assert!(!dna.contains(b'U'));
        assert_eq!(Alphabet::protein().len(), 20);
    }

    #[test]
    fn test_from_text_sorted() {
        let alphabet = Alphabet::from_text(b"TAGACA$").unwrap();
        assert_eq!(alphabet.symbols(), b"$ACGT");
    }

    #[test]
    fn test_validate_reports_position() {
        let alphabet = Alphabet::dna();
        assert!(alphabet.validate(b"GATTACA").is_ok());
        match alphabet.validate(b"GATNACA") {
            Err(SeqError::InvalidSymbol { symbol, position }) => {
                assert_eq!(symbol, b'N');
                assert_eq!(position, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
