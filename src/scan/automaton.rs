//! Deterministic finite automaton for single-pattern search
//!
//! The automaton has one state per matched prefix length, `0..=|pattern|`.
//! From state `q` on symbol `a` it moves to the length of the longest suffix
//! of `pattern[..q] + a` that is also a prefix of the pattern, so the last
//! state is reached exactly when a full occurrence ends. Overlapping
//! occurrences are reported.

use crate::alphabet::Alphabet;
use crate::error::{Result, SeqError};
use rustc_hash::FxHashMap;
use std::fmt;

/// Pattern-matching automaton built from one pattern over an alphabet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    num_states: usize,
    alphabet: Alphabet,
    transitions: FxHashMap<(usize, u8), usize>,
}

impl Automaton {
    /// Build the automaton for `pattern`.
    ///
    /// Fails on an empty pattern or a pattern symbol outside `alphabet`.
    pub fn new(alphabet: &Alphabet, pattern: &[u8]) -> Result<Self> {
        if pattern.is_empty() {
            return Err(SeqError::EmptyInput("automaton pattern is empty"));
        }
        alphabet.validate(pattern)?;

        let num_states = pattern.len() + 1;
        let mut transitions =
            FxHashMap::with_capacity_and_hasher(num_states * alphabet.len(), Default::default());

        let mut candidate = Vec::with_capacity(num_states);
        for q in 0..num_states {
            for &symbol in alphabet.symbols() {
                candidate.clear();
                candidate.extend_from_slice(&pattern[..q]);
                candidate.push(symbol);
                transitions.insert((q, symbol), overlap(&candidate, pattern));
            }
        }

        Ok(Self {
            num_states,
            alphabet: alphabet.clone(),
            transitions,
        })
    }

    /// Number of states, `|pattern| + 1`
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// The single accepting state
    #[inline]
    pub fn accepting_state(&self) -> usize {
        self.num_states - 1
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Length of the pattern the automaton recognizes
    pub fn pattern_len(&self) -> usize {
        self.num_states - 1
    }

    /// Transition from `current` on `symbol`.
    ///
    /// Fails with [`SeqError::UnknownSymbol`] for a symbol outside the
    /// alphabet; scanning methods report its text position instead.
    pub fn next_state(&self, current: usize, symbol: u8) -> Result<usize> {
        if current >= self.num_states {
            return Err(SeqError::InvalidState {
                state: current,
                num_states: self.num_states,
            });
        }
        self.transitions
            .get(&(current, symbol))
            .copied()
            .ok_or(SeqError::UnknownSymbol(symbol))
    }

    /// States visited while reading `text`, starting with state 0.
    ///
    /// The result has `|text| + 1` entries.
    pub fn apply_sequence(&self, text: &[u8]) -> Result<Vec<usize>> {
        let mut states = Vec::with_capacity(text.len() + 1);
        let mut q = 0;
        states.push(q);
        for (pos, &symbol) in text.iter().enumerate() {
            q = self
                .next_state(q, symbol)
                .map_err(|_| SeqError::invalid_symbol(symbol, pos))?;
            states.push(q);
        }
        Ok(states)
    }

    /// Start offsets of every occurrence of the pattern in `text`, ascending
    pub fn occurrences(&self, text: &[u8]) -> Result<Vec<usize>> {
        let m = self.pattern_len();
        Ok(self.accepting_steps(text)?.map(|step| step - m).collect())
    }

    /// Inclusive end offsets of every occurrence, ascending.
    ///
    /// Each end offset is the matching start offset plus `|pattern| - 1`.
    pub fn match_ends(&self, text: &[u8]) -> Result<Vec<usize>> {
        Ok(self.accepting_steps(text)?.map(|step| step - 1).collect())
    }

    /// Number of symbols consumed each time the accepting state is entered
    fn accepting_steps(&self, text: &[u8]) -> Result<impl Iterator<Item = usize>> {
        let accept = self.accepting_state();
        let states = self.apply_sequence(text)?;
        Ok(states
            .into_iter()
            .enumerate()
            .filter(move |&(_, q)| q == accept)
            .map(|(step, _)| step))
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "States: {}", self.num_states)?;
        writeln!(f, "Alphabet: {}", self.alphabet)?;
        writeln!(f, "Transition table:")?;
        for q in 0..self.num_states {
            for &symbol in self.alphabet.symbols() {
                if let Some(next) = self.transitions.get(&(q, symbol)) {
                    writeln!(f, "{} , {} -> {}", q, symbol as char, next)?;
                }
            }
        }
        Ok(())
    }
}

/// Length of the longest suffix of `s1` that is also a prefix of `s2`
pub fn overlap(s1: &[u8], s2: &[u8]) -> usize {
    let max = s1.len().min(s2.len());
    (1..=max)
        .rev()
        .find(|&len| s1[s1.len() - len..] == s2[..len])
        .unwrap_or(0)
}
