//! Pattern preprocessing matchers
//!
//! These structures preprocess a single pattern and then scan any number of
//! texts over the same alphabet.
//!
//! - `automaton`: deterministic finite automaton, one pass over the text
//! - `boyer_moore`: right-to-left comparison with bad-character and
//!   good-suffix skips

pub mod automaton;
pub mod boyer_moore;

pub use automaton::{overlap, Automaton};
pub use boyer_moore::BoyerMoore;
