//! Error types for seqscan.
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! side is [`SeqError`]. A pattern that simply does not occur is never an
//! error: search operations report it as an empty result or `None`.
//!
//! # Examples
//!
//! ```
//! use seqscan::{Alphabet, BoyerMoore, SeqError};
//!
//! let alphabet = Alphabet::dna();
//! let err = BoyerMoore::new(&alphabet, b"").unwrap_err();
//! assert!(matches!(err, SeqError::EmptyInput(_)));
//! ```

use std::io;

use thiserror::Error;

/// The error type for all seqscan operations.
#[derive(Error, Debug)]
pub enum SeqError {
    /// A structure that needs non-empty input was given none
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// A pattern or text contains a symbol outside the declared alphabet
    #[error("symbol {} at position {position} is not in the alphabet", display_symbol(.symbol))]
    InvalidSymbol { symbol: u8, position: usize },

    /// A single transition was requested on a symbol outside the alphabet
    #[error("symbol {} is not in the alphabet", display_symbol(.0))]
    UnknownSymbol(u8),

    /// An automaton state outside `[0, num_states)`
    #[error("state {state} is out of range (automaton has {num_states} states)")]
    InvalidState { state: usize, num_states: usize },

    /// The suffix tree sentinel occurs inside the indexed text
    #[error("sentinel {} occurs in the text at position {position}", display_symbol(.sentinel))]
    SentinelInText { sentinel: u8, position: usize },

    /// A node id that does not exist in the tree
    #[error("node {node} does not exist (tree has {node_count} nodes)")]
    UnknownNode { node: usize, node_count: usize },

    /// The transform does not contain its terminator, so it cannot be inverted
    #[error("terminator {} not found in the transform", display_symbol(.0))]
    MissingTerminator(u8),

    /// Position lookup requested on an index built without a suffix array
    #[error("index was built without a suffix array")]
    MissingSuffixArray,

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors while loading configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SeqError {
    /// Build an [`SeqError::InvalidSymbol`] for `symbol` at `position`.
    pub fn invalid_symbol(symbol: u8, position: usize) -> Self {
        SeqError::InvalidSymbol { symbol, position }
    }

    /// Build a [`SeqError::Config`] error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SeqError::Config(msg.into())
    }
}

/// Result type alias for seqscan operations.
pub type Result<T> = std::result::Result<T, SeqError>;

fn display_symbol(symbol: &u8) -> String {
    let symbol = *symbol;
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("0x{:02x}", symbol)
    }
}
