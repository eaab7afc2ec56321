//! # seqscan - exact pattern matching over sequences
//!
//! Classic string-matching structures over single-byte alphabets, built once
//! and then queried read-only.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`scan`] - Pattern preprocessing: [`Automaton`], [`BoyerMoore`]
//! - [`index`] - Text preprocessing: [`Trie`], [`SuffixTree`], [`Bwt`]
//! - [`alphabet`] - Validated symbol sets
//! - [`config`] - Serde configuration for index construction
//! - [`error`] - [`SeqError`] and the crate [`Result`] alias
//! - [`output`] - Result formatting for the command line tool
//!
//! ## Quick Start
//!
//! ```
//! use seqscan::{Alphabet, BoyerMoore, Bwt, SuffixTree};
//!
//! let text = b"TAGACAGAGA";
//!
//! let bm = BoyerMoore::new(&Alphabet::dna(), b"AGA").unwrap();
//! assert_eq!(bm.search(text).unwrap(), vec![1, 5, 7]);
//!
//! let tree = SuffixTree::from_sequence(text).unwrap();
//! assert_eq!(tree.find_pattern(b"AGA"), vec![1, 5, 7]);
//!
//! let bwt = Bwt::build(b"TAGACAGAGA$", true).unwrap();
//! assert_eq!(bwt.backward_search_positions(b"AGA").unwrap(), vec![1, 5, 7]);
//! assert_eq!(bwt.inverse().unwrap(), b"TAGACAGAGA$");
//! ```
//!
//! The matching structures perform no I/O and no logging; the `seqscan`
//! binary wraps them with a command line interface.

pub mod alphabet;
pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod scan;

pub use alphabet::Alphabet;
pub use config::{BwtConfig, SeqScanConfig, SuffixTreeConfig};
pub use error::{Result, SeqError};
pub use index::{Bwt, Repeat, SuffixTree, Trie};
pub use scan::{Automaton, BoyerMoore};
