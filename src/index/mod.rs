//! Text preprocessing indexes
//!
//! ## Architecture
//!
//! - `types`: node arena shared by the tree-shaped indexes
//! - `trie`: prefix tree over a set of patterns
//! - `suffix_tree`: suffix trie over one text, with sentinel
//! - `bwt`: Burrows-Wheeler transform with backward search

pub mod bwt;
pub mod suffix_tree;
pub mod trie;
pub mod types;

pub use bwt::Bwt;
pub use suffix_tree::{Repeat, SuffixTree};
pub use trie::Trie;
pub use types::{Node, NodeArena, NodeId, ROOT};
