//! Prefix tree over a set of patterns
//!
//! Each edge carries one symbol and patterns sharing a prefix share the
//! path for it. Matching reports a pattern when the walk reaches a node with
//! no outgoing edges, so a pattern that is a strict prefix of another
//! pattern (for example `GA` next to `GAT`) is never reported by
//! [`Trie::prefix_match`] or [`Trie::matches`]. [`Trie::contains_pattern`]
//! answers exact membership for those.

use super::types::{NodeArena, NodeId, ROOT};
use std::fmt;

/// Trie of byte patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trie {
    nodes: NodeArena,
    pattern_count: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from patterns, inserted in iteration order
    pub fn from_patterns<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut trie = Self::new();
        for pattern in patterns {
            trie.add_pattern(pattern.as_ref());
        }
        trie
    }

    /// Insert a pattern, creating nodes only where an edge is missing
    pub fn add_pattern(&mut self, pattern: &[u8]) {
        let mut node = ROOT;
        for &symbol in pattern {
            node = self.nodes.child_or_insert(node, symbol, None);
        }
        if let Some(end) = self.nodes.get_mut(node) {
            end.terminal = true;
        }
        self.pattern_count += 1;
    }

    /// Whether exactly `pattern` was inserted
    pub fn contains_pattern(&self, pattern: &[u8]) -> bool {
        self.nodes
            .walk(pattern)
            .and_then(|node| self.nodes.get(node))
            .is_some_and(|node| node.terminal)
    }

    /// Find the pattern that is a prefix of `text`.
    ///
    /// Returns the consumed prefix as soon as the walk reaches a leaf, or
    /// `None` if a symbol has no edge or the text ends first.
    pub fn prefix_match<'t>(&self, text: &'t [u8]) -> Option<&'t [u8]> {
        let mut node = ROOT;
        for (pos, &symbol) in text.iter().enumerate() {
            node = self.nodes.child(node, symbol)?;
            if self.is_leaf(node) {
                return Some(&text[..=pos]);
            }
        }
        None
    }

    /// Pattern matches at every offset of `text`, as `(offset, pattern)`
    /// pairs in ascending offset order
    pub fn matches<'t>(&self, text: &'t [u8]) -> Vec<(usize, &'t [u8])> {
        (0..text.len())
            .filter_map(|i| self.prefix_match(&text[i..]).map(|m| (i, m)))
            .collect()
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of `add_pattern` calls
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.is_leaf())
    }
}

impl fmt::Display for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, node) in self.nodes.iter() {
            write!(f, "{} ->", id)?;
            for (&symbol, &child) in &node.children {
                write!(f, " {}:{}", symbol as char, child)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assay_trie() -> Trie {
        Trie::from_patterns([
            "AGAGAT", "AGC", "AGTCC", "CAGAT", "CCTA", "GAGAT", "GAT", "TC",
        ])
    }

    #[test]
    fn test_shared_prefixes_reuse_nodes() {
        let trie = Trie::from_patterns(["GAT", "CCT", "GAG"]);
        // root + G,A,T + C,C,T + G
        assert_eq!(trie.node_count(), 8);
        assert_eq!(trie.pattern_count(), 3);
    }

    #[test]
    fn test_prefix_match() {
        let trie = Trie::from_patterns(["GAT", "CCT", "GAG"]);
        assert_eq!(trie.prefix_match(b"GAGATCCTA"), Some(&b"GAG"[..]));
        assert_eq!(trie.prefix_match(b"ATCCTA"), None);
        // text runs out before a leaf
        assert_eq!(trie.prefix_match(b"GA"), None);
    }

    #[test]
    fn test_matches() {
        let trie = Trie::from_patterns(["GAT", "CCT", "GAG"]);
        let found = trie.matches(b"GAGATCCTA");
        assert_eq!(
            found,
            vec![(0, &b"GAG"[..]), (2, &b"GAT"[..]), (5, &b"CCT"[..])]
        );
    }

    #[test]
    fn test_matches_larger_set() {
        let trie = assay_trie();
        assert_eq!(trie.prefix_match(b"GAGATCCTA"), Some(&b"GAGAT"[..]));
        assert_eq!(
            trie.matches(b"GAGATCCTA"),
            vec![
                (0, &b"GAGAT"[..]),
                (2, &b"GAT"[..]),
                (4, &b"TC"[..]),
                (5, &b"CCTA"[..]),
            ]
        );
    }

    #[test]
    fn test_strict_prefix_pattern_not_reported() {
        let trie = Trie::from_patterns(["GA", "GAT"]);
        assert_eq!(trie.matches(b"GACGAT"), vec![(3, &b"GAT"[..])]);
        assert!(trie.contains_pattern(b"GA"));
        assert!(trie.contains_pattern(b"GAT"));
        assert!(!trie.contains_pattern(b"G"));
        assert!(!trie.contains_pattern(b"GATC"));
    }

    #[test]
    fn test_empty_trie() {
        let trie = Trie::new();
        assert_eq!(trie.node_count(), 1);
        assert_eq!(trie.prefix_match(b"ACGT"), None);
        assert!(trie.matches(b"ACGT").is_empty());
        assert!(trie.matches(b"").is_empty());
    }

    #[test]
    fn test_rebuild_is_identical() {
        assert_eq!(assay_trie(), assay_trie());
    }

    #[test]
    fn test_display() {
        let trie = Trie::from_patterns(["AC"]);
        assert_eq!(trie.to_string(), "0 -> A:1\n1 -> C:2\n2 ->\n");
    }
}
