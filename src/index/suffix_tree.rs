//! Suffix tree (uncompressed suffix trie)
//!
//! Built by appending a sentinel to the text and inserting every suffix of
//! the result, longest first, with the same node-growth rule as the
//! [`Trie`](super::Trie). The node that completes suffix `i` is a leaf
//! labelled `i`. Because the sentinel occurs only once, every suffix ends at
//! its own leaf and the labels cover `0..=|text|` exactly once.
//!
//! Construction is `O(n^2)` in time and nodes; intended for sequences up to
//! a few thousand symbols.

use super::types::{NodeArena, NodeId, ROOT};
use crate::config::SuffixTreeConfig;
use crate::error::{Result, SeqError};
use std::collections::VecDeque;
use std::fmt;

/// A substring that occurs several times in the indexed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repeat {
    pub sequence: Vec<u8>,
    /// Start offsets, ascending
    pub positions: Vec<usize>,
}

/// Suffix tree over a single text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixTree {
    nodes: NodeArena,
    text: Vec<u8>,
    sentinel: u8,
}

impl SuffixTree {
    /// Build the tree for `text` with the default `$` sentinel
    pub fn from_sequence(text: &[u8]) -> Result<Self> {
        Self::with_config(text, &SuffixTreeConfig::default())
    }

    /// Build the tree for `text` with a configured sentinel.
    ///
    /// Fails if the sentinel occurs in `text`.
    pub fn with_config(text: &[u8], config: &SuffixTreeConfig) -> Result<Self> {
        let sentinel = config.sentinel;
        if let Some(position) = memchr::memchr(sentinel, text) {
            return Err(SeqError::SentinelInText { sentinel, position });
        }

        let mut t = Vec::with_capacity(text.len() + 1);
        t.extend_from_slice(text);
        t.push(sentinel);

        let mut tree = Self {
            nodes: NodeArena::new(),
            text: text.to_vec(),
            sentinel,
        };
        for start in 0..t.len() {
            tree.add_suffix(&t[start..], start);
        }

        Ok(tree)
    }

    fn add_suffix(&mut self, suffix: &[u8], start: usize) {
        let last = suffix.len() - 1;
        let mut node = ROOT;
        for (pos, &symbol) in suffix.iter().enumerate() {
            let leaf = (pos == last).then_some(start);
            node = self.nodes.child_or_insert(node, symbol, leaf);
        }
    }

    /// The indexed text, without the sentinel
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Start offsets of every occurrence of `pattern`, ascending.
    ///
    /// Empty when the pattern is empty or does not occur.
    pub fn find_pattern(&self, pattern: &[u8]) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }
        match self.nodes.walk(pattern) {
            Some(node) => {
                let mut leaves = self.collect_leaves(node);
                leaves.sort_unstable();
                leaves
            }
            None => Vec::new(),
        }
    }

    /// Leaf labels in the subtree rooted at `node`, in depth-first order
    pub fn leaves_below(&self, node: NodeId) -> Result<Vec<usize>> {
        self.check_node(node)?;
        Ok(self.collect_leaves(node))
    }

    fn collect_leaves(&self, node: NodeId) -> Vec<usize> {
        let mut res = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(n) = self.nodes.get(current) else {
                continue;
            };
            if let Some(label) = n.leaf {
                res.push(label);
            }
            // Reverse so children are visited in symbol order
            stack.extend(n.children.values().rev());
        }
        res
    }

    /// Ids of every node strictly below `node`, ascending
    pub fn nodes_below(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.check_node(node)?;

        let mut res = Vec::new();
        let mut queue = VecDeque::from([node]);
        while let Some(current) = queue.pop_front() {
            if let Some(n) = self.nodes.get(current) {
                for &child in n.children.values() {
                    res.push(child);
                    queue.push_back(child);
                }
            }
        }
        res.sort_unstable();
        Ok(res)
    }

    /// Distinct substrings of the text that start with `prefix`, in
    /// lexicographic order.
    ///
    /// These are the strings spelled from the root to every node in the
    /// subtree reached by `prefix`, the sentinel excluded. Empty when the
    /// prefix is empty, contains the sentinel, or does not occur.
    pub fn matches_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        if prefix.is_empty() || prefix.contains(&self.sentinel) {
            return Vec::new();
        }
        let Some(start) = self.nodes.walk(prefix) else {
            return Vec::new();
        };

        let mut res = Vec::new();
        let mut stack = vec![(start, prefix.to_vec())];
        while let Some((node, path)) = stack.pop() {
            if let Some(n) = self.nodes.get(node) {
                for (&symbol, &child) in n.children.iter().rev() {
                    if symbol == self.sentinel {
                        continue;
                    }
                    let mut extended = path.clone();
                    extended.push(symbol);
                    stack.push((child, extended));
                }
            }
            res.push(path);
        }
        res
    }

    /// Substrings of length at least `min_len` that occur at least
    /// `min_count` times, in lexicographic order
    pub fn repeats(&self, min_len: usize, min_count: usize) -> Vec<Repeat> {
        let min_len = min_len.max(1);
        let counts = self.leaf_counts();

        let mut res = Vec::new();
        let mut stack: Vec<(NodeId, Vec<u8>)> = vec![(ROOT, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            if path.len() >= min_len {
                let mut positions = self.collect_leaves(node);
                positions.sort_unstable();
                res.push(Repeat {
                    sequence: path.clone(),
                    positions,
                });
            }
            if let Some(n) = self.nodes.get(node) {
                for (&symbol, &child) in n.children.iter().rev() {
                    // Counts only shrink going down, so prune whole subtrees
                    if symbol == self.sentinel || counts[child] < min_count {
                        continue;
                    }
                    let mut extended = path.clone();
                    extended.push(symbol);
                    stack.push((child, extended));
                }
            }
        }
        res
    }

    /// Number of leaves below each node, indexed by node id
    fn leaf_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.nodes.len()];
        // Children have larger ids than their parent
        for (id, node) in self.nodes.iter().rev() {
            let below: usize = node.children.values().map(|&c| counts[c]).sum();
            counts[id] = below + usize::from(node.leaf.is_some());
        }
        counts
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(SeqError::UnknownNode {
                node,
                node_count: self.nodes.len(),
            })
        }
    }
}

impl fmt::Display for SuffixTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, node) in self.nodes.iter() {
            match node.leaf {
                Some(label) => writeln!(f, "{} : {}", id, label)?,
                None => {
                    write!(f, "{} ->", id)?;
                    for (&symbol, &child) in &node.children {
                        write!(f, " {}:{}", symbol as char, child)?;
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}
