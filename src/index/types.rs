//! Node storage shared by the trie and the suffix tree
//!
//! Nodes live in a growable arena and refer to each other by index. Ids are
//! handed out densely from 0 (the root), so a child always has a larger id
//! than its parent.

use std::collections::BTreeMap;

/// Index of a node in its arena
pub type NodeId = usize;

/// Id of the root node
pub const ROOT: NodeId = 0;

/// A trie node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Suffix start offset for suffix tree leaves
    pub leaf: Option<usize>,
    /// Whether an inserted pattern ends here (trie only)
    pub terminal: bool,
    /// Outgoing edges, at most one per symbol
    pub children: BTreeMap<u8, NodeId>,
}

impl Node {
    /// A node without outgoing edges
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena of nodes rooted at [`ROOT`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    /// Create an arena holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Add a child of `origin` along `symbol` and return its id.
    ///
    /// The caller guarantees `origin` has no edge for `symbol` yet.
    pub fn add_node(&mut self, origin: NodeId, symbol: u8, leaf: Option<usize>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            leaf,
            ..Node::default()
        });
        let previous = self.nodes[origin].children.insert(symbol, id);
        debug_assert!(previous.is_none(), "edge {} already present", symbol);
        id
    }

    /// Follow the edge for `symbol` from `node`
    #[inline]
    pub fn child(&self, node: NodeId, symbol: u8) -> Option<NodeId> {
        self.nodes[node].children.get(&symbol).copied()
    }

    /// Follow the edge for `symbol`, creating it if missing
    pub fn child_or_insert(&mut self, node: NodeId, symbol: u8, leaf: Option<usize>) -> NodeId {
        match self.child(node, symbol) {
            Some(next) => next,
            None => self.add_node(node, symbol, leaf),
        }
    }

    /// Walk `path` from the root; `None` as soon as an edge is missing
    pub fn walk(&self, path: &[u8]) -> Option<NodeId> {
        path.iter()
            .try_fold(ROOT, |node, &symbol| self.child(node, symbol))
    }

    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in id order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut arena = NodeArena::new();
        let a = arena.add_node(ROOT, b'A', None);
        let c = arena.add_node(ROOT, b'C', None);
        let ac = arena.add_node(a, b'C', Some(0));
        assert_eq!((a, c, ac), (1, 2, 3));
        assert_eq!(arena.len(), 4);
        assert_eq!(arena.get(ac).unwrap().leaf, Some(0));
    }

    #[test]
    fn test_walk() {
        let mut arena = NodeArena::new();
        let a = arena.child_or_insert(ROOT, b'A', None);
        let ag = arena.child_or_insert(a, b'G', None);
        assert_eq!(arena.child_or_insert(ROOT, b'A', None), a);
        assert_eq!(arena.walk(b"AG"), Some(ag));
        assert_eq!(arena.walk(b""), Some(ROOT));
        assert_eq!(arena.walk(b"AT"), None);
    }

    #[test]
    fn test_separate_arenas_do_not_share_state() {
        let mut first = NodeArena::default();
        let second = NodeArena::default();
        first.add_node(ROOT, b'A', None);
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert!(second.get(ROOT).unwrap().is_leaf());
    }
}
