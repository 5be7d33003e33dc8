//! Read-only views of a tree's shape.
//!
//! A renderer needs the key of every node and which children it has, and a
//! lookup trace needs the nodes a search walked through. Both are exposed as
//! borrowed handles so no caller can reach the tree's links mutably.

use std::fmt;

use crate::avl_tree::{height, Node};

/// Borrowed handle on one node of an [`AvlTree`](crate::AvlTree).
pub struct NodeRef<'a, T> {
    node: &'a Node<T>,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(node: &'a Node<T>) -> Self {
        NodeRef { node }
    }

    pub fn key(&self) -> &'a T {
        &self.node.key
    }

    /// Cached height of the subtree rooted here; a leaf has height 1.
    pub fn height(&self) -> usize {
        self.node.height
    }

    pub fn balance_factor(&self) -> i32 {
        self.node.balance()
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node.left.as_deref().map(NodeRef::new)
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node.right.as_deref().map(NodeRef::new)
    }

    pub fn has_left(&self) -> bool {
        self.node.left.is_some()
    }

    pub fn has_right(&self) -> bool {
        self.node.right.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        height(&self.node.left) == 0 && height(&self.node.right) == 0
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.node.key)
            .field("height", &self.node.height)
            .field("has_left", &self.has_left())
            .field("has_right", &self.has_right())
            .finish()
    }
}

/// Nodes visited by [`AvlTree::search_path`](crate::AvlTree::search_path),
/// root first. When the key was found it is the last visited node.
#[derive(Debug, Clone)]
pub struct SearchPath<'a, T> {
    visited: Vec<NodeRef<'a, T>>,
    found: bool,
}

impl<'a, T> SearchPath<'a, T> {
    pub(crate) fn new(visited: Vec<NodeRef<'a, T>>, found: bool) -> Self {
        SearchPath { visited, found }
    }

    pub fn found(&self) -> Option<NodeRef<'a, T>> {
        if self.found {
            self.visited.last().copied()
        } else {
            None
        }
    }

    pub fn visited(&self) -> &[NodeRef<'a, T>] {
        &self.visited
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.visited.iter().map(|n| n.key())
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
