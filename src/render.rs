//! Plain-text drawing of a tree's shape.
//!
//! The tree is printed on its side: one key per line, indented by depth, with
//! the right subtree above its parent and the left subtree below, so the
//! output reads as the tree rotated a quarter turn counter-clockwise.

use std::fmt::{self, Display};

use crate::shape::{NodeRef, SearchPath};
use crate::AvlTree;

const INDENT: &str = "    ";

/// [`Display`] adapter drawing a tree sideways, optionally bracketing the
/// nodes of a lookup trace.
pub struct Sideways<'a, T> {
    root: Option<NodeRef<'a, T>>,
    marked: Vec<&'a T>,
}

impl<'a, T> Sideways<'a, T> {
    pub fn new(tree: &'a AvlTree<T>) -> Self {
        Sideways {
            root: tree.root(),
            marked: Vec::new(),
        }
    }

    pub fn with_path(tree: &'a AvlTree<T>, path: &SearchPath<'a, T>) -> Self {
        Sideways {
            root: tree.root(),
            marked: path.keys().collect(),
        }
    }
}

impl<'a, T: Display + PartialEq> Sideways<'a, T> {
    fn write_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: NodeRef<'a, T>,
        depth: usize,
    ) -> fmt::Result {
        if let Some(right) = node.right() {
            self.write_subtree(f, right, depth + 1)?;
        }
        for _ in 0..depth {
            f.write_str(INDENT)?;
        }
        if self.marked.contains(&node.key()) {
            writeln!(f, "[{}]", node.key())?;
        } else {
            writeln!(f, "{}", node.key())?;
        }
        if let Some(left) = node.left() {
            self.write_subtree(f, left, depth + 1)?;
        }
        Ok(())
    }
}

impl<T: Display + PartialEq> Display for Sideways<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.write_subtree(f, root, 0),
            None => writeln!(f, "(empty)"),
        }
    }
}
