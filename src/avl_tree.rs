use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::{debug, trace};

use crate::error::InvariantViolation;
use crate::iter::{InOrder, IntoIter};
use crate::shape::{NodeRef, SearchPath};

pub(crate) type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) key: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) height: usize,
}

impl<T> Node<T> {
    fn new(key: T) -> Self {
        Node {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    pub(crate) fn balance(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

/// Height of a subtree; an absent subtree has height 0.
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

/// `height(left) - height(right)`, or 0 for an absent subtree.
pub(crate) fn balance_factor<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(0, |n| n.balance())
}

/// Ordered set of unique keys kept height-balanced: the heights of the two
/// subtrees of every node differ by at most one.
///
/// Nodes are owned top-down with no parent links. Every mutation takes the
/// affected subtree by value and hands back the rebuilt one, so a caller never
/// observes a half-rotated tree.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        AvlTree {
            root: None,
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// Number of levels; 0 for an empty tree, 1 for a single key.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Read-only handle on the root, for walking the tree's shape.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.as_deref().map(NodeRef::new)
    }

    /// Keys in ascending order, produced lazily. Each call starts afresh.
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self.root.as_deref(), self.size)
    }

    /// Keys in root, left, right order.
    pub fn pre_order(&self) -> Vec<&T> {
        let mut result = Vec::with_capacity(self.size);
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(n) = stack.pop() {
            result.push(&n.key);
            stack.extend(n.right.as_deref());
            stack.extend(n.left.as_deref());
        }
        result
    }

    pub fn min(&self) -> Option<&T> {
        self.root.as_deref().map(|n| &min_value_node(n).key)
    }

    pub fn max(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.key)
    }

    pub fn is_balanced(&self) -> bool {
        Self::check_balance(&self.root)
    }

    fn check_balance(node: &Link<T>) -> bool {
        match node {
            None => true,
            Some(n) => {
                n.balance().abs() <= 1
                    && Self::check_balance(&n.left)
                    && Self::check_balance(&n.right)
            }
        }
    }
}

impl<T: Ord> AvlTree<T> {
    pub fn contains(&self, key: &T) -> bool {
        self.search(key).is_some()
    }

    /// Node holding `key`, or `None` when the key is absent.
    pub fn search(&self, key: &T) -> Option<NodeRef<'_, T>> {
        let mut current = self.root.as_deref();
        while let Some(n) = current {
            match key.cmp(&n.key) {
                Ordering::Less => current = n.left.as_deref(),
                Ordering::Greater => current = n.right.as_deref(),
                Ordering::Equal => return Some(NodeRef::new(n)),
            }
        }
        None
    }

    /// Like [`search`](Self::search), also recording every node visited from
    /// the root down to the match or to the dead end.
    pub fn search_path(&self, key: &T) -> SearchPath<'_, T> {
        let mut visited = Vec::with_capacity(self.height());
        let mut current = self.root.as_deref();
        while let Some(n) = current {
            visited.push(NodeRef::new(n));
            match key.cmp(&n.key) {
                Ordering::Less => current = n.left.as_deref(),
                Ordering::Greater => current = n.right.as_deref(),
                Ordering::Equal => return SearchPath::new(visited, true),
            }
        }
        SearchPath::new(visited, false)
    }
}

impl<T: Ord + Clone> AvlTree<T> {
    /// Inserts `key`, returning `false` and leaving the tree untouched when it
    /// is already present.
    pub fn insert(&mut self, key: T) -> bool {
        let before = self.size;
        let lookup = key.clone();
        self.root = Self::insert_node(self.root.take(), key, &lookup, &mut self.size);
        let inserted = self.size > before;
        debug!(inserted, size = self.size, height = self.height(), "insert");
        inserted
    }

    /// Removes `key`, returning `false` and leaving the tree untouched when it
    /// is absent.
    pub fn delete(&mut self, key: &T) -> bool {
        let before = self.size;
        self.root = Self::delete_node(self.root.take(), key, &mut self.size);
        let removed = self.size < before;
        debug!(removed, size = self.size, height = self.height(), "delete");
        removed
    }

    /// Checks ordering, balance, cached heights and the cached size, reporting
    /// the first violation found in a post-order walk.
    pub fn validate(&self) -> Result<(), InvariantViolation<T>>
    where
        T: Debug,
    {
        let actual = Self::validate_node(&self.root, None, None)?;
        if actual != self.size {
            return Err(InvariantViolation::SizeMismatch {
                recorded: self.size,
                actual,
            });
        }
        Ok(())
    }

    fn rotate_right(mut y: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut x) = y.left.take() else {
            return y;
        };
        y.left = x.right.take();
        y.update_height();
        x.right = Some(y);
        x.update_height();
        x
    }

    fn rotate_left(mut x: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut y) = x.right.take() else {
            return x;
        };
        x.right = y.left.take();
        x.update_height();
        y.left = Some(x);
        y.update_height();
        y
    }

    fn insert_node(node: Link<T>, key: T, lookup: &T, size: &mut usize) -> Link<T> {
        let Some(mut n) = node else {
            *size += 1;
            return Some(Box::new(Node::new(key)));
        };
        match lookup.cmp(&n.key) {
            Ordering::Less => n.left = Self::insert_node(n.left.take(), key, lookup, size),
            Ordering::Greater => n.right = Self::insert_node(n.right.take(), key, lookup, size),
            Ordering::Equal => return Some(n),
        }
        Some(Self::rebalance_inserted(n, lookup))
    }

    // A single insertion unbalances a node by at most 2. Which grandchild
    // received the new key decides between a single and a double rotation.
    fn rebalance_inserted(mut node: Box<Node<T>>, key: &T) -> Box<Node<T>> {
        node.update_height();
        let balance = node.balance();

        if balance > 1 {
            let zig_zag = node.left.as_ref().is_some_and(|left| *key > left.key);
            if zig_zag {
                trace!("insert: left-right rotation");
                node.left = node.left.take().map(Self::rotate_left);
            } else {
                trace!("insert: right rotation");
            }
            return Self::rotate_right(node);
        }

        if balance < -1 {
            let zig_zag = node.right.as_ref().is_some_and(|right| *key < right.key);
            if zig_zag {
                trace!("insert: right-left rotation");
                node.right = node.right.take().map(Self::rotate_right);
            } else {
                trace!("insert: left rotation");
            }
            return Self::rotate_left(node);
        }

        node
    }

    fn delete_node(node: Link<T>, key: &T, size: &mut usize) -> Link<T> {
        let mut n = node?;
        match key.cmp(&n.key) {
            Ordering::Less => n.left = Self::delete_node(n.left.take(), key, size),
            Ordering::Greater => n.right = Self::delete_node(n.right.take(), key, size),
            Ordering::Equal => match (n.left.take(), n.right.take()) {
                (child, None) | (None, child) => {
                    *size -= 1;
                    return child;
                }
                (Some(left), Some(right)) => {
                    // The inorder successor has no left child, so deleting
                    // it below ends in the arm above.
                    let successor = min_value_node(&right).key.clone();
                    n.left = Some(left);
                    n.right = Self::delete_node(Some(right), &successor, size);
                    n.key = successor;
                }
            },
        }
        Some(Self::rebalance_deleted(n))
    }

    // Removal can shorten either side regardless of the removed key, so the
    // heavy child's own balance picks the rotation.
    fn rebalance_deleted(mut node: Box<Node<T>>) -> Box<Node<T>> {
        node.update_height();
        let balance = node.balance();

        if balance > 1 {
            if balance_factor(&node.left) < 0 {
                trace!("delete: left-right rotation");
                node.left = node.left.take().map(Self::rotate_left);
            } else {
                trace!("delete: right rotation");
            }
            return Self::rotate_right(node);
        }

        if balance < -1 {
            if balance_factor(&node.right) > 0 {
                trace!("delete: right-left rotation");
                node.right = node.right.take().map(Self::rotate_right);
            } else {
                trace!("delete: left rotation");
            }
            return Self::rotate_left(node);
        }

        node
    }

    fn validate_node(
        node: &Link<T>,
        lower: Option<&T>,
        upper: Option<&T>,
    ) -> Result<usize, InvariantViolation<T>>
    where
        T: Debug,
    {
        let Some(n) = node else {
            return Ok(0);
        };
        let below_lower = lower.is_some_and(|lo| n.key <= *lo);
        let above_upper = upper.is_some_and(|hi| n.key >= *hi);
        if below_lower || above_upper {
            return Err(InvariantViolation::Unordered { key: n.key.clone() });
        }

        let left = Self::validate_node(&n.left, lower, Some(&n.key))?;
        let right = Self::validate_node(&n.right, Some(&n.key), upper)?;

        let actual = 1 + height(&n.left).max(height(&n.right));
        if n.height != actual {
            return Err(InvariantViolation::HeightMismatch {
                key: n.key.clone(),
                cached: n.height,
                actual,
            });
        }
        let balance = n.balance();
        if balance.abs() > 1 {
            return Err(InvariantViolation::Unbalanced {
                key: n.key.clone(),
                balance,
            });
        }
        Ok(1 + left + right)
    }
}

/// Leftmost node of a subtree: its smallest key.
pub(crate) fn min_value_node<T>(node: &Node<T>) -> &Node<T> {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Clone> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.size)
    }
}
