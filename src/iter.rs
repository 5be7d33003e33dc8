use std::iter::FusedIterator;

use crate::avl_tree::{Link, Node};

/// Lazy in-order walk over borrowed keys.
///
/// The stack holds the left spine still to be yielded, so it never grows past
/// the tree's height.
#[derive(Debug)]
pub struct InOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = InOrder {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left_spine(n.right.as_deref());
        self.remaining -= 1;
        Some(&n.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for InOrder<'_, T> {}

impl<T> FusedIterator for InOrder<'_, T> {}

impl<T> Clone for InOrder<'_, T> {
    fn clone(&self) -> Self {
        InOrder {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// Owning in-order iterator, consuming the tree.
#[derive(Debug)]
pub struct IntoIter<T> {
    keys: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        fn collect_in_order<T>(node: Link<T>, result: &mut Vec<T>) {
            if let Some(n) = node {
                let Node {
                    key, left, right, ..
                } = *n;
                collect_in_order(left, result);
                result.push(key);
                collect_in_order(right, result);
            }
        }
        let mut keys = Vec::with_capacity(len);
        collect_in_order(root, &mut keys);
        IntoIter {
            keys: keys.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.keys.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
