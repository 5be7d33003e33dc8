use std::fmt::Debug;

use thiserror::Error;

/// First broken invariant found by [`AvlTree::validate`](crate::AvlTree::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation<T: Debug> {
    #[error("key {key:?} is out of order under its ancestors")]
    Unordered { key: T },

    #[error("node {key:?} has balance factor {balance}")]
    Unbalanced { key: T, balance: i32 },

    #[error("node {key:?} caches height {cached} but its subtrees give {actual}")]
    HeightMismatch { key: T, cached: usize, actual: usize },

    #[error("tree reports {recorded} keys but holds {actual}")]
    SizeMismatch { recorded: usize, actual: usize },
}

/// Rejected input line in a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs a key")]
    MissingKey { command: &'static str },

    #[error("'{0}' is not an integer key")]
    InvalidKey(String),

    #[error("'{command}' takes no more than {expected} argument(s)")]
    TrailingInput { command: &'static str, expected: usize },
}
