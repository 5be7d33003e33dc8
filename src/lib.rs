//! Height-balanced (AVL) binary search tree over unique keys.
//!
//! Besides the usual ordered-set operations the tree exposes its shape through
//! read-only [`NodeRef`] handles and records the nodes a lookup walks through
//! ([`AvlTree::search_path`]), which is what a front end needs to draw the tree
//! and trace a search. [`Session`] is such a front end for the terminal.
//!
//! ```
//! use avl_trace::AvlTree;
//!
//! let tree: AvlTree<i64> = [10, 20, 30].into_iter().collect();
//! let root = tree.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(tree.search_path(&30).keys().copied().collect::<Vec<_>>(), [20, 30]);
//! ```

mod avl_tree;
pub mod error;
pub mod iter;
pub mod render;
pub mod session;
pub mod shape;

pub use avl_tree::AvlTree;
pub use error::{CommandError, InvariantViolation};
pub use render::Sideways;
pub use session::{Command, Outcome, Session};
pub use shape::{NodeRef, SearchPath};
