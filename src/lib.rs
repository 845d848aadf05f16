//! This crate enumerates and indexes the permutations of a small set of distinct symbols through an
//! explicit tree ([`PermutationTree`]), stored in a single [`Vec`] in depth-first order.
//!
//! Every root-to-leaf path of the tree is one permutation, and siblings are ordered so that the
//! leaves come out in lexicographic order. On top of that the tree offers three ways to retrieve
//! permutations:
//!
//! - [`PermutationTree::all_permutations`] walks the whole tree and collects every leaf path.
//! - [`PermutationTree::permutation_by_traversal`] walks the leaves in order and stops at the
//!   `k`-th one, so its cost grows with `k`.
//! - [`PermutationTree::permutation_by_factorial`] decodes `k - 1` in the factorial number
//!   system and picks the symbols directly, in `O(N^2)` whatever `k` is.
//!
//! The tree is built in one go and can't be modified afterwards.
//!
//! # Example
//! ```
//! use permutation_tree::PermutationTree;
//!
//! let tree = PermutationTree::new(&['1', '2', '3']).unwrap();
//!
//! let all: Vec<String> = tree
//!     .all_permutations()
//!     .into_iter()
//!     .map(|perm| perm.into_iter().collect())
//!     .collect();
//! assert_eq!(all, ["123", "132", "213", "231", "312", "321"]);
//!
//! for rank in 1..=tree.total_permutations() {
//!     assert_eq!(
//!         tree.permutation_by_traversal(rank),
//!         tree.permutation_by_factorial(rank)
//!     );
//! }
//!
//! // ranks are 1-based, anything outside 1..=N! finds nothing
//! assert!(tree.permutation_by_traversal(0).is_empty());
//! assert!(tree.permutation_by_factorial(7).is_empty());
//! ```

mod packed;
mod error;
mod extra;
pub mod experiment;
pub mod factorial;
mod serde;
mod tree;

pub use crate::packed::*;
pub use crate::error::*;
pub use crate::factorial::{factorial, factorial_table, lehmer_digits, lehmer_index, MAX_SYMBOLS};
pub use crate::tree::*;
