use std::collections::TryReserveError;

use thiserror::Error;

/// Error returned when a [`PermutationTree`](crate::PermutationTree) can't be built.
///
/// Queries on a built tree never fail, they report "not found" as an empty permutation.
#[derive(Debug, Error)]
pub enum BuildError {
    /// More symbols than [`MAX_SYMBOLS`](crate::MAX_SYMBOLS): the permutation count would not
    /// fit in a `u64`.
    #[error("{len} symbols given, at most {max} are supported")]
    TooManySymbols {
        /// Number of symbols passed in.
        len: usize,
        /// Largest supported number of symbols.
        max: usize,
    },

    /// Two input symbols compare equal.
    #[error("duplicate symbol at sorted position {position}")]
    DuplicateSymbol {
        /// Position of the second copy in the sorted symbol list.
        position: usize,
    },

    /// The node arena could not be allocated.
    #[error("cannot reserve storage for {nodes} nodes")]
    CapacityExceeded {
        /// Number of nodes the tree would need.
        nodes: u64,
        /// Underlying allocation failure.
        #[source]
        source: TryReserveError,
    },
}
