use crate::packed::{NodeBuilder, PackedForest};
use crate::*;

use tracing::{debug, trace};

/// A tree holding every permutation of a set of distinct symbols.
///
/// The root is implicit: it is the tree itself, and the depth-1 nodes are stored as the trees of an
/// inner packed forest. A node at depth `d` has one child per symbol not yet placed on its path,
/// in ascending order, so the leaves (all at depth `N`) are reached in lexicographic order by a
/// depth-first traversal.
///
/// Once built the tree is never modified. All queries take `&self`, and a tree can be shared
/// between threads when `T` can.
///
/// # Example
/// ```
/// use permutation_tree::PermutationTree;
///
/// let tree = PermutationTree::new(&['3', '1', '2']).unwrap();
/// assert_eq!(tree.total_permutations(), 6);
/// assert_eq!(tree.permutation_by_traversal(1), vec!['1', '2', '3']);
/// assert_eq!(tree.permutation_by_factorial(4), vec!['2', '3', '1']);
/// assert!(tree.permutation_by_factorial(7).is_empty());
/// ```
pub struct PermutationTree<T> {
    forest: PackedForest<T>,
    symbols: Vec<T>,     // sorted
    factorials: Vec<u64>, // 0! ..= (N-1)!
    total_permutations: u64,
}

impl<T: Ord + Clone> PermutationTree<T> {
    /// Build the tree for the given symbols, in any order.
    ///
    /// An empty slice gives an empty tree with zero permutations. Fails if the symbols are not
    /// pairwise distinct, if there are more than [`MAX_SYMBOLS`] of them, or if the nodes can't
    /// be allocated (the tree has `N! * e` nodes, roughly, so in practice memory runs out well
    /// before `MAX_SYMBOLS`).
    pub fn new(symbols: &[T]) -> Result<PermutationTree<T>, BuildError> {
        let len = symbols.len();
        if len > MAX_SYMBOLS {
            return Err(BuildError::TooManySymbols {
                len,
                max: MAX_SYMBOLS,
            });
        }

        let mut sorted = symbols.to_vec();
        sorted.sort();
        if let Some(position) = sorted.windows(2).position(|pair| pair[0] == pair[1]) {
            return Err(BuildError::DuplicateSymbol {
                position: position + 1,
            });
        }

        if sorted.is_empty() {
            debug!("built empty permutation tree");
            return Ok(PermutationTree {
                forest: PackedForest::new(),
                symbols: sorted,
                factorials: Vec::new(),
                total_permutations: 0,
            });
        }

        let too_many = || BuildError::TooManySymbols {
            len,
            max: MAX_SYMBOLS,
        };
        let factorials = factorial_table(len).ok_or_else(too_many)?;
        let total_permutations = factorial(len).ok_or_else(too_many)?;

        let nodes = num_nodes(len);
        let capacity = usize::try_from(nodes).unwrap_or(usize::MAX);
        let mut forest = PackedForest::try_with_capacity(capacity)
            .map_err(|source| BuildError::CapacityExceeded { nodes, source })?;

        for (index, symbol) in sorted.iter().enumerate() {
            let remaining = without(&sorted, index);
            forest.build_tree(symbol.clone(), |node_builder| {
                build_subtree(node_builder, &remaining)
            });
        }
        debug_assert_eq!(forest.tot_num_nodes() as u64, nodes);

        debug!(
            num_symbols = len,
            num_nodes = forest.tot_num_nodes(),
            total_permutations,
            "built permutation tree"
        );

        Ok(PermutationTree {
            forest,
            symbols: sorted,
            factorials,
            total_permutations,
        })
    }

    /// Every permutation, in lexicographic order. Empty for an empty tree.
    pub fn all_permutations(&self) -> Vec<Vec<T>> {
        let mut result = Vec::with_capacity(usize::try_from(self.total_permutations).unwrap_or(0));
        let mut path = Vec::with_capacity(self.num_symbols());
        for node in self.root_children() {
            collect_leaves(node, &mut path, &mut result);
        }
        result
    }

    /// The `rank`-th permutation (1-based), found by walking the leaves in order and counting
    /// them. Costs `O(rank * N)`.
    ///
    /// Returns an empty `Vec` if `rank` is not in `1..=total_permutations()`.
    pub fn permutation_by_traversal(&self, rank: u64) -> Vec<T> {
        if !self.contains_rank(rank) {
            trace!(rank, total = self.total_permutations, "rank out of range");
            return Vec::new();
        }

        let mut path = Vec::with_capacity(self.num_symbols());
        let mut leaves_seen = 0;
        let mut found = None;
        for node in self.root_children() {
            if find_leaf(node, rank, &mut path, &mut leaves_seen, &mut found) {
                break;
            }
        }
        debug_assert!(path.is_empty());
        found.unwrap_or_default()
    }

    /// The `rank`-th permutation (1-based), decoded from the factorial representation of
    /// `rank - 1`. Only reads the depth-1 nodes; costs `O(N^2)` whatever the rank.
    ///
    /// Returns an empty `Vec` if `rank` is not in `1..=total_permutations()`.
    pub fn permutation_by_factorial(&self, rank: u64) -> Vec<T> {
        if !self.contains_rank(rank) {
            trace!(rank, total = self.total_permutations, "rank out of range");
            return Vec::new();
        }

        let mut available: Vec<&T> = self.root_children().map(|node| node.val()).collect();
        lehmer_digits(rank - 1, &self.factorials)
            .into_iter()
            .map(|digit| available.remove(digit).clone())
            .collect()
    }

    /// The 1-based rank of `permutation`, or `None` if it isn't a permutation of this tree's
    /// symbols.
    pub fn rank_of(&self, permutation: &[T]) -> Option<u64> {
        if self.is_empty() || permutation.len() != self.num_symbols() {
            return None;
        }

        let mut available: Vec<&T> = self.symbols.iter().collect();
        let mut digits = Vec::with_capacity(permutation.len());
        for symbol in permutation {
            let digit = available
                .binary_search_by(|candidate| (*candidate).cmp(symbol))
                .ok()?;
            available.remove(digit);
            digits.push(digit);
        }
        Some(lehmer_index(&digits, &self.factorials) + 1)
    }
}

impl<T> PermutationTree<T> {
    /// `N!`, or 0 for an empty tree.
    #[inline(always)]
    pub fn total_permutations(&self) -> u64 {
        self.total_permutations
    }

    #[inline(always)]
    pub fn num_symbols(&self) -> usize {
        self.symbols.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbols in ascending order.
    pub fn symbols(&self) -> &[T] {
        &self.symbols
    }

    /// Whether `rank` designates a permutation of this tree.
    pub fn contains_rank(&self, rank: u64) -> bool {
        (1..=self.total_permutations).contains(&rank)
    }

    /// The depth-1 nodes, i.e. the children of the implicit root.
    pub fn root_children(&self) -> NodeIter<'_, T> {
        self.forest.iter_trees()
    }

    /// Number of stored nodes, not counting the implicit root.
    pub fn tot_num_nodes(&self) -> usize {
        self.forest.tot_num_nodes()
    }
}

/// Build the permutation tree of `symbols`. See [`PermutationTree::new`].
pub fn build<T: Ord + Clone>(symbols: &[T]) -> Result<PermutationTree<T>, BuildError> {
    PermutationTree::new(symbols)
}

pub fn total_permutations<T>(tree: &PermutationTree<T>) -> u64 {
    tree.total_permutations()
}

pub fn all_permutations<T: Ord + Clone>(tree: &PermutationTree<T>) -> Vec<Vec<T>> {
    tree.all_permutations()
}

pub fn permutation_by_traversal<T: Ord + Clone>(tree: &PermutationTree<T>, rank: u64) -> Vec<T> {
    tree.permutation_by_traversal(rank)
}

pub fn permutation_by_factorial<T: Ord + Clone>(tree: &PermutationTree<T>, rank: u64) -> Vec<T> {
    tree.permutation_by_factorial(rank)
}

fn build_subtree<T: Clone>(node_builder: &mut NodeBuilder<T>, pool: &[T]) {
    for (index, symbol) in pool.iter().enumerate() {
        let remaining = without(pool, index);
        node_builder.build_child(symbol.clone(), |child_builder| {
            build_subtree(child_builder, &remaining)
        });
    }
}

fn without<T: Clone>(pool: &[T], index: usize) -> Vec<T> {
    pool[..index].iter().chain(&pool[index + 1..]).cloned().collect()
}

// Number of nodes below the root: the sum over d of N!/(N-d)!, one per ordered prefix of length d.
fn num_nodes(len: usize) -> u64 {
    let mut prefixes = 1u64;
    let mut total = 0u64;
    for placed in 0..len {
        prefixes = prefixes.saturating_mul((len - placed) as u64);
        total = total.saturating_add(prefixes);
    }
    total
}

fn collect_leaves<'t, T: Clone>(
    node: NodeRef<'t, T>,
    path: &mut Vec<&'t T>,
    result: &mut Vec<Vec<T>>,
) {
    path.push(node.val());
    if node.is_leaf() {
        result.push(path.iter().map(|&symbol| symbol.clone()).collect());
    } else {
        for child in node.children() {
            collect_leaves(child, path, result);
        }
    }
    path.pop();
}

// Returns true once the target leaf has been found, which stops the search in every ancestor.
fn find_leaf<'t, T: Clone>(
    node: NodeRef<'t, T>,
    target: u64,
    path: &mut Vec<&'t T>,
    leaves_seen: &mut u64,
    found: &mut Option<Vec<T>>,
) -> bool {
    path.push(node.val());
    if node.is_leaf() {
        *leaves_seen += 1;
        if *leaves_seen == target {
            *found = Some(path.iter().map(|&symbol| symbol.clone()).collect());
        }
    } else {
        for child in node.children() {
            if find_leaf(child, target, path, leaves_seen, found) {
                break;
            }
        }
    }
    path.pop();
    found.is_some()
}
