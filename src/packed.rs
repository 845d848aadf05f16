//! Packed node storage.
//!
//! Every node of a forest lives in a single `Vec`, in depth-first pre-order. A node only knows its
//! value and the distance to its next sibling, so the subtree of a node is always the contiguous
//! run of nodes between it and that sibling.
use std::collections::TryReserveError;
use std::num::NonZeroUsize;

/// A forest whose nodes are stored contiguously in pre-order.
///
/// The structure is built once through [`NodeBuilder`]s and can only be read afterwards.
pub(crate) struct PackedForest<T> {
    data: Vec<NodeData<T>>,
    last_added_root_node_index: Option<usize>, // to update the previous root's next_sibling_offset
}

impl<T> PackedForest<T> {
    pub fn new() -> PackedForest<T> {
        PackedForest {
            data: Vec::new(),
            last_added_root_node_index: None,
        }
    }

    /// Create an empty forest with room for exactly `num_nodes` nodes, failing instead of aborting
    /// when that much memory can't be reserved.
    pub fn try_with_capacity(num_nodes: usize) -> Result<PackedForest<T>, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(num_nodes)?;
        Ok(PackedForest {
            data,
            last_added_root_node_index: None,
        })
    }

    pub fn build_tree<R>(
        &mut self,
        root_val: T,
        node_builder_cb: impl FnOnce(&mut NodeBuilder<T>) -> R,
    ) -> R {
        node_builder_cb(&mut self.add_tree(root_val))
    }

    pub fn add_tree(&mut self, root_val: T) -> NodeBuilder<'_, T> {
        let new_root_node_index = self.data.len();
        self.data.push(NodeData {
            val: root_val,
            next_sibling_offset: None,
        });

        if let Some(last_root_index) = self.last_added_root_node_index {
            debug_assert!(last_root_index < new_root_node_index);
            self.data[last_root_index].next_sibling_offset =
                NonZeroUsize::new(new_root_node_index - last_root_index);
        }
        self.last_added_root_node_index = Some(new_root_node_index);

        NodeBuilder {
            store: self,
            last_added_child_index: None,
        }
    }

    pub fn iter_trees(&self) -> NodeIter<'_, T> {
        NodeIter {
            remaining_nodes: &self.data,
        }
    }

    pub fn tot_num_nodes(&self) -> usize {
        self.data.len()
    }
}

struct NodeData<T> {
    val: T,
    next_sibling_offset: Option<NonZeroUsize>, // distance to the next sibling, None for the last
}

/// Appends children to the node it was created for.
///
/// Children have to be built completely (including their own children) before the next sibling is
/// added, which is what keeps the storage in pre-order.
pub(crate) struct NodeBuilder<'a, T> {
    store: &'a mut PackedForest<T>,
    last_added_child_index: Option<usize>, // to update next_sibling_offset
}

impl<'a, T> NodeBuilder<'a, T> {
    pub fn build_child<R>(
        &mut self,
        val: T,
        child_builder_cb: impl FnOnce(&mut NodeBuilder<T>) -> R,
    ) -> R {
        child_builder_cb(&mut self.add_child(val))
    }

    pub fn add_child(&mut self, val: T) -> NodeBuilder<'_, T> {
        let child_node_index = self.store.data.len();
        self.store.data.push(NodeData {
            val,
            next_sibling_offset: None,
        });

        if let Some(last_added_child_index) = self.last_added_child_index {
            debug_assert!(last_added_child_index < child_node_index);
            self.store.data[last_added_child_index].next_sibling_offset =
                NonZeroUsize::new(child_node_index - last_added_child_index);
        }
        self.last_added_child_index = Some(child_node_index);

        NodeBuilder {
            store: self.store,
            last_added_child_index: None,
        }
    }
}

/// Iterator over a list of sibling nodes.
pub struct NodeIter<'t, T> {
    remaining_nodes: &'t [NodeData<T>], // the siblings still to visit and all their descendants
}

impl<'t, T> Clone for NodeIter<'t, T> {
    fn clone(&self) -> Self {
        Self {
            remaining_nodes: self.remaining_nodes,
        }
    }
}

impl<'t, T> Copy for NodeIter<'t, T> {}

impl<'t, T> Iterator for NodeIter<'t, T> {
    type Item = NodeRef<'t, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining_nodes = std::mem::take(&mut self.remaining_nodes);
        let cur_node = remaining_nodes.first()?;
        match cur_node.next_sibling_offset {
            Some(next_sibling_offset) => {
                let (cur_node_slice, next_nodes_slice) =
                    remaining_nodes.split_at(next_sibling_offset.get());
                self.remaining_nodes = next_nodes_slice;
                Some(NodeRef {
                    slice: cur_node_slice,
                })
            }
            None => Some(NodeRef {
                slice: remaining_nodes,
            }),
        }
    }
}

/// A shared reference to one node and, implicitly, its whole subtree.
// Not using #[derive(Clone, Copy)] because it adds the T: Copy bound, which is unnecessary
pub struct NodeRef<'t, T> {
    slice: &'t [NodeData<T>], // the current node followed by all its descendants, never empty
}

impl<'t, T> Clone for NodeRef<'t, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, T> Copy for NodeRef<'t, T> {}

impl<'t, T> NodeRef<'t, T> {
    pub fn children(&self) -> NodeIter<'t, T> {
        NodeIter {
            remaining_nodes: &self.slice[1..],
        }
    }

    pub fn val(&self) -> &'t T {
        &self.slice[0].val
    }

    pub fn is_leaf(&self) -> bool {
        self.slice.len() == 1
    }

    /// Counts the direct children by walking the sibling chain, O(number of children).
    pub fn num_children(&self) -> usize {
        self.children().count()
    }

    pub fn num_descendants_incl_self(&self) -> usize {
        self.slice.len()
    }

    pub fn num_descendants_excl_self(&self) -> usize {
        self.slice.len() - 1
    }
}
