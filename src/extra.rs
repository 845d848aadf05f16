// Trait implementations for the tree and node types that aren't needed by the algorithms.

use crate::*;

use std::fmt::{Debug, Formatter};

fn fmt_node<T: Debug>(node: NodeRef<T>, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{ value: {:?}, children: [", node.val())?;
    for child in node.children() {
        fmt_node(child, f)?;
    }
    write!(f, "]}}")
}

impl<'t, T: Debug> Debug for NodeRef<'t, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_node(*self, f)
    }
}

impl<T: Debug> Debug for PermutationTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PermutationTree {{ symbols: {:?}, total_permutations: {}, root: [",
            self.symbols(),
            self.total_permutations()
        )?;
        for child in self.root_children() {
            fmt_node(child, f)?;
        }
        write!(f, "]}}")
    }
}
