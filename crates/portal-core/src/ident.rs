//! Positional node identity.
//!
//! Ids are derived from a node's path from the root: each sibling list
//! contributes `item-<index>-`, concatenated onto the parent's id. A child's
//! id therefore always starts with its parent's id, so "is descendant of"
//! reduces to a prefix check. Ids depend only on position: reassigning over
//! an unchanged tree yields identical ids, which is what lets expansion
//! state survive across sessions. Reordering or inserting items changes the
//! ids of everything after the edit; that limitation is accepted.

use crate::types::{Node, Tree};
use std::collections::BTreeSet;

/// Assign an id to every node, depth-first pre-order.
pub fn assign_ids(tree: &mut Tree) {
    assign_level(&mut tree.items, "");
}

fn assign_level(nodes: &mut [Node], prefix: &str) {
    for (index, node) in nodes.iter_mut().enumerate() {
        let assigned = format!("{prefix}item-{index}-");
        match node {
            Node::Category { id, children, .. } => {
                *id = assigned.clone();
                assign_level(children, &assigned);
            }
            Node::Link { id, .. } => *id = assigned,
        }
    }
}

/// Ids of every node in the tree.
pub fn collect_ids(tree: &Tree) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    collect_level(&tree.items, false, &mut ids);
    ids
}

/// Ids of every category node in the tree. These are the keys the
/// expansion state store deals in; links have no open/closed state.
pub fn collect_category_ids(tree: &Tree) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    collect_level(&tree.items, true, &mut ids);
    ids
}

fn collect_level(nodes: &[Node], categories_only: bool, out: &mut BTreeSet<String>) {
    for node in nodes {
        match node {
            Node::Category { id, children, .. } => {
                out.insert(id.clone());
                collect_level(children, categories_only, out);
            }
            Node::Link { id, .. } => {
                if !categories_only {
                    out.insert(id.clone());
                }
            }
        }
    }
}
