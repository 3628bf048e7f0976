//! Recursive filter over the portal tree.
//!
//! `search` is a pure function of `(tree, query)`: it never mutates the
//! canonical tree and always derives a fresh filtered tree (or borrows the
//! original unchanged for the empty-query identity case).

use crate::types::{Node, Tree};
use std::borrow::Cow;

/// Result of one search invocation.
///
/// `match_count` is `None` when the query was empty after trimming; the
/// count display is suppressed in that case rather than showing a total.
#[derive(Debug)]
pub struct SearchOutcome<'t> {
    pub tree: Cow<'t, Tree>,
    pub match_count: Option<usize>,
}

impl SearchOutcome<'_> {
    /// Non-empty query that matched nothing.
    pub fn is_no_results(&self) -> bool {
        self.match_count == Some(0)
    }
}

/// Filter `tree` down to links whose title contains `query`
/// (case-insensitive substring), plus the categories needed to reach them.
///
/// A category is kept iff its own title matches or any descendant link
/// survives the filter; its children are always replaced by the filtered
/// list, so a title-only match can surface a category with no children.
/// The `matched` flag on kept categories records an own-title match.
/// Only links count toward `match_count`; sibling order is preserved.
pub fn search<'t>(tree: &'t Tree, query: &str) -> SearchOutcome<'t> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return SearchOutcome { tree: Cow::Borrowed(tree), match_count: None };
    }
    let needle = trimmed.to_lowercase();
    let (items, count) = filter_nodes(&tree.items, &needle);
    SearchOutcome { tree: Cow::Owned(Tree { items }), match_count: Some(count) }
}

/// Case-insensitive substring containment, with the needle pre-lowercased.
fn title_matches(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}

fn filter_nodes(nodes: &[Node], needle: &str) -> (Vec<Node>, usize) {
    let mut kept = Vec::new();
    let mut count = 0;
    for node in nodes {
        match node {
            Node::Link { title, .. } => {
                if title_matches(title, needle) {
                    kept.push(node.clone());
                    count += 1;
                }
            }
            Node::Category { id, title, children, .. } => {
                let (filtered, child_count) = filter_nodes(children, needle);
                let title_match = title_matches(title, needle);
                if title_match || !filtered.is_empty() {
                    kept.push(Node::Category {
                        id: id.clone(),
                        title: title.clone(),
                        children: filtered,
                        matched: title_match,
                    });
                    count += child_count;
                }
            }
        }
    }
    (kept, count)
}
