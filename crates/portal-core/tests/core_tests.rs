use std::borrow::Cow;

use portal_core::ident::{assign_ids, collect_category_ids, collect_ids};
use portal_core::loader::parse_document;
use portal_core::search::search;
use portal_core::types::{Node, Tree};

fn sample_doc() -> &'static str {
    r#"{
        "items": [
            {
                "type": "category",
                "title": "Tools",
                "children": [
                    { "type": "link", "title": "Editor", "url": "x" },
                    { "type": "link", "title": "Compiler", "url": "y" }
                ]
            }
        ]
    }"#
}

fn link(title: &str) -> Node {
    Node::Link { id: String::new(), title: title.to_string(), url: Some("u".to_string()) }
}

fn category(title: &str, children: Vec<Node>) -> Node {
    Node::Category { id: String::new(), title: title.to_string(), children, matched: false }
}

#[test]
fn parse_assigns_positional_ids() {
    let tree = parse_document(sample_doc()).expect("parse");
    assert_eq!(tree.items[0].id(), "item-0-");
    let Node::Category { children, .. } = &tree.items[0] else {
        panic!("expected category")
    };
    assert_eq!(children[0].id(), "item-0-item-0-");
    assert_eq!(children[1].id(), "item-0-item-1-");
}

#[test]
fn parse_rejects_malformed_document() {
    let err = parse_document("{ not json").unwrap_err();
    assert!(err.to_string().contains("Failed to load portal data"));
}

#[test]
fn link_without_url_is_not_an_error() {
    let tree = parse_document(r#"{"items":[{"type":"link","title":"Bare"}]}"#).expect("parse");
    let Node::Link { url, .. } = &tree.items[0] else {
        panic!("expected link")
    };
    assert!(url.is_none());
}

#[test]
fn child_id_has_parent_id_as_prefix() {
    let mut tree = Tree {
        items: vec![category(
            "a",
            vec![category("b", vec![link("c"), link("d")]), link("e")],
        )],
    };
    assign_ids(&mut tree);
    let ids = collect_ids(&tree);
    for id in &ids {
        if let Some((parent, _)) = id.rsplit_once("item-") {
            if !parent.is_empty() {
                assert!(ids.contains(parent), "{id} has no parent {parent}");
                assert!(id.starts_with(parent));
            }
        }
    }
}

#[test]
fn assign_ids_is_idempotent() {
    let mut tree = parse_document(sample_doc()).expect("parse");
    let first = collect_ids(&tree);
    assign_ids(&mut tree);
    assert_eq!(first, collect_ids(&tree));
}

#[test]
fn collect_category_ids_skips_links() {
    let tree = parse_document(sample_doc()).expect("parse");
    let ids = collect_category_ids(&tree);
    assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["item-0-".to_string()]);
}

#[test]
fn empty_query_is_identity() {
    let tree = parse_document(sample_doc()).expect("parse");
    let outcome = search(&tree, "   ");
    assert!(matches!(outcome.tree, Cow::Borrowed(_)));
    assert_eq!(*outcome.tree, tree);
    assert_eq!(outcome.match_count, None);
    assert!(!outcome.is_no_results());
}

#[test]
fn link_match_keeps_ancestors_and_counts() {
    let tree = parse_document(sample_doc()).expect("parse");
    let outcome = search(&tree, "edit");
    assert_eq!(outcome.match_count, Some(1));
    let Node::Category { matched, children, .. } = &outcome.tree.items[0] else {
        panic!("expected category")
    };
    assert!(!*matched, "category title did not match");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].title(), "Editor");
}

#[test]
fn matching_is_case_insensitive() {
    let tree = parse_document(sample_doc()).expect("parse");
    assert_eq!(search(&tree, "EDIT").match_count, Some(1));
    assert_eq!(search(&tree, "eDiToR").match_count, Some(1));
}

#[test]
fn category_title_match_keeps_only_matching_children() {
    // Neither child matches "tools": the category stays, title-flagged,
    // with an empty children list (non-matching descendants are dropped).
    let tree = parse_document(sample_doc()).expect("parse");
    let outcome = search(&tree, "tools");
    assert_eq!(outcome.match_count, Some(0), "category titles do not count");
    let Node::Category { matched, children, .. } = &outcome.tree.items[0] else {
        panic!("expected category")
    };
    assert!(*matched);
    assert!(children.is_empty());
}

#[test]
fn no_match_yields_empty_tree_and_zero_count() {
    let tree = parse_document(sample_doc()).expect("parse");
    let outcome = search(&tree, "zzz");
    assert!(outcome.tree.items.is_empty());
    assert_eq!(outcome.match_count, Some(0));
    assert!(outcome.is_no_results());
}

#[test]
fn empty_category_with_nonmatching_title_is_excluded() {
    let mut tree = Tree { items: vec![category("Empty", vec![]), link("Editor")] };
    assign_ids(&mut tree);
    let outcome = search(&tree, "edit");
    assert_eq!(outcome.tree.items.len(), 1);
    assert_eq!(outcome.tree.items[0].title(), "Editor");
}

#[test]
fn count_is_depth_independent() {
    let mut tree = Tree {
        items: vec![
            link("alpha one"),
            category(
                "outer",
                vec![category("inner alpha", vec![link("alpha two"), link("beta")])],
            ),
        ],
    };
    assign_ids(&mut tree);
    let outcome = search(&tree, "alpha");
    // Two links match; the "inner alpha" title match adds nothing.
    assert_eq!(outcome.match_count, Some(2));
}

#[test]
fn filter_is_sound_and_complete() {
    let mut tree = Tree {
        items: vec![
            category("a", vec![link("keep me"), link("drop")]),
            category("b", vec![category("c", vec![link("also keep")])]),
            link("keeper"),
            link("nope"),
        ],
    };
    assign_ids(&mut tree);
    let outcome = search(&tree, "keep");
    let mut titles = Vec::new();
    collect_link_titles(&outcome.tree.items, &mut titles);
    titles.sort_unstable();
    assert_eq!(titles, vec!["also keep", "keep me", "keeper"]);
    assert_eq!(outcome.match_count, Some(3));
}

#[test]
fn sibling_order_is_preserved() {
    let mut tree = Tree {
        items: vec![link("match 3"), link("other"), link("match 1"), link("match 2")],
    };
    assign_ids(&mut tree);
    let outcome = search(&tree, "match");
    let titles: Vec<_> = outcome.tree.items.iter().map(Node::title).collect();
    assert_eq!(titles, vec!["match 3", "match 1", "match 2"]);
}

#[test]
fn search_does_not_mutate_canonical_tree() {
    let tree = parse_document(sample_doc()).expect("parse");
    let before = tree.clone();
    let _ = search(&tree, "edit");
    let _ = search(&tree, "tools");
    assert_eq!(tree, before);
}

#[test]
fn filtered_categories_keep_canonical_ids() {
    let tree = parse_document(sample_doc()).expect("parse");
    let outcome = search(&tree, "compiler");
    assert_eq!(outcome.tree.items[0].id(), "item-0-");
    let Node::Category { children, .. } = &outcome.tree.items[0] else {
        panic!("expected category")
    };
    assert_eq!(children[0].id(), "item-0-item-1-");
}

fn collect_link_titles(nodes: &[Node], out: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Link { title, .. } => out.push(title.clone()),
            Node::Category { children, .. } => collect_link_titles(children, out),
        }
    }
}
