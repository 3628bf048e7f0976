//! Domain types shared by the search engine, state store, and session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type NodeId = String;

/// Expand/collapse snapshot keyed by node id. `true` means expanded.
///
/// A `BTreeMap` keeps the persisted form deterministic.
pub type ExpansionMap = BTreeMap<NodeId, bool>;

/// A single entry in the portal hierarchy.
///
/// The input document discriminates variants with a `"type"` field, so the
/// enum is internally tagged. `id` is empty until `ident::assign_ids` runs;
/// it is assigned once at load time and never regenerated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Category {
        #[serde(default)]
        id: NodeId,
        title: String,
        #[serde(default)]
        children: Vec<Node>,
        /// Set by the search engine iff this category's own title matched
        /// the active query. Never read from the input document.
        #[serde(default, skip_deserializing)]
        matched: bool,
    },
    Link {
        #[serde(default)]
        id: NodeId,
        title: String,
        /// A link without a URL is unrenderable but not an error.
        #[serde(default)]
        url: Option<String>,
    },
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Category { id, .. } | Node::Link { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Node::Category { title, .. } | Node::Link { title, .. } => title,
        }
    }
}

/// The portal document: an ordered sequence of top-level nodes.
///
/// Exactly one canonical `Tree` is loaded per session. Filtering always
/// derives a fresh tree; the canonical one is never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub items: Vec<Node>,
}
