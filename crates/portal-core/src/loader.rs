//! Parse the portal document and assign node identity.

use crate::error::{Error, Result};
use crate::ident;
use crate::types::Tree;

/// Parse a JSON portal document and assign ids to every node.
///
/// Any parse failure collapses into `Error::Load`; the caller surfaces it
/// as a single blocking load error rather than a field-level diagnostic.
pub fn parse_document(raw: &str) -> Result<Tree> {
    let mut tree: Tree =
        serde_json::from_str(raw).map_err(|e| Error::Load(format!("malformed document: {e}")))?;
    ident::assign_ids(&mut tree);
    Ok(tree)
}

/// Read and parse a portal document from disk.
pub fn load_from_path(path: &std::path::Path) -> Result<Tree> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::Load(format!("cannot read {}: {e}", path.display())))?;
    parse_document(&raw)
}
