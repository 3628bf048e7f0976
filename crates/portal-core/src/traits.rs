use crate::types::ExpansionMap;

/// Persistence seam for the expansion state.
///
/// `load` is infallible by contract: any read or parse failure degrades to
/// an empty map on the implementor's side. Only `save` may report errors,
/// and callers are expected to absorb them (a lost snapshot is not fatal).
pub trait StateStore: Send + Sync {
    fn load(&self) -> ExpansionMap;
    fn save(&self, state: &ExpansionMap) -> anyhow::Result<()>;
}
