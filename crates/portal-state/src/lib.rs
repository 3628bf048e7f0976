//! Persistence for the expand/collapse state of portal categories.
//!
//! The store holds one flat `id -> bool` snapshot of the categories present
//! in the last render. `save` overwrites the snapshot wholesale (never a
//! merge); `load` fails soft, treating a missing or corrupt record the same
//! as no prior state. `reconcile` applies a loaded snapshot against the
//! current tree, dropping ids the tree no longer has.

use anyhow::Context;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

use portal_core::traits::StateStore;
use portal_core::types::ExpansionMap;

/// Expansion state persisted as a single JSON file.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> ExpansionMap {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // Missing record is the normal first-visit case, not a failure.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ExpansionMap::new(),
            Err(e) => {
                warn!("cannot read expansion state {}: {e}", self.path.display());
                return ExpansionMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!("corrupt expansion state {}: {e}", self.path.display());
                ExpansionMap::new()
            }
        }
    }

    fn save(&self, state: &ExpansionMap) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string(state).context("serializing expansion state")?;
        // Write-then-rename so a crash mid-save never leaves a torn record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStateStore {
    state: Mutex<ExpansionMap>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ExpansionMap {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> ExpansionMap {
        self.snapshot()
    }

    fn save(&self, state: &ExpansionMap) -> anyhow::Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("state store mutex poisoned"))?;
        *guard = state.clone();
        Ok(())
    }
}

/// Drop persisted entries that do not apply to the current render.
///
/// Only `true` (expanded) entries whose id exists in `current_ids` survive;
/// `false` or absent entries leave a node at its default collapsed state.
/// Unknown ids are inert, never an error: the tree shape may differ between
/// the snapshot's origin and the current load.
pub fn reconcile(saved: &ExpansionMap, current_ids: &BTreeSet<String>) -> ExpansionMap {
    saved
        .iter()
        .filter(|(id, &expanded)| expanded && current_ids.contains(*id))
        .map(|(id, &expanded)| (id.clone(), expanded))
        .collect()
}
