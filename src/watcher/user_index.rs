use {
    crate::models::OwnershipRecord,
    rustc_hash::FxHashMap,
    std::sync::{Arc, RwLock},
    tracing::warn,
};

/// Read-side handle over the shared address-ownership map.
///
/// The map is owned and updated by an external subsystem; the watcher takes
/// the read lock around each individual lookup and never holds it across an
/// RPC call. Lookups are point-in-time: the map may change between two
/// lookups within the same transaction.
#[derive(Clone, Default)]
pub struct UserIndex {
    inner: Arc<RwLock<FxHashMap<String, OwnershipRecord>>>,
}

impl UserIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, address: &str) -> Option<OwnershipRecord> {
        let Ok(map) = self.inner.read() else {
            warn!("user index lock poisoned, treating {address} as untracked");
            return None;
        };
        map.get(address).cloned()
    }

    pub fn track(&self, address: impl Into<String>, record: OwnershipRecord) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(address.into(), record);
        }
    }

    pub fn untrack(&self, address: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(address);
        }
    }
}
