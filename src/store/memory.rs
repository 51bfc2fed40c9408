//! In-memory state store

use std::collections::HashMap;

use super::{StateKey, StateStore};

/// A mutation applied to a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// `store(key, value)`
    Store(StateKey, Vec<u8>),
    /// `remove(key)`
    Remove(StateKey),
}

/// Keeps state in a map and records every mutation.
///
/// Mirrors [`FileStore`](super::FileStore) semantics, including an empty
/// value loading as `None` while still counting as present.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<StateKey, Vec<u8>>,
    ops: Vec<StoreOp>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a snapshot and optional pending echo
    pub fn with_state<T: AsRef<[u8]>>(last_text: Option<T>, echo_pending: bool) -> Self {
        let mut values = HashMap::new();
        if let Some(text) = last_text {
            values.insert(StateKey::LastText, text.as_ref().to_vec());
        }
        if echo_pending {
            values.insert(StateKey::EchoPending, Vec::new());
        }
        Self {
            values,
            ops: Vec::new(),
        }
    }

    /// All mutations so far, in order
    pub fn ops(&self) -> &[StoreOp] {
        &self.ops
    }

    /// Mutations touching `key`
    pub fn ops_on(&self, key: StateKey) -> impl Iterator<Item = &StoreOp> {
        self.ops.iter().filter(move |op| match op {
            StoreOp::Store(k, _) | StoreOp::Remove(k) => *k == key,
        })
    }

    /// Forget recorded mutations, keeping the values
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: StateKey) -> Option<Vec<u8>> {
        self.values.get(&key).filter(|v| !v.is_empty()).cloned()
    }

    fn contains(&self, key: StateKey) -> bool {
        self.values.contains_key(&key)
    }

    fn store(&mut self, key: StateKey, value: &[u8]) {
        self.values.insert(key, value.to_vec());
        self.ops.push(StoreOp::Store(key, value.to_vec()));
    }

    fn remove(&mut self, key: StateKey) {
        self.values.remove(&key);
        self.ops.push(StoreOp::Remove(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_state() {
        let store = MemoryStore::with_state(Some(b"hello"), true);
        assert_eq!(store.load(StateKey::LastText), Some(b"hello".to_vec()));
        assert!(store.contains(StateKey::EchoPending));
        assert_eq!(store.load(StateKey::EchoPending), None);
        assert!(store.ops().is_empty());
    }

    #[test]
    fn test_records_ops() {
        let mut store = MemoryStore::new();
        store.store(StateKey::LastText, b"x");
        store.remove(StateKey::EchoPending);

        assert_eq!(
            store.ops(),
            &[
                StoreOp::Store(StateKey::LastText, b"x".to_vec()),
                StoreOp::Remove(StateKey::EchoPending),
            ]
        );
        assert_eq!(store.ops_on(StateKey::LastText).count(), 1);

        store.clear_ops();
        assert!(store.ops().is_empty());
        assert!(store.contains(StateKey::LastText));
    }
}
