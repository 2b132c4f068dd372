use crate::backend::{KvBackend, PrefsError};
use crate::keys::PolicyValue;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-process backend, used as the app-local store of the patched process.
#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, PolicyValue>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<PolicyValue>, PrefsError> {
        Ok(self.data.read().get(key).copied())
    }

    fn put(&self, key: &str, value: PolicyValue) -> Result<(), PrefsError> {
        self.data.write().insert(key.into(), value);
        Ok(())
    }
}
