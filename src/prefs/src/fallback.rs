use crate::backend::{KvBackend, PrefsError};
use crate::keys::PolicyValue;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};

/// Chooses between the operator's shared store and the patched process' own store.
///
/// Reads go to the shared store until the patched process writes something itself (a
/// deep-link override). From then on the local store is authoritative for this process.
/// A failing shared read falls through to the local store.
pub struct FallbackBackend {
    shared: Box<dyn KvBackend>,
    local: Box<dyn KvBackend>,
    local_only: AtomicBool,
}

impl FallbackBackend {
    pub fn new(shared: Box<dyn KvBackend>, local: Box<dyn KvBackend>) -> Self {
        Self {
            shared,
            local,
            local_only: AtomicBool::new(false),
        }
    }

    pub fn is_local_only(&self) -> bool {
        self.local_only.load(Ordering::Acquire)
    }
}

impl KvBackend for FallbackBackend {
    fn name(&self) -> &'static str {
        if self.is_local_only() {
            self.local.name()
        } else {
            self.shared.name()
        }
    }

    fn get(&self, key: &str) -> Result<Option<PolicyValue>, PrefsError> {
        if self.is_local_only() {
            return self.local.get(key);
        }

        match self.shared.get(key) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(
                    "{} store unavailable for `{key}`, trying {}: {err}",
                    self.shared.name(),
                    self.local.name()
                );
                self.local.get(key)
            }
        }
    }

    fn put(&self, key: &str, value: PolicyValue) -> Result<(), PrefsError> {
        if !self.local_only.swap(true, Ordering::AcqRel) {
            info!("switching to {} store after local write", self.local.name());
        }

        self.local.put(key, value)
    }
}
