use crate::backend::{KvBackend, PrefsError};
use crate::keys::{PolicyKey, PolicyValue};
use log::warn;
use std::sync::Arc;

/// Typed, always-defaulted access to the policy keys.
///
/// Read failures never surface: a broken medium, a missing key or a value of the wrong
/// kind all yield the caller's default.
#[derive(Clone)]
pub struct PolicyStore {
    backend: Arc<dyn KvBackend>,
}

impl PolicyStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    fn read(&self, key: PolicyKey) -> Option<PolicyValue> {
        self.backend
            .get(key.name())
            .inspect_err(|err| warn!("failed to read `{key}` from {}: {err}", self.backend.name()))
            .ok()
            .flatten()
    }

    pub fn get_bool(&self, key: PolicyKey, default: bool) -> bool {
        match self.read(key) {
            Some(PolicyValue::Bool(value)) => value,
            Some(other) => {
                warn!("`{key}` holds a {} value, using default", other.kind());
                default
            }
            None => default,
        }
    }

    pub fn get_int(&self, key: PolicyKey, default: i32) -> i32 {
        match self.read(key) {
            Some(PolicyValue::Int(value)) => value,
            Some(other) => {
                warn!("`{key}` holds a {} value, using default", other.kind());
                default
            }
            None => default,
        }
    }

    /// Reads a key with its declared default.
    pub fn get(&self, key: PolicyKey) -> PolicyValue {
        match key.default_value() {
            PolicyValue::Bool(default) => PolicyValue::Bool(self.get_bool(key, default)),
            PolicyValue::Int(default) => PolicyValue::Int(self.get_int(key, default)),
        }
    }

    pub fn set_bool(&self, key: PolicyKey, value: bool) -> Result<(), PrefsError> {
        self.set(key, PolicyValue::Bool(value))
    }

    pub fn set_int(&self, key: PolicyKey, value: i32) -> Result<(), PrefsError> {
        self.set(key, PolicyValue::Int(value))
    }

    pub fn set(&self, key: PolicyKey, value: PolicyValue) -> Result<(), PrefsError> {
        if key.kind() != value.kind() {
            return Err(PrefsError::KindMismatch {
                key,
                expected: key.kind(),
                found: value.kind(),
            });
        }

        self.backend.put(key.name(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::ValueKind;
    use crate::memory::MemoryBackend;
    use strum::IntoEnumIterator;

    struct BrokenBackend;

    impl KvBackend for BrokenBackend {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn get(&self, _key: &str) -> Result<Option<PolicyValue>, PrefsError> {
            Err(PrefsError::Io {
                path: "/nonexistent".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }

        fn put(&self, _key: &str, _value: PolicyValue) -> Result<(), PrefsError> {
            Ok(())
        }
    }

    fn memory_store() -> PolicyStore {
        PolicyStore::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn bool_round_trip() {
        let store = memory_store();

        for key in PolicyKey::iter().filter(|key| key.kind() == ValueKind::Bool) {
            for value in [true, false] {
                store.set_bool(key, value).unwrap();
                assert_eq!(store.get_bool(key, true), value);
                assert_eq!(store.get_bool(key, false), value);
            }
        }
    }

    #[test]
    fn int_round_trip() {
        let store = memory_store();

        for key in PolicyKey::iter().filter(|key| key.kind() == ValueKind::Int) {
            for value in [-1, 0, 7, i32::MAX] {
                store.set_int(key, value).unwrap();
                assert_eq!(store.get_int(key, 42), value);
            }
        }
    }

    #[test]
    fn unset_keys_yield_defaults() {
        let store = memory_store();

        assert!(!store.get_bool(PolicyKey::Enabled, false));
        assert!(store.get_bool(PolicyKey::Enabled, true));
        assert_eq!(store.get_int(PolicyKey::AspectRatio, -1), -1);
        assert_eq!(store.get(PolicyKey::ExtendIntoNotch), PolicyValue::Bool(true));
        assert_eq!(store.get(PolicyKey::Resolution), PolicyValue::Int(0));
    }

    #[test]
    fn broken_backend_yields_defaults() {
        let store = PolicyStore::new(Arc::new(BrokenBackend));

        assert!(store.get_bool(PolicyKey::UnlockBitrate, true));
        assert_eq!(store.get_int(PolicyKey::Resolution, 3), 3);
    }

    #[test]
    fn kind_mismatch_is_rejected_on_write_and_defaulted_on_read() {
        let backend = Arc::new(MemoryBackend::new());
        let store = PolicyStore::new(backend.clone());

        assert!(matches!(
            store.set_int(PolicyKey::Enabled, 1),
            Err(PrefsError::KindMismatch { .. })
        ));

        backend.put("enabled", PolicyValue::Int(1)).unwrap();
        assert!(!store.get_bool(PolicyKey::Enabled, false));
    }
}
