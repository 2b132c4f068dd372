use crate::keys::{PolicyKey, PolicyValue, ValueKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preference file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("key `{key}` holds a {found} value, expected {expected}")]
    KindMismatch {
        key: PolicyKey,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("invalid deep-link uri: {0}")]
    InvalidUri(#[from] url::ParseError),
}

/// Backing medium for the policy store.
///
/// Implementations must not cache: `get` reflects the medium at the time of the call.
pub trait KvBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn get(&self, key: &str) -> Result<Option<PolicyValue>, PrefsError>;

    fn put(&self, key: &str, value: PolicyValue) -> Result<(), PrefsError>;
}
