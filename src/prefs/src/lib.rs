//! Operator policies shared between the configuration surface and the patched process.
//!
//! Every read goes back to the backing medium: the two sides live in different processes
//! and nothing tells the patched side that a value changed.

mod backend;
mod fallback;
mod file;
mod keys;
mod memory;
mod policy;
mod store;
mod uri;

pub use backend::{KvBackend, PrefsError};
pub use fallback::FallbackBackend;
pub use file::FileBackend;
pub use keys::{PolicyKey, PolicyValue, ValueKind};
pub use memory::MemoryBackend;
pub use policy::NO_SELECTION;
pub use store::PolicyStore;
pub use uri::{apply_query, apply_uri};
