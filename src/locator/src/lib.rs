//! Signature search over the target's method corpus.
//!
//! Obfuscated builds rename everything, so targets are recognised by the string literals
//! they and their callers reference rather than by name.

mod corpus;
mod descriptor;
mod locator;
mod memory;
mod signature;

pub use corpus::{Corpus, MethodId};
pub use descriptor::MethodDescriptor;
pub use locator::{LocateError, LocatedMethod, Locator};
pub use memory::{CorpusError, InMemoryCorpus, MethodEntry};
pub use signature::{MethodSignature, StringMatch};
