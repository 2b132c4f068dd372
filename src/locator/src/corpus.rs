use crate::descriptor::MethodDescriptor;
use crate::signature::StringMatch;
use std::fmt::{Display, Formatter};

/// Dense index of a method inside a corpus, valid only for that corpus.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

impl Display for MethodId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only view of the loaded code, provided by the host instrumentation layer.
///
/// Method ids are `0..len()`. The corpus owns all metadata; located methods borrow it.
pub trait Corpus {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn descriptor(&self, method: MethodId) -> &MethodDescriptor;

    /// Whether a string operand anywhere in the method body matches `wanted`.
    fn uses_string(&self, method: MethodId, wanted: &str, string_match: StringMatch) -> bool;

    /// Methods containing a direct call to `method`.
    fn callers(&self, method: MethodId) -> &[MethodId];
}
