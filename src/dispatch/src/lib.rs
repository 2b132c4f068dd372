//! Before/after interception on top of the host instrumentation layer.
//!
//! The host traps the calls; this crate decides what a hook may touch and makes sure a
//! failing hook never leaks into the hooked call.

mod dispatcher;
mod hook;
mod host;
mod param;
mod value;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use boostplus_locator::MethodDescriptor;
pub use dispatcher::{Dispatcher, HookState, Registration};
pub use hook::{Hook, MutationFn};
pub use host::{CallFrame, HookCallback, HookTarget, InstallError, Instrumentation};
pub use param::{HookParam, Phase};
pub use value::{JavaObject, ObjectRef, Value};
