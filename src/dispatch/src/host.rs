use crate::value::{ObjectRef, Value};
use boostplus_locator::{LocatedMethod, MethodDescriptor, MethodId};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("class not found: {0}")]
    ClassNotFound(String),

    #[error("method not found: {0}")]
    MethodNotFound(MethodDescriptor),

    #[error("unsupported on this platform: {0}")]
    Unsupported(String),

    #[error("host rejected {target}: {reason}")]
    Rejected {
        target: MethodDescriptor,
        reason: String,
    },
}

/// Where a hook goes: a method found by signature search, or one known by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookTarget {
    Located {
        id: MethodId,
        descriptor: MethodDescriptor,
    },
    Descriptor(MethodDescriptor),
}

impl HookTarget {
    pub fn descriptor(&self) -> &MethodDescriptor {
        match self {
            HookTarget::Located { descriptor, .. } => descriptor,
            HookTarget::Descriptor(descriptor) => descriptor,
        }
    }
}

impl From<LocatedMethod<'_>> for HookTarget {
    fn from(method: LocatedMethod<'_>) -> Self {
        HookTarget::Located {
            id: method.id,
            descriptor: method.descriptor.clone(),
        }
    }
}

impl From<MethodDescriptor> for HookTarget {
    fn from(descriptor: MethodDescriptor) -> Self {
        HookTarget::Descriptor(descriptor)
    }
}

impl Display for HookTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HookTarget::Located { id, descriptor } => write!(f, "{descriptor} [{id}]"),
            HookTarget::Descriptor(descriptor) => write!(f, "{descriptor}"),
        }
    }
}

/// State of one trapped invocation as the host holds it.
///
/// The host fills `args`, runs `before`, runs the original method with whatever `args`
/// then holds, stores its return value in `result`, runs `after`, and hands `result` back
/// to the caller.
pub struct CallFrame {
    pub this: Option<ObjectRef>,
    pub args: Vec<Value>,
    pub result: Value,
}

impl CallFrame {
    pub fn new(this: Option<ObjectRef>, args: Vec<Value>) -> Self {
        Self {
            this,
            args,
            result: Value::Null,
        }
    }
}

/// Callback the host invokes around each trapped call. Never panics and never fails.
pub trait HookCallback: Send + Sync {
    fn before(&self, frame: &mut CallFrame);

    fn after(&self, frame: &mut CallFrame);
}

/// Install primitive of the host instrumentation layer.
pub trait Instrumentation: Send + Sync {
    fn install(
        &self,
        target: &HookTarget,
        callback: Arc<dyn HookCallback>,
    ) -> Result<(), InstallError>;
}
