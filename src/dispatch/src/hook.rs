use crate::param::HookParam;
use anyhow::Result;

pub type MutationFn = Box<dyn Fn(&mut HookParam<'_>) -> Result<()> + Send + Sync>;

/// A pair of optional callbacks around one method.
///
/// Callbacks run on the caller's thread and must not keep state across calls.
#[derive(Default)]
pub struct Hook {
    pub(crate) before: Option<MutationFn>,
    pub(crate) after: Option<MutationFn>,
}

impl Hook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut HookParam<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.before = Some(Box::new(callback));
        self
    }

    pub fn after<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut HookParam<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.after = Some(Box::new(callback));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}
