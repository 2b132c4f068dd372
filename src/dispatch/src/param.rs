use crate::value::{ObjectRef, Value};
use anyhow::{Context, Result, bail};
use boostplus_locator::MethodDescriptor;
use strum_macros::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum Phase {
    Before,
    After,
}

/// What a mutation closure sees of one intercepted call.
///
/// Arguments are writable in both phases but only reach the original method from
/// `Before`. The return value is readable and writable in `After` only. There is no way
/// to skip the original method.
pub struct HookParam<'a> {
    phase: Phase,
    method: &'a MethodDescriptor,
    this: Option<&'a ObjectRef>,
    pub(crate) args: Vec<Value>,
    pub(crate) result: Option<Value>,
}

impl<'a> HookParam<'a> {
    pub fn new(
        phase: Phase,
        method: &'a MethodDescriptor,
        this: Option<&'a ObjectRef>,
        args: Vec<Value>,
        result: Option<Value>,
    ) -> Self {
        Self {
            phase,
            method,
            this,
            args,
            result,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn method(&self) -> &MethodDescriptor {
        self.method
    }

    /// The receiver; fails for static methods.
    pub fn this(&self) -> Result<&ObjectRef> {
        self.this
            .with_context(|| format!("{} has no receiver", self.method))
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Result<&Value> {
        self.args.get(index).with_context(|| {
            format!(
                "{} has {} arguments, wanted #{index}",
                self.method,
                self.args.len()
            )
        })
    }

    pub fn set_arg<V: Into<Value>>(&mut self, index: usize, value: V) -> Result<()> {
        let count = self.args.len();
        let slot = self.args.get_mut(index).with_context(|| {
            format!("{} has {count} arguments, wanted #{index}", self.method)
        })?;

        *slot = value.into();
        Ok(())
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn set_result<V: Into<Value>>(&mut self, value: V) -> Result<()> {
        match &mut self.result {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => bail!(
                "{}: the result can only be changed after the original call",
                self.method
            ),
        }
    }
}
