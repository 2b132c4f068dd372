//! In-process stand-ins for the host instrumentation layer and its objects.

use crate::host::{CallFrame, HookCallback, HookTarget, InstallError, Instrumentation};
use crate::value::{JavaObject, Value};
use anyhow::{Context, Result};
use boostplus_locator::MethodDescriptor;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Records installs and plays calls through the installed callbacks.
#[derive(Default)]
pub struct FakeInstrumentation {
    hooks: Mutex<Vec<(HookTarget, Arc<dyn HookCallback>)>>,
    rejected: Mutex<HashSet<String>>,
}

impl FakeInstrumentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every install on `class` fail as if the class were absent.
    pub fn reject_class(&self, class: &str) {
        self.rejected.lock().insert(class.into());
    }

    pub fn installed(&self) -> Vec<HookTarget> {
        self.hooks
            .lock()
            .iter()
            .map(|(target, _)| target.clone())
            .collect()
    }

    pub fn is_hooked(&self, class: &str, name: &str) -> bool {
        self.hooks.lock().iter().any(|(target, _)| {
            let descriptor = target.descriptor();
            descriptor.class == class && descriptor.name == name
        })
    }

    /// Runs one call of `method`: every `before` in install order, `body` with the
    /// resulting arguments, then every `after` in reverse order.
    pub fn invoke<F>(
        &self,
        method: &MethodDescriptor,
        this: Option<crate::value::ObjectRef>,
        args: Vec<Value>,
        body: F,
    ) -> Value
    where
        F: FnOnce(&[Value]) -> Value,
    {
        // released before running callbacks so the body may call back in
        let callbacks: Vec<_> = self
            .hooks
            .lock()
            .iter()
            .filter(|(target, _)| target.descriptor() == method)
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        let mut frame = CallFrame::new(this, args);

        for callback in &callbacks {
            callback.before(&mut frame);
        }

        frame.result = body(&frame.args);

        for callback in callbacks.iter().rev() {
            callback.after(&mut frame);
        }

        frame.result
    }
}

impl Instrumentation for FakeInstrumentation {
    fn install(
        &self,
        target: &HookTarget,
        callback: Arc<dyn HookCallback>,
    ) -> Result<(), InstallError> {
        let class = &target.descriptor().class;

        if self.rejected.lock().contains(class) {
            return Err(InstallError::ClassNotFound(class.clone()));
        }

        self.hooks.lock().push((target.clone(), callback));
        Ok(())
    }
}

/// Bag of fields with bean-style accessors.
///
/// `getFoo()` reads field `foo`, `setFoo(v)` writes it; other calls return the value
/// registered with [`FakeObjectBuilder::returns`] or null. Every call is recorded.
pub struct FakeObject {
    class: String,
    fields: Mutex<HashMap<String, Value>>,
    returns: HashMap<String, Value>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

fn property_name(accessor: &str) -> String {
    let mut chars = accessor.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl FakeObject {
    pub fn new(class: &str) -> Arc<Self> {
        Self::builder(class).build()
    }

    pub fn builder(class: &str) -> FakeObjectBuilder {
        FakeObjectBuilder {
            object: FakeObject {
                class: class.into(),
                fields: Mutex::default(),
                returns: HashMap::new(),
                calls: Mutex::default(),
            },
        }
    }

    pub fn field(&self, name: &str) -> Value {
        self.fields.lock().get(name).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Vec<Value>> {
        self.calls
            .lock()
            .iter()
            .filter(|(name, _)| name == method)
            .map(|(_, args)| args.clone())
            .collect()
    }
}

pub struct FakeObjectBuilder {
    object: FakeObject,
}

impl FakeObjectBuilder {
    pub fn field<V: Into<Value>>(self, name: &str, value: V) -> Self {
        self.object.fields.lock().insert(name.into(), value.into());
        self
    }

    pub fn returns<V: Into<Value>>(mut self, method: &str, value: V) -> Self {
        self.object.returns.insert(method.into(), value.into());
        self
    }

    pub fn build(self) -> Arc<FakeObject> {
        Arc::new(self.object)
    }
}

impl JavaObject for FakeObject {
    fn class_name(&self) -> String {
        self.class.clone()
    }

    fn call_method(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.calls.lock().push((name.into(), args.to_vec()));

        if let Some(value) = self.returns.get(name) {
            return Ok(value.clone());
        }

        if let Some(property) = name.strip_prefix("get").filter(|_| args.is_empty()) {
            return self.get_field(&property_name(property));
        }

        if let (Some(property), [value]) = (name.strip_prefix("set"), args) {
            self.set_field(&property_name(property), value.clone())?;
        }

        Ok(Value::Null)
    }

    fn get_field(&self, name: &str) -> Result<Value> {
        self.fields
            .lock()
            .get(name)
            .cloned()
            .with_context(|| format!("{} has no field `{name}`", self.class))
    }

    fn set_field(&self, name: &str, value: Value) -> Result<()> {
        self.fields.lock().insert(name.into(), value);
        Ok(())
    }
}
