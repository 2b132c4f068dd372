use crate::hook::{Hook, MutationFn};
use crate::host::{CallFrame, HookCallback, HookTarget, InstallError, Instrumentation};
use crate::param::{HookParam, Phase};
use boostplus_locator::MethodDescriptor;
use log::{debug, error, info, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use strum_macros::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
#[repr(u8)]
pub enum HookState {
    Unregistered,
    Installed,
    /// Installed and invoked at least once.
    Active,
    /// Target missing or rejected. Terminal, there is no retry.
    Disabled,
}

impl HookState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => HookState::Unregistered,
            1 => HookState::Installed,
            2 => HookState::Active,
            _ => HookState::Disabled,
        }
    }
}

/// Handle on an installed hook, lives as long as the process.
#[derive(Clone)]
pub struct Registration {
    target: HookTarget,
    state: Arc<AtomicU8>,
}

impl Registration {
    pub fn target(&self) -> &HookTarget {
        &self.target
    }

    pub fn state(&self) -> HookState {
        HookState::from_raw(self.state.load(Ordering::Acquire))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "(non-string panic payload)"
    }
}

struct GuardedCallback {
    descriptor: MethodDescriptor,
    hook: Hook,
    state: Arc<AtomicU8>,
}

impl GuardedCallback {
    fn run(&self, phase: Phase, callback: &MutationFn, frame: &mut CallFrame) {
        let _ = self.state.compare_exchange(
            HookState::Installed as u8,
            HookState::Active as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );

        // mutations land on copies and are committed only if the callback succeeds
        let result = match phase {
            Phase::Before => None,
            Phase::After => Some(frame.result.clone()),
        };

        let mut param = HookParam::new(
            phase,
            &self.descriptor,
            frame.this.as_ref(),
            frame.args.clone(),
            result,
        );

        match panic::catch_unwind(AssertUnwindSafe(|| callback(&mut param))) {
            Ok(Ok(())) => {
                frame.args = param.args;
                if let Some(result) = param.result {
                    frame.result = result;
                }
            }
            Ok(Err(err)) => {
                error!(
                    "{phase} hook on {} failed, call proceeds unmodified: {err:?}",
                    self.descriptor
                );
            }
            Err(payload) => {
                error!(
                    "{phase} hook on {} panicked, call proceeds unmodified: {}",
                    self.descriptor,
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

impl HookCallback for GuardedCallback {
    fn before(&self, frame: &mut CallFrame) {
        if let Some(callback) = &self.hook.before {
            self.run(Phase::Before, callback, frame);
        }
    }

    fn after(&self, frame: &mut CallFrame) {
        if let Some(callback) = &self.hook.after {
            self.run(Phase::After, callback, frame);
        }
    }
}

/// Registers hooks with the host, wrapping every callback so that errors and panics stay
/// on this side of the boundary.
pub struct Dispatcher {
    host: Arc<dyn Instrumentation>,
}

impl Dispatcher {
    pub fn new(host: Arc<dyn Instrumentation>) -> Self {
        Self { host }
    }

    pub fn install<T: Into<HookTarget>>(
        &self,
        target: T,
        hook: Hook,
    ) -> Result<Registration, InstallError> {
        let target = target.into();

        if hook.is_empty() {
            warn!("installing a hook without callbacks on {target}");
        }

        let state = Arc::new(AtomicU8::new(HookState::Unregistered as u8));
        let callback = Arc::new(GuardedCallback {
            descriptor: target.descriptor().clone(),
            hook,
            state: Arc::clone(&state),
        });

        debug!("installing hook on {target}");

        match self.host.install(&target, callback) {
            Ok(()) => {
                // the host may already have run the callback, keep Active if so
                let _ = state.compare_exchange(
                    HookState::Unregistered as u8,
                    HookState::Installed as u8,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                );
                info!("hooked {target}");
                Ok(Registration { target, state })
            }
            Err(err) => {
                state.store(HookState::Disabled as u8, Ordering::Release);
                warn!("failed to hook {target}: {err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeInstrumentation, FakeObject};
    use crate::value::{ObjectRef, Value};
    use anyhow::bail;

    fn setup() -> (Arc<FakeInstrumentation>, Dispatcher) {
        let host = Arc::new(FakeInstrumentation::new());
        let dispatcher = Dispatcher::new(host.clone());
        (host, dispatcher)
    }

    fn method() -> MethodDescriptor {
        MethodDescriptor::new("a.Params", "setBitrate", ["int"])
    }

    #[test]
    fn before_mutation_reaches_the_body() {
        let (host, dispatcher) = setup();

        dispatcher
            .install(
                method(),
                Hook::new().before(|param| {
                    let value = param.arg(0)?.as_int()?;
                    param.set_arg(0, value / 2)
                }),
            )
            .unwrap();

        let mut seen = None;
        host.invoke(&method(), None, vec![Value::Int(10)], |args| {
            seen = Some(args[0].clone());
            Value::Null
        });

        assert_eq!(seen, Some(Value::Int(5)));
    }

    #[test]
    fn after_mutation_reaches_the_caller() {
        let (host, dispatcher) = setup();

        dispatcher
            .install(method(), Hook::new().after(|param| param.set_result(true)))
            .unwrap();

        let result = host.invoke(&method(), None, vec![Value::Int(1)], |_| Value::Bool(false));
        assert_eq!(result, Value::Bool(true));
    }

    #[test]
    fn failing_hook_leaves_call_untouched() {
        let (host, dispatcher) = setup();

        dispatcher
            .install(
                method(),
                Hook::new()
                    .before(|param| {
                        param.set_arg(0, 99)?;
                        bail!("gave up halfway")
                    })
                    .after(|param| {
                        param.set_result(1)?;
                        panic!("boom")
                    }),
            )
            .unwrap();

        let mut seen = None;
        let result = host.invoke(&method(), None, vec![Value::Int(7)], |args| {
            seen = Some(args[0].clone());
            Value::Int(0)
        });

        assert_eq!(seen, Some(Value::Int(7)));
        assert_eq!(result, Value::Int(0));
    }

    #[test]
    fn hooks_observe_the_receiver() {
        let (host, dispatcher) = setup();
        let target = MethodDescriptor::new("android.widget.SeekBar", "setMax", ["int"]);

        dispatcher
            .install(
                target.clone(),
                Hook::new().after(|param| {
                    let this = param.this()?;
                    this.set_field("touched", Value::Bool(true))
                }),
            )
            .unwrap();

        let seek_bar = FakeObject::new("android.widget.SeekBar");
        let receiver: ObjectRef = seek_bar.clone();
        host.invoke(&target, Some(receiver), vec![Value::Int(1)], |_| Value::Null);

        assert_eq!(seek_bar.field("touched"), Value::Bool(true));
    }

    #[test]
    fn state_follows_lifecycle() {
        let (host, dispatcher) = setup();

        let registration = dispatcher
            .install(method(), Hook::new().before(|_| Ok(())))
            .unwrap();
        assert_eq!(registration.state(), HookState::Installed);

        host.invoke(&method(), None, vec![Value::Int(1)], |_| Value::Null);
        assert_eq!(registration.state(), HookState::Active);
    }

    #[test]
    fn rejected_install_is_reported() {
        let (host, dispatcher) = setup();
        host.reject_class("a.Params");

        let result = dispatcher.install(method(), Hook::new().before(|_| Ok(())));

        assert!(matches!(result, Err(InstallError::ClassNotFound(_))));
        assert!(host.installed().is_empty());
    }

    #[test]
    fn reentrant_calls_run_independent_hooks() {
        let (host, dispatcher) = setup();

        dispatcher
            .install(
                method(),
                Hook::new().before(|param| {
                    let value = param.arg(0)?.as_int()?;
                    param.set_arg(0, value + 1)
                }),
            )
            .unwrap();

        let mut inner_seen = None;
        let mut outer_seen = None;
        host.invoke(&method(), None, vec![Value::Int(10)], |args| {
            outer_seen = Some(args[0].clone());
            host.invoke(&method(), None, vec![Value::Int(100)], |args| {
                inner_seen = Some(args[0].clone());
                Value::Null
            });
            Value::Null
        });

        assert_eq!(outer_seen, Some(Value::Int(11)));
        assert_eq!(inner_seen, Some(Value::Int(101)));
    }
}
