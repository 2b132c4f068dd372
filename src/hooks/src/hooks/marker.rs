//! Lets the configuration surface tell whether the engine is loaded.

use boostplus_dispatch::{Hook, MethodDescriptor};

pub fn target(module_package: &str) -> MethodDescriptor {
    MethodDescriptor::new(
        format!("{module_package}.ModuleStatus"),
        "isModuleEnabled",
        Vec::<String>::new(),
    )
}

pub fn hook() -> Hook {
    Hook::new().after(|param| param.set_result(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boostplus_dispatch::testing::FakeInstrumentation;
    use boostplus_dispatch::{Dispatcher, Value};
    use std::sync::Arc;

    #[test]
    fn reports_active() {
        let host = Arc::new(FakeInstrumentation::new());
        let target = target("dev.boostplus");
        Dispatcher::new(host.clone())
            .install(target.clone(), hook())
            .unwrap();

        let result = host.invoke(&target, None, vec![], |_| Value::Bool(false));
        assert_eq!(result, Value::Bool(true));
    }
}
