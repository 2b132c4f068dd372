//! Whether the stream is drawn under the display cutout.

use crate::context::HookContext;
use crate::hooks::HookError;
use crate::targets::TargetApp;
use boostplus_dispatch::{Hook, MethodDescriptor, Value};
use log::{debug, info};

/// Android 9, the first release with display cutout support.
pub const MIN_SDK: i32 = 28;

/// `WindowManager.LayoutParams.LAYOUT_IN_DISPLAY_CUTOUT_MODE_NEVER`
pub const CUTOUT_MODE_NEVER: i32 = 2;

pub fn target(app: &TargetApp) -> MethodDescriptor {
    MethodDescriptor::new(&app.stream_activity, "onCreate", ["android.os.Bundle"])
}

pub fn check_supported(sdk: i32) -> Result<(), HookError> {
    if sdk < MIN_SDK {
        return Err(HookError::Unsupported {
            sdk,
            required: MIN_SDK,
        });
    }
    Ok(())
}

pub fn hook(ctx: &HookContext) -> Hook {
    let ctx = ctx.clone();

    Hook::new().after(move |param| {
        if ctx.policy.extend_into_notch() {
            debug!("keeping platform cutout behaviour");
            return Ok(());
        }

        let window = param.this()?.call_method("getWindow", &[])?;
        let attributes = window.as_object()?.call_method("getAttributes", &[])?;
        let attributes = attributes.as_object()?;

        let old = attributes.get_field("layoutInDisplayCutoutMode")?;
        attributes.set_field("layoutInDisplayCutoutMode", Value::Int(CUTOUT_MODE_NEVER))?;
        info!("cutout mode {old:?} -> never");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::context;
    use boostplus_dispatch::testing::{FakeInstrumentation, FakeObject};
    use boostplus_dispatch::{Dispatcher, ObjectRef};
    use boostplus_prefs::PolicyKey;
    use std::sync::Arc;

    fn activity() -> (ObjectRef, Arc<FakeObject>) {
        let attributes = FakeObject::builder("android.view.WindowManager$LayoutParams")
            .field("layoutInDisplayCutoutMode", 0)
            .build();
        let window = FakeObject::builder("android.view.Window")
            .returns("getAttributes", Value::Object(attributes.clone()))
            .build();
        let activity = FakeObject::builder("com.boosteroid.streaming.UI.StreamActivity")
            .returns("getWindow", Value::Object(window))
            .build();
        (activity, attributes)
    }

    #[test]
    fn api_level_gate() {
        assert!(check_supported(28).is_ok());
        assert!(matches!(
            check_supported(27),
            Err(HookError::Unsupported { sdk: 27, required: 28 })
        ));
    }

    #[test]
    fn notch_opt_out() {
        let host = Arc::new(FakeInstrumentation::new());
        let ctx = context();
        let app = TargetApp::for_package("com.boosteroid.streaming").unwrap();

        Dispatcher::new(host.clone())
            .install(target(&app), hook(&ctx))
            .unwrap();

        // disabled engine means extend_into_notch is false
        let (stream, attributes) = activity();
        host.invoke(&target(&app), Some(stream), vec![Value::Null], |_| Value::Null);
        assert_eq!(attributes.field("layoutInDisplayCutoutMode"), Value::Int(2));

        ctx.policy.set_bool(PolicyKey::Enabled, true).unwrap();
        let (stream, attributes) = activity();
        host.invoke(&target(&app), Some(stream), vec![Value::Null], |_| Value::Null);
        assert_eq!(attributes.field("layoutInDisplayCutoutMode"), Value::Int(0));
    }
}
