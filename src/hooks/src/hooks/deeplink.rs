//! Policy overrides carried by the launch intent of the start screen.

use crate::context::HookContext;
use crate::targets::TargetApp;
use boostplus_dispatch::{Hook, MethodDescriptor};
use boostplus_prefs::apply_uri;
use log::debug;

const ACTION_VIEW: &str = "android.intent.action.VIEW";

pub fn target(app: &TargetApp) -> MethodDescriptor {
    MethodDescriptor::new(&app.start_activity, "onCreate", ["android.os.Bundle"])
}

pub fn hook(ctx: &HookContext) -> Hook {
    let ctx = ctx.clone();

    Hook::new().after(move |param| {
        let intent = param.this()?.call_method("getIntent", &[])?;
        if intent.is_null() {
            return Ok(());
        }
        let intent = intent.as_object()?;

        let action = intent.call_method("getAction", &[])?;
        if action.is_null() || action.as_str()? != ACTION_VIEW {
            return Ok(());
        }

        let data = intent.call_method("getDataString", &[])?;
        if data.is_null() {
            debug!("view intent without data");
            return Ok(());
        }

        apply_uri(&ctx.policy, data.as_str()?)?;
        Ok(())
    })
}
