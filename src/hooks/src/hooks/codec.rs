//! Bitrate and frame-rate fields of the stream parameters sent to the server.

use crate::context::HookContext;
use crate::targets::TargetApp;
use boostplus_catalog::refresh_rate_hz;
use boostplus_dispatch::{Hook, MethodDescriptor};
use log::{debug, info};

pub fn target(app: &TargetApp) -> MethodDescriptor {
    MethodDescriptor::new(app.params_model(), "setBitrate_max", ["int"])
}

/// Requested bitrate after applying the ceiling, `None` when it already fits.
pub fn clamp_bitrate(requested: i32, ceiling: i32, unlocked: bool) -> Option<i32> {
    (!unlocked && requested > ceiling).then_some(ceiling)
}

pub fn hook(ctx: &HookContext) -> Hook {
    let clamp = ctx.clone();
    let unlock = ctx.clone();

    Hook::new()
        .before(move |param| {
            let requested = param.arg(0)?.as_int()?;
            let ceiling = clamp.config.bitrate_ceiling;

            match clamp_bitrate(requested, ceiling, clamp.policy.unlock_bitrate()) {
                Some(limited) => {
                    param.set_arg(0, limited)?;
                    info!("limiting bitrate {requested} -> {limited}");
                }
                None => debug!("bitrate {requested} passes through"),
            }
            Ok(())
        })
        .after(move |param| {
            if !unlock.policy.unlock_frame_rate() {
                return Ok(());
            }

            let refresh_rate = refresh_rate_hz(unlock.env.refresh_rate());
            param
                .this()?
                .call_method("setFramerate_max", &[refresh_rate.into()])?;
            info!("frame rate cap raised to {refresh_rate} Hz");
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::context;
    use boostplus_dispatch::testing::{FakeInstrumentation, FakeObject};
    use boostplus_dispatch::{Dispatcher, Value};
    use boostplus_prefs::PolicyKey;
    use std::sync::Arc;

    #[test]
    fn clamp_rules() {
        assert_eq!(clamp_bitrate(50_000_000, 25_000_000, false), Some(25_000_000));
        assert_eq!(clamp_bitrate(50_000_000, 25_000_000, true), None);
        assert_eq!(clamp_bitrate(10_000_000, 25_000_000, false), None);
        assert_eq!(clamp_bitrate(25_000_000, 25_000_000, false), None);
    }

    #[test]
    fn frame_rate_follows_display() {
        let host = Arc::new(FakeInstrumentation::new());
        let ctx = context();
        let app = TargetApp::for_package("com.boosteroid.streaming").unwrap();

        Dispatcher::new(host.clone())
            .install(target(&app), hook(&ctx))
            .unwrap();

        let params = FakeObject::new(&app.params_model());
        host.invoke(&target(&app), Some(params.clone()), vec![Value::Int(1)], |_| Value::Null);
        assert!(params.calls_to("setFramerate_max").is_empty());

        ctx.policy.set_bool(PolicyKey::Enabled, true).unwrap();
        ctx.policy.set_bool(PolicyKey::UnlockFrameRate, true).unwrap();
        host.invoke(&target(&app), Some(params.clone()), vec![Value::Int(1)], |_| Value::Null);
        assert_eq!(params.calls_to("setFramerate_max"), vec![vec![Value::Int(120)]]);
    }
}
