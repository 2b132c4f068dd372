//! Range of the in-app bitrate slider.

use crate::context::HookContext;
use boostplus_dispatch::{Hook, MethodDescriptor};
use log::debug;

pub fn target() -> MethodDescriptor {
    MethodDescriptor::new(
        "android.widget.SeekBar",
        "setOnSeekBarChangeListener",
        ["android.widget.SeekBar$OnSeekBarChangeListener"],
    )
}

/// Widens the slider while the engine is enabled. The after half only narrows it back
/// when something left it above the stock maximum, since unrelated code may have set it.
pub fn hook(ctx: &HookContext) -> Hook {
    let widen = ctx.clone();
    let restore = ctx.clone();

    Hook::new()
        .before(move |param| {
            if !widen.policy.enabled() {
                return Ok(());
            }

            let seek_bar = param.this()?;
            let max = widen.config.seek_bar_unlocked_max;
            let old = seek_bar.call_method("getMax", &[])?;
            seek_bar.call_method("setMax", &[max.into()])?;
            debug!("slider max {old:?} -> {max}");
            Ok(())
        })
        .after(move |param| {
            if restore.policy.enabled() {
                return Ok(());
            }

            let seek_bar = param.this()?;
            let stock = restore.config.seek_bar_default_max;
            let old = seek_bar.call_method("getMax", &[])?.as_int()?;

            if old > stock {
                seek_bar.call_method("setMax", &[stock.into()])?;
                debug!("slider max reset {old} -> {stock}");
            }
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

    fn setup(enabled: bool) -> (Arc<FakeInstrumentation>, HookContext) {
        let host = Arc::new(FakeInstrumentation::new());
        let ctx = context();
        ctx.policy.set_bool(PolicyKey::Enabled, enabled).unwrap();

        Dispatcher::new(host.clone())
            .install(target(), hook(&ctx))
            .unwrap();

        (host, ctx)
    }

    #[test]
    fn enabled_widens_the_slider() {
        let (host, _ctx) = setup(true);
        let seek_bar = FakeObject::builder("android.widget.SeekBar")
            .field("max", 25)
            .build();

        host.invoke(&target(), Some(seek_bar.clone()), vec![Value::Null], |_| Value::Null);

        assert_eq!(seek_bar.field("max"), Value::Int(80));
    }

    #[test]
    fn disabled_restores_only_when_above_stock() {
        let (host, _ctx) = setup(false);

        let widened = FakeObject::builder("android.widget.SeekBar")
            .field("max", 80)
            .build();
        host.invoke(&target(), Some(widened.clone()), vec![Value::Null], |_| Value::Null);
        assert_eq!(widened.field("max"), Value::Int(25));

        let narrow = FakeObject::builder("android.widget.SeekBar")
            .field("max", 10)
            .build();
        host.invoke(&target(), Some(narrow.clone()), vec![Value::Null], |_| Value::Null);
        assert_eq!(narrow.field("max"), Value::Int(10));
        assert!(narrow.calls_to("setMax").is_empty());
    }
}
