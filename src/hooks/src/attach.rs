use crate::config::EngineConfig;
use crate::context::HookContext;
use crate::env::HostEnv;
use crate::hooks::{HookError, bitrate, codec, cutout, deeplink, marker, resolution};
use crate::targets::TargetApp;
use boostplus_dispatch::{Dispatcher, HookState, Instrumentation, Registration};
use boostplus_locator::Corpus;
use boostplus_prefs::PolicyStore;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;
use strum_macros::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
pub enum HookKind {
    BitrateCeiling,
    CodecParams,
    ResolutionRewrite,
    DisplayCutout,
    DeepLink,
    ModuleMarker,
}

pub enum HookOutcome {
    Installed(Registration),
    Disabled(HookError),
}

impl HookOutcome {
    pub fn state(&self) -> HookState {
        match self {
            HookOutcome::Installed(registration) => registration.state(),
            HookOutcome::Disabled(_) => HookState::Disabled,
        }
    }
}

/// Everything the host hands over when a package is loaded.
pub struct AttachRequest<'a> {
    pub package: &'a str,
    pub instrumentation: Arc<dyn Instrumentation>,
    pub corpus: &'a dyn Corpus,
    pub env: Arc<dyn HostEnv>,
    pub config: Arc<EngineConfig>,
    pub policy: PolicyStore,
}

/// Final state of every hook attempted for one package.
pub struct AttachReport {
    package: String,
    outcomes: Vec<(HookKind, HookOutcome)>,
}

impl AttachReport {
    fn new(package: &str) -> Self {
        Self {
            package: package.into(),
            outcomes: Vec::new(),
        }
    }

    fn record(&mut self, kind: HookKind, result: Result<Registration, HookError>) {
        let outcome = match result {
            Ok(registration) => HookOutcome::Installed(registration),
            Err(err) => {
                warn!("{kind} hook disabled: {err}");
                HookOutcome::Disabled(err)
            }
        };
        self.outcomes.push((kind, outcome));
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn outcome(&self, kind: HookKind) -> Option<&HookOutcome> {
        self.outcomes
            .iter()
            .find(|(recorded, _)| *recorded == kind)
            .map(|(_, outcome)| outcome)
    }

    /// Current state of a hook; `Unregistered` when it was never attempted.
    pub fn state(&self, kind: HookKind) -> HookState {
        self.outcome(kind)
            .map_or(HookState::Unregistered, HookOutcome::state)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (HookKind, &HookOutcome)> {
        self.outcomes.iter().map(|(kind, outcome)| (*kind, outcome))
    }

    pub fn installed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, HookOutcome::Installed(_)))
            .count()
    }
}

/// Installs every hook that applies to `request.package`.
///
/// Hooks are independent: one that cannot be located or installed is reported as
/// disabled and the rest still go in. Returns `None` for packages left alone.
pub fn attach(request: AttachRequest<'_>) -> Option<AttachReport> {
    let dispatcher = Dispatcher::new(Arc::clone(&request.instrumentation));
    let mut report = AttachReport::new(request.package);

    if request.package == request.config.module_package {
        let target = marker::target(&request.config.module_package);
        report.record(
            HookKind::ModuleMarker,
            dispatcher.install(target, marker::hook()).map_err(Into::into),
        );
        return Some(report);
    }

    let Some(app) = TargetApp::for_package(request.package) else {
        debug!("ignoring package {}", request.package);
        return None;
    };

    info!(
        "attaching to {} (policy backend: {})",
        app.package,
        request.policy.backend_name()
    );

    let started = Instant::now();
    let ctx = HookContext::new(request.policy, request.env, request.config);

    // corpus search completes before anything is installed
    let located = resolution::locate(request.corpus);

    report.record(
        HookKind::BitrateCeiling,
        dispatcher
            .install(bitrate::target(), bitrate::hook(&ctx))
            .map_err(Into::into),
    );

    report.record(
        HookKind::CodecParams,
        dispatcher
            .install(codec::target(&app), codec::hook(&ctx))
            .map_err(Into::into),
    );

    report.record(
        HookKind::ResolutionRewrite,
        located
            .map_err(HookError::from)
            .and_then(|method| Ok(dispatcher.install(method, resolution::hook(&ctx))?)),
    );

    report.record(
        HookKind::DisplayCutout,
        cutout::check_supported(ctx.env.sdk_int())
            .and_then(|()| Ok(dispatcher.install(cutout::target(&app), cutout::hook(&ctx))?)),
    );

    report.record(
        HookKind::DeepLink,
        dispatcher
            .install(deeplink::target(&app), deeplink::hook(&ctx))
            .map_err(Into::into),
    );

    info!(
        "attached {}/{} hooks to {} in {:?}",
        report.installed_count(),
        report.outcomes.len(),
        app.package,
        started.elapsed()
    );

    Some(report)
}
