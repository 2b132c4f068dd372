use crate::config::EngineConfig;
use crate::env::HostEnv;
use boostplus_catalog::{AspectRatio, Resolution, native_dimensions, resolutions_for};
use boostplus_prefs::PolicyStore;
use std::sync::Arc;

/// Read handles every hook closure captures. Holds no per-call state.
#[derive(Clone)]
pub struct HookContext {
    pub policy: PolicyStore,
    pub env: Arc<dyn HostEnv>,
    pub config: Arc<EngineConfig>,
}

impl HookContext {
    pub fn new(policy: PolicyStore, env: Arc<dyn HostEnv>, config: Arc<EngineConfig>) -> Self {
        Self {
            policy,
            env,
            config,
        }
    }

    pub fn native_resolution(&self) -> Resolution {
        let (raw_x, raw_y) = self.env.display_size();
        native_dimensions(raw_x, raw_y)
    }

    pub fn selected_aspect_ratio(&self) -> Option<AspectRatio> {
        AspectRatio::from_index(self.policy.aspect_ratio_index())
    }

    /// Negotiated list for the operator's current aspect-ratio choice.
    pub fn available_resolutions(&self) -> Vec<Resolution> {
        resolutions_for(self.selected_aspect_ratio(), self.native_resolution())
    }
}
