//! Policy hooks for the streaming client and the attach sequence that installs them.

mod attach;
mod config;
mod context;
mod env;
mod targets;

pub mod hooks;

pub use attach::{AttachReport, AttachRequest, HookKind, HookOutcome, attach};
pub use config::EngineConfig;
pub use context::HookContext;
pub use env::{HostEnv, StaticEnv};
pub use hooks::HookError;
pub use targets::TargetApp;

use log::LevelFilter;

pub fn init_logger() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            })
            .with_tag("boostplus"),
    );
}
