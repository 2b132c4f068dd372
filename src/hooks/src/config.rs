use anyhow::{Context, Result};
use boostplus_misc::ext::ResultExt;
use boostplus_prefs::{FallbackBackend, FileBackend, KvBackend, MemoryBackend, PolicyStore};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_PREFS_PATH: &str = "/data/local/tmp/boostplus/prefs.toml";

/// Engine-level settings, fixed for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shared store written by the configuration surface.
    pub prefs_path: PathBuf,
    /// Store owned by the patched process, in memory when unset.
    pub local_prefs_path: Option<PathBuf>,
    /// Package of the configuration surface itself.
    pub module_package: String,
    pub bitrate_ceiling: i32,
    pub seek_bar_unlocked_max: i32,
    pub seek_bar_default_max: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefs_path: DEFAULT_PREFS_PATH.into(),
            local_prefs_path: None,
            module_package: "dev.boostplus".into(),
            bitrate_ceiling: 25_000_000,
            seek_bar_unlocked_max: 80,
            seek_bar_default_max: 25,
        }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("malformed engine config {}", path.display()))
    }

    /// Config at `path`, or the built-in defaults when it cannot be read.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).ok_or_warn().unwrap_or_default()
    }

    /// Store as the patched process sees it: the shared file until a local write, with
    /// the local store as fallback.
    pub fn policy_store(&self) -> PolicyStore {
        let local: Box<dyn KvBackend> = match &self.local_prefs_path {
            Some(path) => Box::new(FileBackend::new(path)),
            None => Box::new(MemoryBackend::new()),
        };

        let backend = FallbackBackend::new(Box::new(FileBackend::new(&self.prefs_path)), local);
        PolicyStore::new(Arc::new(backend))
    }

    /// Store as the configuration surface sees it: the shared file only.
    pub fn operator_store(&self) -> PolicyStore {
        PolicyStore::new(Arc::new(FileBackend::new(&self.prefs_path)))
    }
}
