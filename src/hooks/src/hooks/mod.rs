//! One module per interception. Each exposes the target it patches and a `hook` builder
//! whose closures only read the policy store through the shared [`HookContext`].
//!
//! [`HookContext`]: crate::HookContext

pub mod bitrate;
pub mod codec;
pub mod cutout;
pub mod deeplink;
pub mod marker;
pub mod resolution;

use boostplus_dispatch::InstallError;
use boostplus_locator::LocateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error("requires API level {required}, running on {sdk}")]
    Unsupported { sdk: i32, required: i32 },
}
