//! Aspect-ratio profiles and the resolution negotiation used by the stream setup hooks.

mod aspect;
mod negotiate;

pub use aspect::AspectRatio;
pub use negotiate::{
    DEFAULT_NATIVE, Resolution, closest_by_width, display_label, display_string,
    native_dimensions, refresh_rate_hz, resnap_index, resolutions_for,
};
