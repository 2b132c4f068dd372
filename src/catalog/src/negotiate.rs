use crate::aspect::AspectRatio;
use log::debug;
use std::fmt::{Display, Formatter};

/// Fallback native size used when the display reports nonsense dimensions.
pub const DEFAULT_NATIVE: Resolution = Resolution {
    width: 1920,
    height: 1080,
};

const STANDARD_WIDTHS: [i32; 3] = [1920, 2560, 3840];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: i32,
    pub height: i32,
}

impl Resolution {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl From<(i32, i32)> for Resolution {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

// numerator / denominator rounded half away from zero, both sides positive
fn div_round(numerator: i64, denominator: i64) -> i32 {
    ((2 * numerator + denominator) / (2 * denominator)) as i32
}

/// Derives the landscape native size from the raw display size.
///
/// Either raw dimension being non-positive yields [`DEFAULT_NATIVE`] as a whole rather
/// than patching the one bad component.
pub fn native_dimensions(raw_x: i32, raw_y: i32) -> Resolution {
    if raw_x <= 0 || raw_y <= 0 {
        return DEFAULT_NATIVE;
    }

    let native = Resolution {
        width: raw_x.max(raw_y).max(DEFAULT_NATIVE.width),
        height: raw_x.min(raw_y).max(DEFAULT_NATIVE.height),
    };

    debug!("raw display {raw_x}x{raw_y} -> native {native}");

    native
}

/// Builds the negotiated list for an optional profile.
///
/// Index 0 is always the native entry (no profile) or the native width with the height
/// adjusted to the profile's ratio. Heights are computed with exact integer arithmetic
/// and rounded half away from zero.
pub fn resolutions_for(profile: Option<AspectRatio>, native: Resolution) -> Vec<Resolution> {
    let native_width = native.width.max(1) as i64;
    let native_height = native.height.max(1) as i64;

    match profile {
        None => {
            let mut list = Vec::with_capacity(STANDARD_WIDTHS.len() + 1);
            list.push(native);
            list.extend(STANDARD_WIDTHS.iter().map(|&width| Resolution {
                width,
                height: div_round(width as i64 * native_height, native_width),
            }));
            list
        }
        Some(profile) => {
            let (numerator, denominator) = profile.rational();
            let adjusted = Resolution {
                width: native.width,
                height: div_round(native_width * denominator as i64, numerator as i64),
            };

            let entries = profile.entries();
            let mut list = Vec::with_capacity(entries.len() + 1);
            list.push(adjusted);
            list.extend_from_slice(entries);
            list
        }
    }
}

/// Classifies an entry the way the configuration surface names it.
pub fn display_label(entry: Resolution, is_native: bool, native_width: i32) -> String {
    let width = entry.width;

    let label = match () {
        _ if is_native => "Native",
        _ if width == native_width => "Native (Adjusted)",
        _ if width >= 3840 => "4K",
        _ if width >= 3200 => "3K",
        _ if width >= 2560 => "2K/QHD",
        _ if width >= 1920 => "Full HD",
        _ if width >= 1280 => "HD",
        _ => return format!("{width}p"),
    };

    label.into()
}

pub fn display_string(entry: Resolution, is_native: bool, native_width: i32) -> String {
    format!("{} ({entry})", display_label(entry, is_native, native_width))
}

/// Index of the entry whose width is nearest to `width`; the first one wins a tie.
pub fn closest_by_width(list: &[Resolution], width: i32) -> Option<usize> {
    list.iter()
        .enumerate()
        .min_by_key(|(_, entry)| (entry.width as i64 - width as i64).abs())
        .map(|(index, _)| index)
}

/// Resolution index to keep once the offered list changes from `previous` to `next`.
///
/// The entry closest in width to the one previously selected is picked, or the one closest
/// to the native width when the old index pointed nowhere.
pub fn resnap_index(
    previous: &[Resolution],
    index: i32,
    next: &[Resolution],
    native_width: i32,
) -> i32 {
    let width = usize::try_from(index)
        .ok()
        .and_then(|index| previous.get(index))
        .map_or(native_width, |entry| entry.width);

    let snapped = closest_by_width(next, width).unwrap_or(0);
    debug!("resolution index {index} (width {width}) -> {snapped}");

    snapped as i32
}

pub fn refresh_rate_hz(refresh_rate: f32) -> i32 {
    refresh_rate.round() as i32
}
