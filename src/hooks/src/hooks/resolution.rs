//! Stream resolution requested from the server.
//!
//! The method building the connection parameters is obfuscated, so it is found by
//! signature: it references the user-agent header name and is called from code that
//! appends the height field.

use crate::context::HookContext;
use anyhow::Context;
use boostplus_catalog::Resolution;
use boostplus_dispatch::Hook;
use boostplus_locator::{Corpus, LocateError, LocatedMethod, Locator, MethodSignature};
use boostplus_misc::debug_on;
use boostplus_prefs::NO_SELECTION;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex_lite::Regex;

const TV_MARKER: &str = "&tv=1";

static WIDTH_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[?&])x=\d+").unwrap());
static HEIGHT_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[?&])y=\d+").unwrap());

pub fn signature() -> MethodSignature {
    MethodSignature::new()
        .using_strings(["User-Agent"])
        .caller_using_strings(["&y="])
}

pub fn locate<C: Corpus + ?Sized>(corpus: &C) -> Result<LocatedMethod<'_>, LocateError> {
    Locator::new(corpus).find_unique(&signature())
}

/// Entry for a stored resolution index, clamped into the list.
pub fn select_resolution(list: &[Resolution], index: i32) -> Option<Resolution> {
    let last = list.len().checked_sub(1)?;
    let index = usize::try_from(index).unwrap_or(0).min(last);
    list.get(index).copied()
}

/// Replaces the `x=` and `y=` fields of a parameter string and appends the TV marker.
///
/// Returns `None`, leaving the caller to keep the original, unless both fields are
/// present.
pub fn rewrite_stream_params(params: &str, resolution: Resolution) -> Option<String> {
    if !WIDTH_FIELD.is_match(params) || !HEIGHT_FIELD.is_match(params) {
        return None;
    }

    let width = format!("${{1}}x={}", resolution.width);
    let height = format!("${{1}}y={}", resolution.height);

    let rewritten = WIDTH_FIELD.replace_all(params, width.as_str());
    let rewritten = HEIGHT_FIELD.replace_all(&rewritten, height.as_str());

    Some(format!("{rewritten}{TV_MARKER}"))
}

pub fn hook(ctx: &HookContext) -> Hook {
    let ctx = ctx.clone();

    Hook::new().before(move |param| {
        let index = ctx.policy.resolution_index();
        if index == NO_SELECTION {
            debug!("native resolution selected, keeping stream parameters");
            return Ok(());
        }

        let available = ctx.available_resolutions();
        let selected = select_resolution(&available, index)
            .context("negotiated resolution list is empty")?;

        debug!(
            "resolution index {index} of {}, aspect ratio {}",
            available.len(),
            ctx.selected_aspect_ratio()
                .map_or("native", |profile| profile.label())
        );

        let original = param.arg(0)?.as_str()?;
        let rewritten = rewrite_stream_params(original, selected);

        if debug_on!("resolution") {
            debug!("stream parameters {original:?} -> {rewritten:?}");
        }

        match rewritten {
            Some(rewritten) => {
                param.set_arg(0, rewritten)?;
                info!("stream resolution set to {selected}");
            }
            None => warn!("stream parameters lack width or height fields, left untouched"),
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_both_fields() {
        let rewritten =
            rewrite_stream_params("ws://s/?x=1920&y=1080&fps=60", Resolution::new(2560, 1080));
        assert_eq!(
            rewritten.as_deref(),
            Some("ws://s/?x=2560&y=1080&fps=60&tv=1")
        );
    }

    #[test]
    fn leaves_lookalike_fields_alone() {
        let rewritten = rewrite_stream_params("x=1&y=2&max=3&toy=4", Resolution::new(5, 6));
        assert_eq!(rewritten.as_deref(), Some("x=5&y=6&max=3&toy=4&tv=1"));
    }

    #[test]
    fn missing_field_is_left_untouched() {
        assert_eq!(rewrite_stream_params("x=1920", Resolution::new(1, 1)), None);
        assert_eq!(rewrite_stream_params("a=1&y=1080", Resolution::new(1, 1)), None);
        assert_eq!(rewrite_stream_params("", Resolution::new(1, 1)), None);
    }

    #[test]
    fn index_is_clamped() {
        let list: Vec<Resolution> = (1..=5).map(|n| Resolution::new(n, n)).collect();

        assert_eq!(select_resolution(&list, 99), Some(Resolution::new(5, 5)));
        assert_eq!(select_resolution(&list, 2), Some(Resolution::new(3, 3)));
        assert_eq!(select_resolution(&list, -4), Some(Resolution::new(1, 1)));
        assert_eq!(select_resolution(&[], 0), None);
    }
}
