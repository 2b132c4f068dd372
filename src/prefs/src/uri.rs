use crate::backend::PrefsError;
use crate::keys::{PolicyKey, ValueKind};
use crate::store::PolicyStore;
use log::{debug, info, warn};
use strum::IntoEnumIterator;
use url::{Url, form_urlencoded};

/// Applies the policy overrides carried by a deep-link URI, returning how many keys were
/// written.
pub fn apply_uri(store: &PolicyStore, uri: &str) -> Result<usize, PrefsError> {
    let url = Url::parse(uri)?;
    Ok(apply_query(store, url.query().unwrap_or_default()))
}

/// Applies `key=value` pairs from a raw query string.
///
/// Boolean keys are `true` for a case-insensitive "true" and `false` for anything else.
/// Integer keys that fail to parse are skipped, as are unknown names. When a name repeats
/// the first occurrence wins. Values are percent-decoded but a `+` stays a plus sign.
pub fn apply_query(store: &PolicyStore, query: &str) -> usize {
    let query = query.replace('+', "%2B");
    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    let mut applied = 0;

    for key in PolicyKey::iter() {
        let Some((_, raw)) = pairs.iter().find(|(name, _)| name == key.name()) else {
            continue;
        };

        let result = match key.kind() {
            ValueKind::Bool => store.set_bool(key, raw.eq_ignore_ascii_case("true")),
            ValueKind::Int => match raw.parse::<i32>() {
                Ok(value) => store.set_int(key, value),
                Err(_) => {
                    debug!("ignoring unparsable value for `{key}`: {raw:?}");
                    continue;
                }
            },
        };

        match result {
            Ok(()) => applied += 1,
            Err(err) => warn!("failed to apply override for `{key}`: {err}"),
        }
    }

    if applied > 0 {
        info!("applied {applied} policy overrides from deep link");
    }

    applied
}
