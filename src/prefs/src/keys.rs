use std::fmt;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PolicyValue {
    Bool(bool),
    Int(i32),
}

impl PolicyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            PolicyValue::Bool(_) => ValueKind::Bool,
            PolicyValue::Int(_) => ValueKind::Int,
        }
    }
}

impl fmt::Display for PolicyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyValue::Bool(value) => write!(f, "{value}"),
            PolicyValue::Int(value) => write!(f, "{value}"),
        }
    }
}

/// Settings the operator controls. The serialized name is both the storage key and the
/// deep-link query parameter name.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum PolicyKey {
    #[strum(serialize = "enabled")]
    Enabled,
    #[strum(serialize = "unlock_fps")]
    UnlockFrameRate,
    #[strum(serialize = "unlock_bitrate")]
    UnlockBitrate,
    #[strum(serialize = "resolution")]
    Resolution,
    #[strum(serialize = "aspect_ratio")]
    AspectRatio,
    #[strum(serialize = "extend_into_notch")]
    ExtendIntoNotch,
}

impl PolicyKey {
    pub fn kind(self) -> ValueKind {
        self.default_value().kind()
    }

    pub fn default_value(self) -> PolicyValue {
        match self {
            PolicyKey::Enabled => PolicyValue::Bool(false),
            PolicyKey::UnlockFrameRate => PolicyValue::Bool(false),
            PolicyKey::UnlockBitrate => PolicyValue::Bool(false),
            PolicyKey::Resolution => PolicyValue::Int(0),
            PolicyKey::AspectRatio => PolicyValue::Int(-1),
            PolicyKey::ExtendIntoNotch => PolicyValue::Bool(true),
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip() {
        for key in PolicyKey::iter() {
            assert_eq!(key.name(), key.as_ref());
            assert_eq!(PolicyKey::from_str(key.name()), Ok(key));
        }
        assert!(PolicyKey::from_str("unlock_everything").is_err());
    }

    #[test]
    fn declared_kinds() {
        let ints: Vec<_> = PolicyKey::iter()
            .filter(|key| key.kind() == ValueKind::Int)
            .collect();
        assert_eq!(ints, [PolicyKey::Resolution, PolicyKey::AspectRatio]);
        assert_eq!(
            PolicyKey::ExtendIntoNotch.default_value(),
            PolicyValue::Bool(true)
        );
    }
}
