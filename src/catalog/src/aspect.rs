use crate::negotiate::Resolution;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// Aspect-ratio profiles offered to the operator, in the order the `aspect_ratio`
/// policy index refers to them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[repr(u8)]
pub enum AspectRatio {
    #[strum(serialize = "2.37:1")]
    Ratio237x100,
    #[strum(serialize = "21:9")]
    Ratio21x9,
    #[strum(serialize = "16:9")]
    Ratio16x9,
    #[strum(serialize = "16:10")]
    Ratio16x10,
    #[strum(serialize = "4:3")]
    Ratio4x3,
    #[strum(serialize = "5:4")]
    Ratio5x4,
}

struct Profile {
    numerator: u32,
    denominator: u32,
    // sorted by descending width
    entries: &'static [Resolution],
}

const fn res(width: i32, height: i32) -> Resolution {
    Resolution { width, height }
}

const PROFILE_237_100: Profile = Profile {
    numerator: 237,
    denominator: 100,
    entries: &[res(1920, 810)],
};

const PROFILE_21_9: Profile = Profile {
    numerator: 21,
    denominator: 9,
    entries: &[
        res(3440, 1440),
        res(2560, 1080),
        res(2400, 1080),
        res(1920, 864),
        res(1600, 720),
    ],
};

const PROFILE_16_9: Profile = Profile {
    numerator: 16,
    denominator: 9,
    entries: &[
        res(3840, 2160),
        res(3200, 1800),
        res(3200, 1440),
        res(2560, 1440),
        res(2048, 1152),
        res(1920, 1080),
        res(1600, 900),
        res(1366, 768),
        res(1360, 768),
        res(1280, 720),
    ],
};

const PROFILE_16_10: Profile = Profile {
    numerator: 16,
    denominator: 10,
    entries: &[
        res(3360, 2100),
        res(3320, 2160),
        res(2940, 1912),
        res(2732, 2048),
        res(2560, 1600),
        res(2160, 1350),
        res(2048, 1330),
        res(2048, 1152),
        res(1920, 1200),
        res(1800, 1168),
        res(1680, 1050),
        res(1440, 900),
        res(1280, 800),
    ],
};

const PROFILE_4_3: Profile = Profile {
    numerator: 4,
    denominator: 3,
    entries: &[
        res(2048, 1536),
        res(1920, 1536),
        res(1800, 1350),
        res(1600, 1200),
        res(1440, 1152),
        res(1400, 1050),
        res(1280, 960),
        res(1152, 864),
        res(1024, 768),
        res(800, 600),
    ],
};

const PROFILE_5_4: Profile = Profile {
    numerator: 5,
    denominator: 4,
    entries: &[res(2560, 2048), res(1600, 1024), res(1280, 1024)],
};

impl AspectRatio {
    fn profile(self) -> &'static Profile {
        match self {
            AspectRatio::Ratio237x100 => &PROFILE_237_100,
            AspectRatio::Ratio21x9 => &PROFILE_21_9,
            AspectRatio::Ratio16x9 => &PROFILE_16_9,
            AspectRatio::Ratio16x10 => &PROFILE_16_10,
            AspectRatio::Ratio4x3 => &PROFILE_4_3,
            AspectRatio::Ratio5x4 => &PROFILE_5_4,
        }
    }

    /// Maps a stored policy index to a profile. Negative and out-of-range values mean
    /// "no profile selected".
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|index| Self::iter().nth(index))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn count() -> usize {
        Self::iter().len()
    }

    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Width over height.
    pub fn ratio(self) -> f64 {
        let (numerator, denominator) = self.rational();
        numerator as f64 / denominator as f64
    }

    pub(crate) fn rational(self) -> (u32, u32) {
        let profile = self.profile();
        (profile.numerator, profile.denominator)
    }

    pub fn entries(self) -> &'static [Resolution] {
        self.profile().entries
    }
}
