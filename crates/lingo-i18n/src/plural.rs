//! Plural-form rules for gettext catalogs.
//!
//! Every rule here mirrors the `Plural-Forms` header that gettext tooling
//! writes for the language, so the index returned for a count addresses the
//! same slot the catalog compiler filled. The arithmetic must stay
//! bit-for-bit identical to those headers.

use std::fmt;

/// A count used to pick a plural form.
///
/// Anything that is not a number (an absent count, text without leading
/// digits, `NaN`) selects the singular, exactly like a count of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCount {
    /// An integral count.
    Integer(i64),
    /// A non-numeric input.
    NotANumber,
}

impl PluralCount {
    /// The count used by the plural rules.
    pub const fn value(self) -> i64 {
        match self {
            Self::Integer(n) => n,
            Self::NotANumber => 1,
        }
    }

    /// Parses text the way `parseInt` does: leading whitespace, an optional
    /// sign, an optional `0x` prefix, then as many digits as are present.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim_start();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (radix, digits) = match unsigned.get(..2) {
            Some("0x" | "0X") => (16, &unsigned[2..]),
            _ => (10, unsigned),
        };

        let end = digits
            .char_indices()
            .find(|(_, c)| !c.is_digit(radix))
            .map_or(digits.len(), |(i, _)| i);
        if end == 0 {
            return Self::NotANumber;
        }

        let magnitude = digits[..end].chars().fold(0i64, |acc, c| {
            let digit = i64::from(c.to_digit(radix).unwrap_or(0));
            acc.saturating_mul(i64::from(radix)).saturating_add(digit)
        });

        Self::Integer(if negative { -magnitude } else { magnitude })
    }
}

impl Default for PluralCount {
    fn default() -> Self {
        Self::Integer(1)
    }
}

impl fmt::Display for PluralCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::NotANumber => write!(f, "NaN"),
        }
    }
}

macro_rules! plural_count_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PluralCount {
                fn from(n: $ty) -> Self {
                    Self::Integer(i64::from(n))
                }
            }
        )*
    };
}

plural_count_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for PluralCount {
    fn from(n: u64) -> Self {
        Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<usize> for PluralCount {
    fn from(n: usize) -> Self {
        Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for PluralCount {
    #[allow(clippy::cast_possible_truncation)]
    fn from(n: f64) -> Self {
        if n.is_finite() {
            Self::Integer(n.trunc() as i64)
        } else {
            Self::NotANumber
        }
    }
}

impl From<&str> for PluralCount {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl<T: Into<Self>> From<Option<T>> for PluralCount {
    fn from(n: Option<T>) -> Self {
        n.map_or(Self::NotANumber, Into::into)
    }
}

/// Families of languages sharing one plural rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralFamily {
    /// One form: `0`.
    Invariant,
    /// Icelandic: `n % 10 != 1 || n % 100 == 11`.
    Icelandic,
    /// Javanese: `n != 0`.
    Javanese,
    /// Macedonian: `n == 1 || n % 10 == 1 ? 0 : 1`.
    Macedonian,
    /// French, Brazilian Portuguese, Turkish and friends: `n > 1`.
    ZeroIsSingular,
    /// Latvian, three forms with a dedicated zero.
    Latvian,
    /// Lithuanian, three forms.
    Lithuanian,
    /// Russian, Ukrainian, Belarusian, Bosnian, Croatian, Serbian.
    EastSlavic,
    /// Mandinka: zero, one, other.
    Mandinka,
    /// Romanian, three forms.
    Romanian,
    /// Polish, three forms.
    Polish,
    /// Czech and Slovak: one, two to four, other.
    CzechSlovak,
    /// Kashubian, three forms.
    Kashubian,
    /// Slovenian, four forms on the last two digits.
    Slovenian,
    /// Maltese, four forms.
    Maltese,
    /// Scottish Gaelic, four forms.
    ScottishGaelic,
    /// Welsh, four forms.
    Welsh,
    /// Cornish, four forms.
    Cornish,
    /// Irish, five forms.
    Irish,
    /// Arabic, six forms.
    Arabic,
    /// Everything else: `n != 1`.
    Germanic,
}

impl PluralFamily {
    /// Looks up the family for a gettext language code.
    ///
    /// Codes longer than two characters lose their region (`fr_FR` → `fr`),
    /// except `pt_BR` which has its own rule.
    pub fn for_language(language: &str) -> Self {
        let code = if language.chars().count() > 2 && language != "pt_BR" {
            lingo_common::primary_subtag(language)
        } else {
            language
        };

        match code {
            "ay" | "bo" | "cgg" | "dz" | "fa" | "id" | "ja" | "jbo" | "ka" | "kk" | "km" | "ko"
            | "ky" | "lo" | "ms" | "my" | "sah" | "su" | "th" | "tt" | "ug" | "vi" | "wo"
            | "zh" => Self::Invariant,
            "is" => Self::Icelandic,
            "jv" => Self::Javanese,
            "mk" => Self::Macedonian,
            "ach" | "ak" | "am" | "arn" | "br" | "fil" | "fr" | "gun" | "ln" | "mfe" | "mg"
            | "mi" | "oc" | "pt_BR" | "tg" | "ti" | "tr" | "uz" | "wa" => Self::ZeroIsSingular,
            "lv" => Self::Latvian,
            "lt" => Self::Lithuanian,
            "be" | "bs" | "hr" | "ru" | "sr" | "uk" => Self::EastSlavic,
            "mnk" => Self::Mandinka,
            "ro" => Self::Romanian,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::CzechSlovak,
            "csb" => Self::Kashubian,
            "sl" => Self::Slovenian,
            "mt" => Self::Maltese,
            "gd" => Self::ScottishGaelic,
            "cy" => Self::Welsh,
            "kw" => Self::Cornish,
            "ga" => Self::Irish,
            "ar" => Self::Arabic,
            _ => Self::Germanic,
        }
    }

    /// Number of forms a catalog must provide for this family.
    pub const fn form_count(self) -> usize {
        match self {
            Self::Invariant => 1,
            Self::Icelandic
            | Self::Javanese
            | Self::Macedonian
            | Self::ZeroIsSingular
            | Self::Germanic => 2,
            Self::Latvian
            | Self::Lithuanian
            | Self::EastSlavic
            | Self::Mandinka
            | Self::Romanian
            | Self::Polish
            | Self::CzechSlovak
            | Self::Kashubian => 3,
            Self::Slovenian | Self::Maltese | Self::ScottishGaelic | Self::Welsh | Self::Cornish => {
                4
            }
            Self::Irish => 5,
            Self::Arabic => 6,
        }
    }

    /// Zero-based form index for `n`.
    pub const fn form_index(self, n: i64) -> usize {
        match self {
            Self::Invariant => 0,
            Self::Icelandic => {
                if n % 10 != 1 || n % 100 == 11 {
                    1
                } else {
                    0
                }
            }
            Self::Javanese => {
                if n != 0 {
                    1
                } else {
                    0
                }
            }
            Self::Macedonian => {
                if n == 1 || n % 10 == 1 {
                    0
                } else {
                    1
                }
            }
            Self::ZeroIsSingular => {
                if n > 1 {
                    1
                } else {
                    0
                }
            }
            Self::Latvian => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Lithuanian => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if n % 10 >= 2 && (n % 100 < 10 || n % 100 >= 20) {
                    1
                } else {
                    2
                }
            }
            Self::EastSlavic => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if n % 10 >= 2 && n % 10 <= 4 && (n % 100 < 10 || n % 100 >= 20) {
                    1
                } else {
                    2
                }
            }
            Self::Mandinka => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (n % 100 > 0 && n % 100 < 20) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if n % 10 >= 2 && n % 10 <= 4 && (n % 100 < 10 || n % 100 >= 20) {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => {
                if n == 1 {
                    0
                } else if n >= 2 && n <= 4 {
                    1
                } else {
                    2
                }
            }
            Self::Kashubian => {
                if n == 1 {
                    0
                } else if n % 10 >= 2 && n % 10 <= 4 && (n % 100 < 10 || n % 100 >= 20) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => {
                if n % 100 == 1 {
                    0
                } else if n % 100 == 2 {
                    1
                } else if n % 100 == 3 || n % 100 == 4 {
                    2
                } else {
                    3
                }
            }
            Self::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || (n % 100 > 1 && n % 100 < 11) {
                    1
                } else if n % 100 > 10 && n % 100 < 20 {
                    2
                } else {
                    3
                }
            }
            Self::ScottishGaelic => {
                if n == 1 || n == 11 {
                    0
                } else if n == 2 || n == 12 {
                    1
                } else if n > 2 && n < 20 {
                    2
                } else {
                    3
                }
            }
            Self::Welsh => {
                if n == 1 {
                    0
                } else if n == 2 {
                    1
                } else if n != 8 && n != 11 {
                    2
                } else {
                    3
                }
            }
            Self::Cornish => {
                if n == 1 {
                    0
                } else if n == 2 {
                    1
                } else if n == 3 {
                    2
                } else {
                    3
                }
            }
            Self::Irish => {
                if n == 1 {
                    0
                } else if n == 2 {
                    1
                } else if n > 2 && n < 7 {
                    2
                } else if n > 6 && n < 11 {
                    3
                } else {
                    4
                }
            }
            Self::Arabic => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if n % 100 >= 3 && n % 100 <= 10 {
                    3
                } else if n % 100 >= 11 {
                    4
                } else {
                    5
                }
            }
            Self::Germanic => {
                if n != 1 {
                    1
                } else {
                    0
                }
            }
        }
    }
}

/// Every language code with a dedicated rule.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "ay", "bo", "cgg", "dz", "fa", "id", "ja", "jbo", "ka", "kk", "km", "ko", "ky", "lo", "ms",
    "my", "sah", "su", "th", "tt", "ug", "vi", "wo", "zh", "is", "jv", "mk", "ach", "ak", "am",
    "arn", "br", "fil", "fr", "gun", "ln", "mfe", "mg", "mi", "oc", "pt_BR", "tg", "ti", "tr",
    "uz", "wa", "lv", "lt", "be", "bs", "hr", "ru", "sr", "uk", "mnk", "ro", "pl", "cs", "sk",
    "csb", "sl", "mt", "gd", "cy", "kw", "ga", "ar",
];

/// Selects the plural form index for `count` in `language`.
pub fn resolve_form_index(language: &str, count: impl Into<PluralCount>) -> usize {
    PluralFamily::for_language(language).form_index(count.into().value())
}

/// Number of plural forms `language` declares.
pub fn form_count(language: &str) -> usize {
    PluralFamily::for_language(language).form_count()
}
