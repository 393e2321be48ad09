//! Supported locales.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    He,
}

/// Every supported locale, default first
pub const ALL_LOCALES: &[Locale] = &[Locale::En, Locale::He];

impl Locale {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::He => "he",
        }
    }

    /// Case-insensitive code lookup; `None` for an unsupported locale.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "he" => Some(Locale::He),
            _ => None,
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Locale::En => TextDirection::Ltr,
            Locale::He => TextDirection::Rtl,
        }
    }

    pub fn all() -> &'static [Locale] {
        ALL_LOCALES
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value for an HTML `dir` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}
