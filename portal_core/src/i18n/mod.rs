//! # Localization
//!
//! Message tables for the supported locales and the text direction each one
//! implies. Lookups never fail: a key missing from a table comes back as the
//! key itself.
//!
//! ## Example
//!
//! ```rust
//! use portal_core::i18n::{direction, translate, Locale, TextDirection};
//!
//! assert_eq!(translate("nav.home", Locale::En), "Home");
//! assert_eq!(translate("no.such.key", Locale::He), "no.such.key");
//! assert_eq!(direction(Locale::He), TextDirection::Rtl);
//! ```

pub mod locale;
pub mod table;

pub use locale::{Locale, TextDirection};
pub use table::{LocaleTable, Translations};

/// Look up `key` in the builtin tables, falling back to the key.
pub fn translate(key: &str, locale: Locale) -> &str {
    Translations::builtin().translate(key, locale)
}

/// Text direction of a locale
pub fn direction(locale: Locale) -> TextDirection {
    locale.direction()
}
