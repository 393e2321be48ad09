//! # Message Tables
//!
//! One flat `key → message` table per locale, embedded from
//! `locales/<code>.json` and parsed once on first use.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::locale::Locale;

const EMBEDDED_TABLES: &[(Locale, &str)] = &[
    (Locale::En, include_str!("../../locales/en.json")),
    (Locale::He, include_str!("../../locales/he.json")),
];

static BUILTIN: Lazy<Translations> = Lazy::new(|| Translations::from_sources(EMBEDDED_TABLES));

/// Messages of one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTable {
    messages: BTreeMap<String, String>,
}

impl LocaleTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Tables for every supported locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    tables: BTreeMap<Locale, LocaleTable>,
}

impl Translations {
    /// Tables embedded in the binary.
    pub fn builtin() -> &'static Translations {
        &BUILTIN
    }

    /// Parse JSON sources. A source that fails to parse is logged and left
    /// empty, so lookups in that locale fall back to keys.
    pub fn from_sources(sources: &[(Locale, &str)]) -> Self {
        let tables = sources
            .iter()
            .map(|(locale, json)| {
                let table = serde_json::from_str::<LocaleTable>(json).unwrap_or_else(|e| {
                    warn!(locale = %locale, error = %e, "locale table unparsable, using keys");
                    LocaleTable::default()
                });
                (*locale, table)
            })
            .collect();
        Self { tables }
    }

    pub fn insert(&mut self, locale: Locale, table: LocaleTable) {
        self.tables.insert(locale, table);
    }

    pub fn table(&self, locale: Locale) -> Option<&LocaleTable> {
        self.tables.get(&locale)
    }

    /// Message for `key`, or `key` itself when the locale has no entry or
    /// the entry is empty.
    pub fn translate<'a>(&'a self, key: &'a str, locale: Locale) -> &'a str {
        self.table(locale)
            .and_then(|t| t.get(key))
            .filter(|message| !message.is_empty())
            .unwrap_or(key)
    }

    /// Keys present in some other locale but absent from `locale`, sorted.
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let own: BTreeSet<&str> = self.table(locale).map(|t| t.keys().collect()).unwrap_or_default();
        let all: BTreeSet<&str> = self.tables.values().flat_map(|t| t.keys()).collect();
        all.difference(&own).map(|k| k.to_string()).collect()
    }
}
