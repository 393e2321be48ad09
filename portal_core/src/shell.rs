//! Shell UI state: navigation menu, theme and language.
//!
//! Owned by whoever drives the shell and passed explicitly; nothing here is
//! global.

use serde::{Deserialize, Serialize};

use crate::i18n::{Locale, TextDirection};
use crate::preferences::Preferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

impl Theme {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShellState {
    pub menu_open: bool,
    pub theme: Theme,
    pub locale: Locale,
}

impl ShellState {
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self {
            locale: preferences.language,
            ..Self::default()
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Switch language. Returns whether it changed, i.e. whether the caller
    /// has something to persist.
    pub fn set_locale(&mut self, locale: Locale) -> bool {
        let changed = self.locale != locale;
        self.locale = locale;
        changed
    }

    pub fn direction(&self) -> TextDirection {
        self.locale.direction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_toggle() {
        let mut shell = ShellState::default();
        assert!(!shell.menu_open);
        shell.toggle_menu();
        assert!(shell.menu_open);
        shell.toggle_menu();
        assert!(!shell.menu_open);
        shell.toggle_menu();
        shell.close_menu();
        assert!(!shell.menu_open);
    }

    #[test]
    fn test_set_locale_reports_change() {
        let mut shell = ShellState::default();
        assert!(!shell.set_locale(Locale::En));
        assert!(shell.set_locale(Locale::He));
        assert_eq!(shell.direction(), TextDirection::Rtl);
        assert!(!shell.set_locale(Locale::He));
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("system"), Some(Theme::System));
        assert_eq!(Theme::parse("sepia"), None);
        let mut shell = ShellState::default();
        shell.set_theme(Theme::Light);
        assert_eq!(shell.theme, Theme::Light);
    }

    #[test]
    fn test_from_preferences() {
        let preferences = Preferences {
            language: Locale::He,
            ..Preferences::default()
        };
        let shell = ShellState::from_preferences(&preferences);
        assert_eq!(shell.locale, Locale::He);
        assert!(!shell.menu_open);
    }
}
