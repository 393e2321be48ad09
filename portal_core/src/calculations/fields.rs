//! Raw form fields as typed by a user.
//!
//! A shell collects `name → text` pairs and hands them over untouched;
//! parsing numbers happens here so every shell rejects the same inputs:
//! empty text, anything that is not a complete number, NaN and ±∞.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PortalError, PortalResult};

/// Parse one numeric field. Surrounding whitespace is ignored; trailing
/// garbage (`"12abc"`) is not.
pub fn parse_number(field: &str, text: &str) -> PortalResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PortalError::missing_field(field));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| PortalError::invalid_input(field, trimmed, "Value is not a number"))?;
    if !value.is_finite() {
        return Err(PortalError::invalid_input(field, trimmed, "Value must be a finite number"));
    }
    Ok(value)
}

/// Named text fields for one calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: BTreeMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (k, v) in pairs {
            map.insert(k, v);
        }
        map
    }

    /// Parse `name=value` assignments, e.g. from a command line.
    pub fn parse_assignments<S: AsRef<str>>(assignments: &[S]) -> PortalResult<Self> {
        let mut map = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (name, value) = assignment.split_once('=').ok_or_else(|| {
                PortalError::invalid_input("field", assignment, "Expected NAME=VALUE")
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(PortalError::invalid_input("field", assignment, "Field name is empty"));
            }
            map.insert(name, value);
        }
        Ok(map)
    }

    /// Raw text of a field, as typed.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Trimmed text of a field; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether a field carries non-blank text.
    pub fn is_present(&self, name: &str) -> bool {
        self.text(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A field that must be present and numeric.
    pub fn parse_required(&self, name: &str) -> PortalResult<f64> {
        let result = parse_number(name, self.get(name).unwrap_or(""));
        if let Err(err) = &result {
            debug!(field = name, error = %err, "field rejected");
        }
        result
    }

    /// A field that may be blank; when present it must be numeric.
    pub fn parse_optional(&self, name: &str) -> PortalResult<Option<f64>> {
        match self.text(name) {
            Some(text) => parse_number(name, text).map(Some).map_err(|err| {
                debug!(field = name, error = %err, "field rejected");
                err
            }),
            None => Ok(None),
        }
    }

    /// A field that falls back to `default` when blank.
    pub fn parse_or_default(&self, name: &str, default: f64) -> PortalResult<f64> {
        Ok(self.parse_optional(name)?.unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_accepts_plain_numbers() {
        assert_eq!(parse_number("x", "12").unwrap(), 12.0);
        assert_eq!(parse_number("x", "  -3.5 ").unwrap(), -3.5);
        assert_eq!(parse_number("x", "1e3").unwrap(), 1000.0);
        assert_eq!(parse_number("x", ".5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_number_rejections() {
        assert_eq!(parse_number("x", "").unwrap_err().error_code(), "MISSING_FIELD");
        assert_eq!(parse_number("x", "   ").unwrap_err().error_code(), "MISSING_FIELD");
        for bad in ["abc", "12abc", "1,5", "NaN", "nan", "inf", "-infinity"] {
            assert_eq!(
                parse_number("x", bad).unwrap_err().error_code(),
                "INVALID_INPUT",
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_required_and_optional() {
        let fields = FieldMap::new().with("a", "2").with("b", "").with("c", "x");
        assert_eq!(fields.parse_required("a").unwrap(), 2.0);
        assert!(fields.parse_required("b").is_err());
        assert!(fields.parse_required("missing").is_err());
        assert_eq!(fields.parse_optional("b").unwrap(), None);
        assert_eq!(fields.parse_optional("missing").unwrap(), None);
        assert!(fields.parse_optional("c").is_err());
        assert_eq!(fields.parse_or_default("b", 250.0).unwrap(), 250.0);
        assert_eq!(fields.parse_or_default("a", 250.0).unwrap(), 2.0);
    }

    #[test]
    fn test_parse_assignments() {
        let fields = FieldMap::parse_assignments(&["vin_v=12", " r1_ohm =1000", "note=a=b"]).unwrap();
        assert_eq!(fields.get("vin_v"), Some("12"));
        assert_eq!(fields.get("r1_ohm"), Some("1000"));
        assert_eq!(fields.get("note"), Some("a=b"));
        assert!(FieldMap::parse_assignments(&["novalue"]).is_err());
        assert!(FieldMap::parse_assignments(&["=5"]).is_err());
    }

    #[test]
    fn test_text_treats_blank_as_absent() {
        let fields = FieldMap::from_pairs([("solve_for", "  "), ("target", " frequency ")]);
        assert!(!fields.is_present("solve_for"));
        assert_eq!(fields.text("target"), Some("frequency"));
        assert_eq!(fields.len(), 2);
    }
}
