//! BOM line items and suggested substitutes.

use serde::{Deserialize, Serialize};

/// Manufacturer lifecycle state of a part.
///
/// Deserialization goes through [`LifecycleStatus::parse`], so any status
/// text a catalog or record carries is accepted; unrecognized text is
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LifecycleStatus {
    Active,
    EndOfLife,
    NotRecommended,
    #[default]
    Unknown,
}

impl LifecycleStatus {
    /// Parse status text. Total: anything unrecognized is `Unknown`.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "active" => LifecycleStatus::Active,
            "eol" | "end_of_life" | "end-of-life" | "end of life" => LifecycleStatus::EndOfLife,
            "nrnd" | "not_recommended" | "not-recommended" | "not recommended" => {
                LifecycleStatus::NotRecommended
            }
            _ => LifecycleStatus::Unknown,
        }
    }

    /// Short label written to exports
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleStatus::Active => "active",
            LifecycleStatus::EndOfLife => "eol",
            LifecycleStatus::NotRecommended => "nrnd",
            LifecycleStatus::Unknown => "unknown",
        }
    }

    /// Display name for tables and badges
    pub fn display_name(&self) -> &'static str {
        match self {
            LifecycleStatus::Active => "Active",
            LifecycleStatus::EndOfLife => "EOL",
            LifecycleStatus::NotRecommended => "NRND",
            LifecycleStatus::Unknown => "Unknown",
        }
    }

    /// Everything but an active part needs a second look
    pub fn needs_attention(&self) -> bool {
        !matches!(self, LifecycleStatus::Active)
    }
}

impl From<String> for LifecycleStatus {
    fn from(text: String) -> Self {
        LifecycleStatus::parse(&text)
    }
}

impl std::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One line of a bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Unique within one BOM
    pub id: String,
    pub manufacturer_part_number: String,
    pub manufacturer: String,
    pub description: String,
    pub quantity: u32,
    /// Non-negative unit price
    pub unit_price: f64,
    #[serde(default)]
    pub lifecycle_status: LifecycleStatus,
}

impl ComponentRecord {
    /// Extended line cost, rounded to cents (half away from zero).
    pub fn total_cost(&self) -> f64 {
        round_cents(f64::from(self.quantity) * self.unit_price)
    }
}

/// Round to two decimals, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A suggested substitute, most recommended first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRecord {
    pub manufacturer_part_number: String,
    pub manufacturer: String,
    pub description: String,
    pub unit_price: f64,
    /// Free-text stock label, e.g. "In Stock"
    pub availability: String,
    /// Package / mounting
    pub footprint: String,
    /// Free-text key specs
    pub specs: String,
}
