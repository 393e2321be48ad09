//! # BOM Lookup Service
//!
//! Resolves each BOM line to a lifecycle status and an ordered list of
//! alternatives. The backing store is any [`PartResolver`], so a real parts
//! database can stand in for the built-in demonstration catalog without
//! touching callers.
//!
//! A part number the store does not know is not an error: it resolves to
//! [`LifecycleStatus::Unknown`] with no alternatives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::record::{AlternativeRecord, ComponentRecord, LifecycleStatus};
use crate::errors::{PortalError, PortalResult};

/// Capability to resolve a manufacturer part number.
pub trait PartResolver: Send + Sync {
    /// Exact-match lookup. `None` means the part is not in the store.
    fn resolve(&self, mpn: &str) -> Option<CatalogEntry>;
}

impl<R: PartResolver + ?Sized> PartResolver for Arc<R> {
    fn resolve(&self, mpn: &str) -> Option<CatalogEntry> {
        (**self).resolve(mpn)
    }
}

impl<R: PartResolver + ?Sized> PartResolver for &R {
    fn resolve(&self, mpn: &str) -> Option<CatalogEntry> {
        (**self).resolve(mpn)
    }
}

/// What the store knows about one part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub status: LifecycleStatus,
    /// Preference order, first = most recommended
    #[serde(default)]
    pub alternatives: Vec<AlternativeRecord>,
}

// ============================================================================
// Static Catalog
// ============================================================================

/// In-memory part store keyed by exact MPN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    entries: HashMap<String, CatalogEntry>,
}

fn alternative(
    mpn: &str,
    manufacturer: &str,
    description: &str,
    unit_price: f64,
    availability: &str,
    footprint: &str,
    specs: &str,
) -> AlternativeRecord {
    AlternativeRecord {
        manufacturer_part_number: mpn.to_string(),
        manufacturer: manufacturer.to_string(),
        description: description.to_string(),
        unit_price,
        availability: availability.to_string(),
        footprint: footprint.to_string(),
        specs: specs.to_string(),
    }
}

static BUILTIN_CATALOG: Lazy<StaticCatalog> = Lazy::new(|| {
    let mut catalog = StaticCatalog::new();
    catalog.insert(
        "STM32F407VGT6",
        CatalogEntry {
            status: LifecycleStatus::Active,
            alternatives: vec![
                alternative(
                    "STM32F407VET6",
                    "STMicroelectronics",
                    "32-bit ARM Cortex-M4 MCU, 512KB Flash",
                    7.20,
                    "In Stock",
                    "LQFP-100",
                    "168MHz, 512KB Flash, 192KB RAM",
                ),
                alternative(
                    "STM32F405RGT6",
                    "STMicroelectronics",
                    "32-bit ARM Cortex-M4 MCU, 1MB Flash",
                    7.80,
                    "Limited Stock",
                    "LQFP-64",
                    "168MHz, 1MB Flash, 192KB RAM",
                ),
            ],
        },
    );
    catalog.insert(
        "LM2596S-3.3",
        CatalogEntry {
            status: LifecycleStatus::EndOfLife,
            alternatives: vec![alternative(
                "LM2596S-ADJ",
                "Texas Instruments",
                "Adjustable step-down voltage regulator",
                2.60,
                "In Stock",
                "TO-263",
                "1.25V-37V adjustable, 3A",
            )],
        },
    );
    catalog.insert(
        "MAX232CPE",
        CatalogEntry {
            status: LifecycleStatus::NotRecommended,
            alternatives: vec![alternative(
                "SP3232EEN",
                "Sipex",
                "RS-232 transceiver, low power",
                2.95,
                "In Stock",
                "SOIC-16",
                "3.0V-5.5V, 250kbps, ESD protection",
            )],
        },
    );
    catalog
});

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demonstration catalog: STM32F407VGT6 (active), LM2596S-3.3 (EOL)
    /// and MAX232CPE (NRND), each with its suggested alternatives.
    pub fn builtin() -> Self {
        BUILTIN_CATALOG.clone()
    }

    pub fn insert(&mut self, mpn: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(mpn.into(), entry);
    }

    /// Parse a catalog from a JSON object of `MPN → {status, alternatives}`.
    pub fn from_json(json: &str) -> PortalResult<Self> {
        serde_json::from_str(json).map_err(|e| PortalError::serialization(e.to_string()))
    }

    /// Load a JSON catalog file.
    pub fn load(path: &Path) -> PortalResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PortalError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartResolver for StaticCatalog {
    fn resolve(&self, mpn: &str) -> Option<CatalogEntry> {
        self.entries.get(mpn).cloned()
    }
}

// ============================================================================
// Lookup Service
// ============================================================================

/// Status and alternatives for one BOM line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupOutcome {
    pub status: LifecycleStatus,
    pub alternatives: Vec<AlternativeRecord>,
}

/// A BOM line annotated by the lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedComponent {
    /// The ingested record with its status set from the lookup
    pub record: ComponentRecord,
    pub alternatives: Vec<AlternativeRecord>,
}

/// Pure, idempotent lookup over a [`PartResolver`].
#[derive(Debug, Clone)]
pub struct BomLookupService<R> {
    resolver: R,
}

impl<R: PartResolver> BomLookupService<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve one record by exact MPN.
    pub fn lookup(&self, record: &ComponentRecord) -> LookupOutcome {
        match self.resolver.resolve(&record.manufacturer_part_number) {
            Some(entry) => LookupOutcome {
                status: entry.status,
                alternatives: entry.alternatives,
            },
            None => {
                debug!(mpn = %record.manufacturer_part_number, "part not in catalog");
                LookupOutcome {
                    status: LifecycleStatus::Unknown,
                    alternatives: Vec::new(),
                }
            }
        }
    }

    /// Per-record lookup over a whole BOM, input order kept.
    pub fn analyze(&self, records: &[ComponentRecord]) -> Vec<AnalyzedComponent> {
        records
            .iter()
            .map(|record| {
                let outcome = self.lookup(record);
                AnalyzedComponent {
                    record: ComponentRecord {
                        lifecycle_status: outcome.status,
                        ..record.clone()
                    },
                    alternatives: outcome.alternatives,
                }
            })
            .collect()
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Status counts over an analyzed BOM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total: usize,
    pub active: usize,
    pub end_of_life: usize,
    pub not_recommended: usize,
    pub unknown: usize,
}

impl AnalysisSummary {
    pub fn from_components(components: &[AnalyzedComponent]) -> Self {
        let mut summary = Self {
            total: components.len(),
            ..Self::default()
        };
        for component in components {
            match component.record.lifecycle_status {
                LifecycleStatus::Active => summary.active += 1,
                LifecycleStatus::EndOfLife => summary.end_of_life += 1,
                LifecycleStatus::NotRecommended => summary.not_recommended += 1,
                LifecycleStatus::Unknown => summary.unknown += 1,
            }
        }
        summary
    }

    /// Components whose status is anything but active
    pub fn attention_count(&self) -> usize {
        self.total - self.active
    }
}
