//! # Bill of Materials
//!
//! Ingest a BOM file, annotate every line with lifecycle status and
//! suggested alternatives, and export the annotated list as CSV.
//!
//! ## Pipeline
//!
//! ```text
//! file ──ingest──▶ [ComponentRecord] ──BomLookupService──▶ [AnalyzedComponent] ──export──▶ CSV
//! ```
//!
//! The lookup backend is any [`PartResolver`]; [`StaticCatalog::builtin`]
//! carries the demonstration parts.
//!
//! ## Example
//!
//! ```rust
//! use portal_core::bom::{ingest_str, BomLookupService, LifecycleStatus, StaticCatalog};
//!
//! let records = ingest_str(
//!     "MPN,Manufacturer,Description,Quantity,Unit Price\n\
//!      LM2596S-3.3,Texas Instruments,Buck regulator,5,2.45\n",
//! )
//! .unwrap();
//! let service = BomLookupService::new(StaticCatalog::builtin());
//! let analyzed = service.analyze(&records);
//! assert_eq!(analyzed[0].record.lifecycle_status, LifecycleStatus::EndOfLife);
//! assert_eq!(analyzed[0].alternatives.len(), 1);
//! ```

pub mod export;
pub mod ingest;
pub mod lookup;
pub mod record;
pub mod session;

pub use export::{export_csv, write_export, EXPORT_FILE_NAME, EXPORT_HEADER};
pub use ingest::{ingest_file, ingest_reader, ingest_str, BomFormat, MAX_BOM_FILE_BYTES};
pub use lookup::{
    AnalysisSummary, AnalyzedComponent, BomLookupService, CatalogEntry, LookupOutcome,
    PartResolver, StaticCatalog,
};
pub use record::{AlternativeRecord, ComponentRecord, LifecycleStatus};
pub use session::{AnalysisReport, AnalysisSession, SessionConfig, SessionState, StartOutcome};
