//! # BOM Export
//!
//! Writes analyzed components as CSV with one header line and one row per
//! component. Lines are joined with `\n`; there is no trailing newline.
//!
//! ```text
//! MPN,Manufacturer,Description,Quantity,Unit Price,Status,Total Cost
//! STM32F407VGT6,STMicroelectronics,"32-bit ARM Cortex-M4 MCU, 1MB Flash",10,8.5,active,85.00
//! ```

use std::path::Path;

use tracing::info;

use super::lookup::AnalyzedComponent;
use crate::errors::PortalResult;
use crate::file_io::write_atomic;

/// Header line of every export
pub const EXPORT_HEADER: &str = "MPN,Manufacturer,Description,Quantity,Unit Price,Status,Total Cost";

/// Suggested file name for a download
pub const EXPORT_FILE_NAME: &str = "bom_analysis_results.csv";

/// Render the export text.
pub fn export_csv(components: &[AnalyzedComponent]) -> String {
    let mut lines = Vec::with_capacity(components.len() + 1);
    lines.push(EXPORT_HEADER.to_string());
    for component in components {
        let record = &component.record;
        lines.push(format!(
            "{},{},{},{},{},{},{:.2}",
            escape_field(&record.manufacturer_part_number),
            escape_field(&record.manufacturer),
            quote_field(&record.description),
            record.quantity,
            record.unit_price,
            record.lifecycle_status.label(),
            record.total_cost(),
        ));
    }
    lines.join("\n")
}

/// Write the export to `path`: temp file, fsync, rename.
pub fn write_export(path: &Path, components: &[AnalyzedComponent]) -> PortalResult<()> {
    write_atomic(path, export_csv(components).as_bytes())?;
    info!(path = %path.display(), rows = components.len(), "BOM export written");
    Ok(())
}

fn needs_quoting(field: &str) -> bool {
    field.contains([',', '"', '\r', '\n'])
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn escape_field(field: &str) -> String {
    if needs_quoting(field) {
        quote_field(field)
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::record::{ComponentRecord, LifecycleStatus};

    fn component(mpn: &str, description: &str, quantity: u32, unit_price: f64, status: LifecycleStatus) -> AnalyzedComponent {
        AnalyzedComponent {
            record: ComponentRecord {
                id: "1".to_string(),
                manufacturer_part_number: mpn.to_string(),
                manufacturer: "STMicroelectronics".to_string(),
                description: description.to_string(),
                quantity,
                unit_price,
                lifecycle_status: status,
            },
            alternatives: Vec::new(),
        }
    }

    #[test]
    fn test_export_layout() {
        let text = export_csv(&[component(
            "STM32F407VGT6",
            "32-bit ARM Cortex-M4 MCU, 1MB Flash",
            10,
            8.5,
            LifecycleStatus::Active,
        )]);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], EXPORT_HEADER);
        assert_eq!(
            lines[1],
            "STM32F407VGT6,STMicroelectronics,\"32-bit ARM Cortex-M4 MCU, 1MB Flash\",10,8.5,active,85.00"
        );
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_export_empty_is_header_only() {
        assert_eq!(export_csv(&[]), EXPORT_HEADER);
    }

    #[test]
    fn test_export_status_labels() {
        let text = export_csv(&[
            component("A", "d", 1, 1.0, LifecycleStatus::EndOfLife),
            component("B", "d", 1, 1.0, LifecycleStatus::NotRecommended),
            component("C", "d", 1, 1.0, LifecycleStatus::Unknown),
        ]);
        assert!(text.contains(",eol,"));
        assert!(text.contains(",nrnd,"));
        assert!(text.contains(",unknown,"));
    }

    #[test]
    fn test_export_escapes_quotes_and_commas() {
        let text = export_csv(&[component("X,1", "12\" cable", 3, 0.333, LifecycleStatus::Active)]);
        let row = text.split('\n').nth(1).unwrap();
        assert_eq!(row, "\"X,1\",STMicroelectronics,\"12\"\" cable\",3,0.333,active,1.00");
    }

    #[test]
    fn test_export_reparses_to_seven_columns() {
        let text = export_csv(&[
            component("STM32F407VGT6", "MCU, 1MB Flash, LQFP100", 10, 8.5, LifecycleStatus::Active),
            component("LM2596S-3.3", "Regulator \"3.3V\"", 5, 2.45, LifecycleStatus::EndOfLife),
        ]);
        let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.len(), 7);
        }
        assert_eq!(&rows[0][2], "MCU, 1MB Flash, LQFP100");
        assert_eq!(&rows[1][2], "Regulator \"3.3V\"");
        assert_eq!(&rows[1][6], "12.25");
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let components = [component("NE555P", "Timer", 4, 0.35, LifecycleStatus::Active)];
        write_export(&path, &components).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), export_csv(&components));
        assert!(!crate::file_io::tmp_path_for(&path).exists());
    }

    #[test]
    fn test_write_export_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(EXPORT_FILE_NAME);
        assert_eq!(write_export(&path, &[]).unwrap_err().error_code(), "FILE_ERROR");
    }
}
