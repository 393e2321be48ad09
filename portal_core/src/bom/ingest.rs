//! # BOM File Ingestion
//!
//! Turns a user-supplied BOM file into [`ComponentRecord`]s, one per
//! non-blank row. Malformed input is rejected here, before it can reach the
//! lookup.
//!
//! ## Accepted files
//!
//! - `.csv` / `.txt`: delimited text; the delimiter (`,` `;` tab `|`) is
//!   sniffed from the header line
//! - `.xlsx` / `.xls`: first worksheet
//! - At most [`MAX_BOM_FILE_BYTES`]
//!
//! ## Columns
//!
//! Header matching ignores case, spaces and underscores. Required:
//! `MPN`, `Manufacturer`, `Description`, `Quantity`. Optional: `Unit Price`
//! (defaults to 0) and `Status` (defaults to unknown).

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use super::record::{ComponentRecord, LifecycleStatus};
use crate::errors::{PortalError, PortalResult};

/// Largest BOM file accepted (10 MiB)
pub const MAX_BOM_FILE_BYTES: u64 = 10 * 1024 * 1024;

const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// How a BOM file is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomFormat {
    /// CSV or other delimited text
    Delimited,
    /// Excel workbook
    Workbook,
}

impl BomFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> PortalResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Ok(BomFormat::Delimited),
            "xlsx" | "xls" => Ok(BomFormat::Workbook),
            _ => Err(PortalError::UnsupportedFormat { extension: ext }),
        }
    }
}

/// Read and validate a BOM file.
pub fn ingest_file(path: &Path) -> PortalResult<Vec<ComponentRecord>> {
    let format = BomFormat::from_path(path)?;
    let metadata = std::fs::metadata(path)
        .map_err(|e| PortalError::file_error("stat", path.display().to_string(), e.to_string()))?;
    if metadata.len() > MAX_BOM_FILE_BYTES {
        return Err(PortalError::FileTooLarge {
            path: path.display().to_string(),
            size_bytes: metadata.len(),
            limit_bytes: MAX_BOM_FILE_BYTES,
        });
    }

    let records = match format {
        BomFormat::Delimited => {
            let file = std::fs::File::open(path)
                .map_err(|e| PortalError::file_error("open", path.display().to_string(), e.to_string()))?;
            ingest_reader(file)?
        }
        BomFormat::Workbook => ingest_workbook(path)?,
    };
    info!(path = %path.display(), components = records.len(), "BOM ingested");
    Ok(records)
}

/// Ingest delimited text from any reader.
pub fn ingest_reader<R: Read>(mut reader: R) -> PortalResult<Vec<ComponentRecord>> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| PortalError::serialization(format!("BOM is not valid UTF-8 text: {}", e)))?;
    ingest_str(&text)
}

/// Ingest delimited text held in memory.
pub fn ingest_str(text: &str) -> PortalResult<Vec<ComponentRecord>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let delimiter = sniff_delimiter(header_line);
    debug!(delimiter = %(delimiter as char).escape_default(), "delimiter sniffed");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result?;
        // header is row 1
        let row_number = row.position().map(|p| p.line() as usize).unwrap_or(index + 2);
        let cells: Vec<&str> = row.iter().collect();
        if let Some(record) = columns.build(row_number, &cells, records.len() + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn ingest_workbook(path: &Path) -> PortalResult<Vec<ComponentRecord>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PortalError::file_error("open workbook", path.display().to_string(), e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PortalError::serialization("Workbook has no worksheets"))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PortalError::serialization(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| PortalError::missing_field("MPN"))?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string().trim().to_string()).collect();
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        if let Some(record) = columns.build(index + 2, &cells, records.len() + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Pick the candidate delimiter that occurs most often in the header line.
/// Ties go to the earlier candidate; no candidate at all means comma.
fn sniff_delimiter(header_line: &str) -> u8 {
    let mut best = b',';
    let mut best_count = 0;
    for &candidate in &CANDIDATE_DELIMITERS {
        let count = header_line.bytes().filter(|&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Column indices resolved from the header row.
#[derive(Debug)]
struct ColumnMap {
    mpn: usize,
    manufacturer: usize,
    description: usize,
    quantity: usize,
    unit_price: Option<usize>,
    status: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> PortalResult<Self> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let find = |names: &[&str]| normalized.iter().position(|h| names.contains(&h.as_str()));
        let require = |label: &str, names: &[&str]| {
            find(names).ok_or_else(|| PortalError::missing_field(label))
        };
        Ok(Self {
            mpn: require("MPN", &["mpn", "manufacturerpartnumber", "partnumber"])?,
            manufacturer: require("Manufacturer", &["manufacturer", "mfr"])?,
            description: require("Description", &["description"])?,
            quantity: require("Quantity", &["quantity", "qty"])?,
            unit_price: find(&["unitprice", "price"]),
            status: find(&["status", "lifecyclestatus", "lifecycle"]),
        })
    }

    /// Build one record; `Ok(None)` for a blank row.
    fn build(&self, row: usize, cells: &[&str], sequence: usize) -> PortalResult<Option<ComponentRecord>> {
        if cells.iter().all(|c| c.trim().is_empty()) {
            return Ok(None);
        }
        let cell = |index: usize| cells.get(index).map(|c| c.trim()).unwrap_or("");

        let mpn = cell(self.mpn);
        if mpn.is_empty() {
            return Err(PortalError::malformed_row(row, "MPN is empty"));
        }
        let quantity = parse_quantity(row, cell(self.quantity))?;
        let unit_price = match self.unit_price.map(cell) {
            Some(text) if !text.is_empty() => parse_price(row, text)?,
            _ => 0.0,
        };
        let lifecycle_status = self
            .status
            .map(|i| LifecycleStatus::parse(cell(i)))
            .unwrap_or_default();

        Ok(Some(ComponentRecord {
            id: sequence.to_string(),
            manufacturer_part_number: mpn.to_string(),
            manufacturer: cell(self.manufacturer).to_string(),
            description: cell(self.description).to_string(),
            quantity,
            unit_price,
            lifecycle_status,
        }))
    }
}

fn parse_quantity(row: usize, text: &str) -> PortalResult<u32> {
    if let Ok(q) = text.parse::<u32>() {
        return Ok(q);
    }
    // spreadsheets hand whole numbers over as "10.0"
    match text.parse::<f64>() {
        Ok(q) if q.is_finite() && q >= 0.0 && q.fract() == 0.0 && q <= f64::from(u32::MAX) => Ok(q as u32),
        _ => Err(PortalError::malformed_row(
            row,
            format!("Quantity '{}' is not a non-negative integer", text),
        )),
    }
}

fn parse_price(row: usize, text: &str) -> PortalResult<f64> {
    let digits = text.strip_prefix('$').unwrap_or(text).trim();
    match digits.parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(PortalError::malformed_row(
            row,
            format!("Unit price '{}' is not a non-negative number", text),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    const SAMPLE: &str = "MPN,Manufacturer,Description,Quantity,Unit Price,Status\n\
        STM32F407VGT6,STMicroelectronics,\"32-bit ARM Cortex-M4 MCU, 1MB Flash\",10,8.50,active\n\
        LM2596S-3.3,Texas Instruments,\"Step-down voltage regulator, 3.3V output\",5,2.45,EOL\n";

    #[test]
    fn test_ingest_csv() {
        let records = ingest_str(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].id, "2");
        assert_eq!(records[0].description, "32-bit ARM Cortex-M4 MCU, 1MB Flash");
        assert_eq!(records[0].quantity, 10);
        assert_eq!(records[0].unit_price, 8.5);
        assert_eq!(records[1].lifecycle_status, LifecycleStatus::EndOfLife);
    }

    #[test]
    fn test_headers_are_case_and_space_insensitive() {
        let text = "mpn;MANUFACTURER;description;QTY;unit_price\nNE555P;TI;Timer;4;0.35\n";
        let records = ingest_str(text).unwrap();
        assert_eq!(records[0].manufacturer_part_number, "NE555P");
        assert_eq!(records[0].quantity, 4);
        assert_eq!(records[0].unit_price, 0.35);
        assert_eq!(records[0].lifecycle_status, LifecycleStatus::Unknown);
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c"), b',');
        assert_eq!(sniff_delimiter("a;b;c"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("a|b|c"), b'|');
        assert_eq!(sniff_delimiter("single"), b',');
    }

    #[test]
    fn test_missing_required_column() {
        let err = ingest_str("MPN,Manufacturer,Quantity\nX,Y,1\n").unwrap_err();
        assert_eq!(err, PortalError::missing_field("Description"));
    }

    #[test]
    fn test_optional_price_defaults_to_zero() {
        let records = ingest_str("MPN,Manufacturer,Description,Quantity\nX,Y,Z,3\n").unwrap();
        assert_eq!(records[0].unit_price, 0.0);
        assert_eq!(records[0].total_cost(), 0.0);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let text = "MPN,Manufacturer,Description,Quantity\nA,M,D,1\n,,,\nB,M,D,2\n";
        let records = ingest_str(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "2");
        assert_eq!(records[1].manufacturer_part_number, "B");
    }

    #[test]
    fn test_malformed_rows_report_row_number() {
        let empty_mpn = "MPN,Manufacturer,Description,Quantity\nA,M,D,1\n ,M,D,2\n";
        assert_eq!(
            ingest_str(empty_mpn).unwrap_err(),
            PortalError::malformed_row(3, "MPN is empty")
        );

        let bad_qty = "MPN,Manufacturer,Description,Quantity\nA,M,D,-1\n";
        match ingest_str(bad_qty).unwrap_err() {
            PortalError::MalformedRow { row, .. } => assert_eq!(row, 2),
            other => panic!("unexpected error: {:?}", other),
        }

        let bad_price = "MPN,Manufacturer,Description,Quantity,Unit Price\nA,M,D,1,-0.5\n";
        assert_eq!(ingest_str(bad_price).unwrap_err().error_code(), "MALFORMED_ROW");
    }

    #[test]
    fn test_quantity_accepts_whole_floats() {
        assert_eq!(parse_quantity(2, "10.0").unwrap(), 10);
        assert!(parse_quantity(2, "2.5").is_err());
        assert!(parse_quantity(2, "abc").is_err());
    }

    #[test]
    fn test_price_accepts_dollar_sign() {
        assert_eq!(parse_price(2, "$2.45").unwrap(), 2.45);
        assert!(parse_price(2, "NaN").is_err());
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let text = format!("\u{feff}{}", SAMPLE);
        assert_eq!(ingest_str(&text).unwrap().len(), 2);
    }

    #[test]
    fn test_ingest_file_csv() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let records = ingest_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".pdf").tempfile().unwrap();
        assert_eq!(
            ingest_file(file.path()).unwrap_err(),
            PortalError::UnsupportedFormat {
                extension: "pdf".to_string()
            }
        );
    }

    #[test]
    fn test_file_too_large() {
        let file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.as_file().set_len(MAX_BOM_FILE_BYTES + 1).unwrap();
        assert_eq!(ingest_file(file.path()).unwrap_err().error_code(), "FILE_TOO_LARGE");
    }

    #[test]
    fn test_missing_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("csv");
        drop(file);
        assert_eq!(ingest_file(&path).unwrap_err().error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_ingest_file_xlsx() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/demo_bom.xlsx");
        assert_eq!(BomFormat::from_path(&path).unwrap(), BomFormat::Workbook);

        // First sheet only; the blank row 4 is skipped
        let records = ingest_file(&path).unwrap();
        assert_eq!(records.len(), 3);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);

        assert_eq!(records[0].manufacturer_part_number, "STM32F407VGT6");
        assert_eq!(records[0].description, "32-bit ARM Cortex-M4 MCU, 1MB Flash");
        assert_eq!(records[0].quantity, 10);
        assert_eq!(records[0].unit_price, 8.5);
        assert_eq!(records[0].lifecycle_status, LifecycleStatus::Active);

        assert_eq!(records[1].unit_price, 2.45);
        assert_eq!(records[1].lifecycle_status, LifecycleStatus::EndOfLife);

        assert_eq!(records[2].manufacturer_part_number, "NE555P");
        assert_eq!(records[2].quantity, 4);
        assert_eq!(records[2].lifecycle_status, LifecycleStatus::Unknown);
    }

    #[test]
    fn test_corrupt_workbook() {
        let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"not a zip archive").unwrap();
        assert_eq!(ingest_file(file.path()).unwrap_err().error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_ingest_reader() {
        let records = ingest_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records[1].manufacturer_part_number, "LM2596S-3.3");
    }
}
