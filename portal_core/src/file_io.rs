//! # File I/O
//!
//! Shared file operations for the preference store and BOM export:
//! - **Atomic writes**: write to a `.tmp` sibling, fsync, rename, so an
//!   interrupted write never leaves a half-written file behind
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use portal_core::file_io::write_atomic;
//! use std::path::Path;
//!
//! write_atomic(Path::new("preferences.json"), b"{\"version\":\"0.1.0\",\"language\":\"he\"}")?;
//! # Ok::<(), portal_core::errors::PortalError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{PortalError, PortalResult};

/// Temp sibling used during an atomic write (`foo.json` → `foo.json.tmp`).
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write `contents` to `path` with atomic semantics.
///
/// 1. Write to `<path>.tmp`
/// 2. Sync to disk (fsync)
/// 3. Rename over `path`
pub fn write_atomic(path: &Path, contents: &[u8]) -> PortalResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        PortalError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        PortalError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        PortalError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        PortalError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> PortalResult<String> {
    let mut file = File::open(path)
        .map_err(|e| PortalError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| PortalError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Check that a file's `major.minor.patch` version can be read by a reader
/// at `expected`.
///
/// Major versions must match. Under 0.x a newer minor version is also
/// rejected, since 0.x minors may break the format.
pub fn validate_version(file_version: &str, expected: &str) -> PortalResult<()> {
    let mismatch = || PortalError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: expected.to_string(),
    };
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };

    let file_parts = parse(file_version);
    let current_parts = parse(expected);
    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }
    Ok(())
}
