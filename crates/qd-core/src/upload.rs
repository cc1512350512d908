use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use qd_error::{QdError, Result};

/// File types the backend ingestion pipeline accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["txt", "md", "csv", "pdf"];

pub const CHUNK_SIZE_RANGE: RangeInclusive<u32> = 100..=1000;
pub const CHUNK_OVERLAP_RANGE: RangeInclusive<u32> = 50..=500;
pub const DEFAULT_CHUNK_SIZE: u32 = 500;
pub const DEFAULT_CHUNK_OVERLAP: u32 = 200;

/// Query parameters sent alongside an uploaded file.
///
/// Each value is range-checked on its own; overlap is not compared against
/// size, the server decides what to do with that combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadParams {
    pub chunk_size: u32,
    pub chunk_overlap: u32,
    pub session_id: String,
}

impl UploadParams {
    pub fn new(chunk_size: u32, chunk_overlap: u32, session_id: impl Into<String>) -> Result<Self> {
        check_range("chunk_size", chunk_size, &CHUNK_SIZE_RANGE)?;
        check_range("chunk_overlap", chunk_overlap, &CHUNK_OVERLAP_RANGE)?;
        Ok(Self {
            chunk_size,
            chunk_overlap,
            session_id: session_id.into(),
        })
    }
}

fn check_range(name: &str, value: u32, range: &RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(QdError::validation(format!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )))
    }
}

/// Rejects files whose extension is not in [`ACCEPTED_EXTENSIONS`].
pub fn check_extension(filename: &str) -> Result<()> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext {
        Some(e) if ACCEPTED_EXTENSIONS.contains(&e.as_str()) => Ok(()),
        _ => Err(QdError::validation(format!(
            "{filename}: unsupported file type, expected one of {}",
            ACCEPTED_EXTENSIONS.join(", ")
        ))),
    }
}
