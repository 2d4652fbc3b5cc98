//! Reading and writing the JSON array consumed by the front-end.

use std::fs;
use std::path::Path;

use crate::error::ScanError;
use crate::record::StockRecord;

/// Default location, next to the front-end's static assets.
pub const DEFAULT_OUTPUT_PATH: &str = "public/data.json";

/// Write `records` as a 2-space indented JSON array, creating the parent
/// directory if needed. Non-ASCII text is written as UTF-8, not escaped.
pub fn write_records(path: &Path, records: &[StockRecord]) -> Result<(), ScanError> {
    validate_records(records)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Parse an output file back into records.
pub fn read_records(path: &Path) -> Result<Vec<StockRecord>, ScanError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Reject the first record carrying NaN or infinite values.
pub fn validate_records(records: &[StockRecord]) -> Result<(), ScanError> {
    for record in records {
        let bad = record.non_finite_fields();
        if !bad.is_empty() {
            return Err(ScanError::InvalidRecord {
                id: record.id.clone(),
                fields: bad.into_iter().map(String::from).collect(),
            });
        }
    }
    Ok(())
}
