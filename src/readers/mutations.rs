use super::{column_index, open_table};
use crate::error::{ReportError, Result};
use crate::types::MutationRecord;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 6] = ["region", "position", "frequency", "IAS", "Stanford", "SDRM"];

/// Reads the candidate mutation list.
pub fn read_mutation_list(path: &Path) -> Result<Vec<MutationRecord>> {
    let mut reader = open_table(path)?;
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        column_index(&headers, path, column)?;
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<MutationRecord>() {
        let record = result.map_err(|e| ReportError::MalformedRow {
            path: path.to_path_buf(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        records.push(record);
    }

    tracing::debug!("read {} candidate mutations from {}", records.len(), path.display());
    Ok(records)
}
