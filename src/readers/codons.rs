use super::{column_index, open_table, parse_coordinate, parse_count};
use crate::error::Result;
use crate::types::PositionCount;
use std::path::Path;

/// Reads a codon count table (one row per HXB2 position and codon).
///
/// Requires `hxb2` and `count` columns. The `codon` column, when present,
/// becomes the row label.
pub fn read_codon_counts(path: &Path) -> Result<Vec<PositionCount>> {
    let mut reader = open_table(path)?;
    let headers = reader.headers()?.clone();
    let hxb2_idx = column_index(&headers, path, "hxb2")?;
    let count_idx = column_index(&headers, path, "count")?;
    let codon_idx = headers.iter().position(|h| h == "codon");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(PositionCount {
            hxb2: parse_coordinate(&record, hxb2_idx, path, "hxb2")?,
            label: codon_idx
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .to_string(),
            count: parse_count(&record, count_idx, path)?,
        });
    }

    tracing::debug!("read {} codon rows from {}", rows.len(), path.display());
    Ok(rows)
}
