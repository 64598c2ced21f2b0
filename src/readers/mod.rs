mod amino_acids;
mod codons;
mod mutations;

pub use amino_acids::read_amino_acid_table;
pub use codons::read_codon_counts;
pub use mutations::read_mutation_list;

use crate::error::{ReportError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;

/// Tab-delimited for `.tsv`, `.tab` and `.txt`; comma-delimited otherwise.
pub(crate) fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") | Some("txt") => b'\t',
        _ => b',',
    }
}

pub(crate) fn open_table(path: &Path) -> Result<csv::Reader<File>> {
    let reader = ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .trim(csv::Trim::All)
        .from_path(path)?;
    Ok(reader)
}

pub(crate) fn column_index(headers: &StringRecord, path: &Path, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ReportError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Parses an integer cell; blank cells count as zero.
pub(crate) fn parse_count(record: &StringRecord, index: usize, path: &Path) -> Result<u64> {
    let raw = record.get(index).unwrap_or("");
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u64>()
        .or_else(|_| parse_integral_float(raw))
        .map_err(|_| ReportError::MalformedRow {
            path: path.to_path_buf(),
            line: line_of(record),
            message: format!("'{}' is not a non-negative integer count", raw),
        })
}

// Spreadsheet exports write integer columns as "12.0".
fn parse_integral_float(raw: &str) -> std::result::Result<u64, ()> {
    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
        _ => Err(()),
    }
}

pub(crate) fn parse_coordinate(
    record: &StringRecord,
    index: usize,
    path: &Path,
    column: &str,
) -> Result<u32> {
    let raw = record.get(index).unwrap_or("");
    raw.parse::<u32>()
        .ok()
        .or_else(|| parse_integral_float(raw).ok().and_then(|v| u32::try_from(v).ok()))
        .ok_or_else(|| ReportError::MalformedRow {
            path: path.to_path_buf(),
            line: line_of(record),
            message: format!("'{}' is not a valid {} coordinate", raw, column),
        })
}
