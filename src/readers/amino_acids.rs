use super::{column_index, open_table, parse_coordinate, parse_count};
use crate::error::Result;
use crate::types::AminoAcidRow;
use std::collections::BTreeMap;
use std::path::Path;

const FIXED_COLUMNS: [&str; 4] = ["hxb2", "region", "position", "coverage"];

/// Reads the amino-acid count table: `region`, `position` and `coverage`
/// columns (plus an optional `hxb2`), with every remaining column holding
/// the count of one amino-acid variant.
pub fn read_amino_acid_table(path: &Path) -> Result<Vec<AminoAcidRow>> {
    let mut reader = open_table(path)?;
    let headers = reader.headers()?.clone();
    let region_idx = column_index(&headers, path, "region")?;
    let position_idx = column_index(&headers, path, "position")?;
    let coverage_idx = column_index(&headers, path, "coverage")?;
    let hxb2_idx = headers.iter().position(|h| h == "hxb2");

    let variant_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.is_empty() && !FIXED_COLUMNS.contains(h))
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        let mut counts = BTreeMap::new();
        for (idx, variant) in &variant_columns {
            counts.insert(variant.clone(), parse_count(&record, *idx, path)?);
        }

        rows.push(AminoAcidRow {
            hxb2: match hxb2_idx {
                Some(i) => Some(parse_coordinate(&record, i, path, "hxb2")?),
                None => None,
            },
            region: record.get(region_idx).unwrap_or("").to_string(),
            position: parse_coordinate(&record, position_idx, path, "position")?,
            coverage: parse_count(&record, coverage_idx, path)?,
            counts,
        });
    }

    tracing::debug!(
        "read {} amino-acid rows with {} variant columns from {}",
        rows.len(),
        variant_columns.len(),
        path.display()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::fs;

    #[test]
    fn variant_columns_are_everything_but_the_fixed_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aa.csv");
        fs::write(
            &path,
            "hxb2,region,position,A,K,R,coverage\n2550,RT,65,0,95,5,100\n2553,RT,66,3,,0,3\n",
        )
        .unwrap();

        let rows = read_amino_acid_table(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hxb2, Some(2550));
        assert_eq!(rows[0].region, "RT");
        assert_eq!(rows[0].position, 65);
        assert_eq!(rows[0].coverage, 100);
        assert_eq!(
            rows[0].counts.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["A", "K", "R"]
        );
        assert_eq!(rows[0].counts["K"], 95);
        assert_eq!(rows[1].counts["K"], 0);
    }

    #[test]
    fn region_column_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aa.csv");
        fs::write(&path, "hxb2,position,A,coverage\n2550,65,1,1\n").unwrap();

        assert!(matches!(
            read_amino_acid_table(&path),
            Err(ReportError::MissingColumn { .. })
        ));
    }
}
