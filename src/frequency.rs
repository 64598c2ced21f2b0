use crate::coordinates::CoordinateMapper;
use crate::coverage::CoverageSeries;
use crate::error::{ReportError, Result};
use crate::types::AminoAcidRow;

/// One amino-acid call placed on the unified axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AminoAcidCall {
    pub x: u32,
    pub variant: String,
    pub count: u64,
    pub coverage: u64,
    pub frequency: f64,
}

/// `count / coverage` at `x`. Zero or missing coverage is an error.
pub fn frequency(count: u64, x: u32, coverage: &CoverageSeries) -> Result<f64> {
    match coverage.get(x) {
        None => Err(ReportError::UndefinedCoverage(x)),
        Some(0) => Err(ReportError::ZeroCoverage(x)),
        Some(depth) => Ok(count as f64 / depth as f64),
    }
}

/// Amino-acid rows mapped onto the unified axis.
#[derive(Debug, Clone)]
pub struct MappedTable {
    pub rows: Vec<(u32, AminoAcidRow)>,
    /// Summed variant counts per unified coordinate.
    pub coverage: CoverageSeries,
}

impl MappedTable {
    /// Maps every row through `mapper`; an unmappable row aborts the build.
    pub fn new(rows: Vec<AminoAcidRow>, mapper: &CoordinateMapper) -> Result<Self> {
        let mut mapped = Vec::with_capacity(rows.len());
        for row in rows {
            let x = mapper.map(&row.region, row.position)?;
            mapped.push((x, row));
        }

        let coverage = CoverageSeries::from_counts(
            mapped
                .iter()
                .flat_map(|(x, row)| row.counts.values().map(move |&n| (*x, n))),
        );

        for (x, row) in &mapped {
            let summed = coverage.get(*x).unwrap_or(0);
            if row.coverage != 0 && row.coverage != summed {
                tracing::warn!(
                    "{} {}: coverage column reports {} but variant counts sum to {}",
                    row.region,
                    row.position,
                    row.coverage,
                    summed
                );
            }
        }

        Ok(Self {
            rows: mapped,
            coverage,
        })
    }

    /// Frequencies of every variant at covered positions.
    pub fn calls(&self) -> Result<Vec<AminoAcidCall>> {
        compute_frequencies(&self.rows, &self.coverage)
    }
}

/// Frequency of every variant in `rows` against `coverage`. Positions with no
/// reads are dropped before dividing.
pub fn compute_frequencies(
    rows: &[(u32, AminoAcidRow)],
    coverage: &CoverageSeries,
) -> Result<Vec<AminoAcidCall>> {
    let mut calls = Vec::new();
    for (x, row) in rows {
        let depth = match coverage.get(*x) {
            Some(depth) if depth > 0 => depth,
            _ => continue,
        };
        for (variant, &count) in &row.counts {
            calls.push(AminoAcidCall {
                x: *x,
                variant: variant.clone(),
                count,
                coverage: depth,
                frequency: frequency(count, *x, coverage)?,
            });
        }
    }
    Ok(calls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(region: &str, position: u32, counts: &[(&str, u64)]) -> AminoAcidRow {
        AminoAcidRow {
            hxb2: None,
            region: region.to_string(),
            position,
            coverage: counts.iter().map(|(_, n)| n).sum(),
            counts: counts
                .iter()
                .map(|(v, n)| (v.to_string(), *n))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn frequency_requires_coverage() {
        let series = CoverageSeries::from_counts(vec![(1, 40), (2, 0)]);
        assert_eq!(frequency(10, 1, &series).unwrap(), 0.25);
        assert!(matches!(frequency(0, 2, &series), Err(ReportError::ZeroCoverage(2))));
        assert!(matches!(frequency(0, 3, &series), Err(ReportError::UndefinedCoverage(3))));
    }

    #[test]
    fn calls_skip_uncovered_positions_and_stay_in_unit_interval() {
        let mapper = CoordinateMapper::default();
        let table = MappedTable::new(
            vec![
                row("RT", 65, &[("K", 95), ("R", 5)]),
                row("RT", 66, &[("K", 0), ("R", 0)]),
                row("PR", 90, &[("L", 1), ("M", 3)]),
            ],
            &mapper,
        )
        .unwrap();

        assert_eq!(table.coverage.get(165), Some(100));
        assert_eq!(table.coverage.get(166), Some(0));

        let calls = table.calls().unwrap();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|c| c.x != 166));
        assert!(calls.iter().all(|c| (0.0..=1.0).contains(&c.frequency)));
        let r = calls.iter().find(|c| c.x == 165 && c.variant == "R").unwrap();
        assert_eq!(r.frequency, 0.05);
        let m = calls.iter().find(|c| c.x == 90 && c.variant == "M").unwrap();
        assert_eq!(m.frequency, 0.75);
    }

    #[test]
    fn frequencies_use_the_supplied_series() {
        let rows = vec![
            (110, row("RT", 10, &[("K", 30), ("N", 10)])),
            (111, row("RT", 11, &[("K", 5)])),
        ];
        // Only 110 is covered; 111 is absent from the series and dropped.
        let series = CoverageSeries::from_counts(vec![(110, 80)]);

        let calls = compute_frequencies(&rows, &series).unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.x == 110 && c.coverage == 80));
        let n = calls.iter().find(|c| c.variant == "N").unwrap();
        assert_eq!(n.frequency, 0.125);
    }

    #[test]
    fn unmappable_row_aborts() {
        let mapper = CoordinateMapper::default();
        let result = MappedTable::new(vec![row("RT", 600, &[("K", 1)])], &mapper);
        assert!(matches!(result, Err(ReportError::InvalidPosition { .. })));
    }
}
