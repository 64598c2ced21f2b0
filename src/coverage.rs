use crate::types::PositionCount;
use std::collections::BTreeMap;

/// Read depth per coordinate. Coordinates never observed are absent, not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageSeries {
    depth: BTreeMap<u32, u64>,
}

impl CoverageSeries {
    /// Sums counts grouped by coordinate. Row order does not matter.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (u32, u64)>,
    {
        let mut depth = BTreeMap::new();
        for (coordinate, count) in counts {
            *depth.entry(coordinate).or_insert(0u64) += count;
        }
        Self { depth }
    }

    pub fn from_position_counts(rows: &[PositionCount]) -> Self {
        Self::from_counts(rows.iter().map(|r| (r.hxb2, r.count)))
    }

    pub fn get(&self, coordinate: u32) -> Option<u64> {
        self.depth.get(&coordinate).copied()
    }

    pub fn max(&self) -> u64 {
        self.depth.values().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.depth.iter().map(|(&c, &d)| (c, d))
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.depth.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_by_coordinate_ignoring_label() {
        let rows = vec![
            PositionCount::new(100, "AAA", 20),
            PositionCount::new(101, "CCC", 5),
            PositionCount::new(100, "AAG", 10),
            PositionCount::new(102, "GGG", 0),
        ];
        let series = CoverageSeries::from_position_counts(&rows);
        assert_eq!(series.get(100), Some(30));
        assert_eq!(series.get(101), Some(5));
        assert_eq!(series.get(102), Some(0));
        assert_eq!(series.get(103), None);
        assert_eq!(series.max(), 30);
        assert_eq!(series.total(), 35);
    }

    #[test]
    fn row_order_does_not_change_sums() {
        let rows: Vec<(u32, u64)> = (0..60).map(|i| (i % 7, (i * 13 % 11) as u64)).collect();
        let forward = CoverageSeries::from_counts(rows.iter().copied());
        let reversed = CoverageSeries::from_counts(rows.iter().rev().copied());
        assert_eq!(forward, reversed);

        for (coordinate, depth) in forward.iter() {
            let expected: u64 = rows
                .iter()
                .filter(|(c, _)| *c == coordinate)
                .map(|(_, n)| n)
                .sum();
            assert_eq!(depth, expected);
        }
    }

    #[test]
    fn empty_series() {
        let series = CoverageSeries::from_counts(std::iter::empty());
        assert!(series.is_empty());
        assert_eq!(series.max(), 0);
    }
}
