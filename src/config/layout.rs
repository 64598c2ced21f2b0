use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// A protein sub-region placed on the unified plotting axis.
///
/// Positions `1..=length` within the region map to `offset + position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSpan {
    pub name: String,
    pub label: String,
    pub offset: u32,
    pub length: u32,
}

impl RegionSpan {
    pub fn new(name: &str, label: &str, offset: u32, length: u32) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            offset,
            length,
        }
    }

    /// First unified coordinate occupied by this region.
    pub fn first(&self) -> u32 {
        self.offset + 1
    }

    /// Last unified coordinate occupied by this region.
    pub fn last(&self) -> u32 {
        self.offset + self.length
    }
}

/// HIV pol sub-regions concatenated end to end: (name, label, offset, length).
///
/// Protease occupies 1..=99, reverse transcriptase 101..=540 and integrase
/// 542..=829. The one-coordinate gaps at 100 and 541 carry the region
/// separator lines.
pub const POL_REGIONS: [(&str, &str, u32, u32); 3] = [
    ("PR", "Protease", 0, 99),
    ("RT", "Reverse Transcriptase", 100, 440),
    ("IN", "Integrase", 541, 288),
];

/// Ordered, validated set of regions. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionLayout {
    regions: Vec<RegionSpan>,
}

impl RegionLayout {
    /// Validates that regions are non-empty, uniquely named and occupy
    /// strictly increasing, disjoint intervals.
    pub fn new(regions: Vec<RegionSpan>) -> Result<Self> {
        if regions.is_empty() {
            return Err(ReportError::InvalidLayout("no regions defined".into()));
        }

        for (i, region) in regions.iter().enumerate() {
            if region.length == 0 {
                return Err(ReportError::InvalidLayout(format!(
                    "region {} has zero length",
                    region.name
                )));
            }
            if region.offset.checked_add(region.length).is_none() {
                return Err(ReportError::InvalidLayout(format!(
                    "region {} extends past coordinate {}",
                    region.name,
                    u32::MAX
                )));
            }
            if regions[..i].iter().any(|r| r.name == region.name) {
                return Err(ReportError::InvalidLayout(format!(
                    "region {} is defined twice",
                    region.name
                )));
            }
            if i > 0 && regions[i - 1].last() >= region.first() {
                return Err(ReportError::InvalidLayout(format!(
                    "region {} (starting at {}) overlaps {} (ending at {})",
                    region.name,
                    region.first(),
                    regions[i - 1].name,
                    regions[i - 1].last()
                )));
            }
        }

        Ok(Self { regions })
    }

    pub fn pol() -> Self {
        let regions = POL_REGIONS
            .iter()
            .map(|&(name, label, offset, length)| RegionSpan::new(name, label, offset, length))
            .collect();
        // POL_REGIONS is ordered and disjoint.
        Self { regions }
    }

    pub fn regions(&self) -> &[RegionSpan] {
        &self.regions
    }

    pub fn get(&self, name: &str) -> Option<&RegionSpan> {
        self.regions.iter().find(|r| r.name == name)
    }
}

impl Default for RegionLayout {
    fn default() -> Self {
        Self::pol()
    }
}

/// HXB2 start coordinates of the HIV-1 genes, in genome order.
pub const HXB2_GENES: [(&str, u32); 8] = [
    ("gag", 790),
    ("pol", 2085),
    ("vif", 5041),
    ("vpr", 5559),
    ("tat", 5831),
    ("vpu", 6062),
    ("env", 6225),
    ("nef", 8797),
];

/// Last HXB2 coordinate shown on the coverage plot.
pub const HXB2_END: u32 = 9417;

/// Gene starts used to tick the x-axis of the coverage plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneLayout {
    pub genes: Vec<(String, u32)>,
    pub end: u32,
}

impl GeneLayout {
    pub fn hxb2() -> Self {
        Self {
            genes: HXB2_GENES
                .iter()
                .map(|&(name, start)| (name.to_string(), start))
                .collect(),
            end: HXB2_END,
        }
    }

    pub fn start(&self) -> u32 {
        self.genes.iter().map(|(_, start)| *start).min().unwrap_or(1)
    }
}

impl Default for GeneLayout {
    fn default() -> Self {
        Self::hxb2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pol_layout_passes_validation() {
        let regions = RegionLayout::pol().regions().to_vec();
        assert!(RegionLayout::new(regions).is_ok());
    }

    #[test]
    fn overlapping_regions_are_rejected() {
        let result = RegionLayout::new(vec![
            RegionSpan::new("A", "First", 0, 50),
            RegionSpan::new("B", "Second", 40, 10),
        ]);
        assert!(matches!(result, Err(ReportError::InvalidLayout(_))));
    }

    #[test]
    fn duplicate_and_empty_regions_are_rejected() {
        assert!(RegionLayout::new(vec![]).is_err());
        assert!(RegionLayout::new(vec![RegionSpan::new("A", "A", 0, 0)]).is_err());
        assert!(RegionLayout::new(vec![
            RegionSpan::new("A", "A", 0, 5),
            RegionSpan::new("A", "A", 10, 5),
        ])
        .is_err());
    }

    #[test]
    fn regions_past_the_axis_end_are_rejected() {
        let result = RegionLayout::new(vec![
            RegionSpan::new("A", "First", 0, 10),
            RegionSpan::new("B", "Second", u32::MAX - 5, 10),
        ]);
        assert!(matches!(result, Err(ReportError::InvalidLayout(_))));

        let last = RegionSpan::new("C", "Edge", u32::MAX - 10, 10);
        assert!(RegionLayout::new(vec![last]).is_ok());
    }

    #[test]
    fn hxb2_genes_start_at_gag() {
        let genes = GeneLayout::hxb2();
        assert_eq!(genes.start(), 790);
        assert_eq!(genes.end, 9417);
    }
}
