use crate::config::{RegionLayout, RegionSpan};
use crate::error::{ReportError, Result};

/// A tick on the unified axis: unified coordinate and the in-region
/// position printed beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisTick {
    pub x: u32,
    pub label: u32,
}

/// Places amino-acid positions from several protein regions on one
/// contiguous axis.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    layout: RegionLayout,
}

impl CoordinateMapper {
    pub fn new(layout: RegionLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    /// Maps a 1-based `position` within `region` to its unified coordinate.
    pub fn map(&self, region: &str, position: u32) -> Result<u32> {
        let span = self
            .layout
            .get(region)
            .ok_or_else(|| ReportError::InvalidRegion(region.to_string()))?;
        if position == 0 || position > span.length {
            return Err(ReportError::InvalidPosition {
                region: region.to_string(),
                position,
                length: span.length,
            });
        }
        Ok(span.offset + position)
    }

    /// First and last unified coordinates covered by any region.
    pub fn domain(&self) -> (u32, u32) {
        let regions = self.layout.regions();
        let first = regions.first().map(RegionSpan::first).unwrap_or(1);
        let last = regions.last().map(RegionSpan::last).unwrap_or(first);
        (first, last)
    }

    /// Region separator positions: the offset of every region after the first.
    pub fn boundaries(&self) -> Vec<u32> {
        self.layout
            .regions()
            .iter()
            .skip(1)
            .map(|r| r.offset)
            .collect()
    }

    /// Ticks at position 1 of each region and every tenth position after it.
    /// Labels restart at each region.
    pub fn ticks(&self) -> Vec<AxisTick> {
        let mut ticks = Vec::new();
        for region in self.layout.regions() {
            ticks.push(AxisTick {
                x: region.offset + 1,
                label: 1,
            });
            for position in (10..=region.length).step_by(10) {
                ticks.push(AxisTick {
                    x: region.offset + position,
                    label: position,
                });
            }
        }
        ticks
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(RegionLayout::pol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pol_offsets() {
        let mapper = CoordinateMapper::default();
        assert_eq!(mapper.map("PR", 1).unwrap(), 1);
        assert_eq!(mapper.map("PR", 99).unwrap(), 99);
        assert_eq!(mapper.map("RT", 10).unwrap(), 110);
        assert_eq!(mapper.map("RT", 440).unwrap(), 540);
        assert_eq!(mapper.map("IN", 1).unwrap(), 542);
        assert_eq!(mapper.map("IN", 288).unwrap(), 829);
    }

    #[test]
    fn out_of_domain_pairs_are_rejected() {
        let mapper = CoordinateMapper::default();
        assert!(matches!(
            mapper.map("PR", 100),
            Err(ReportError::InvalidPosition { length: 99, .. })
        ));
        assert!(matches!(mapper.map("RT", 0), Err(ReportError::InvalidPosition { .. })));
        assert!(matches!(mapper.map("gp120", 5), Err(ReportError::InvalidRegion(_))));
    }

    #[test]
    fn increasing_within_region_and_disjoint_between() {
        let mapper = CoordinateMapper::default();
        let mut previous_last = 0;
        for region in mapper.layout().regions() {
            let mapped: Vec<u32> = (1..=region.length)
                .map(|p| mapper.map(&region.name, p).unwrap())
                .collect();
            assert!(mapped.windows(2).all(|w| w[0] < w[1]));
            assert!(mapped[0] > previous_last);
            previous_last = *mapped.last().unwrap();
        }
    }

    #[test]
    fn alternate_layout() {
        let layout = RegionLayout::new(vec![
            RegionSpan::new("A", "Alpha", 0, 20),
            RegionSpan::new("B", "Beta", 25, 15),
        ])
        .unwrap();
        let mapper = CoordinateMapper::new(layout);
        assert_eq!(mapper.map("B", 1).unwrap(), 26);
        assert_eq!(mapper.domain(), (1, 40));
        assert_eq!(mapper.boundaries(), vec![25]);
        assert_eq!(
            mapper.ticks(),
            vec![
                AxisTick { x: 1, label: 1 },
                AxisTick { x: 10, label: 10 },
                AxisTick { x: 20, label: 20 },
                AxisTick { x: 26, label: 1 },
                AxisTick { x: 35, label: 10 },
            ]
        );
    }

    #[test]
    fn pol_ticks_restart_per_region() {
        let ticks = CoordinateMapper::default().ticks();
        assert_eq!(ticks[0], AxisTick { x: 1, label: 1 });
        assert!(ticks.contains(&AxisTick { x: 101, label: 1 }));
        assert!(ticks.contains(&AxisTick { x: 110, label: 10 }));
        assert!(ticks.contains(&AxisTick { x: 542, label: 1 }));
        assert!(ticks.contains(&AxisTick { x: 551, label: 10 }));
    }
}
