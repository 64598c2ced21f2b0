use super::svg::{num, write_atomically, SvgDocument, SvgTag};
use crate::config::GeneLayout;
use crate::coverage::CoverageSeries;
use crate::error::Result;
use std::path::Path;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 400;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 40.0;
const BOTTOM: f64 = 110.0;

/// Y-axis layout of the coverage plot.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageAxis {
    pub threshold: u64,
    pub observed_max: u64,
    /// Upper limit of the axis: the larger of the threshold and 1.1x the
    /// observed maximum.
    pub y_max: f64,
    pub ticks: Vec<u64>,
}

impl CoverageAxis {
    pub fn new(series: &CoverageSeries, threshold: u64) -> Self {
        let observed_max = series.max();
        let mut ticks = vec![0];
        if threshold > 0 {
            ticks.push(threshold);
        }
        if observed_max as f64 > 1.1 * threshold as f64 {
            ticks.push(observed_max);
        }

        let y_max = (threshold as f64).max(1.1 * observed_max as f64);
        Self {
            threshold,
            observed_max,
            y_max: if y_max > 0.0 { y_max } else { 1.0 },
            ticks,
        }
    }

    pub fn max_tick(&self) -> u64 {
        self.ticks.last().copied().unwrap_or(0)
    }
}

/// Covered coordinates that fall outside the gene frame and get no bar.
pub fn clipped_positions(series: &CoverageSeries, genes: &GeneLayout) -> usize {
    series
        .iter()
        .filter(|&(coordinate, depth)| {
            depth > 0 && (coordinate < genes.start() || coordinate > genes.end)
        })
        .count()
}

struct Frame {
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn px_x(&self, x: f64) -> f64 {
        LEFT + (x - self.x_min) / (self.x_max - self.x_min) * (WIDTH as f64 - LEFT - RIGHT)
    }

    fn px_y(&self, y: f64) -> f64 {
        let bottom = HEIGHT as f64 - BOTTOM;
        bottom - (y / self.y_max) * (bottom - TOP)
    }
}

/// Renders the per-coordinate coverage bars with the minimum-coverage band
/// and gene-start ticks.
pub fn render_coverage_svg(series: &CoverageSeries, threshold: u64, genes: &GeneLayout) -> String {
    let axis = CoverageAxis::new(series, threshold);
    let frame = Frame {
        x_min: genes.start() as f64,
        x_max: genes.end as f64,
        y_max: axis.y_max,
    };
    let mut doc = SvgDocument::new(WIDTH, HEIGHT);

    doc.text(
        SvgTag::new("text")
            .attr("x", num(LEFT))
            .attr("y", 24)
            .attr("font-size", 16),
        "Coverage",
    );

    // Gene grid
    for (_, start) in &genes.genes {
        let x = num(frame.px_x(*start as f64));
        doc.push(
            SvgTag::new("line")
                .attr("x1", &x)
                .attr("y1", num(TOP))
                .attr("x2", &x)
                .attr("y2", num(frame.px_y(0.0)))
                .attr("stroke", "#dddddd")
                .attr("stroke-width", 1),
        );
    }

    // Minimum coverage band and line
    let threshold_y = frame.px_y(axis.threshold as f64);
    doc.push(
        SvgTag::new("rect")
            .attr("class", "threshold-band")
            .attr("x", num(LEFT))
            .attr("y", num(threshold_y))
            .attr("width", num(WIDTH as f64 - LEFT - RIGHT))
            .attr("height", num(frame.px_y(0.0) - threshold_y))
            .attr("fill", "#ff0000")
            .attr("fill-opacity", "0.3"),
    );
    doc.push(
        SvgTag::new("line")
            .attr("class", "threshold")
            .attr("data-value", axis.threshold)
            .attr("x1", num(LEFT))
            .attr("y1", num(threshold_y))
            .attr("x2", num(WIDTH as f64 - RIGHT))
            .attr("y2", num(threshold_y))
            .attr("stroke", "#ff0000")
            .attr("stroke-width", 1),
    );

    // Bars
    let bar_width = (frame.px_x(frame.x_min + 1.0) - frame.px_x(frame.x_min)).max(0.5);
    let mut clipped = 0usize;
    for (coordinate, depth) in series.iter() {
        let x = coordinate as f64;
        if depth == 0 {
            continue;
        }
        if x < frame.x_min || x > frame.x_max {
            clipped += 1;
            continue;
        }
        let top = frame.px_y(depth as f64);
        doc.push(
            SvgTag::new("rect")
                .attr("x", num(frame.px_x(x) - bar_width / 2.0))
                .attr("y", num(top))
                .attr("width", num(bar_width))
                .attr("height", num(frame.px_y(0.0) - top))
                .attr("fill", "#000000"),
        );
    }
    if clipped > 0 {
        tracing::warn!(
            "{} covered positions lie outside HXB2 {}..={} and were not drawn",
            clipped,
            genes.start(),
            genes.end
        );
    }

    // Axes
    let baseline = num(frame.px_y(0.0));
    doc.push(
        SvgTag::new("line")
            .attr("x1", num(LEFT))
            .attr("y1", &baseline)
            .attr("x2", num(WIDTH as f64 - RIGHT))
            .attr("y2", &baseline)
            .attr("stroke", "#000000"),
    );
    doc.push(
        SvgTag::new("line")
            .attr("x1", num(LEFT))
            .attr("y1", num(TOP))
            .attr("x2", num(LEFT))
            .attr("y2", &baseline)
            .attr("stroke", "#000000"),
    );

    for (gene, start) in &genes.genes {
        let x = frame.px_x(*start as f64);
        let y = frame.px_y(0.0) + 8.0;
        doc.text(
            SvgTag::new("text")
                .attr("class", "xtick")
                .attr("x", num(x))
                .attr("y", num(y))
                .attr("transform", format!("rotate(-90 {} {})", num(x), num(y)))
                .attr("text-anchor", "end")
                .attr("dominant-baseline", "middle")
                .attr("font-family", "monospace")
                .attr("font-size", 11),
            &format!("{} {:>4}", gene, start),
        );
    }

    for tick in &axis.ticks {
        let y = frame.px_y(*tick as f64);
        doc.push(
            SvgTag::new("line")
                .attr("x1", num(LEFT - 5.0))
                .attr("y1", num(y))
                .attr("x2", num(LEFT))
                .attr("y2", num(y))
                .attr("stroke", "#000000"),
        );
        doc.text(
            SvgTag::new("text")
                .attr("class", "ytick")
                .attr("x", num(LEFT - 8.0))
                .attr("y", num(y))
                .attr("text-anchor", "end")
                .attr("dominant-baseline", "middle")
                .attr("font-size", 11),
            &tick.to_string(),
        );
    }

    doc.text(
        SvgTag::new("text")
            .attr("x", num((LEFT + WIDTH as f64 - RIGHT) / 2.0))
            .attr("y", HEIGHT - 6)
            .attr("text-anchor", "middle")
            .attr("font-size", 12),
        "Gene and HXB2 Coordinates",
    );
    doc.text(
        SvgTag::new("text")
            .attr("x", 18)
            .attr("y", num((TOP + frame.px_y(0.0)) / 2.0))
            .attr("transform", format!("rotate(-90 18 {})", num((TOP + frame.px_y(0.0)) / 2.0)))
            .attr("text-anchor", "middle")
            .attr("font-size", 12),
        "# of Reads",
    );

    doc.finish()
}

pub fn render_coverage_plot(
    series: &CoverageSeries,
    threshold: u64,
    genes: &GeneLayout,
    path: &Path,
) -> Result<()> {
    let svg = render_coverage_svg(series, threshold, genes);
    write_atomically(path, &svg)?;
    tracing::info!("wrote coverage plot {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_tick_appears_when_coverage_clears_threshold() {
        let series = CoverageSeries::from_counts(vec![(100, 30), (101, 5), (102, 0)]);
        let axis = CoverageAxis::new(&series, 10);
        assert_eq!(axis.ticks, vec![0, 10, 30]);
        assert_eq!(axis.max_tick(), 30);
        assert!((axis.y_max - 33.0).abs() < 1e-9);
    }

    #[test]
    fn low_coverage_keeps_threshold_as_limit() {
        let series = CoverageSeries::from_counts(vec![(100, 10), (101, 4)]);
        let axis = CoverageAxis::new(&series, 10);
        assert_eq!(axis.ticks, vec![0, 10]);
        assert!((axis.y_max - 11.0).abs() < 1e-9);

        let low = CoverageSeries::from_counts(vec![(100, 3)]);
        let axis = CoverageAxis::new(&low, 10);
        assert_eq!(axis.ticks, vec![0, 10]);
        assert_eq!(axis.y_max, 10.0);
    }

    #[test]
    fn empty_series_still_has_an_axis() {
        let axis = CoverageAxis::new(&CoverageSeries::default(), 0);
        assert_eq!(axis.ticks, vec![0]);
        assert_eq!(axis.y_max, 1.0);
    }

    #[test]
    fn rendering_is_reproducible() {
        let series = CoverageSeries::from_counts(vec![(2100, 40), (2101, 12), (9000, 3)]);
        let genes = GeneLayout::hxb2();
        let first = render_coverage_svg(&series, 10, &genes);
        let second = render_coverage_svg(&series, 10, &genes);
        assert_eq!(first, second);
        assert!(first.contains(">gag  790</text>"));
        assert!(first.contains("class=\"threshold\" data-value=\"10\""));
        assert_eq!(first.matches("fill=\"#000000\"/>").count(), 3);
    }

    #[test]
    fn positions_outside_the_genome_frame_are_clipped() {
        let genes = GeneLayout::hxb2();
        let series =
            CoverageSeries::from_counts(vec![(100, 30), (789, 2), (2100, 5), (9500, 1), (9600, 0)]);
        assert_eq!(clipped_positions(&series, &genes), 3);

        let svg = render_coverage_svg(&series, 10, &genes);
        assert_eq!(svg.matches("fill=\"#000000\"/>").count(), 1);

        let inside = CoverageSeries::from_counts(vec![(790, 1), (9417, 1)]);
        assert_eq!(clipped_positions(&inside, &genes), 0);
    }
}
