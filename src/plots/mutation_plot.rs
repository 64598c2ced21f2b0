use super::svg::{num, write_atomically, SvgDocument, SvgTag};
use crate::classifier::ClassifiedMutation;
use crate::coordinates::CoordinateMapper;
use crate::error::Result;
use crate::frequency::{AminoAcidCall, MappedTable};
use std::path::Path;

const WIDTH: u32 = 1500;
const HEIGHT: u32 = 600;
const LEFT: f64 = 90.0;
const RIGHT: f64 = 20.0;
const COVERAGE_TOP: f64 = 20.0;
const COVERAGE_BOTTOM: f64 = 110.0;
const LABEL_BASELINE: f64 = 138.0;
const FREQUENCY_TOP: f64 = 160.0;
const FREQUENCY_BOTTOM: f64 = 520.0;
const X_MARGIN: f64 = 1.5;

/// Log-scale frequency axis, in percent.
pub const FREQUENCY_TICKS: [f64; 7] = [0.1, 1.0, 5.0, 10.0, 20.0, 50.0, 100.0];
pub const FREQUENCY_FLOOR: f64 = 0.09;
pub const FREQUENCY_CEILING: f64 = 110.0;

/// Formats `value` with comma thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a percentage tick the way `%g%%` would.
fn percent_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}%", value as u64)
    } else {
        format!("{}%", value)
    }
}

/// Coverage and amino-acid frequency panels with the classified mutations
/// highlighted.
pub struct MutationPlot<'a> {
    mapper: &'a CoordinateMapper,
    table: &'a MappedTable,
    calls: Vec<AminoAcidCall>,
    mutations: Vec<(u32, &'a ClassifiedMutation)>,
}

impl<'a> MutationPlot<'a> {
    /// Fails if any mutation lies outside the mapper's regions.
    pub fn new(
        mapper: &'a CoordinateMapper,
        table: &'a MappedTable,
        mutations: &'a [ClassifiedMutation],
    ) -> Result<Self> {
        let calls = table.calls()?;
        let mut placed = Vec::with_capacity(mutations.len());
        for mutation in mutations {
            let x = mapper.map(&mutation.record.region, mutation.record.position)?;
            placed.push((x, mutation));
        }
        Ok(Self {
            mapper,
            table,
            calls,
            mutations: placed,
        })
    }

    /// Unified coordinates of the highlighted mutations, in input order.
    pub fn mutation_positions(&self) -> Vec<u32> {
        self.mutations.iter().map(|(x, _)| *x).collect()
    }

    /// True when `call` is drawn by the mutation overlay instead of the
    /// background. A mutation without a variant claims its whole position.
    fn is_highlighted(&self, call: &AminoAcidCall) -> bool {
        self.mutations.iter().any(|(x, mutation)| {
            *x == call.x
                && match mutation.record.variant.as_deref() {
                    Some(variant) => variant == call.variant,
                    None => true,
                }
        })
    }

    fn x_range(&self) -> (f64, f64) {
        let (first, last) = self.mapper.domain();
        (first as f64 - X_MARGIN, last as f64 + X_MARGIN)
    }

    fn px_x(&self, x: f64) -> f64 {
        let (x_min, x_max) = self.x_range();
        LEFT + (x - x_min) / (x_max - x_min) * (WIDTH as f64 - LEFT - RIGHT)
    }

    fn px_coverage(&self, depth: f64, max: f64) -> f64 {
        COVERAGE_BOTTOM - depth / max * (COVERAGE_BOTTOM - COVERAGE_TOP)
    }

    fn px_frequency(&self, percent: f64) -> f64 {
        let (lo, hi) = (FREQUENCY_FLOOR.log10(), FREQUENCY_CEILING.log10());
        FREQUENCY_BOTTOM - (percent.log10() - lo) / (hi - lo) * (FREQUENCY_BOTTOM - FREQUENCY_TOP)
    }

    fn plottable(percent: f64) -> bool {
        percent > 0.0 && (FREQUENCY_FLOOR..=FREQUENCY_CEILING).contains(&percent)
    }

    pub fn render(&self) -> String {
        let mut doc = SvgDocument::new(WIDTH, HEIGHT);
        self.render_coverage_panel(&mut doc);
        self.render_frequency_panel(&mut doc);
        doc.finish()
    }

    fn render_coverage_panel(&self, doc: &mut SvgDocument) {
        let coverage = &self.table.coverage;
        let max = coverage.max();
        let scale_max = max.max(1) as f64;
        let bar_width = self.px_x(1.0) - self.px_x(0.0);

        for (x, depth) in coverage.iter() {
            if depth == 0 {
                continue;
            }
            let top = self.px_coverage(depth as f64, scale_max);
            doc.push(
                SvgTag::new("rect")
                    .attr("x", num(self.px_x(x as f64) - bar_width / 2.0))
                    .attr("y", num(top))
                    .attr("width", num(bar_width))
                    .attr("height", num(COVERAGE_BOTTOM - top))
                    .attr("fill", "#000000"),
            );
        }

        for boundary in self.mapper.boundaries() {
            let x = num(self.px_x(boundary as f64));
            doc.push(
                SvgTag::new("line")
                    .attr("class", "separator")
                    .attr("x1", &x)
                    .attr("y1", num(COVERAGE_TOP))
                    .attr("x2", &x)
                    .attr("y2", num(COVERAGE_BOTTOM))
                    .attr("stroke", "#ffffff")
                    .attr("stroke-width", 1),
            );
        }

        for (value, y) in [(0, COVERAGE_BOTTOM), (max, COVERAGE_TOP)] {
            doc.text(
                SvgTag::new("text")
                    .attr("class", "ytick")
                    .attr("x", num(LEFT - 8.0))
                    .attr("y", num(y))
                    .attr("text-anchor", "end")
                    .attr("dominant-baseline", "middle")
                    .attr("font-size", 12),
                &group_thousands(value),
            );
        }
        axis_title(doc, "Coverage", (COVERAGE_TOP + COVERAGE_BOTTOM) / 2.0);

        for region in self.mapper.layout().regions() {
            doc.text(
                SvgTag::new("text")
                    .attr("class", "region")
                    .attr("x", num(self.px_x(region.first() as f64)))
                    .attr("y", num(LABEL_BASELINE))
                    .attr("font-size", 14)
                    .attr("font-weight", "bold"),
                &region.label,
            );
        }
    }

    fn render_frequency_panel(&self, doc: &mut SvgDocument) {
        let (x_min, x_max) = self.x_range();
        let (left, right) = (self.px_x(x_min), self.px_x(x_max));

        // Grid
        for tick in FREQUENCY_TICKS {
            let y = num(self.px_frequency(tick));
            doc.push(
                SvgTag::new("line")
                    .attr("x1", num(left))
                    .attr("y1", &y)
                    .attr("x2", num(right))
                    .attr("y2", &y)
                    .attr("stroke", "#cccccc")
                    .attr("stroke-width", 0.5),
            );
            doc.text(
                SvgTag::new("text")
                    .attr("class", "ytick")
                    .attr("x", num(LEFT - 8.0))
                    .attr("y", &y)
                    .attr("text-anchor", "end")
                    .attr("dominant-baseline", "middle")
                    .attr("font-size", 14),
                &percent_label(tick),
            );
        }

        let ticks = self.mapper.ticks();
        for tick in &ticks {
            let x = self.px_x(tick.x as f64);
            doc.push(
                SvgTag::new("line")
                    .attr("x1", num(x))
                    .attr("y1", num(FREQUENCY_TOP))
                    .attr("x2", num(x))
                    .attr("y2", num(FREQUENCY_BOTTOM))
                    .attr("stroke", "#cccccc")
                    .attr("stroke-width", 0.5),
            );
            doc.push(
                SvgTag::new("line")
                    .attr("x1", num(x))
                    .attr("y1", num(FREQUENCY_BOTTOM))
                    .attr("x2", num(x))
                    .attr("y2", num(FREQUENCY_BOTTOM + 6.0))
                    .attr("stroke", "#000000"),
            );
            let label_y = FREQUENCY_BOTTOM + 9.0;
            doc.text(
                SvgTag::new("text")
                    .attr("class", "xtick")
                    .attr("x", num(x))
                    .attr("y", num(label_y))
                    .attr("transform", format!("rotate(-90 {} {})", num(x), num(label_y)))
                    .attr("text-anchor", "end")
                    .attr("dominant-baseline", "middle")
                    .attr("font-size", 9),
                &tick.label.to_string(),
            );
        }

        // Minor ticks at every coordinate in the domain
        let (first, last) = self.mapper.domain();
        let mut minor = String::new();
        for x in first..=last {
            let px = num(self.px_x(x as f64));
            minor.push_str(&format!("M{} {}v3", px, num(FREQUENCY_BOTTOM)));
        }
        doc.push(
            SvgTag::new("path")
                .attr("class", "minor-ticks")
                .attr("d", minor)
                .attr("stroke", "#000000")
                .attr("stroke-width", 0.5),
        );

        for boundary in self.mapper.boundaries() {
            let x = num(self.px_x(boundary as f64));
            doc.push(
                SvgTag::new("line")
                    .attr("class", "separator")
                    .attr("x1", &x)
                    .attr("y1", num(FREQUENCY_TOP))
                    .attr("x2", &x)
                    .attr("y2", num(FREQUENCY_BOTTOM))
                    .attr("stroke", "#000000")
                    .attr("stroke-width", 1),
            );
        }

        doc.push(
            SvgTag::new("rect")
                .attr("x", num(left))
                .attr("y", num(FREQUENCY_TOP))
                .attr("width", num(right - left))
                .attr("height", num(FREQUENCY_BOTTOM - FREQUENCY_TOP))
                .attr("fill", "none")
                .attr("stroke", "#000000"),
        );

        // Background amino-acid calls
        let mut skipped = 0usize;
        let mut highlighted = 0usize;
        doc.open_group(
            SvgTag::new("g")
                .attr("class", "calls")
                .attr("fill", "none")
                .attr("stroke", "#000000")
                .attr("stroke-opacity", "0.5"),
        );
        for call in &self.calls {
            if self.is_highlighted(call) {
                highlighted += 1;
                continue;
            }
            let percent = 100.0 * call.frequency;
            if !Self::plottable(percent) {
                skipped += 1;
                continue;
            }
            doc.push(
                SvgTag::new("circle")
                    .attr("cx", num(self.px_x(call.x as f64)))
                    .attr("cy", num(self.px_frequency(percent)))
                    .attr("r", 1.5),
            );
        }
        doc.close_group();
        tracing::debug!(
            "plotted {} amino-acid calls, {} below the frequency axis, {} highlighted",
            self.calls.len() - skipped - highlighted,
            skipped,
            highlighted
        );

        // Highlighted mutations: filled dot plus a hollow ring
        doc.open_group(SvgTag::new("g").attr("class", "mutations"));
        for (x, mutation) in &self.mutations {
            let percent = 100.0 * mutation.record.frequency;
            if !Self::plottable(percent) {
                tracing::warn!(
                    "{} {} frequency {} is outside the plotted range",
                    mutation.record.region,
                    mutation.record.position,
                    mutation.record.frequency
                );
                continue;
            }
            let cx = num(self.px_x(*x as f64));
            let cy = num(self.px_frequency(percent));
            let color = mutation.color.hex();
            doc.push(
                SvgTag::new("circle")
                    .attr("cx", &cx)
                    .attr("cy", &cy)
                    .attr("r", 2.5)
                    .attr("fill", color),
            );
            doc.push(
                SvgTag::new("circle")
                    .attr("cx", &cx)
                    .attr("cy", &cy)
                    .attr("r", 6)
                    .attr("fill", "none")
                    .attr("stroke", color)
                    .attr("stroke-width", 1),
            );
        }
        doc.close_group();

        axis_title(doc, "AA Frequency", (FREQUENCY_TOP + FREQUENCY_BOTTOM) / 2.0);
        doc.text(
            SvgTag::new("text")
                .attr("x", num((LEFT + WIDTH as f64 - RIGHT) / 2.0))
                .attr("y", HEIGHT - 8)
                .attr("text-anchor", "middle")
                .attr("font-size", 14),
            "AA Position",
        );
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        write_atomically(path, &self.render())?;
        tracing::info!(
            "wrote mutation plot {} ({} highlighted)",
            path.display(),
            self.mutations.len()
        );
        Ok(())
    }
}

fn axis_title(doc: &mut SvgDocument, title: &str, center_y: f64) {
    doc.text(
        SvgTag::new("text")
            .attr("x", 22)
            .attr("y", num(center_y))
            .attr("transform", format!("rotate(-90 22 {})", num(center_y)))
            .attr("text-anchor", "middle")
            .attr("font-size", 14),
        title,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify, Classification, Mode};
    use crate::types::{AminoAcidRow, MutationRecord};
    use std::collections::BTreeMap;

    fn table(mapper: &CoordinateMapper) -> MappedTable {
        let rows = vec![
            AminoAcidRow {
                hxb2: Some(2550),
                region: "RT".to_string(),
                position: 10,
                coverage: 1000,
                counts: BTreeMap::from([("K".to_string(), 900), ("N".to_string(), 100)]),
            },
            AminoAcidRow {
                hxb2: Some(2253),
                region: "PR".to_string(),
                position: 1,
                coverage: 50,
                counts: BTreeMap::from([("P".to_string(), 50), ("S".to_string(), 0)]),
            },
        ];
        MappedTable::new(rows, mapper).unwrap()
    }

    fn mutations() -> Vec<crate::classifier::ClassifiedMutation> {
        let records = vec![MutationRecord {
            region: "RT".to_string(),
            position: 10,
            variant: Some("N".to_string()),
            frequency: 0.1,
            coverage: Some(1000),
            ias: true,
            stanford: true,
            sdrm: false,
        }];
        match classify(&records, Mode::Drm) {
            Classification::Mutations(m) => m,
            Classification::NoMutations => panic!("expected mutations"),
        }
    }

    #[test]
    fn thousands_and_percent_labels() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        let labels: Vec<String> = FREQUENCY_TICKS.iter().map(|t| percent_label(*t)).collect();
        assert_eq!(labels, vec!["0.1%", "1%", "5%", "10%", "20%", "50%", "100%"]);
    }

    #[test]
    fn mutations_are_drawn_twice_in_their_color() {
        let mapper = CoordinateMapper::default();
        let table = table(&mapper);
        let mutations = mutations();
        let plot = MutationPlot::new(&mapper, &table, &mutations).unwrap();
        assert_eq!(plot.mutation_positions(), vec![110]);

        let svg = plot.render();
        assert_eq!(svg.matches("fill=\"#bf00bf\"").count(), 1);
        assert_eq!(svg.matches("stroke=\"#bf00bf\"").count(), 1);
        assert_eq!(svg.matches("class=\"separator\"").count(), 4);
        assert!(svg.contains(">Reverse Transcriptase</text>"));
        assert!(svg.contains(">1,000</text>"));
    }

    #[test]
    fn zero_frequency_calls_are_not_drawn() {
        let mapper = CoordinateMapper::default();
        let table = table(&mapper);
        let mutations = mutations();
        let plot = MutationPlot::new(&mapper, &table, &mutations).unwrap();
        let svg = plot.render();

        let calls = svg
            .split("<g class=\"calls\"")
            .nth(1)
            .and_then(|rest| rest.split("</g>").next())
            .unwrap();
        // K at RT 10 and P at PR 1; N is highlighted and S has zero reads.
        assert_eq!(calls.matches("<circle").count(), 2);
    }

    fn background_circles(svg: &str) -> usize {
        svg.split("<g class=\"calls\"")
            .nth(1)
            .and_then(|rest| rest.split("</g>").next())
            .map_or(0, |group| group.matches("<circle").count())
    }

    #[test]
    fn highlighted_variant_is_left_out_of_the_background() {
        let mapper = CoordinateMapper::default();
        let rows = vec![AminoAcidRow {
            hxb2: Some(2550),
            region: "RT".to_string(),
            position: 10,
            coverage: 1000,
            counts: BTreeMap::from([("K".to_string(), 900), ("N".to_string(), 100)]),
        }];
        let table = MappedTable::new(rows, &mapper).unwrap();
        let mutations = mutations();
        let plot = MutationPlot::new(&mapper, &table, &mutations).unwrap();
        let svg = plot.render();

        assert_eq!(background_circles(&svg), 1);
        assert_eq!(svg.matches("fill=\"#bf00bf\"").count(), 1);
    }

    #[test]
    fn mutation_without_variant_claims_the_whole_position() {
        let mapper = CoordinateMapper::default();
        let table = table(&mapper);
        let records = vec![MutationRecord {
            region: "RT".to_string(),
            position: 10,
            variant: None,
            frequency: 0.1,
            coverage: None,
            ias: true,
            stanford: false,
            sdrm: false,
        }];
        let mutations = match classify(&records, Mode::Drm) {
            Classification::Mutations(m) => m,
            Classification::NoMutations => panic!("expected mutations"),
        };
        let plot = MutationPlot::new(&mapper, &table, &mutations).unwrap();

        // Only P at PR 1 remains.
        assert_eq!(background_circles(&plot.render()), 1);
    }

    #[test]
    fn render_is_reproducible() {
        let mapper = CoordinateMapper::default();
        let table = table(&mapper);
        let mutations = mutations();
        let plot = MutationPlot::new(&mapper, &table, &mutations).unwrap();
        assert_eq!(plot.render(), plot.render());
    }

    #[test]
    fn unmappable_mutation_is_rejected() {
        let mapper = CoordinateMapper::default();
        let table = table(&mapper);
        let mut mutations = mutations();
        mutations[0].record.region = "gp41".to_string();
        assert!(MutationPlot::new(&mapper, &table, &mutations).is_err());
    }
}
