use super::{InputFile, ReportInputs};
use crate::plots::PlotOutcome;
use std::fmt::Write as _;
use std::path::Path;

pub const NONE_FOUND: &str = "None found.";
pub const PLOT_DIRECTIVE: &str = r"\includesvg";

const PREAMBLE: &str = r"\documentclass[11pt]{article}
\usepackage[letterpaper, margin=1in]{geometry}
\usepackage[T1]{fontenc}
\usepackage{helvet}
\usepackage{graphicx}
\usepackage{svg}
\renewcommand*\familydefault{\sfdefault}
\begin{document}
";

fn include_plot(path: &Path) -> String {
    format!(r"{}[width=6.5in]{{{}}}", PLOT_DIRECTIVE, path.display())
}

fn plot_or_placeholder(outcome: &PlotOutcome) -> String {
    match outcome {
        PlotOutcome::Written(path) => include_plot(path),
        PlotOutcome::NoMutations => NONE_FOUND.to_string(),
    }
}

fn input_rows(out: &mut String, label: &str, file: &InputFile) {
    let _ = writeln!(out, r"\bf {} & \texttt{{\detokenize{{{}}}}} \\", label, file.path.display());
    let _ = writeln!(out, r"Size & {:.1} MB \\", file.size_mb());
    let _ = writeln!(out, r"Last modified & {} \\", file.modified_display());
    out.push_str("\\hline\n");
}

/// LaTeX source of the run report.
pub fn render_source(inputs: &ReportInputs) -> String {
    let mut tex = String::from(PREAMBLE);

    tex.push_str("\\subsection*{Input files}\n");
    tex.push_str("\\begin{tabular}{ll}\n\\hline\n");
    input_rows(&mut tex, "FASTQ1", &inputs.fastq1);
    input_rows(&mut tex, "FASTQ2", &inputs.fastq2);
    tex.push_str("\\end{tabular}\n");

    tex.push_str("\\subsection*{Coverage}\n");
    tex.push_str(&include_plot(&inputs.coverage_plot));
    tex.push('\n');

    tex.push_str("\\subsection*{DRMs}\n");
    tex.push_str(&plot_or_placeholder(&inputs.drm_plot));
    tex.push('\n');

    tex.push_str("\\subsection*{SDRMs}\n");
    tex.push_str(&plot_or_placeholder(&inputs.sdrm_plot));
    tex.push('\n');

    tex.push_str("\\end{document}\n");
    tex
}
