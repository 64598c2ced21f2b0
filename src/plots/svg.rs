use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A single SVG element. Attributes render in insertion order so identical
/// inputs produce identical bytes.
pub(crate) struct SvgTag {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
}

impl SvgTag {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    pub(crate) fn render(&self, self_closing: bool) -> String {
        let attrs: String = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_xml(v)))
            .collect::<Vec<_>>()
            .join(" ");

        if self_closing {
            format!("<{} {}/>", self.name, attrs)
        } else {
            format!("<{} {}>", self.name, attrs)
        }
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Fixed two-decimal formatting with trailing zeros stripped.
pub(crate) fn num(value: f64) -> String {
    let mut s = format!("{:.2}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Accumulates elements into a standalone SVG document.
pub(crate) struct SvgDocument {
    body: String,
    width: u32,
    height: u32,
}

impl SvgDocument {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            body: String::new(),
            width,
            height,
        }
    }

    pub(crate) fn push(&mut self, tag: SvgTag) {
        self.body.push_str(&tag.render(true));
        self.body.push('\n');
    }

    pub(crate) fn text(&mut self, tag: SvgTag, content: &str) {
        let _ = writeln!(self.body, "{}{}</text>", tag.render(false), escape_xml(content));
    }

    pub(crate) fn open_group(&mut self, tag: SvgTag) {
        self.body.push_str(&tag.render(false));
        self.body.push('\n');
    }

    pub(crate) fn close_group(&mut self) {
        self.body.push_str("</g>\n");
    }

    pub(crate) fn finish(self) -> String {
        let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        svg.push_str(
            &SvgTag::new("svg")
                .attr("xmlns", "http://www.w3.org/2000/svg")
                .attr("width", self.width)
                .attr("height", self.height)
                .attr("viewBox", format!("0 0 {} {}", self.width, self.height))
                .attr("font-family", "Helvetica, Arial, sans-serif")
                .render(false),
        );
        svg.push('\n');
        svg.push_str(
            &SvgTag::new("rect")
                .attr("width", self.width)
                .attr("height", self.height)
                .attr("fill", "#ffffff")
                .render(true),
        );
        svg.push('\n');
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

/// Writes `content` next to `path` and renames it into place, so a failed
/// write never leaves a truncated plot behind.
pub(crate) fn write_atomically(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp_file = tempfile::Builder::new()
        .prefix(".plot")
        .suffix(".svg")
        .tempfile_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    persist(temp_file, path)
}

fn persist(temp_file: NamedTempFile, path: &Path) -> std::io::Result<()> {
    temp_file.persist(path).map(|_| ()).map_err(|e| e.error)
}
