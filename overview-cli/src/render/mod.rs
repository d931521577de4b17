//! SVG charts and the printable HTML document that holds them.
//!
//! Each page is a `<section>` with a CSS page break after it, so printing the
//! file gives one page per chart group.

mod bar;
mod pie;

use overview_finance::Report;
use std::fmt::Write;
use svg::node::element::Text;

pub use bar::{bar_chart, stacked_chart};
pub use pie::pie_chart;

pub const COLOURS: [&str; 7] = [
    "#5DADE2", // blue
    "#F5B041", // orange
    "#58D68D", // green
    "#EC7063", // red
    "#BB8FCE", // purple
    "#808B96", // grey
    "#F7DC6F", // yellow
];

const STYLE: &str = "\
body { font-family: sans-serif; margin: 0; color: #222; }
section.page { padding: 16px; page-break-after: always; break-after: page; }
section.page:last-child { page-break-after: auto; break-after: auto; }
h1 { font-size: 20px; margin: 0 0 12px 0; }
.grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; }
svg { width: 100%; height: auto; }
";

pub fn colour(index: usize) -> &'static str {
    COLOURS[index % COLOURS.len()]
}

/// "transport misc" -> "Transport Misc"
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text node at `(x, y)`.
pub(crate) fn label(x: f64, y: f64, content: impl Into<String>) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .add(svg::node::Text::new(content))
}

pub(crate) fn no_data(x: f64, y: f64) -> Text {
    label(x, y, "NO DATA")
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("fill", "red")
        .set("font-size", 48)
}

fn page(out: &mut String, title: &str, grid: bool, charts: &[String]) {
    let _ = writeln!(out, "<section class=\"page\">");
    let _ = writeln!(out, "<h1>{title}</h1>");
    if grid {
        out.push_str("<div class=\"grid\">\n");
    }
    for chart in charts {
        out.push_str(chart);
        out.push('\n');
    }
    if grid {
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
}

/// Render every page of `report` into one HTML document.
pub fn render_document(report: &Report) -> String {
    let categories: Vec<String> = report
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| bar_chart(c, colour(i)).to_string())
        .collect();
    let stacked = stacked_chart(&report.stacked, &report.total).to_string();
    let pie = pie_chart(&report.proportions).to_string();
    let transport: Vec<String> = report
        .transport
        .iter()
        .enumerate()
        .map(|(i, c)| bar_chart(c, colour(i)).to_string())
        .collect();

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>Spending overview, {}</title>", report.current_month.label());
    let _ = writeln!(out, "<style>\n{STYLE}</style>");
    out.push_str("</head>\n<body>\n");

    page(&mut out, "Monthly spending by category", true, &categories);
    page(&mut out, "Month by month spending", false, &[stacked]);
    page(&mut out, "Proportion in spending", false, &[pie]);
    page(&mut out, "Transport", true, &transport);

    out.push_str("</body>\n</html>\n");
    out
}
