//! Share of each category in the average month.

use overview_finance::Proportion;
use std::f64::consts::PI;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path};

use super::{colour, label, no_data, title_case};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const CX: f64 = 320.0;
const CY: f64 = 260.0;
const RADIUS: f64 = 160.0;
/// Slice pulled out of the pie, as in the printed report
const EXPLODED: usize = 1;
const EXPLODE_BY: f64 = 0.2;

/// Point at `angle` degrees (counter-clockwise from 3 o'clock) and `r` from
/// the centre `(cx, cy)`.
fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    let rad = angle * PI / 180.0;
    (cx + r * rad.cos(), cy - r * rad.sin())
}

fn slice(cx: f64, cy: f64, from: f64, to: f64, fill: &str) -> Path {
    let start = polar(cx, cy, RADIUS, from);
    let end = polar(cx, cy, RADIUS, to);
    let large = if to - from > 180.0 { 1.0 } else { 0.0 };
    let data = Data::new()
        .move_to((cx, cy))
        .line_to(start)
        .elliptical_arc_to((RADIUS, RADIUS, 0.0, large, 0.0, end.0, end.1))
        .close();
    Path::new()
        .set("fill", fill)
        .set("stroke", "black")
        .set("stroke-width", 1)
        .set("d", data)
}

/// Pie of the averages, starting at 12 o'clock and turning counter-clockwise.
/// Slices with a zero average are left out.
pub fn pie_chart(proportions: &[Proportion]) -> Document {
    let doc = Document::new().set("viewBox", (0.0, 0.0, WIDTH, HEIGHT)).add(
        label(WIDTH / 2.0, 30.0, "Proportion in spending")
            .set("text-anchor", "middle")
            .set("font-size", 20)
            .set("font-weight", "bold"),
    );

    let total: i64 = proportions.iter().map(|p| p.average.max(0)).sum();
    if total <= 0 {
        return doc.add(no_data(CX, CY));
    }

    let mut slices = Group::new();
    let mut labels = Group::new().set("font-size", 14).set("text-anchor", "middle");
    let mut angle = 90.0;

    for (i, p) in proportions.iter().enumerate() {
        if p.average <= 0 {
            continue;
        }
        let share = p.average as f64 / total as f64;
        let sweep = share * 360.0;
        let mid = angle + sweep / 2.0;
        let (cx, cy) = if i == EXPLODED && share < 1.0 {
            polar(CX, CY, RADIUS * EXPLODE_BY, mid)
        } else {
            (CX, CY)
        };

        slices = if share >= 1.0 {
            slices.add(
                Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", RADIUS)
                    .set("fill", colour(i))
                    .set("stroke", "black")
                    .set("stroke-width", 1),
            )
        } else {
            slices.add(slice(cx, cy, angle, angle + sweep, colour(i)))
        };

        let (nx, ny) = polar(cx, cy, RADIUS * 1.15, mid);
        let (px, py) = polar(cx, cy, RADIUS * 0.6, mid);
        labels = labels
            .add(label(nx, ny, title_case(&p.name)))
            .add(label(px, py, format!("{:.1}%", share * 100.0)).set("font-weight", "bold"));

        angle += sweep;
    }

    doc.add(slices).add(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proportion(name: &str, average: i64) -> Proportion {
        Proportion {
            name: name.to_string(),
            average,
        }
    }

    #[test]
    fn test_polar_starts_at_twelve() {
        let (x, y) = polar(0.0, 0.0, 10.0, 90.0);
        assert!(x.abs() < 1e-9);
        assert!((y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages() {
        let doc = pie_chart(&[
            proportion("bills", 1500),
            proportion("groceries", 300),
            proportion("coffee", 200),
        ])
        .to_string();
        assert!(doc.contains("75.0%"));
        assert!(doc.contains("15.0%"));
        assert!(doc.contains("10.0%"));
        assert!(doc.contains("Groceries"));
        assert_eq!(doc.matches("<path").count(), 3);
    }

    #[test]
    fn test_zero_slices_are_skipped() {
        let doc = pie_chart(&[proportion("bills", 0), proportion("bar", 40)]).to_string();
        assert!(!doc.contains("Bills"));
        assert!(doc.contains("100.0%"));
        assert!(doc.contains("<circle"));
    }

    #[test]
    fn test_nothing_to_share_is_placeholder() {
        let doc = pie_chart(&[proportion("bills", 0)]).to_string();
        assert!(doc.contains("NO DATA"));
        assert!(pie_chart(&[]).to_string().contains("NO DATA"));
    }
}
