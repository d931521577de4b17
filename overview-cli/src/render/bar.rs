//! Monthly bar charts with the rolling and all-time average overlays.

use chrono::{Datelike, NaiveDate};
use overview_core::{MonthlySeries, YearMonth};
use overview_finance::{CategoryChart, RollingWindow};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Line, Path, Rectangle};

use super::{colour, label, no_data, title_case};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const LEFT: f64 = 60.0;
const RIGHT: f64 = 16.0;
const TOP: f64 = 44.0;
const BOTTOM: f64 = 72.0;
const Y_TICKS: f64 = 5.0;
const MAX_MONTH_LABELS: usize = 18;

/// Month axis and value scale of one chart.
struct Frame {
    months: Vec<YearMonth>,
    y_max: f64,
}

impl Frame {
    fn plot_width() -> f64 {
        WIDTH - LEFT - RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - TOP - BOTTOM
    }

    fn slot(&self) -> f64 {
        Self::plot_width() / self.months.len().max(1) as f64
    }

    fn index_of(&self, month: YearMonth) -> Option<usize> {
        self.months.binary_search(&month).ok()
    }

    fn x_month(&self, index: usize) -> f64 {
        LEFT + index as f64 * self.slot()
    }

    /// Position of `date` on the month axis, clamped to the plot.
    fn x_date(&self, date: NaiveDate) -> f64 {
        let Some(first) = self.months.first() else {
            return LEFT;
        };
        let month = YearMonth::of(date);
        let offset = (month.year() - first.year()) * 12 + month.month() as i32 - first.month() as i32;
        let days = month.last_day().day() as f64;
        let pos = offset as f64 + f64::from(date.day() - 1) / days;
        LEFT + pos.clamp(0.0, self.months.len() as f64) * self.slot()
    }

    fn y(&self, value: f64) -> f64 {
        TOP + Self::plot_height() * (1.0 - value / self.y_max)
    }
}

/// Round tick spacing (1, 2 or 5 times a power of ten).
fn tick_step(max: f64) -> f64 {
    let raw = max / Y_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude)
}

fn axes() -> Group {
    Group::new()
        .set("stroke", "black")
        .set("stroke-width", 1)
        .add(
            Line::new()
                .set("x1", LEFT)
                .set("y1", TOP)
                .set("x2", LEFT)
                .set("y2", HEIGHT - BOTTOM),
        )
        .add(
            Line::new()
                .set("x1", LEFT)
                .set("y1", HEIGHT - BOTTOM)
                .set("x2", WIDTH - RIGHT)
                .set("y2", HEIGHT - BOTTOM),
        )
}

fn y_ticks(frame: &Frame) -> Group {
    let step = tick_step(frame.y_max);
    let mut group = Group::new().set("font-size", 11);
    let mut k = 0.0;
    while k * step <= frame.y_max {
        let value = k * step;
        let text = if step >= 1.0 { format!("{value:.0}") } else { format!("{value:.1}") };
        let y = frame.y(value);
        group = group
            .add(
                Line::new()
                    .set("x1", LEFT)
                    .set("y1", y)
                    .set("x2", WIDTH - RIGHT)
                    .set("y2", y)
                    .set("stroke", "#DDDDDD")
                    .set("stroke-width", 1),
            )
            .add(label(LEFT - 6.0, y + 4.0, text).set("text-anchor", "end"));
        k += 1.0;
    }
    group.add(
        label(14.0, TOP + Frame::plot_height() / 2.0, "Spending ($)")
            .set("text-anchor", "middle")
            .set("transform", format!("rotate(-90 14 {})", TOP + Frame::plot_height() / 2.0)),
    )
}

fn month_labels(frame: &Frame) -> Group {
    let n = frame.months.len();
    let step = n.div_ceil(MAX_MONTH_LABELS).max(1);
    let mut group = Group::new().set("font-size", 11).set("text-anchor", "end");
    for i in (0..n).step_by(step) {
        let x = frame.x_month(i) + frame.slot() / 2.0;
        let y = HEIGHT - BOTTOM + 14.0;
        group = group.add(
            label(x, y, frame.months[i].label()).set("transform", format!("rotate(-45 {x} {y})")),
        );
    }
    group
}

/// Stacked rectangles, bottom layer first, with the month total on top.
fn bars(frame: &Frame, layers: &[(&MonthlySeries, &str)], totals: &[f64]) -> Group {
    let slot = frame.slot();
    let mut bottoms = vec![0.0; frame.months.len()];
    let mut group = Group::new();

    for (series, fill) in layers {
        for p in series.points() {
            let Some(i) = frame.index_of(p.month) else {
                continue;
            };
            if p.amount <= 0.0 {
                continue;
            }
            let top = frame.y(bottoms[i] + p.amount);
            let base = frame.y(bottoms[i]);
            group = group.add(
                Rectangle::new()
                    .set("x", frame.x_month(i) + slot * 0.1)
                    .set("y", top)
                    .set("width", slot * 0.8)
                    .set("height", base - top)
                    .set("fill", *fill),
            );
            bottoms[i] += p.amount;
        }
    }

    let mut values = Group::new().set("font-size", 10).set("text-anchor", "middle");
    for (i, total) in totals.iter().enumerate() {
        if *total > 0.0 {
            let x = frame.x_month(i) + slot / 2.0;
            values = values.add(label(x, frame.y(*total) - 3.0, format!("{}", total.trunc() as i64)));
        }
    }
    group.add(values)
}

fn average_line(frame: &Frame, average: i64) -> Group {
    let y = frame.y(average as f64);
    Group::new()
        .add(
            Line::new()
                .set("x1", LEFT)
                .set("y1", y)
                .set("x2", WIDTH - RIGHT)
                .set("y2", y)
                .set("stroke", "blue")
                .set("stroke-width", 1)
                .set("stroke-dasharray", "6 4"),
        )
        .add(label(LEFT + 4.0, y - 4.0, format!("{average}")).set("fill", "blue").set("font-size", 11))
}

/// Stepped line through (end, avg), (start, avg) of every window, newest first.
fn rolling_line(frame: &Frame, rolling: &[RollingWindow]) -> Group {
    let points: Vec<(f64, f64)> = rolling
        .iter()
        .flat_map(|w| {
            let y = frame.y(w.average as f64);
            [(frame.x_date(w.end), y), (frame.x_date(w.start), y)]
        })
        .collect();

    let mut group = Group::new().set("fill", "red");
    let Some((first, rest)) = points.split_first() else {
        return group;
    };

    let mut data = Data::new().move_to(*first);
    for p in rest {
        data = data.line_to(*p);
    }
    group = group.add(
        Path::new()
            .set("fill", "none")
            .set("stroke", "red")
            .set("stroke-width", 1.5)
            .set("d", data),
    );

    for (i, (x, y)) in points.iter().enumerate() {
        group = group.add(Circle::new().set("cx", *x).set("cy", *y).set("r", 3));
        // one annotation per window, at its older end
        if i % 2 == 1 {
            let avg = rolling[i / 2].average;
            group = group.add(
                label(x - 4.0, y - 4.0, format!("{avg}"))
                    .set("text-anchor", "end")
                    .set("font-size", 11),
            );
        }
    }
    group
}

fn legend(layers: &[(&MonthlySeries, &str)]) -> Group {
    let x = WIDTH - RIGHT - 120.0;
    let mut group = Group::new().set("font-size", 11);
    for (k, (series, fill)) in layers.iter().enumerate() {
        let y = TOP + 4.0 + 15.0 * k as f64;
        group = group
            .add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", 10)
                    .set("height", 10)
                    .set("fill", *fill),
            )
            .add(label(x + 15.0, y + 9.0, title_case(series.name())));
    }
    group
}

fn draw(title: &str, layers: &[(&MonthlySeries, &str)], overlay: &CategoryChart, with_legend: bool) -> Document {
    let doc = Document::new().set("viewBox", (0.0, 0.0, WIDTH, HEIGHT)).add(
        label(WIDTH / 2.0, 26.0, title)
            .set("text-anchor", "middle")
            .set("font-size", 20)
            .set("font-weight", "bold"),
    );

    if !overlay.has_data() {
        return doc
            .add(axes())
            .add(no_data(LEFT + Frame::plot_width() / 2.0, TOP + Frame::plot_height() / 2.0));
    }

    let months: Vec<YearMonth> = overlay.series.points().iter().map(|p| p.month).collect();
    let totals: Vec<f64> = overlay.series.points().iter().map(|p| p.amount).collect();
    let highest = overlay
        .rolling
        .iter()
        .map(|w| w.average as f64)
        .chain(std::iter::once(overlay.average as f64))
        .fold(overlay.series.max_amount(), f64::max);
    let frame = Frame {
        months,
        y_max: (highest * 1.15).max(1.0),
    };

    let mut doc = doc
        .add(y_ticks(&frame))
        .add(bars(&frame, layers, &totals))
        .add(axes())
        .add(month_labels(&frame));

    if overlay.average > 0 {
        doc = doc.add(average_line(&frame, overlay.average));
    }
    doc = doc.add(rolling_line(&frame, &overlay.rolling));
    if with_legend {
        doc = doc.add(legend(layers));
    }
    doc
}

/// One category: its monthly bars, rolling overlay and all-time average.
pub fn bar_chart(chart: &CategoryChart, fill: &str) -> Document {
    draw(&title_case(chart.name()), &[(&chart.series, fill)], chart, false)
}

/// Every non-empty layer stacked per month; overlays come from `total`.
pub fn stacked_chart(layers: &[MonthlySeries], total: &CategoryChart) -> Document {
    let layers: Vec<(&MonthlySeries, &str)> = layers
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_empty())
        .map(|(i, s)| (s, colour(i)))
        .collect();
    draw("Month by month spending", &layers, total, true)
}
