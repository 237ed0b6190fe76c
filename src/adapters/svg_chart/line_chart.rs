//! Multi-series value-over-time chart.

use std::fmt::Write;

use chrono::NaiveDate;

use super::{escape, PALETTE};
use crate::ports::chart_port::{ChartSeries, LineStyle};

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 450.0;
const PADDING: f64 = 60.0;
const LEGEND_ROW: f64 = 18.0;

struct Bounds {
    first_date: NaiveDate,
    span_days: f64,
    min_value: f64,
    max_value: f64,
}

impl Bounds {
    /// Date span and value range over every finite point of every series.
    fn of(series: &[ChartSeries]) -> Option<Bounds> {
        let points = series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|p| p.equity.is_finite());

        let mut bounds: Option<(NaiveDate, NaiveDate, f64, f64)> = None;
        for p in points {
            bounds = Some(match bounds {
                None => (p.date, p.date, p.equity, p.equity),
                Some((lo, hi, min, max)) => (
                    lo.min(p.date),
                    hi.max(p.date),
                    min.min(p.equity),
                    max.max(p.equity),
                ),
            });
        }

        bounds.map(|(first, last, min_value, max_value)| Bounds {
            first_date: first,
            span_days: (last - first).num_days() as f64,
            min_value,
            max_value,
        })
    }

    fn x(&self, date: NaiveDate) -> f64 {
        let plot_width = WIDTH - 2.0 * PADDING;
        if self.span_days > 0.0 {
            PADDING + (date - self.first_date).num_days() as f64 / self.span_days * plot_width
        } else {
            PADDING
        }
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - 2.0 * PADDING;
        let range = self.max_value - self.min_value;
        let scale = if range > 0.0 { plot_height / range } else { 1.0 };
        HEIGHT - PADDING - (value - self.min_value) * scale
    }
}

/// Renders every series on shared axes. Returns `None` when no series holds a
/// finite point.
pub fn render_line_chart(title: &str, series: &[ChartSeries]) -> Option<String> {
    let bounds = Bounds::of(series)?;
    let bottom = HEIGHT - PADDING;
    let right = WIDTH - PADDING;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{HEIGHT:.0}" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
        WIDTH / 2.0,
        PADDING / 2.0,
        escape(title)
    );

    // axes
    let _ = writeln!(
        svg,
        r#"<line x1="{PADDING:.1}" y1="{PADDING:.1}" x2="{PADDING:.1}" y2="{bottom:.1}" stroke="black"/>"#
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{PADDING:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="black"/>"#
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="10">{:.0}</text>"#,
        PADDING - 4.0,
        bounds.y(bounds.max_value) + 4.0,
        bounds.max_value
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="10">{:.0}</text>"#,
        PADDING - 4.0,
        bottom + 4.0,
        bounds.min_value
    );
    let last_date = bounds.first_date + chrono::Duration::days(bounds.span_days as i64);
    let _ = writeln!(
        svg,
        r#"<text x="{PADDING:.1}" y="{:.1}" font-family="sans-serif" font-size="10">{}</text>"#,
        bottom + 16.0,
        bounds.first_date
    );
    let _ = writeln!(
        svg,
        r#"<text x="{right:.1}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="10">{}</text>"#,
        bottom + 16.0,
        last_date
    );

    for (i, s) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let dash = match s.style {
            LineStyle::Solid => "",
            LineStyle::Dashed => r#" stroke-dasharray="6,4""#,
        };

        let points: Vec<String> = s
            .points
            .iter()
            .filter(|p| p.equity.is_finite())
            .map(|p| format!("{:.1},{:.1}", bounds.x(p.date), bounds.y(p.equity)))
            .collect();

        if !points.is_empty() {
            let _ = writeln!(
                svg,
                r#"<polyline fill="none" stroke="{color}" stroke-width="1.5"{dash} points="{}"/>"#,
                points.join(" ")
            );
        }

        let legend_y = PADDING + 10.0 + i as f64 * LEGEND_ROW;
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{legend_y:.1}" x2="{:.1}" y2="{legend_y:.1}" stroke="{color}" stroke-width="2"{dash}/>"#,
            PADDING + 10.0,
            PADDING + 34.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="11">{}</text>"#,
            PADDING + 40.0,
            legend_y + 4.0,
            escape(&s.label)
        );
    }

    svg.push_str("</svg>\n");
    Some(svg)
}
