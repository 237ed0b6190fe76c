//! Three-panel metrics bar chart: one panel per metric, one bar per ticker.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::{escape, PALETTE};
use crate::domain::metrics::PerformanceRecord;

const PANEL_WIDTH: f64 = 300.0;
const HEIGHT: f64 = 360.0;
const PADDING: f64 = 40.0;

type Metric = (&'static str, fn(&PerformanceRecord) -> f64);

fn annualized_return(r: &PerformanceRecord) -> f64 {
    r.annualized_return
}

fn sharpe_ratio(r: &PerformanceRecord) -> f64 {
    r.sharpe_ratio
}

fn max_drawdown(r: &PerformanceRecord) -> f64 {
    r.max_drawdown
}

const METRICS: [Metric; 3] = [
    ("Annualized Return", annualized_return),
    ("Sharpe Ratio", sharpe_ratio),
    ("Max Drawdown", max_drawdown),
];

fn render_panel(svg: &mut String, offset: f64, label: &str, values: &[(&str, f64)]) {
    let plot_width = PANEL_WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let finite = values.iter().map(|(_, v)| *v).filter(|v| v.is_finite());
    let lo = finite.clone().fold(0.0, f64::min);
    let hi = finite.fold(0.0, f64::max);
    let range = if hi > lo { hi - lo } else { 1.0 };
    let y = |v: f64| HEIGHT - PADDING - (v - lo) / range * plot_height;
    let zero = y(0.0);

    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="13">{}</text>"#,
        offset + PANEL_WIDTH / 2.0,
        PADDING / 2.0,
        escape(label)
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{:.1}" y1="{zero:.1}" x2="{:.1}" y2="{zero:.1}" stroke="black"/>"#,
        offset + PADDING,
        offset + PANEL_WIDTH - PADDING
    );

    let slot = plot_width / values.len().max(1) as f64;
    for (i, (ticker, value)) in values.iter().enumerate() {
        let x = offset + PADDING + i as f64 * slot + slot * 0.15;
        let bar_width = slot * 0.7;

        if value.is_finite() {
            let top = y(value.max(0.0));
            let height = (y(value.min(0.0)) - top).abs();
            let _ = writeln!(
                svg,
                r#"<rect x="{x:.1}" y="{top:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{}"/>"#,
                PALETTE[i % PALETTE.len()]
            );
        }

        let shown = if value.is_finite() {
            format!("{:.2}", value)
        } else {
            "n/a".to_string()
        };
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="9">{shown}</text>"#,
            x + bar_width / 2.0,
            zero - 3.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="10">{}</text>"#,
            x + bar_width / 2.0,
            HEIGHT - PADDING / 2.0,
            escape(ticker)
        );
    }
}

/// Returns `None` when there is nothing to plot.
pub fn render_metrics_chart(records: &BTreeMap<String, PerformanceRecord>) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let width = PANEL_WIDTH * METRICS.len() as f64;
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{HEIGHT:.0}" viewBox="0 0 {width:.0} {HEIGHT:.0}">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

    for (panel, (label, metric)) in METRICS.iter().enumerate() {
        let values: Vec<(&str, f64)> = records
            .iter()
            .map(|(ticker, record)| (ticker.as_str(), metric(record)))
            .collect();
        render_panel(&mut svg, panel as f64 * PANEL_WIDTH, label, &values);
    }

    svg.push_str("</svg>\n");
    Some(svg)
}
