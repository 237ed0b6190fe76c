//! Standalone SVG chart files.
//!
//! Every chart lands in `<output_dir>/<name>.svg`. The directory is created
//! on first write.

pub mod bar_chart;
pub mod line_chart;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::domain::error::TraderError;
use crate::domain::metrics::PerformanceRecord;
use crate::ports::chart_port::{ChartPort, ChartSeries};

pub(crate) const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub struct SvgChartAdapter {
    output_dir: PathBuf,
}

impl SvgChartAdapter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn chart_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.svg", name))
    }

    fn write(&self, name: &str, svg: &str) -> Result<(), TraderError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.chart_path(name);
        fs::write(&path, svg)?;
        info!(path = %path.display(), "chart written");
        Ok(())
    }
}

impl ChartPort for SvgChartAdapter {
    fn plot_portfolio_values(
        &self,
        name: &str,
        title: &str,
        series: &[ChartSeries],
    ) -> Result<(), TraderError> {
        let svg = line_chart::render_line_chart(title, series).ok_or_else(|| {
            TraderError::Chart {
                reason: format!("no finite values to plot for '{}'", title),
            }
        })?;
        self.write(name, &svg)
    }

    fn plot_metrics(
        &self,
        name: &str,
        records: &BTreeMap<String, PerformanceRecord>,
    ) -> Result<(), TraderError> {
        let svg = bar_chart::render_metrics_chart(records).ok_or_else(|| TraderError::Chart {
            reason: "no performance records to plot".into(),
        })?;
        self.write(name, &svg)
    }
}
