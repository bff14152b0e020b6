//! Chart rendering for calendar heat maps

mod colors;
mod heatmap;

pub use heatmap::render_heatmap;

use crate::calendar::{CellColor, DAYS_PER_WEEK, Heatmap, Mode};
use crate::config::OutputFormat;
use crate::provider::Provider;

/// Pixel size of one day cell (2x for Retina quality)
pub(super) const CELL_SIZE: u32 = 40;

/// Margins around the cell grid
pub(super) const MARGIN_LEFT: u32 = 160;
pub(super) const MARGIN_RIGHT: u32 = 80;
pub(super) const MARGIN_TOP: u32 = 220;
pub(super) const MARGIN_BOTTOM: u32 = 180;

/// Weekday labels, top (Monday) to bottom
pub(super) const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["", "Tue", "", "Thu", "", "Sat", ""];

/// One colored layer of the chart: every cell drawn with `color`
pub struct CellSeries {
    pub name: String,
    pub color: &'static str,
    /// `[week, row]` pairs
    pub cells: Vec<[usize; 2]>,
}

/// Data for a single heat map image
pub struct HeatmapChartData {
    pub title: String,
    pub subtitle: String,
    pub weeks: usize,
    /// X-axis labels, one per week column; empty where nothing is shown
    pub week_labels: Vec<String>,
    pub series: Vec<CellSeries>,
}

/// Image size for a grid of `weeks` columns
pub(super) fn chart_size(weeks: usize) -> (u32, u32) {
    let width = MARGIN_LEFT + MARGIN_RIGHT + CELL_SIZE * weeks as u32;
    let height = MARGIN_TOP + MARGIN_BOTTOM + CELL_SIZE * DAYS_PER_WEEK as u32;
    (width, height)
}

/// Month abbreviations at their week columns, optionally with the year under its marker
pub fn week_labels(heatmap: &Heatmap, show_year: bool) -> Vec<String> {
    let mut labels = vec![String::new(); heatmap.graph.weeks];
    for marker in &heatmap.months {
        if let Some(label) = labels.get_mut(marker.week()) {
            *label = marker.abbr().to_string();
        }
    }
    if show_year && let Some(label) = labels.get_mut(heatmap.year.week) {
        label.push('\n');
        label.push_str(&heatmap.year.year.to_string());
    }
    labels
}

/// Group cells by color class, one series per legend entry
pub fn chart_data(heatmap: &Heatmap, provider: &Provider, mode: Mode, summary: &str) -> HeatmapChartData {
    let colors = &heatmap.colors;
    let weeks = heatmap.graph.weeks;

    let mut classes = vec![CellColor::Zero];
    classes.extend((0..colors.scale.len()).map(CellColor::Scale));
    classes.push(CellColor::NoData);

    let series = classes
        .into_iter()
        .filter_map(|class| {
            let color = colors.color_of(class)?;
            let cells: Vec<[usize; 2]> = colors
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == class)
                .map(|(i, _)| [i % weeks, i / weeks])
                .collect();
            let name = match class {
                CellColor::NoData => "No data".to_string(),
                CellColor::Zero => provider.label(0.0),
                CellColor::Scale(i) => format!("≥ {}", provider.label(colors.scale_floor(i))),
                CellColor::Blank => return None,
            };
            Some(CellSeries { name, color, cells })
        })
        .collect();

    let subtitle = match mode.year() {
        Some(year) => format!("{}: {}", year, summary),
        None => summary.to_string(),
    };

    HeatmapChartData {
        title: provider.name.to_string(),
        subtitle,
        weeks,
        week_labels: week_labels(heatmap, mode == Mode::TillNow),
        series,
    }
}

/// Render `heatmap` to `output_path` in the requested format
pub fn render(
    heatmap: &Heatmap,
    provider: &Provider,
    mode: Mode,
    summary: &str,
    format: OutputFormat,
    output_path: &str,
) -> Result<(), String> {
    let data = chart_data(heatmap, provider, mode, summary);
    render_heatmap(&data, format, output_path)
}
