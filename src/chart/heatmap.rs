//! Calendar heat map rendering (one rect scatter series per color)

use charming::{
    Chart, ImageRenderer,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisLine, AxisType, Color, ItemStyle, SplitLine, Symbol, TextStyle},
    renderer::ImageFormat,
    series::Scatter,
};

use super::colors::{COLOR_BACKGROUND, COLOR_CELL_BORDER, COLOR_SUBTEXT, COLOR_TEXT};
use super::{
    CELL_SIZE, HeatmapChartData, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP,
    WEEKDAY_LABELS, chart_size,
};
use crate::calendar::DAYS_PER_WEEK;
use crate::config::OutputFormat;

/// Gap between neighbouring cells
const CELL_GAP: u32 = 6;

/// Render a heat map chart to a PNG or SVG file
pub fn render_heatmap(
    data: &HeatmapChartData,
    format: OutputFormat,
    output_path: &str,
) -> Result<(), String> {
    if data.weeks == 0 {
        return Err("No weeks to render".to_string());
    }

    // Category rows run bottom-up
    let weekday_labels: Vec<String> = WEEKDAY_LABELS.iter().rev().map(|d| d.to_string()).collect();

    let left = MARGIN_LEFT.to_string();
    let right = MARGIN_RIGHT.to_string();
    let top = MARGIN_TOP.to_string();
    let bottom = MARGIN_BOTTOM.to_string();

    let legend_data: Vec<(String, String)> = data
        .series
        .iter()
        .map(|s| (s.name.clone(), "rect".to_string()))
        .collect();

    let mut chart = Chart::new()
        .background_color(Color::Value(COLOR_BACKGROUND.to_string()))
        .title(
            Title::new()
                .text(data.title.clone())
                .subtext(data.subtitle.clone())
                .left(left.as_str())
                .top("3%")
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(40))
                .subtext_style(TextStyle::new().color(COLOR_SUBTEXT).font_size(28)),
        )
        .legend(
            Legend::new()
                .data(legend_data)
                .bottom("4%")
                .right(right.as_str())
                .item_gap(24)
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(22)),
        )
        .grid(
            Grid::new()
                .left(left.as_str())
                .right(right.as_str())
                .top(top.as_str())
                .bottom(bottom.as_str()),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(data.week_labels.clone())
                .axis_line(AxisLine::new().show(false))
                .split_line(SplitLine::new().show(false))
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(24)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(weekday_labels)
                .axis_line(AxisLine::new().show(false))
                .split_line(SplitLine::new().show(false))
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(24)),
        );

    let top_row = (DAYS_PER_WEEK - 1) as f64;
    for series in &data.series {
        let points: Vec<Vec<f64>> = series
            .cells
            .iter()
            .map(|[week, row]| vec![*week as f64, top_row - *row as f64])
            .collect();

        chart = chart.series(
            Scatter::new()
                .name(series.name.clone())
                .symbol(Symbol::Rect)
                .symbol_size(f64::from(CELL_SIZE - CELL_GAP))
                .data(points)
                .item_style(ItemStyle::new().color(series.color).border_color(COLOR_CELL_BORDER)),
        );
    }

    let (width, height) = chart_size(data.weeks);
    let mut renderer = ImageRenderer::new(width, height);
    match format {
        OutputFormat::Png => renderer.save_format(ImageFormat::Png, &chart, output_path),
        OutputFormat::Svg => renderer.save(&chart, output_path),
    }
    .map_err(|e| format!("Failed to save chart: {}", e))?;

    Ok(())
}
