//! Calendar grid layout and colorization

mod align;
mod classify;
mod grid;
mod markers;
mod range;

use chrono::NaiveDate;
use thiserror::Error;

pub use align::{DAYS_PER_WEEK, GraphRange, align};
pub use classify::{CellColor, ColorMapping, ColorNeed, NO_DATA_COLOR, classify};
pub use grid::{DateSeries, Grid, PaddingSet, ValueBounds, populate, value_bounds};
pub use markers::{MonthMarker, YearMarker, markers, month_abbr};
pub use range::{DateRange, DayIter, Mode};

use crate::palette::Palette;

/// Errors surfaced by heat map layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatmapError {
    /// Range start after range end
    #[error("Malformed date range: {start} is after {end}")]
    MalformedRange { start: NaiveDate, end: NaiveDate },

    /// Year outside the representable calendar
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    /// Nothing to color: no data, or every value equal
    #[error("{}", degenerate_message(.value))]
    DegenerateData { value: Option<f64> },
}

fn degenerate_message(value: &Option<f64>) -> String {
    match value {
        Some(v) => format!("No data to render: every value in range is {}", v),
        None => "No data to render: the series has no values in range".to_string(),
    }
}

/// Everything a rendering surface needs to draw one heat map
#[derive(Clone, Debug, PartialEq)]
pub struct Heatmap {
    pub range: DateRange,
    pub graph: GraphRange,
    pub grid: Grid,
    pub padding: PaddingSet,
    pub months: Vec<MonthMarker>,
    pub year: YearMarker,
    pub colors: ColorMapping,
}

impl Heatmap {
    pub fn bounds(&self) -> ValueBounds {
        self.colors.bounds
    }
}

/// Lay out and colorize `series` over `range`.
///
/// `integer_values` selects a truncated scale sized to the integer domain.
pub fn build(
    series: &DateSeries,
    range: DateRange,
    palette: &Palette,
    integer_values: bool,
) -> Result<Heatmap, HeatmapError> {
    let graph = align(&range);
    let (grid, padding) = populate(series, &range, &graph);
    let bounds = value_bounds(&grid)?;
    let (months, year) = markers(&range, &graph);

    let need = if integer_values {
        ColorNeed::for_integers(&bounds)
    } else {
        ColorNeed::Continuous
    };
    let colors = classify(&grid, &padding, palette, need, bounds);

    Ok(Heatmap {
        range,
        graph,
        grid,
        padding,
        months,
        year,
        colors,
    })
}
