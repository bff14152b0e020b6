//! Grid population: series values placed by weekday row and week column

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::HeatmapError;
use super::align::{DAYS_PER_WEEK, GraphRange};
use super::range::{DateRange, DayIter};

/// Per-day values keyed by date
pub type DateSeries = BTreeMap<NaiveDate, f64>;

/// Linear indices of cells that exist only to complete the first and last week
pub type PaddingSet = BTreeSet<usize>;

/// Row-major 7 x weeks grid; `None` marks an empty cell
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    weeks: usize,
    cells: Vec<Option<f64>>,
}

impl Grid {
    pub fn empty(weeks: usize) -> Self {
        Self {
            weeks,
            cells: vec![None; DAYS_PER_WEEK * weeks],
        }
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.weeks + col] = Some(value);
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Option<f64>] {
        &self.cells
    }

    /// Values of populated cells only
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(|c| *c)
    }
}

/// Smallest and largest populated value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueBounds {
    pub min: f64,
    pub max: f64,
}

impl ValueBounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Zero lies within `min..=max`
    pub fn contains_zero(&self) -> bool {
        self.min <= 0.0 && 0.0 <= self.max
    }
}

/// Place `series` into a grid laid out over `graph`.
///
/// Dates outside `range` are ignored. In-range dates with no entry stay empty.
pub fn populate(series: &DateSeries, range: &DateRange, graph: &GraphRange) -> (Grid, PaddingSet) {
    let mut grid = Grid::empty(graph.weeks);
    let mut padding = PaddingSet::new();

    let leading = range.start.pred_opt().map(|last| DayIter::new(graph.start, last));
    let trailing = range.end.succ_opt().map(|first| DayIter::new(first, graph.end));
    for date in leading.into_iter().flatten().chain(trailing.into_iter().flatten()) {
        padding.insert(graph.index_of(date));
    }

    for (&date, &value) in series.range(range.start..=range.end) {
        grid.set(graph.row_of(date), graph.week_of(date), value);
    }

    (grid, padding)
}

/// Bounds of the populated cells; a uniform or empty grid has nothing to color
pub fn value_bounds(grid: &Grid) -> Result<ValueBounds, HeatmapError> {
    let mut values = grid.values();
    let Some(first) = values.next() else {
        return Err(HeatmapError::DegenerateData { value: None });
    };

    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min == max {
        return Err(HeatmapError::DegenerateData { value: Some(min) });
    }

    Ok(ValueBounds { min, max })
}
