//! Cell colorization: padding, true zero, missing data and the graduated scale

use super::grid::{Grid, PaddingSet, ValueBounds};
use crate::palette::Palette;

/// Neutral gray for in-range days with no observation
pub const NO_DATA_COLOR: &str = "#f6f6f6";

/// How many graduated colors the value domain needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorNeed {
    /// Small integer domain; the scale is truncated to this many entries
    Bounded(usize),
    /// Any value may occur; the whole scale is used
    Continuous,
}

impl ColorNeed {
    /// Graduated colors needed by integer data spanning `bounds`; zero takes
    /// the zero color, so it is not counted when the domain includes it
    pub fn for_integers(bounds: &ValueBounds) -> Self {
        let span = bounds.span().round().max(0.0) as usize;
        if bounds.contains_zero() {
            ColorNeed::Bounded(span)
        } else {
            ColorNeed::Bounded(span + 1)
        }
    }
}

/// Color class of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellColor {
    /// Padding; not drawn
    Blank,
    /// Value is exactly zero
    Zero,
    /// In range but no observation
    NoData,
    /// Position on the graduated scale
    Scale(usize),
}

/// Per-cell color assignment for a populated grid
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMapping {
    pub zero_color: &'static str,
    pub no_data_color: &'static str,
    pub scale: Vec<&'static str>,
    pub bounds: ValueBounds,
    cells: Vec<CellColor>,
}

impl ColorMapping {
    pub fn cells(&self) -> &[CellColor] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> CellColor {
        self.cells.get(index).copied().unwrap_or(CellColor::Blank)
    }

    /// Concrete color token of a class; `None` for padding
    pub fn color_of(&self, cell: CellColor) -> Option<&'static str> {
        match cell {
            CellColor::Blank => None,
            CellColor::Zero => Some(self.zero_color),
            CellColor::NoData => Some(self.no_data_color),
            CellColor::Scale(i) => self.scale.get(i).copied(),
        }
    }

    /// Lowest value drawn with scale entry `i`
    pub fn scale_floor(&self, i: usize) -> f64 {
        if self.scale.is_empty() {
            return self.bounds.min;
        }
        let n = self.scale.len() as f64;
        self.bounds.min + self.bounds.span() * i as f64 / n
    }
}

/// Scale position of `value`; `f == 1.0` lands on the top entry
fn scale_index(value: f64, bounds: &ValueBounds, len: usize) -> usize {
    if len == 0 || bounds.span() <= 0.0 {
        return 0;
    }
    let f = ((value - bounds.min) / bounds.span()).clamp(0.0, 1.0);
    let i = (f * len as f64).ceil() as usize;
    i.saturating_sub(1).min(len - 1)
}

/// Assign a color class to every cell of `grid`.
///
/// Priority: padding, then exact zero, then missing data, then the scale.
/// Palette entry 0 is reserved for zero and never appears on the scale.
pub fn classify(
    grid: &Grid,
    padding: &PaddingSet,
    palette: &Palette,
    need: ColorNeed,
    bounds: ValueBounds,
) -> ColorMapping {
    let available = palette.graduated();
    let take = match need {
        ColorNeed::Bounded(n) => n.clamp(1, available.len()),
        ColorNeed::Continuous => available.len(),
    };
    let scale: Vec<&'static str> = available[..take].to_vec();

    let cells = grid
        .cells()
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            if padding.contains(&index) {
                return CellColor::Blank;
            }
            match cell {
                Some(v) if *v == 0.0 => CellColor::Zero,
                None => CellColor::NoData,
                Some(v) => CellColor::Scale(scale_index(*v, &bounds, scale.len())),
            }
        })
        .collect();

    ColorMapping {
        zero_color: palette.zero_color(),
        no_data_color: NO_DATA_COLOR,
        scale,
        bounds,
        cells,
    }
}
