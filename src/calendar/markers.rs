//! Month and year axis markers

use chrono::{Datelike, Weekday};

use super::align::GraphRange;
use super::range::DateRange;

/// Labels closer than this many columns collide when drawn
pub const MIN_MARKER_GAP: f64 = 4.0;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month label position, centered between grid columns
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonthMarker {
    pub position: f64,
    pub month: u32,
}

impl MonthMarker {
    /// Week column the label belongs to
    pub fn week(&self) -> usize {
        self.position.floor() as usize
    }

    pub fn abbr(&self) -> &'static str {
        month_abbr(self.month)
    }
}

/// Most recent year boundary crossed inside the range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearMarker {
    pub year: i32,
    pub week: usize,
}

pub fn month_abbr(month: u32) -> &'static str {
    MONTH_ABBR
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

/// Compute month transitions and the year marker for `range`
pub fn markers(range: &DateRange, graph: &GraphRange) -> (Vec<MonthMarker>, YearMarker) {
    (month_markers(range, graph), year_marker(range, graph))
}

/// Month shown in each week column, taken from that week's Monday
fn month_per_week(range: &DateRange, graph: &GraphRange) -> Vec<Option<u32>> {
    let mut months = vec![None; graph.weeks];
    for date in range.days().filter(|d| d.weekday() == Weekday::Mon) {
        months[graph.week_of(date)] = Some(date.month());
    }
    months
}

pub fn month_markers(range: &DateRange, graph: &GraphRange) -> Vec<MonthMarker> {
    let mut current = None;
    let mut markers: Vec<MonthMarker> = month_per_week(range, graph)
        .into_iter()
        .enumerate()
        .filter_map(|(week, month)| {
            let month = month?;
            if current == Some(month) {
                return None;
            }
            current = Some(month);
            Some(MonthMarker {
                position: week as f64 + 0.5,
                month,
            })
        })
        .collect();

    if markers.len() >= 2 && markers[1].position - markers[0].position < MIN_MARKER_GAP {
        markers.remove(0);
    }
    let n = markers.len();
    if n >= 2 && markers[n - 1].position - markers[n - 2].position < MIN_MARKER_GAP {
        markers.pop();
    }

    markers
}

pub fn year_marker(range: &DateRange, graph: &GraphRange) -> YearMarker {
    let mut first_seen = None;
    for sunday in range.days().filter(|d| d.weekday() == Weekday::Sun) {
        match first_seen {
            None => first_seen = Some(sunday.year()),
            Some(year) if year != sunday.year() => {
                return YearMarker {
                    year: sunday.year(),
                    week: graph.week_of(sunday),
                };
            }
            Some(_) => {}
        }
    }

    YearMarker {
        year: range.start.year(),
        week: 0,
    }
}
