//! Week alignment of a logical range

use chrono::{Datelike, NaiveDate, Weekday};

use super::range::DateRange;

/// Days in a grid column
pub const DAYS_PER_WEEK: usize = 7;

/// Week-aligned superset of a logical range: Monday through Sunday
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weeks: usize,
}

impl GraphRange {
    /// Grid row of a date (0 = Monday)
    pub fn row_of(&self, date: NaiveDate) -> usize {
        date.weekday().num_days_from_monday() as usize
    }

    /// Grid column of a date
    pub fn week_of(&self, date: NaiveDate) -> usize {
        ((date - self.start).num_days() / DAYS_PER_WEEK as i64) as usize
    }

    /// Row-major linear index of a date
    pub fn index_of(&self, date: NaiveDate) -> usize {
        self.row_of(date) * self.weeks + self.week_of(date)
    }
}

/// Expand `range` to whole Monday-start weeks
pub fn align(range: &DateRange) -> GraphRange {
    let mut start = range.start;
    while start.weekday() != Weekday::Mon {
        let Some(prev) = start.pred_opt() else { break };
        start = prev;
    }

    let mut end = range.end;
    while end.weekday() != Weekday::Sun {
        let Some(next) = end.succ_opt() else { break };
        end = next;
    }

    let total_days = (end - start).num_days() as usize;
    let mut weeks = total_days / DAYS_PER_WEEK;
    if weeks * DAYS_PER_WEEK < total_days {
        weeks += 1;
    }

    GraphRange { start, end, weeks }
}
