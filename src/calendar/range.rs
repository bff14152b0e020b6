//! Logical date ranges and day iteration

use chrono::{Days, NaiveDate};

use super::HeatmapError;

/// Number of days before `today` covered by the trailing-year window
const TRAILING_DAYS: u64 = 365;

/// Inclusive window of dates the heat map is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, HeatmapError> {
        if start > end {
            return Err(HeatmapError::MalformedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// January 1st through December 31st of `year`
    pub fn fixed_year(year: i32) -> Result<Self, HeatmapError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(HeatmapError::InvalidYear(year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(HeatmapError::InvalidYear(year))?;
        Self::new(start, end)
    }

    /// The 366 days ending with `today`
    pub fn trailing_year(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(TRAILING_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterate every date in the range, inclusive
    pub fn days(&self) -> DayIter {
        DayIter::new(self.start, self.end)
    }
}

/// Yields each date from the first through the last (inclusive).
/// Empty when `first > last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayIter {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl DayIter {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            next: (first <= last).then_some(first),
            last,
        }
    }
}

impl Iterator for DayIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.last);
        Some(current)
    }
}

/// Heat map window selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// A single calendar year
    FixedYear(i32),
    /// The trailing year ending today
    TillNow,
}

impl Mode {
    pub fn logical_range(self, today: NaiveDate) -> Result<DateRange, HeatmapError> {
        match self {
            Mode::FixedYear(year) => DateRange::fixed_year(year),
            Mode::TillNow => Ok(DateRange::trailing_year(today)),
        }
    }

    pub fn year(self) -> Option<i32> {
        match self {
            Mode::FixedYear(year) => Some(year),
            Mode::TillNow => None,
        }
    }
}
