//! Calendar date ranges for listing crawls
//!
//! Listing pages are addressed by a `YYYYMMDD` date. A [`DateRange`] expands
//! two inclusive bounds and a day-step into the dates to request.

use chrono::{Duration, NaiveDate};

use crate::utils::error::RangeError;

/// Date format used by listing URLs and the CLI
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Inclusive date range walked at a fixed day-step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    step: u32,
}

impl DateRange {
    /// Build a range from two `YYYYMMDD` bounds
    ///
    /// # Errors
    ///
    /// - `RangeError::InvalidDate` if a bound is not a calendar date in `YYYYMMDD`
    /// - `RangeError::InvalidRange` if `end` is before `start`
    /// - `RangeError::InvalidStep` if `step` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use naver_corpus::crawler::date::DateRange;
    ///
    /// let range = DateRange::parse("20240101", "20240105", 2).unwrap();
    /// assert_eq!(range.to_strings(), vec!["20240101", "20240103", "20240105"]);
    /// ```
    pub fn parse(start: &str, end: &str, step: u32) -> Result<Self, RangeError> {
        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        Self::new(start_date, end_date, step)
    }

    /// Build a range from already-parsed dates
    pub fn new(start: NaiveDate, end: NaiveDate, step: u32) -> Result<Self, RangeError> {
        if step == 0 {
            return Err(RangeError::InvalidStep(step));
        }

        if end < start {
            return Err(RangeError::InvalidRange {
                start: format_date(start),
                end: format_date(end),
            });
        }

        Ok(Self { start, end, step })
    }

    /// Range covering exactly one day
    pub fn single_day(day: &str) -> Result<Self, RangeError> {
        Self::parse(day, day, 1)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Number of dates the range yields: `floor((end - start) / step) + 1`
    pub fn len(&self) -> usize {
        let span = (self.end - self.start).num_days() as u64;
        (span / u64::from(self.step)) as usize + 1
    }

    /// A valid range always yields at least its start date
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Dates `start + k * step` for `k = 0..len()`
    pub fn dates(&self) -> Vec<NaiveDate> {
        let step = Duration::days(i64::from(self.step));
        let mut dates = Vec::with_capacity(self.len());
        let mut current = self.start;

        while current <= self.end {
            dates.push(current);
            current += step;
        }

        dates
    }

    /// Dates rendered in `YYYYMMDD`
    pub fn to_strings(&self) -> Vec<String> {
        self.dates().into_iter().map(format_date).collect()
    }
}

/// Parse a strict `YYYYMMDD` date
///
/// # Errors
///
/// Returns `RangeError::InvalidDate` for anything that is not eight digits
/// forming a real calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, RangeError> {
    if raw.len() != 8 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(RangeError::InvalidDate(raw.to_string()));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| RangeError::InvalidDate(raw.to_string()))
}

/// Render a date as `YYYYMMDD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
