// Inclusive date windows for feed queries.

use chrono::NaiveDate;

use crate::error::CoreError;

/// An inclusive calendar date window.
///
/// `start <= end` is enforced at construction and the window is
/// immutable afterwards. The feed query maps it to `from_date` 00:00
/// through `till_date` 23:55, so `end` is the last day covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a window from explicit start and end dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a window of `days` calendar days beginning at `start`.
    ///
    /// A duration of 1 covers exactly the start day.
    pub fn from_duration(start: NaiveDate, days: u32) -> Result<Self, CoreError> {
        if days == 0 {
            return Err(CoreError::InvalidDuration { days });
        }
        let end = start
            .checked_add_days(chrono::Days::new(u64::from(days - 1)))
            .ok_or(CoreError::InvalidDuration { days })?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}
