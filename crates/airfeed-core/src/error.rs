use chrono::NaiveDate;
use thiserror::Error;

/// Error type for the `airfeed-core` crate.
///
/// Remote failures pass through from `airfeed-api`; the only failures
/// originating here are date-window validation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid duration: {days} days")]
    InvalidDuration { days: u32 },

    #[error(transparent)]
    Api(#[from] airfeed_api::Error),
}
