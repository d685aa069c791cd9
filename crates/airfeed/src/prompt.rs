//! Interactive entry of the query window.
//!
//! Start date: `YYYY-MM-DD`, empty for today, never in the past.
//! Duration: days within the configured bounds, empty for the default.
//! Both prompts are skipped when the matching flag is given or `--yes`
//! is set.

use chrono::{Local, NaiveDate};
use dialoguer::Input;

use airfeed_config::Calendar;
use airfeed_core::DateRange;

use crate::cli::Cli;
use crate::error::CliError;

/// Resolve the query window from flags, prompts, and config defaults.
pub fn resolve_range(cli: &Cli, calendar: &Calendar) -> Result<DateRange, CliError> {
    let today = Local::now().date_naive();

    let start = match cli.start_date {
        Some(date) if date < today => {
            return Err(CliError::Validation {
                field: "start-date".into(),
                reason: "must be today or later".into(),
            });
        }
        Some(date) => date,
        None if cli.yes => today,
        None => prompt_start_date(today)?,
    };

    let max = calendar.max_duration_days;
    let days = match cli.days {
        Some(days) if !(1..=max).contains(&days) => {
            return Err(CliError::Validation {
                field: "days".into(),
                reason: format!("must be between 1 and {max}"),
            });
        }
        Some(days) => days,
        None if cli.yes => calendar.default_duration_days,
        None => prompt_duration(calendar.default_duration_days, max)?,
    };

    DateRange::from_duration(start, days).map_err(|err| CliError::Validation {
        field: "date range".into(),
        reason: err.to_string(),
    })
}

fn prompt_start_date(today: NaiveDate) -> Result<NaiveDate, CliError> {
    loop {
        let input: String = Input::new()
            .with_prompt("Start date as YYYY-MM-DD (empty for today)")
            .allow_empty(true)
            .interact_text()?;
        let input = input.trim();

        if input.is_empty() {
            return Ok(today);
        }
        match input.parse::<NaiveDate>() {
            Ok(date) if date < today => eprintln!("Start date must be today or later."),
            Ok(date) => return Ok(date),
            Err(_) => eprintln!("Start date must be entered as YYYY-MM-DD."),
        }
    }
}

fn prompt_duration(default_days: u32, max: u32) -> Result<u32, CliError> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!(
                "Duration in days (1 .. {max}, empty for default = {default_days})"
            ))
            .allow_empty(true)
            .interact_text()?;
        let input = input.trim();

        if input.is_empty() {
            return Ok(default_days);
        }
        match input.parse::<u32>() {
            Ok(days) if (1..=max).contains(&days) => return Ok(days),
            Ok(_) => eprintln!("Duration must be between 1 and {max}."),
            Err(_) => eprintln!("Duration must be a numeric value."),
        }
    }
}
