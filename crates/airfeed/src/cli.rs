//! Clap derive structure for the `airfeed` CLI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// airfeed — feed scheduled broadcast uploads from the calendar CMS
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser)]
#[command(
    name = "airfeed",
    version,
    about = "Upload configured recordings to every matching calendar event",
    long_about = "Retrieves the scheduled events for a date window from the calendar CMS,\n\
        matches them against the locally configured series, and uploads each\n\
        series' file to every matched event."
)]
pub struct Cli {
    /// Config file location (defaults to the platform config dir)
    #[arg(long, env = "AIRFEED_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Calendar host URL (overrides the config file)
    #[arg(long, short = 'H', env = "AIRFEED_HOST")]
    pub host: Option<String>,

    /// Login user (overrides the config file)
    #[arg(long, short = 'u', env = "AIRFEED_USER")]
    pub user: Option<String>,

    /// Start date as YYYY-MM-DD (skips the prompt)
    #[arg(long, short = 's', value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Window length in days (skips the prompt)
    #[arg(long, short = 'd', value_name = "DAYS")]
    pub days: Option<u32>,

    /// Accept the defaults for anything not given on the command line
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Query and match only; skip login and uploads
    #[arg(long)]
    pub dry_run: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "AIRFEED_INSECURE")]
    pub insecure: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
