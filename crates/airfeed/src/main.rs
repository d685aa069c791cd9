mod cli;
mod error;
mod prompt;
mod report;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use airfeed_api::CalendarClient;
use airfeed_config::Config;
use airfeed_core::{Credentials, Feeder, UploadOutcome};

use crate::cli::Cli;
use crate::error::{CliError, exit_code, map_core};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(code);
        }
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32, CliError> {
    let mut config = load_config(&cli)?;
    airfeed_config::normalize_series_paths(&mut config);

    if config.series.is_empty() {
        return Err(CliError::Validation {
            field: "series".into(),
            reason: "no [series.*] tables configured".into(),
        });
    }

    let url = airfeed_config::host_url(&config.calendar)?;
    let user = config.calendar.user.clone().unwrap_or_default();

    let range = prompt::resolve_range(&cli, &config.calendar)?;
    if !cli.quiet {
        println!("Using start date {}", range.start());
        println!("Using end date {}", range.end());
    }

    // ── Query + match ────────────────────────────────────────────────

    let transport = airfeed_config::transport_config(&config.calendar);
    let client =
        CalendarClient::new(url.clone(), &transport).map_err(|err| CliError::ConnectionFailed {
            url: url.to_string(),
            source: err.into(),
        })?;
    let series = airfeed_config::series_set(&config);
    let mut feeder = Feeder::new(client, series, config.calendar.template.clone());

    let retrieved = feeder
        .refresh_events(range)
        .await
        .map_err(|err| map_core(err, &url, &user))?;
    let matched = feeder.match_series();
    tracing::info!(retrieved, matched, "query phase complete");

    if cli.dry_run || matched == 0 {
        report::print_matches(feeder.series(), cli.quiet);
        return Ok(exit_code::SUCCESS);
    }

    // ── Upload ───────────────────────────────────────────────────────

    let (user, password) = airfeed_config::resolve_credentials(&config.calendar)?;
    let credentials = Credentials { user, password };

    let bar = report::upload_bar(matched as u64, cli.quiet);
    let reports = feeder
        .upload_all(&credentials, |attempt| {
            bar.inc(1);
            if !attempt.outcome.is_success() {
                bar.println(format!(
                    "upload of event {} ({}) failed",
                    attempt.event_id, attempt.series_key
                ));
            }
        })
        .await;
    bar.finish_and_clear();

    report::print_summary(feeder.series(), &reports, cli.quiet);

    let failed = reports
        .iter()
        .filter(|r| !matches!(r.outcome, UploadOutcome::Uploaded))
        .count();
    if failed > 0 {
        tracing::warn!(failed, total = reports.len(), "some uploads did not complete");
        return Ok(exit_code::PARTIAL);
    }
    Ok(exit_code::SUCCESS)
}

/// Load the config file (honoring `--config`) and apply flag overrides.
fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = match cli.config {
        Some(ref path) => airfeed_config::load_config_from(path)?,
        None => airfeed_config::load_config()?,
    };

    if let Some(ref host) = cli.host {
        config.calendar.host = Some(host.clone());
    }
    if let Some(ref user) = cli.user {
        config.calendar.user = Some(user.clone());
    }
    if cli.insecure {
        config.calendar.insecure = true;
    }

    Ok(config)
}
