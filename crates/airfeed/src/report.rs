//! Run output: upload progress bar and per-series summary tables.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use airfeed_core::{SeriesSet, UploadReport};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Series")]
    series: String,
    #[tabled(rename = "Matched events")]
    matched: usize,
    #[tabled(rename = "File")]
    file: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Series")]
    series: String,
    #[tabled(rename = "Matched")]
    matched: usize,
    #[tabled(rename = "Uploaded")]
    uploaded: String,
    #[tabled(rename = "Failed")]
    failed: String,
}

/// Progress bar across the total matched upload count.
pub fn upload_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/dim} {pos}/{len} {msg}")
            .expect("progress template"),
    );
    bar
}

/// Print the match table (dry runs and zero-match runs).
pub fn print_matches(series: &SeriesSet, quiet: bool) {
    if quiet {
        return;
    }
    let rows: Vec<MatchRow> = series
        .iter()
        .map(|(key, runtime)| MatchRow {
            series: key.to_owned(),
            matched: runtime.event_ids().len(),
            file: runtime.file().display().to_string(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
}

/// Print the per-series upload summary.
pub fn print_summary(series: &SeriesSet, reports: &[UploadReport], quiet: bool) {
    if quiet {
        return;
    }
    let rows: Vec<SummaryRow> = series
        .iter()
        .map(|(key, runtime)| {
            let uploaded = reports
                .iter()
                .filter(|r| r.series_key == key && r.outcome.is_success())
                .count();
            let failed = reports
                .iter()
                .filter(|r| r.series_key == key && !r.outcome.is_success())
                .count();
            SummaryRow {
                series: key.to_owned(),
                matched: runtime.event_ids().len(),
                uploaded: if uploaded > 0 {
                    uploaded.green().to_string()
                } else {
                    uploaded.to_string()
                },
                failed: if failed > 0 {
                    failed.red().to_string()
                } else {
                    failed.to_string()
                },
            }
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
}
