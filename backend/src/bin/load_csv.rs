//! Replace the stored tables with the contents of a CSV data directory.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use foodshare::domain::ports::BulkLoadCommand;
use foodshare::domain::{BulkLoadReport, BulkLoadService, SourceTable, TableLoadStatus};
use foodshare::outbound::csv_source::{CsvFileNames, CsvTableSource};
use foodshare::outbound::persistence::{
    DbPool, DieselBulkLoadRepository, PoolConfig, run_migrations,
};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DATABASE_URL: &str = "food_waste.db";

/// `load-csv` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "load-csv",
    about = "Replace the food donation tables with the contents of CSV files",
    version
)]
struct CliArgs {
    /// Directory holding the CSV files.
    #[arg(long = "data-dir", value_name = "path", default_value = "data")]
    data_dir: PathBuf,
    /// SQLite database path. Falls back to `FOODSHARE_DATABASE_URL`, then
    /// `food_waste.db`.
    #[arg(long = "database-url", value_name = "path")]
    database_url: Option<String>,
    /// Providers file name inside the data directory.
    #[arg(long, value_name = "file")]
    providers: Option<String>,
    /// Receivers file name inside the data directory.
    #[arg(long, value_name = "file")]
    receivers: Option<String>,
    /// Food listings file name inside the data directory.
    #[arg(long = "food-listings", value_name = "file")]
    food_listings: Option<String>,
    /// Claims file name inside the data directory.
    #[arg(long, value_name = "file")]
    claims: Option<String>,
}

impl CliArgs {
    fn file_names(&self) -> CsvFileNames {
        [
            (SourceTable::Providers, &self.providers),
            (SourceTable::Receivers, &self.receivers),
            (SourceTable::FoodListings, &self.food_listings),
            (SourceTable::Claims, &self.claims),
        ]
        .into_iter()
        .fold(CsvFileNames::default(), |names, (table, file)| match file {
            Some(file) => names.with(table, file.clone()),
            None => names,
        })
    }
}

fn main() -> io::Result<ExitCode> {
    // Logs go to stderr so stdout carries only the report.
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {err}");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<ExitCode> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url.clone())?;

    run_migrations(&database_url)
        .await
        .map_err(|error| io::Error::other(format!("prepare database: {error}")))?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let source = CsvTableSource::open_with(&args.data_dir, args.file_names()).map_err(|error| {
        io::Error::other(format!(
            "open data directory '{}': {error}",
            args.data_dir.display()
        ))
    })?;
    let loader = BulkLoadService::new(
        Arc::new(source),
        Arc::new(DieselBulkLoadRepository::new(pool)),
    );

    let report = loader.load_all().await;
    for line in render_report(&report) {
        println!("{line}");
    }

    Ok(exit_code(&report))
}

/// Missing sources are reported but do not fail the run.
fn exit_code(report: &BulkLoadReport) -> ExitCode {
    if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn render_report(report: &BulkLoadReport) -> Vec<String> {
    report
        .tables
        .iter()
        .map(|outcome| match &outcome.status {
            TableLoadStatus::Loaded { rows } => format!("{}: loaded {rows} rows", outcome.table),
            TableLoadStatus::Skipped { reason } => format!("{}: skipped ({reason})", outcome.table),
            TableLoadStatus::Failed { message } => format!("{}: failed ({message})", outcome.table),
        })
        .collect()
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }
    match env::var("FOODSHARE_DATABASE_URL") {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Ok(DEFAULT_DATABASE_URL.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI helpers.

    use env_lock::lock_env;
    use foodshare::domain::TableLoadOutcome;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn explicit_database_url_wins() {
        let _guard = lock_env([("FOODSHARE_DATABASE_URL", Some("/tmp/env.db".to_owned()))]);
        let url = resolve_database_url(Some("/tmp/cli.db".to_owned())).expect("url");
        assert_eq!(url, "/tmp/cli.db");
    }

    #[rstest]
    fn blank_explicit_database_url_is_rejected() {
        let error = resolve_database_url(Some("  ".to_owned())).expect_err("blank url");
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }

    #[rstest]
    #[case(None, "food_waste.db")]
    #[case(Some("/tmp/env.db"), "/tmp/env.db")]
    fn database_url_falls_back(#[case] env_value: Option<&str>, #[case] expected: &str) {
        let _guard = lock_env([("FOODSHARE_DATABASE_URL", env_value.map(str::to_owned))]);
        assert_eq!(resolve_database_url(None).expect("url"), expected);
    }

    #[rstest]
    fn file_name_overrides_are_applied() {
        let args = CliArgs::try_parse_from(["load-csv", "--claims", "claims_2025.csv"])
            .expect("args parse");
        let names = args.file_names();
        assert_eq!(names.get(SourceTable::Claims), "claims_2025.csv");
        assert_eq!(names.get(SourceTable::Providers), "providers_data.csv");
    }

    #[rstest]
    fn report_lines_cover_every_status() {
        let report = BulkLoadReport {
            tables: vec![
                TableLoadOutcome {
                    table: SourceTable::Providers,
                    status: TableLoadStatus::Loaded { rows: 3 },
                },
                TableLoadOutcome {
                    table: SourceTable::Claims,
                    status: TableLoadStatus::Skipped {
                        reason: "no file".to_owned(),
                    },
                },
            ],
        };

        assert_eq!(
            render_report(&report),
            vec![
                "Providers: loaded 3 rows".to_owned(),
                "Claims: skipped (no file)".to_owned(),
            ]
        );
    }

    #[rstest]
    #[case(TableLoadStatus::Skipped { reason: "no file".to_owned() }, ExitCode::SUCCESS)]
    #[case(TableLoadStatus::Failed { message: "line 3: bad id".to_owned() }, ExitCode::FAILURE)]
    fn only_failed_tables_fail_the_run(#[case] status: TableLoadStatus, #[case] expected: ExitCode) {
        let report = BulkLoadReport {
            tables: vec![
                TableLoadOutcome {
                    table: SourceTable::Providers,
                    status: TableLoadStatus::Loaded { rows: 3 },
                },
                TableLoadOutcome {
                    table: SourceTable::Claims,
                    status,
                },
            ],
        };

        assert_eq!(exit_code(&report), expected);
    }
}
