//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module holds the store seeding and clock helpers they share. Not every
//! test crate uses every helper.
#![allow(dead_code, reason = "each integration test crate uses a subset")]

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use foodshare::domain::ports::BulkLoadCommand;
use foodshare::domain::{BulkLoadReport, BulkLoadService};
use foodshare::outbound::csv_source::CsvTableSource;
use foodshare::outbound::persistence::{DbPool, DieselBulkLoadRepository};
use foodshare::test_support::csv_fixtures;
use foodshare::test_support::store::TempStore;

/// Clock pinned to a fixed instant.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock pinned to midday UTC on 2025-03-14.
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2025, 3, 14, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp"),
    })
}

/// The date the fixture clock reports as today.
pub fn fixture_today() -> NaiveDate {
    fixture_clock().local().date_naive()
}

/// Migrated store plus an open pool.
pub struct SeededStore {
    pub store: TempStore,
    pub pool: DbPool,
}

/// Load the CSVs under `dir` into `pool`.
pub async fn load_directory(pool: &DbPool, dir: &std::path::Path) -> BulkLoadReport {
    let source = CsvTableSource::open(dir).expect("open csv directory");
    BulkLoadService::new(
        Arc::new(source),
        Arc::new(DieselBulkLoadRepository::new(pool.clone())),
    )
    .load_all()
    .await
}

/// Empty migrated store.
pub async fn empty_store() -> SeededStore {
    let store = TempStore::migrated().await.expect("temp store");
    let pool = store.pool().await.expect("pool");
    SeededStore { store, pool }
}

/// Store loaded with the standard CSV fixtures.
pub async fn seeded_store() -> SeededStore {
    let seeded = empty_store().await;
    let data_dir = seeded.store.subdir("data").expect("data dir");
    csv_fixtures::write_all(&data_dir).expect("write csv fixtures");
    let report = load_directory(&seeded.pool, &data_dir).await;
    assert!(!report.has_failures(), "fixture load failed: {report:?}");
    seeded
}

/// Store loaded with the multi-city fixtures in [`csv_fixtures::mixed`].
pub async fn mixed_store() -> SeededStore {
    let seeded = empty_store().await;
    let data_dir = seeded.store.subdir("mixed").expect("data dir");
    csv_fixtures::mixed::write_all(&data_dir).expect("write csv fixtures");
    let report = load_directory(&seeded.pool, &data_dir).await;
    assert!(!report.has_failures(), "fixture load failed: {report:?}");
    seeded
}
