//! CSV-backed `TableSource` for the bulk loader.
//!
//! Reads `providers_data.csv`, `receivers_data.csv`, `food_listings_data.csv`
//! and `claims_data.csv` (names overridable) from one data directory opened
//! through `cap_std`. Columns are matched by header name: a missing column
//! fails the table, extra columns are ignored with a warning, and empty
//! cells become `None`. Dates and timestamps are normalised to
//! `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS`.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::ports::{TableSource, TableSourceError};
use crate::domain::{
    ClaimRecord, FoodListingRecord, ProviderRecord, ReceiverRecord, SourceTable, TableBatch,
};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Header columns each table requires.
fn required_columns(table: SourceTable) -> &'static [&'static str] {
    match table {
        SourceTable::Providers => &["Provider_ID", "Name", "Type", "Address", "City", "Contact"],
        SourceTable::Receivers => &["Receiver_ID", "Name", "Type", "City", "Contact"],
        SourceTable::FoodListings => &[
            "Food_ID",
            "Food_Name",
            "Quantity",
            "Expiry_Date",
            "Provider_ID",
            "Provider_Type",
            "Location",
            "Food_Type",
            "Meal_Type",
        ],
        SourceTable::Claims => &["Claim_ID", "Food_ID", "Receiver_ID", "Status", "Timestamp"],
    }
}

/// File names for each table inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFileNames {
    providers: String,
    receivers: String,
    food_listings: String,
    claims: String,
}

impl Default for CsvFileNames {
    fn default() -> Self {
        Self {
            providers: "providers_data.csv".to_owned(),
            receivers: "receivers_data.csv".to_owned(),
            food_listings: "food_listings_data.csv".to_owned(),
            claims: "claims_data.csv".to_owned(),
        }
    }
}

impl CsvFileNames {
    /// Override the file name used for `table`.
    #[must_use]
    pub fn with(mut self, table: SourceTable, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        match table {
            SourceTable::Providers => self.providers = file_name,
            SourceTable::Receivers => self.receivers = file_name,
            SourceTable::FoodListings => self.food_listings = file_name,
            SourceTable::Claims => self.claims = file_name,
        }
        self
    }

    /// File name used for `table`.
    pub fn get(&self, table: SourceTable) -> &str {
        match table {
            SourceTable::Providers => &self.providers,
            SourceTable::Receivers => &self.receivers,
            SourceTable::FoodListings => &self.food_listings,
            SourceTable::Claims => &self.claims,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderCsvRow {
    #[serde(rename = "Provider_ID")]
    provider_id: i32,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Type")]
    provider_type: Option<String>,
    #[serde(rename = "Address")]
    address: Option<String>,
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "Contact")]
    contact: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReceiverCsvRow {
    #[serde(rename = "Receiver_ID")]
    receiver_id: i32,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Type")]
    receiver_type: Option<String>,
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "Contact")]
    contact: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FoodListingCsvRow {
    #[serde(rename = "Food_ID")]
    food_id: i32,
    #[serde(rename = "Food_Name")]
    food_name: Option<String>,
    #[serde(rename = "Quantity")]
    quantity: Option<i32>,
    #[serde(rename = "Expiry_Date")]
    expiry_date: Option<String>,
    #[serde(rename = "Provider_ID")]
    provider_id: Option<i32>,
    #[serde(rename = "Provider_Type")]
    provider_type: Option<String>,
    #[serde(rename = "Location")]
    location: Option<String>,
    #[serde(rename = "Food_Type")]
    food_type: Option<String>,
    #[serde(rename = "Meal_Type")]
    meal_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaimCsvRow {
    #[serde(rename = "Claim_ID")]
    claim_id: i32,
    #[serde(rename = "Food_ID")]
    food_id: Option<i32>,
    #[serde(rename = "Receiver_ID")]
    receiver_id: Option<i32>,
    #[serde(rename = "Status")]
    status: Option<String>,
    #[serde(rename = "Timestamp")]
    timestamp: Option<String>,
}

fn normalise_date(raw: Option<String>, line: u64) -> Result<Option<String>, TableSourceError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&raw, format).ok())
        .map(|date| Some(date.format("%Y-%m-%d").to_string()))
        .ok_or_else(|| TableSourceError::row(format!("line {line}: invalid date {raw:?}")))
}

fn normalise_timestamp(
    raw: Option<String>,
    line: u64,
) -> Result<Option<String>, TableSourceError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
        .map(|stamp| Some(stamp.format("%Y-%m-%d %H:%M:%S").to_string()))
        .ok_or_else(|| TableSourceError::row(format!("line {line}: invalid timestamp {raw:?}")))
}

/// `TableSource` reading CSV files from a data directory.
#[derive(Debug)]
pub struct CsvTableSource {
    dir: Dir,
    root: PathBuf,
    files: CsvFileNames,
}

impl CsvTableSource {
    /// Open `root` with the default file names.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be opened.
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        Self::open_with(root, CsvFileNames::default())
    }

    /// Open `root` with custom file names.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be opened.
    pub fn open_with(root: impl AsRef<Path>, files: CsvFileNames) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self { dir, root, files })
    }

    fn read_rows<T>(&self, table: SourceTable) -> Result<Vec<(u64, T)>, TableSourceError>
    where
        T: DeserializeOwned,
    {
        let file_name = self.files.get(table);
        let location = self.root.join(file_name).display().to_string();
        let file = self.dir.open(file_name).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => TableSourceError::missing(location.clone()),
            _ => TableSourceError::read(format!("{location}: {err}")),
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let headers = reader
            .headers()
            .map_err(|err| TableSourceError::read(format!("{location}: {err}")))?
            .clone();

        let required = required_columns(table);
        if let Some(missing) = required
            .iter()
            .find(|column| !headers.iter().any(|header| header == **column))
        {
            return Err(TableSourceError::header(format!(
                "{location}: missing column {missing}"
            )));
        }
        for extra in headers.iter().filter(|header| !required.contains(header)) {
            warn!(%table, column = extra, "ignoring unknown column");
        }

        let mut rows = Vec::new();
        for result in reader.deserialize::<T>() {
            let row = result.map_err(|err| {
                let line = err.position().map_or(0, csv::Position::line);
                TableSourceError::row(format!("{location} line {line}: {err}"))
            })?;
            // Header is line 1; the first data row is line 2.
            let line = u64::try_from(rows.len()).unwrap_or(u64::MAX).saturating_add(2);
            rows.push((line, row));
        }
        debug!(%table, rows = rows.len(), "csv source read");
        Ok(rows)
    }
}

impl TableSource for CsvTableSource {
    fn read(&self, table: SourceTable) -> Result<TableBatch, TableSourceError> {
        let batch = match table {
            SourceTable::Providers => TableBatch::Providers(
                self.read_rows::<ProviderCsvRow>(table)?
                    .into_iter()
                    .map(|(_, row)| ProviderRecord {
                        provider_id: row.provider_id,
                        name: row.name,
                        provider_type: row.provider_type,
                        address: row.address,
                        city: row.city,
                        contact: row.contact,
                    })
                    .collect(),
            ),
            SourceTable::Receivers => TableBatch::Receivers(
                self.read_rows::<ReceiverCsvRow>(table)?
                    .into_iter()
                    .map(|(_, row)| ReceiverRecord {
                        receiver_id: row.receiver_id,
                        name: row.name,
                        receiver_type: row.receiver_type,
                        city: row.city,
                        contact: row.contact,
                    })
                    .collect(),
            ),
            SourceTable::FoodListings => TableBatch::FoodListings(
                self.read_rows::<FoodListingCsvRow>(table)?
                    .into_iter()
                    .map(|(line, row)| {
                        Ok(FoodListingRecord {
                            food_id: row.food_id,
                            food_name: row.food_name,
                            quantity: row.quantity,
                            expiry_date: normalise_date(row.expiry_date, line)?,
                            provider_id: row.provider_id,
                            provider_type: row.provider_type,
                            location: row.location,
                            food_type: row.food_type,
                            meal_type: row.meal_type,
                        })
                    })
                    .collect::<Result<_, TableSourceError>>()?,
            ),
            SourceTable::Claims => TableBatch::Claims(
                self.read_rows::<ClaimCsvRow>(table)?
                    .into_iter()
                    .map(|(line, row)| {
                        Ok(ClaimRecord {
                            claim_id: row.claim_id,
                            food_id: row.food_id,
                            receiver_id: row.receiver_id,
                            status: row.status,
                            timestamp: normalise_timestamp(row.timestamp, line)?,
                        })
                    })
                    .collect::<Result<_, TableSourceError>>()?,
            ),
        };
        Ok(batch)
    }
}
