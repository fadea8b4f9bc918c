//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The backend avoids direct `std::fs` calls; these helpers route file
    //! writes through `cap_std::fs::Dir`.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use foodshare::test_support::cap_fs::{path_exists, write_file};
    ///
    /// let path = std::env::temp_dir().join("cap-fs-write-example.csv");
    /// write_file(&path, b"Provider_ID\n")?;
    /// assert!(path_exists(&path));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Return true when `path` exists, false when it does not.
    pub fn path_exists(path: &Path) -> bool {
        let Ok((parent, file_name)) = parent_and_file_name(path) else {
            return false;
        };
        let Ok(directory) = Dir::open_ambient_dir(parent, ambient_authority()) else {
            return false;
        };
        directory.exists(Path::new(&file_name))
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod store {
    //! Throwaway SQLite stores for persistence tests.

    use std::io;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::outbound::persistence::{DbPool, PoolConfig, run_migrations};

    /// Migrated SQLite file inside a temporary directory, removed on drop.
    #[derive(Debug)]
    pub struct TempStore {
        dir: TempDir,
        database_url: String,
    }

    impl TempStore {
        /// Create the directory, then create and migrate `food_waste.db`.
        ///
        /// # Errors
        ///
        /// Returns an I/O error when the directory cannot be created or the
        /// migrations fail.
        pub async fn migrated() -> io::Result<Self> {
            let dir = tempfile::tempdir()?;
            let database_url = dir.path().join("food_waste.db").display().to_string();
            run_migrations(&database_url)
                .await
                .map_err(|err| io::Error::other(err.to_string()))?;
            Ok(Self { dir, database_url })
        }

        /// Path handed to the pool.
        #[must_use]
        pub fn database_url(&self) -> &str {
            &self.database_url
        }

        /// Scratch directory next to the database, for CSV fixtures.
        #[must_use]
        pub fn dir(&self) -> &Path {
            self.dir.path()
        }

        /// Fresh subdirectory of the scratch directory.
        ///
        /// # Errors
        ///
        /// Returns the I/O error when the directory cannot be created.
        pub fn subdir(&self, name: &str) -> io::Result<PathBuf> {
            let path = self.dir.path().join(name);
            cap_std::fs::Dir::create_ambient_dir_all(&path, cap_std::ambient_authority())?;
            Ok(path)
        }

        /// Build a pool over the store.
        ///
        /// # Errors
        ///
        /// Returns an I/O error when the pool cannot be built.
        pub async fn pool(&self) -> io::Result<DbPool> {
            DbPool::new(PoolConfig::new(&self.database_url))
                .await
                .map_err(|err| io::Error::other(err.to_string()))
        }
    }
}

pub mod csv_fixtures {
    //! CSV contents used across loader tests.

    use std::io;
    use std::path::Path;

    use super::cap_fs::write_file;

    /// One provider in `City1`.
    pub const PROVIDERS: &str =
        "Provider_ID,Name,Type,Address,City,Contact\n1,A,Restaurant,x,City1,c1\n";

    /// Two receivers in different cities.
    pub const RECEIVERS: &str = "Receiver_ID,Name,Type,City,Contact\n\
        1,Shelter One,Shelter,City1,r1\n\
        2,Charity Two,Charity,City2,r2\n";

    /// A single expired listing of bread.
    pub const FOOD_LISTINGS: &str = "Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,\
        Provider_Type,Location,Food_Type,Meal_Type\n\
        1,Bread,10,2020-01-01,1,Restaurant,City1,Vegetarian,Breakfast\n";

    /// Claims covering every status.
    pub const CLAIMS: &str = "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n\
        1,1,1,Completed,2025-03-05 05:26:00\n\
        2,1,2,Pending,2025-03-06 10:00:00\n\
        3,1,2,Cancelled,3/7/2025 11:30\n";

    /// Write the four default CSV files into `dir`.
    ///
    /// # Errors
    ///
    /// Returns the first write failure.
    pub fn write_all(dir: &Path) -> io::Result<()> {
        write_tables(dir, [PROVIDERS, RECEIVERS, FOOD_LISTINGS, CLAIMS])
    }

    /// Write provider, receiver, listing and claim CSV text into `dir`
    /// under the default file names.
    ///
    /// # Errors
    ///
    /// Returns the first write failure.
    pub fn write_tables(dir: &Path, tables: [&str; 4]) -> io::Result<()> {
        let [providers, receivers, food_listings, claims] = tables;
        write_file(&dir.join("providers_data.csv"), providers.as_bytes())?;
        write_file(&dir.join("receivers_data.csv"), receivers.as_bytes())?;
        write_file(&dir.join("food_listings_data.csv"), food_listings.as_bytes())?;
        write_file(&dir.join("claims_data.csv"), claims.as_bytes())
    }

    pub mod mixed {
        //! Several providers, receivers and listings across three cities,
        //! with claims in every status. Aggregates have distinct winners.

        use std::io;
        use std::path::Path;

        /// Two grocery providers in `C1`, one restaurant in `C2`.
        pub const PROVIDERS: &str = "Provider_ID,Name,Type,Address,City,Contact\n\
            1,P1,Grocery,a,C1,p1\n\
            2,P2,Grocery,b,C1,p2\n\
            3,P3,Restaurant,c,C2,p3\n";

        /// Two receivers in `C1` and one in `C3`, a city without providers.
        pub const RECEIVERS: &str = "Receiver_ID,Name,Type,City,Contact\n\
            1,R1,NGO,C1,r1\n\
            2,R2,Shelter,C1,r2\n\
            3,R3,Charity,C3,r3\n";

        /// One listing per provider.
        pub const FOOD_LISTINGS: &str = "Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,\
            Provider_Type,Location,Food_Type,Meal_Type\n\
            1,Apples,5,2025-03-20,1,Grocery,C1,Vegan,Lunch\n\
            2,Bread,10,2025-03-10,2,Grocery,C1,Vegetarian,Dinner\n\
            3,Curry,4,2025-03-30,3,Restaurant,C2,Vegetarian,Dinner\n";

        /// Three completed, one pending and two cancelled claims.
        pub const CLAIMS: &str = "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n\
            1,1,1,Completed,2025-03-01 09:00:00\n\
            2,2,1,Pending,2025-03-02 09:00:00\n\
            3,3,2,Completed,2025-03-03 09:00:00\n\
            4,3,2,Completed,2025-03-04 09:00:00\n\
            5,3,3,Cancelled,2025-03-05 09:00:00\n\
            6,2,1,Cancelled,2025-03-06 09:00:00\n";

        /// Write the four mixed CSV files into `dir`.
        ///
        /// # Errors
        ///
        /// Returns the first write failure.
        pub fn write_all(dir: &Path) -> io::Result<()> {
            super::write_tables(dir, [PROVIDERS, RECEIVERS, FOOD_LISTINGS, CLAIMS])
        }
    }
}
