//! Application settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `FOODSHARE_*` environment variables over an
//! optional configuration file.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_URL: &str = "food_waste.db";
const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_POOL_SIZE: u32 = 1;
const DEFAULT_DATA_DIR: &str = "data";

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOODSHARE")]
pub struct AppSettings {
    /// SQLite database path.
    pub database_url: Option<String>,
    /// Listen address.
    pub bind_addr: Option<SocketAddr>,
    /// Connections kept in the pool.
    pub pool_size: Option<u32>,
    /// Run the CSV bulk loader before serving.
    #[ortho_config(default = false)]
    pub load_on_startup: bool,
    /// Directory holding the CSV sources.
    pub data_dir: Option<PathBuf>,
}

impl AppSettings {
    /// Database path, falling back to `food_waste.db`.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Pool size, falling back to a single connection.
    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// CSV directory, falling back to `data`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const KEYS: [&str; 5] = [
        "FOODSHARE_DATABASE_URL",
        "FOODSHARE_BIND_ADDR",
        "FOODSHARE_POOL_SIZE",
        "FOODSHARE_LOAD_ON_STARTUP",
        "FOODSHARE_DATA_DIR",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("foodshare")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.database_url(), "food_waste.db");
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(settings.pool_size(), 1);
        assert!(!settings.load_on_startup);
        assert_eq!(settings.data_dir(), PathBuf::from("data"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FOODSHARE_DATABASE_URL", Some("/tmp/food.db".to_owned())),
            ("FOODSHARE_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("FOODSHARE_POOL_SIZE", Some("4".to_owned())),
            ("FOODSHARE_LOAD_ON_STARTUP", Some("true".to_owned())),
            ("FOODSHARE_DATA_DIR", Some("/srv/csv".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.database_url(), "/tmp/food.db");
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse().expect("addr"));
        assert_eq!(settings.pool_size(), 4);
        assert!(settings.load_on_startup);
        assert_eq!(settings.data_dir(), PathBuf::from("/srv/csv"));
    }
}
