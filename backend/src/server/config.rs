//! HTTP server configuration object.

use std::net::SocketAddr;

use foodshare::outbound::persistence::DbPool;

/// Store availability decided at startup.
#[derive(Clone)]
pub enum StoreState {
    /// Migrations ran and the pool is open.
    Ready(DbPool),
    /// The store could not be opened; the server runs degraded.
    Unavailable(String),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreState,
}

impl ServerConfig {
    /// Construct a configuration for `bind_addr` and the startup store state.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr, store: StoreState) -> Self {
        Self { bind_addr, store }
    }

    /// Whether the store opened successfully.
    #[must_use]
    pub const fn store_ready(&self) -> bool {
        matches!(self.store, StoreState::Ready(_))
    }
}
