//! Shared cache-control policies for HTTP handlers.

/// Report data changes with every load or mutation, so clients must not
/// reuse it.
pub const NO_STORE: &str = "no-store";

/// Build the cache-control header tuple for report responses.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
