//! HTTP server configuration object.

use company_api::outbound::persistence::DbPool;

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Bind to `bind_addr` and serve requests backed by `db_pool`.
    #[must_use]
    pub fn new(bind_addr: impl Into<String>, db_pool: DbPool) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            db_pool,
        }
    }
}
