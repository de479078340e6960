//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CompanyCommand, CompanyQuery, UserCommand, UserQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub companies: Arc<dyn CompanyCommand>,
    pub companies_query: Arc<dyn CompanyQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the user and company handlers.
    pub fn new(
        users: Arc<dyn UserCommand>,
        users_query: Arc<dyn UserQuery>,
        companies: Arc<dyn CompanyCommand>,
        companies_query: Arc<dyn CompanyQuery>,
    ) -> Self {
        Self {
            users,
            users_query,
            companies,
            companies_query,
        }
    }
}
