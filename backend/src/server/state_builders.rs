//! Wiring of domain services onto the Diesel adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use company_api::domain::{CompanyService, UserService};
use company_api::inbound::http::state::HttpState;
use company_api::outbound::persistence::{DbPool, DieselCompanyRepository, DieselUserRepository};

/// Build the handler state with database-backed services sharing `pool`.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(UserService::new(Arc::new(DieselUserRepository::new(
        pool.clone(),
        Arc::clone(&clock),
    ))));
    let companies = Arc::new(CompanyService::new(Arc::new(DieselCompanyRepository::new(
        pool.clone(),
        clock,
    ))));

    web::Data::new(HttpState::new(
        users.clone(),
        users,
        companies.clone(),
        companies,
    ))
}
