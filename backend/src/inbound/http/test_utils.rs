//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockCompanyCommand, MockCompanyQuery, MockUserCommand, MockUserQuery,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Mocked driving ports; set expectations on the ones a test exercises.
///
/// Ports left untouched panic if a handler calls them.
#[derive(Default)]
pub struct MockPorts {
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
    pub companies: MockCompanyCommand,
    pub companies_query: MockCompanyQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.users),
            Arc::new(self.users_query),
            Arc::new(self.companies),
            Arc::new(self.companies_query),
        )
    }
}

/// Application wired exactly like production routing, backed by `ports`.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .configure(configure)
}
