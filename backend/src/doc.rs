//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every user, company and health endpoint together
//! with their request and response envelopes. Guarded routes declare the
//! `X-User-Id` header scheme. The document backs Swagger UI in debug builds
//! and is printed by `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::companies::{
    CompanyPayload, CompanyRequest, CompanyResponse, CompanyView, DeletedCompanyResponse,
};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::users::{
    DeletedUserResponse, Empty, UserPayload, UserRequest, UserResponse, UserView,
};

const USER_ID_SCHEME: &str = "UserIdHeader";

/// Enrich the generated document with the caller identity header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            USER_ID_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "Numeric id of the calling user, injected by the upstream gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Company API",
        description = "User accounts and company provisioning with owner-scoped access."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("UserIdHeader" = [])),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::update_company,
        crate::inbound::http::companies::delete_company,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserPayload,
        UserRequest,
        UserView,
        UserResponse,
        DeletedUserResponse,
        CompanyPayload,
        CompanyRequest,
        CompanyView,
        CompanyResponse,
        DeletedCompanyResponse,
        Empty,
        ErrorResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "User account management"),
        (name = "companies", description = "Company provisioning and ownership"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
