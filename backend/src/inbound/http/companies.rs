//! Company API handlers.
//!
//! ```text
//! POST   /company               {"company":{"name":"Acme"}}
//! GET    /company/{company_id}
//! PUT    /company/{company_id}  {"company":{"name":"Acme Ltd"}}
//! DELETE /company/{company_id}
//! ```
//!
//! Reading a company is public. Creating one makes the caller its owner and
//! first employee; only the owner may rename or delete it.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CompanyDetails;
use crate::domain::{Company, CompanyId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::identity::RequesterId;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::Empty;

/// Company attributes supplied by the caller.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CompanyPayload {
    #[schema(example = "Acme")]
    pub name: String,
}

/// Request body for `POST /company` and `PUT /company/{company_id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CompanyRequest {
    pub company: CompanyPayload,
}

impl From<CompanyRequest> for CompanyDetails {
    fn from(value: CompanyRequest) -> Self {
        Self {
            name: value.company.name,
        }
    }
}

/// Public view of a stored company.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Acme")]
    pub name: String,
    #[schema(example = 1)]
    pub owner_id: i64,
}

impl From<Company> for CompanyView {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.get(),
            name: company.name,
            owner_id: company.owner_id.get(),
        }
    }
}

/// Response body wrapping a single company.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CompanyResponse {
    pub company: CompanyView,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            company: company.into(),
        }
    }
}

/// Response body for `DELETE /company/{company_id}`: `{"company":{}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeletedCompanyResponse {
    pub company: Empty,
}

/// Create a company owned by the caller.
///
/// The company, the caller's employee record, and an `admin` role granted to
/// the caller are stored atomically.
#[utoipa::path(
    post,
    path = "/company",
    request_body = CompanyRequest,
    responses(
        (status = 200, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or malformed X-User-Id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "createCompany"
)]
#[post("/company")]
pub async fn create_company(
    state: web::Data<HttpState>,
    requester: RequesterId,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<web::Json<CompanyResponse>> {
    let company = state
        .companies
        .create(requester.user_id(), payload.into_inner().into())
        .await?;
    Ok(web::Json(company.into()))
}

/// Fetch a company.
#[utoipa::path(
    get,
    path = "/company/{company_id}",
    params(("company_id" = i64, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 404, description = "Company not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "getCompany",
    security([])
)]
#[get("/company/{company_id}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CompanyResponse>> {
    let company = state
        .companies_query
        .get(CompanyId::new(path.into_inner()))
        .await?;
    Ok(web::Json(company.into()))
}

/// Rename a company owned by the caller.
#[utoipa::path(
    put,
    path = "/company/{company_id}",
    params(("company_id" = i64, Path, description = "Company identifier")),
    request_body = CompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or malformed X-User-Id", body = ErrorResponse),
        (status = 403, description = "Caller does not own the company", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "updateCompany"
)]
#[put("/company/{company_id}")]
pub async fn update_company(
    state: web::Data<HttpState>,
    requester: RequesterId,
    path: web::Path<i64>,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<web::Json<CompanyResponse>> {
    let company = state
        .companies
        .update(
            requester.user_id(),
            CompanyId::new(path.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(company.into()))
}

/// Delete a company owned by the caller, with its memberships and roles.
#[utoipa::path(
    delete,
    path = "/company/{company_id}",
    params(("company_id" = i64, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Company deleted", body = DeletedCompanyResponse),
        (status = 401, description = "Missing or malformed X-User-Id", body = ErrorResponse),
        (status = 403, description = "Caller does not own the company", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["companies"],
    operation_id = "deleteCompany"
)]
#[delete("/company/{company_id}")]
pub async fn delete_company(
    state: web::Data<HttpState>,
    requester: RequesterId,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DeletedCompanyResponse>> {
    state
        .companies
        .delete(requester.user_id(), CompanyId::new(path.into_inner()))
        .await?;
    Ok(web::Json(DeletedCompanyResponse::default()))
}

#[cfg(test)]
#[path = "companies_tests.rs"]
mod tests;
