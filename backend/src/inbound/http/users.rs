//! User API handlers.
//!
//! ```text
//! POST   /user            {"user":{"name":"Bob","password":"qwerty12"}}
//! GET    /user/{user_id}
//! PUT    /user/{user_id}  {"user":{"name":"Bob","password":"s3cret-pass"}}
//! DELETE /user/{user_id}
//! ```
//!
//! Every route except signup reads the caller from `X-User-Id`; callers may
//! only act on their own account.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UserCredentials;
use crate::domain::{MASKED_PASSWORD, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::identity::RequesterId;
use crate::inbound::http::state::HttpState;

/// Name and plaintext password submitted on signup or update.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserPayload {
    #[schema(example = "Bob")]
    pub name: String,
    #[schema(example = "qwerty12")]
    pub password: String,
}

impl From<UserPayload> for UserCredentials {
    fn from(value: UserPayload) -> Self {
        Self {
            name: value.name,
            password: value.password,
        }
    }
}

/// Request body for `POST /user` and `PUT /user/{user_id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    pub user: UserPayload,
}

/// Public view of a stored user. The password is always masked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Bob")]
    pub name: String,
    #[schema(example = "*****")]
    pub password: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
            password: MASKED_PASSWORD.to_owned(),
        }
    }
}

/// Response body wrapping a single user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: UserView,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { user: user.into() }
    }
}

/// Empty object rendered as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct Empty {}

/// Response body for `DELETE /user/{user_id}`: `{"user":{}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeletedUserResponse {
    pub user: Empty,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/user",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials = UserCredentials::from(payload.into_inner().user);
    let user = state.users.create(credentials).await?;
    Ok(web::Json(user.into()))
}

/// Fetch the caller's own account.
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Missing or malformed X-User-Id", body = ErrorResponse),
        (status = 403, description = "Caller is not this user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    requester: RequesterId,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = UserId::new(path.into_inner());
    let user = state.users_query.get(requester.user_id(), id).await?;
    Ok(web::Json(user.into()))
}

/// Replace the caller's name and password.
#[utoipa::path(
    put,
    path = "/user/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or malformed X-User-Id", body = ErrorResponse),
        (status = 403, description = "Caller is not this user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{user_id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    requester: RequesterId,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = UserId::new(path.into_inner());
    let credentials = UserCredentials::from(payload.into_inner().user);
    let user = state
        .users
        .update(requester.user_id(), id, credentials)
        .await?;
    Ok(web::Json(user.into()))
}

/// Delete the caller's account.
#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeletedUserResponse),
        (status = 401, description = "Missing or malformed X-User-Id", body = ErrorResponse),
        (status = 403, description = "Caller is not this user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    requester: RequesterId,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DeletedUserResponse>> {
    let id = UserId::new(path.into_inner());
    state.users.delete(requester.user_id(), id).await?;
    Ok(web::Json(DeletedUserResponse::default()))
}
