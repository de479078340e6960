//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities for users and companies, the
//! validation rules they obey, and the services that enforce authorisation
//! before delegating to repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Password: user accounts with Argon2id password hashes.
//! - Company, Role and the association records created with a company.
//! - UserService, CompanyService: implementations of the driving ports.

pub mod company;
mod company_service;
pub mod error;
pub mod ids;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;
pub mod validation;

pub use self::company::{
    ADMIN_ROLE_NAME, Company, CompanyEmployee, CompanyRole, EmployeeRole, Role,
};
pub use self::company_service::CompanyService;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{
    CompanyEmployeeId, CompanyId, CompanyRoleId, EmployeeRoleId, RoleId, UserId,
};
pub use self::password::{MASKED_PASSWORD, Password, PasswordHashError};
pub use self::trace_id::TraceId;
pub use self::user::User;
pub use self::user_service::UserService;
pub use self::validation::ValidationError;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
