//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Writes stamp `created_at` and `updated_at`
//! from the repository clock rather than relying on column defaults.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Company, CompanyEmployee, CompanyEmployeeId, CompanyId, CompanyRole, CompanyRoleId,
    EmployeeRole, EmployeeRoleId, Password, Role, RoleId, User, UserId,
};

use super::schema::{company_employees, company_roles, companies, employee_roles, roles, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub password_hash: String,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            password: Password::from_hash(row.password_hash),
            updated_at: Some(row.updated_at),
        }
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewUserRow<'a> {
    pub(crate) fn new(user: &'a User, now: DateTime<Utc>) -> Self {
        Self {
            name: user.name.as_str(),
            password_hash: user.password.phc(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> UserUpdate<'a> {
    pub(crate) fn new(user: &'a User, now: DateTime<Utc>) -> Self {
        Self {
            name: user.name.as_str(),
            password_hash: user.password.phc(),
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

/// Row struct for reading from the companies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: CompanyId::new(row.id),
            name: row.name,
            owner_id: UserId::new(row.owner_id),
            updated_at: Some(row.updated_at),
        }
    }
}

/// Insertable struct for creating new company records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub(crate) struct NewCompanyRow<'a> {
    pub name: &'a str,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewCompanyRow<'a> {
    pub(crate) fn new(company: &'a Company, now: DateTime<Utc>) -> Self {
        Self {
            name: company.name.as_str(),
            owner_id: company.owner_id.get(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset struct for renaming a company.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = companies)]
pub(crate) struct CompanyUpdate<'a> {
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Row struct for reading from the roles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoleRow {
    pub id: i64,
    pub name: String,
}

impl RoleRow {
    /// Attach the company scope, which is stored in `company_roles`.
    pub(crate) fn into_role(self, company_id: CompanyId) -> Role {
        Role {
            id: RoleId::new(self.id),
            name: self.name,
            company_id,
        }
    }
}

/// Insertable struct for creating new role records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roles)]
pub(crate) struct NewRoleRow<'a> {
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Association records
// ---------------------------------------------------------------------------

/// Row struct for reading from the company_employees table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = company_employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyEmployeeRow {
    pub id: i64,
    pub company_id: i64,
    pub user_id: i64,
}

impl From<CompanyEmployeeRow> for CompanyEmployee {
    fn from(row: CompanyEmployeeRow) -> Self {
        Self {
            id: CompanyEmployeeId::new(row.id),
            company_id: CompanyId::new(row.company_id),
            user_id: UserId::new(row.user_id),
        }
    }
}

/// Insertable struct for enrolling a user in a company.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = company_employees)]
pub(crate) struct NewCompanyEmployeeRow {
    pub company_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the company_roles table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = company_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRoleRow {
    pub id: i64,
    pub company_id: i64,
    pub role_id: i64,
}

impl From<CompanyRoleRow> for CompanyRole {
    fn from(row: CompanyRoleRow) -> Self {
        Self {
            id: CompanyRoleId::new(row.id),
            company_id: CompanyId::new(row.company_id),
            role_id: RoleId::new(row.role_id),
        }
    }
}

/// Insertable struct for linking a role to a company.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = company_roles)]
pub(crate) struct NewCompanyRoleRow {
    pub company_id: i64,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the employee_roles table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = employee_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRoleRow {
    pub id: i64,
    pub company_employee_id: i64,
    pub company_role_id: i64,
}

impl From<EmployeeRoleRow> for EmployeeRole {
    fn from(row: EmployeeRoleRow) -> Self {
        Self {
            id: EmployeeRoleId::new(row.id),
            company_employee_id: CompanyEmployeeId::new(row.company_employee_id),
            company_role_id: CompanyRoleId::new(row.company_role_id),
        }
    }
}

/// Insertable struct for granting a company role to an employee.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = employee_roles)]
pub(crate) struct NewEmployeeRoleRow {
    pub company_employee_id: i64,
    pub company_role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
