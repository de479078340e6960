//! Port abstraction for company persistence, including the explicit
//! transaction used to provision a new company.
use async_trait::async_trait;

use crate::domain::{
    Company, CompanyEmployee, CompanyEmployeeId, CompanyId, CompanyRole, CompanyRoleId,
    EmployeeRole, Role, RoleId, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by company repository adapters.
    pub enum CompanyPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "company repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "company repository query failed: {message}",
        /// An update or delete matched no row.
        NotFound { id: i64 } => "company {id} not found",
        /// A unique column already holds the submitted value.
        Duplicate { field: String } => "company {field} is already taken",
        /// Beginning, committing, or rolling back a transaction failed.
        Transaction { message: String } => "company transaction failed: {message}",
    }
}

/// Unit of work spanning every insert needed to provision a company.
///
/// Each method runs against the same database transaction. Dropping the
/// handle without calling [`commit`](Self::commit) discards the work.
#[async_trait]
pub trait CompanyTransaction: Send {
    /// Insert the company row and return it with its generated id.
    ///
    /// Fails with [`CompanyPersistenceError::Duplicate`] when the name is
    /// taken.
    async fn insert_company(
        &mut self,
        company: &Company,
    ) -> Result<Company, CompanyPersistenceError>;

    /// Record `user_id` as an employee of `company_id`.
    async fn add_employee(
        &mut self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> Result<CompanyEmployee, CompanyPersistenceError>;

    /// Insert a role row and return it with its generated id.
    async fn insert_role(&mut self, role: &Role) -> Result<Role, CompanyPersistenceError>;

    /// Make `role_id` available inside `company_id`.
    async fn add_company_role(
        &mut self,
        company_id: CompanyId,
        role_id: RoleId,
    ) -> Result<CompanyRole, CompanyPersistenceError>;

    /// Look up the employee record linking `user_id` to `company_id`.
    async fn find_company_employee(
        &mut self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> Result<Option<CompanyEmployee>, CompanyPersistenceError>;

    /// Look up the record linking `role_id` to `company_id`.
    async fn find_company_role(
        &mut self,
        company_id: CompanyId,
        role_id: RoleId,
    ) -> Result<Option<CompanyRole>, CompanyPersistenceError>;

    /// Grant a company role to a company employee.
    async fn add_employee_role(
        &mut self,
        company_employee_id: CompanyEmployeeId,
        company_role_id: CompanyRoleId,
    ) -> Result<EmployeeRole, CompanyPersistenceError>;

    /// Make every write in the transaction durable.
    async fn commit(self: Box<Self>) -> Result<(), CompanyPersistenceError>;

    /// Discard every write in the transaction.
    async fn rollback(self: Box<Self>) -> Result<(), CompanyPersistenceError>;
}

/// Storage for [`Company`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Open a transaction for the provisioning workflow.
    async fn begin(&self) -> Result<Box<dyn CompanyTransaction>, CompanyPersistenceError>;

    /// Fetch a company by identifier.
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, CompanyPersistenceError>;

    /// Overwrite the name of an existing company.
    ///
    /// Fails with [`CompanyPersistenceError::NotFound`] when no row matches and
    /// [`CompanyPersistenceError::Duplicate`] when the new name is taken.
    async fn update(&self, company: &Company) -> Result<Company, CompanyPersistenceError>;

    /// Remove a company together with its memberships and roles.
    ///
    /// Fails with [`CompanyPersistenceError::NotFound`] when no row matches.
    async fn delete(&self, id: CompanyId) -> Result<(), CompanyPersistenceError>;
}
