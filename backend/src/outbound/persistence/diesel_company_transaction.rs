//! PostgreSQL transaction handle driving company provisioning.
//!
//! The handle owns a pooled connection on which `BEGIN` has already been
//! issued. Every step runs on that connection until the domain service calls
//! `commit` or `rollback`. A handle dropped mid-transaction leaves the
//! connection flagged as broken, so the pool closes it instead of reusing it.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, RunQueryDsl, TransactionManager};
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{CompanyPersistenceError, CompanyTransaction};
use crate::domain::{
    Company, CompanyEmployee, CompanyEmployeeId, CompanyId, CompanyRole, CompanyRoleId,
    EmployeeRole, Role, RoleId, UserId,
};

use super::diesel_error_mapping::map_diesel_error;
use super::models::{
    CompanyEmployeeRow, CompanyRoleRow, CompanyRow, EmployeeRoleRow, NewCompanyEmployeeRow,
    NewCompanyRoleRow, NewCompanyRow, NewEmployeeRoleRow, NewRoleRow, RoleRow,
};
use super::schema::{company_employees, company_roles, companies, employee_roles, roles};

type PgConnection = PooledConnection<'static, AsyncPgConnection>;

fn map_step_error(error: diesel::result::Error) -> CompanyPersistenceError {
    map_diesel_error(
        error,
        CompanyPersistenceError::query,
        CompanyPersistenceError::connection,
        CompanyPersistenceError::duplicate,
    )
}

fn map_control_error(operation: &str, error: diesel::result::Error) -> CompanyPersistenceError {
    debug!(%error, operation, "transaction control statement failed");
    CompanyPersistenceError::transaction(format!("{operation} failed: {error}"))
}

/// Open transaction on a dedicated pooled connection.
pub struct DieselCompanyTransaction {
    conn: PgConnection,
    clock: Arc<dyn Clock>,
}

impl DieselCompanyTransaction {
    /// Issue `BEGIN` on `conn` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyPersistenceError::Transaction`] when the database
    /// refuses to start the transaction.
    pub(crate) async fn begin(
        mut conn: PgConnection,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CompanyPersistenceError> {
        AnsiTransactionManager::begin_transaction(&mut *conn)
            .await
            .map_err(|err| map_control_error("begin", err))?;
        Ok(Self { conn, clock })
    }
}

#[async_trait]
impl CompanyTransaction for DieselCompanyTransaction {
    async fn insert_company(
        &mut self,
        company: &Company,
    ) -> Result<Company, CompanyPersistenceError> {
        let row = NewCompanyRow::new(company, self.clock.utc());
        diesel::insert_into(companies::table)
            .values(&row)
            .returning(CompanyRow::as_returning())
            .get_result::<CompanyRow>(&mut *self.conn)
            .await
            .map(Company::from)
            .map_err(map_step_error)
    }

    async fn add_employee(
        &mut self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> Result<CompanyEmployee, CompanyPersistenceError> {
        let now = self.clock.utc();
        diesel::insert_into(company_employees::table)
            .values(NewCompanyEmployeeRow {
                company_id: company_id.get(),
                user_id: user_id.get(),
                created_at: now,
                updated_at: now,
            })
            .returning(CompanyEmployeeRow::as_returning())
            .get_result::<CompanyEmployeeRow>(&mut *self.conn)
            .await
            .map(CompanyEmployee::from)
            .map_err(map_step_error)
    }

    async fn insert_role(&mut self, role: &Role) -> Result<Role, CompanyPersistenceError> {
        let now = self.clock.utc();
        diesel::insert_into(roles::table)
            .values(NewRoleRow {
                name: role.name.as_str(),
                created_at: now,
                updated_at: now,
            })
            .returning(RoleRow::as_returning())
            .get_result::<RoleRow>(&mut *self.conn)
            .await
            .map(|row| row.into_role(role.company_id))
            .map_err(map_step_error)
    }

    async fn add_company_role(
        &mut self,
        company_id: CompanyId,
        role_id: RoleId,
    ) -> Result<CompanyRole, CompanyPersistenceError> {
        let now = self.clock.utc();
        diesel::insert_into(company_roles::table)
            .values(NewCompanyRoleRow {
                company_id: company_id.get(),
                role_id: role_id.get(),
                created_at: now,
                updated_at: now,
            })
            .returning(CompanyRoleRow::as_returning())
            .get_result::<CompanyRoleRow>(&mut *self.conn)
            .await
            .map(CompanyRole::from)
            .map_err(map_step_error)
    }

    async fn find_company_employee(
        &mut self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> Result<Option<CompanyEmployee>, CompanyPersistenceError> {
        company_employees::table
            .filter(company_employees::company_id.eq(company_id.get()))
            .filter(company_employees::user_id.eq(user_id.get()))
            .select(CompanyEmployeeRow::as_select())
            .first::<CompanyEmployeeRow>(&mut *self.conn)
            .await
            .optional()
            .map(|row| row.map(CompanyEmployee::from))
            .map_err(map_step_error)
    }

    async fn find_company_role(
        &mut self,
        company_id: CompanyId,
        role_id: RoleId,
    ) -> Result<Option<CompanyRole>, CompanyPersistenceError> {
        company_roles::table
            .filter(company_roles::company_id.eq(company_id.get()))
            .filter(company_roles::role_id.eq(role_id.get()))
            .select(CompanyRoleRow::as_select())
            .first::<CompanyRoleRow>(&mut *self.conn)
            .await
            .optional()
            .map(|row| row.map(CompanyRole::from))
            .map_err(map_step_error)
    }

    async fn add_employee_role(
        &mut self,
        company_employee_id: CompanyEmployeeId,
        company_role_id: CompanyRoleId,
    ) -> Result<EmployeeRole, CompanyPersistenceError> {
        let now = self.clock.utc();
        diesel::insert_into(employee_roles::table)
            .values(NewEmployeeRoleRow {
                company_employee_id: company_employee_id.get(),
                company_role_id: company_role_id.get(),
                created_at: now,
                updated_at: now,
            })
            .returning(EmployeeRoleRow::as_returning())
            .get_result::<EmployeeRoleRow>(&mut *self.conn)
            .await
            .map(EmployeeRole::from)
            .map_err(map_step_error)
    }

    async fn commit(mut self: Box<Self>) -> Result<(), CompanyPersistenceError> {
        AnsiTransactionManager::commit_transaction(&mut *self.conn)
            .await
            .map_err(|err| map_control_error("commit", err))
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), CompanyPersistenceError> {
        AnsiTransactionManager::rollback_transaction(&mut *self.conn)
            .await
            .map_err(|err| map_control_error("rollback", err))
    }
}
