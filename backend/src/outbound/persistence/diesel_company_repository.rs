//! PostgreSQL-backed `CompanyRepository` implementation using Diesel ORM.
//!
//! Provisioning hands out a [`DieselCompanyTransaction`] bound to an owned
//! pooled connection. Renames and deletes run in their own short
//! transactions and insist on touching exactly one company row.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use mockable::Clock;

use crate::domain::ports::{CompanyPersistenceError, CompanyRepository, CompanyTransaction};
use crate::domain::{Company, CompanyId};

use super::diesel_company_transaction::DieselCompanyTransaction;
use super::diesel_error_mapping::{
    RowWriteError, expect_single_row, map_diesel_error, map_pool_error, map_row_write_error,
};
use super::models::{CompanyRow, CompanyUpdate};
use super::pool::DbPool;
use super::schema::{company_roles, companies, roles};

/// Diesel-backed implementation of the [`CompanyRepository`] port.
#[derive(Clone)]
pub struct DieselCompanyRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselCompanyRepository {
    /// Create a new repository with the given connection pool and clock.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_diesel(error: diesel::result::Error) -> CompanyPersistenceError {
    map_diesel_error(
        error,
        CompanyPersistenceError::query,
        CompanyPersistenceError::connection,
        CompanyPersistenceError::duplicate,
    )
}

fn map_write(id: CompanyId, error: RowWriteError) -> CompanyPersistenceError {
    map_row_write_error(
        error,
        || CompanyPersistenceError::not_found(id.get()),
        CompanyPersistenceError::query,
        CompanyPersistenceError::connection,
        CompanyPersistenceError::duplicate,
    )
}

fn require_assigned(id: CompanyId) -> Result<(), CompanyPersistenceError> {
    if id.is_assigned() {
        Ok(())
    } else {
        Err(CompanyPersistenceError::query("company id is not assigned"))
    }
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    async fn begin(&self) -> Result<Box<dyn CompanyTransaction>, CompanyPersistenceError> {
        let conn = self
            .pool
            .get_owned()
            .await
            .map_err(|err| map_pool_error(err, CompanyPersistenceError::connection))?;
        let tx = DieselCompanyTransaction::begin(conn, Arc::clone(&self.clock)).await?;
        Ok(Box::new(tx))
    }

    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, CompanyPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CompanyPersistenceError::connection))?;

        companies::table
            .find(id.get())
            .select(CompanyRow::as_select())
            .first::<CompanyRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Company::from))
            .map_err(map_diesel)
    }

    async fn update(&self, company: &Company) -> Result<Company, CompanyPersistenceError> {
        require_assigned(company.id)?;
        let id = company.id;
        let changes = CompanyUpdate {
            name: company.name.as_str(),
            updated_at: self.clock.utc(),
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CompanyPersistenceError::connection))?;

        conn.transaction::<_, RowWriteError, _>(|conn| {
            async move {
                let mut rows: Vec<CompanyRow> = diesel::update(companies::table.find(id.get()))
                    .set(&changes)
                    .returning(CompanyRow::as_returning())
                    .get_results(conn)
                    .await?;
                expect_single_row(rows.len())?;
                Ok(rows.swap_remove(0))
            }
            .scope_boxed()
        })
        .await
        .map(Company::from)
        .map_err(|err| map_write(id, err))
    }

    async fn delete(&self, id: CompanyId) -> Result<(), CompanyPersistenceError> {
        require_assigned(id)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CompanyPersistenceError::connection))?;

        // Memberships and role links cascade from the company row; the role
        // rows themselves are only reachable through company_roles.
        conn.transaction::<_, RowWriteError, _>(|conn| {
            async move {
                let role_ids: Vec<i64> = company_roles::table
                    .filter(company_roles::company_id.eq(id.get()))
                    .select(company_roles::role_id)
                    .load(conn)
                    .await?;
                let deleted = diesel::delete(companies::table.find(id.get()))
                    .execute(conn)
                    .await?;
                expect_single_row(deleted)?;
                diesel::delete(roles::table.filter(roles::id.eq_any(role_ids)))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_write(id, err))
    }
}
