//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Writes run inside a transaction so a statement that touches an unexpected
//! number of rows is rolled back before the error is reported. Deleting a
//! user also removes the roles of the companies they own.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::diesel_error_mapping::{
    RowWriteError, expect_single_row, map_diesel_error, map_pool_error, map_row_write_error,
};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::{companies, company_roles, roles, users};

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool and clock.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_diesel(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
        UserPersistenceError::duplicate,
    )
}

fn map_write(id: UserId, error: RowWriteError) -> UserPersistenceError {
    map_row_write_error(
        error,
        || UserPersistenceError::not_found(id.get()),
        UserPersistenceError::query,
        UserPersistenceError::connection,
        UserPersistenceError::duplicate,
    )
}

fn require_assigned(id: UserId) -> Result<(), UserPersistenceError> {
    if id.is_assigned() {
        Ok(())
    } else {
        Err(UserPersistenceError::query("user id is not assigned"))
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<User, UserPersistenceError> {
        let row = NewUserRow::new(user, self.clock.utc());
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserRow::as_returning())
                    .get_result::<UserRow>(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map(User::from)
        .map_err(map_diesel)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(map_diesel)
    }

    async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
        require_assigned(user.id)?;
        let changes = UserUpdate::new(user, self.clock.utc());
        let id = user.id;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        conn.transaction::<_, RowWriteError, _>(|conn| {
            async move {
                let mut rows: Vec<UserRow> = diesel::update(users::table.find(id.get()))
                    .set(&changes)
                    .returning(UserRow::as_returning())
                    .get_results(conn)
                    .await?;
                expect_single_row(rows.len())?;
                Ok(rows.swap_remove(0))
            }
            .scope_boxed()
        })
        .await
        .map(User::from)
        .map_err(|err| map_write(id, err))
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        require_assigned(id)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        // Owned companies and their join rows cascade from the user row; the
        // companies' roles are only reachable through company_roles.
        conn.transaction::<_, RowWriteError, _>(|conn| {
            async move {
                let role_ids: Vec<i64> = company_roles::table
                    .inner_join(companies::table)
                    .filter(companies::owner_id.eq(id.get()))
                    .select(company_roles::role_id)
                    .load(conn)
                    .await?;
                let deleted = diesel::delete(users::table.find(id.get()))
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
