//! Shared Diesel error mapping for the user and company repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    debug!(%error, "connection checkout failed");
    connection(error.message().to_owned())
}

/// Column guarded by a unique constraint named `<table>_<column>_key`.
fn unique_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.ends_with("_name_key") => "name",
        _ => "record",
    }
}

/// Map Diesel failures into query/connection/duplicate constructors.
///
/// Messages stay generic; the driver detail is logged at `debug`. Unique
/// violations hand the offending column to `duplicate`.
pub(crate) fn map_diesel_error<E, Q, C, D>(
    error: DieselError,
    query: Q,
    connection: C,
    duplicate: D,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    D: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            duplicate(unique_field(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("foreign key constraint violated")
        }
        _ => query("database error"),
    }
}

/// Failure of a write that must touch exactly one row.
#[derive(Debug)]
pub(crate) enum RowWriteError {
    Diesel(DieselError),
    RowsAffected(usize),
}

impl From<DieselError> for RowWriteError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

/// Accept exactly one affected row.
pub(crate) fn expect_single_row(affected: usize) -> Result<(), RowWriteError> {
    match affected {
        1 => Ok(()),
        n => Err(RowWriteError::RowsAffected(n)),
    }
}

/// Map a single-row write failure: zero rows is `not_found`, more than one is
/// a query error, anything else goes through [`map_diesel_error`].
pub(crate) fn map_row_write_error<E, N, Q, C, D>(
    error: RowWriteError,
    not_found: N,
    query: Q,
    connection: C,
    duplicate: D,
) -> E
where
    N: FnOnce() -> E,
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
    D: FnOnce(String) -> E,
{
    match error {
        RowWriteError::RowsAffected(0) => not_found(),
        RowWriteError::RowsAffected(n) => {
            query(format!("unexpected rows affected: expected 1, got {n}"))
        }
        RowWriteError::Diesel(err) => map_diesel_error(
            err,
            |message| query(message.to_owned()),
            |message| connection(message.to_owned()),
            |field| duplicate(field.to_owned()),
        ),
    }
}
