//! Shared helpers for the database-backed integration suites.
//!
//! Each suite compiles as its own crate, so the helpers here cover the whole
//! lifecycle the suites share: provisioning a fresh database on an embedded
//! cluster, applying the embedded migrations, and counting rows with a plain
//! `postgres` client that sits outside Diesel's transaction handling.

use company_api::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

/// Tables written by user signup and company provisioning.
pub const PROVISIONED_TABLES: [&str; 5] = [
    "companies",
    "company_employees",
    "roles",
    "company_roles",
    "employee_roles",
];

/// Render a `postgres` error with its SQLSTATE and server message.
///
/// `postgres::Error`'s `Display` collapses database errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create an empty, uniquely named database on `cluster` and return its URL.
pub fn create_database(cluster: &TestCluster, prefix: &str) -> Result<String, String> {
    let name = format!("{prefix}_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(cluster.connection().database_url(&name))
}

/// Apply the crate's embedded migrations to `url`.
pub async fn migrate(url: &str) -> Result<(), String> {
    run_migrations(url.to_owned())
        .await
        .map_err(|err| err.to_string())
}

/// Number of rows currently stored in `table`.
pub fn count_rows(url: &str, table: &str) -> i64 {
    let mut client = Client::connect(url, NoTls)
        .unwrap_or_else(|err| panic!("connect for count: {}", format_postgres_error(&err)));
    client
        .query_one(&format!("SELECT COUNT(*) FROM {table}"), &[])
        .unwrap_or_else(|err| panic!("count {table}: {}", format_postgres_error(&err)))
        .get(0)
}

/// Row counts for every provisioning table, in [`PROVISIONED_TABLES`] order.
pub fn provisioned_counts(url: &str) -> [i64; 5] {
    PROVISIONED_TABLES.map(|table| count_rows(url, table))
}
