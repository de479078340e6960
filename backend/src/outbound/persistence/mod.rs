//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user and company repository ports backed
//! by PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures are mapped to the port
//!   error types; driver detail is logged, not returned.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use company_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//! use mockable::DefaultClock;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/company")).await?;
//! let users = DieselUserRepository::new(pool, Arc::new(DefaultClock));
//! # Ok(())
//! # }
//! ```

mod diesel_company_repository;
mod diesel_company_transaction;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_company_repository::DieselCompanyRepository;
pub use diesel_company_transaction::DieselCompanyTransaction;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
