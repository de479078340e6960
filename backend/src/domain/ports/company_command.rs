//! Driving ports for companies.

use async_trait::async_trait;

use crate::domain::{Company, CompanyId, Error, UserId};

/// Caller-editable company fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDetails {
    pub name: String,
}

/// Mutating company operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyCommand: Send + Sync {
    /// Create a company owned by `requester`, enrol them as its first
    /// employee, and grant them the admin role, atomically.
    async fn create(&self, requester: UserId, details: CompanyDetails) -> Result<Company, Error>;

    /// Rename `id`. Only the owner may do so.
    async fn update(
        &self,
        requester: UserId,
        id: CompanyId,
        details: CompanyDetails,
    ) -> Result<Company, Error>;

    /// Remove `id`. Only the owner may do so.
    async fn delete(&self, requester: UserId, id: CompanyId) -> Result<(), Error>;
}

/// Read-only company operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyQuery: Send + Sync {
    /// Fetch `id`.
    async fn get(&self, id: CompanyId) -> Result<Company, Error>;
}
