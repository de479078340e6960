//! Company domain service.
//!
//! Creating a company provisions four dependent rows inside one transaction:
//! the company, the creator's employee record, an `admin` role linked to the
//! company, and the assignment of that role to the creator. Any failure rolls
//! the whole sequence back; a failed commit is reported without a rollback.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    CompanyCommand, CompanyDetails, CompanyPersistenceError, CompanyQuery, CompanyRepository,
    CompanyTransaction,
};
use crate::domain::{Company, CompanyId, Error, Role, UserId};

/// Company service implementing [`CompanyCommand`] and [`CompanyQuery`].
#[derive(Clone)]
pub struct CompanyService<R> {
    repo: Arc<R>,
}

impl<R> CompanyService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_persistence_error(operation: &str, error: CompanyPersistenceError) -> Error {
    match error {
        CompanyPersistenceError::Connection { message } => Error::service_unavailable(format!(
            "{operation}: company repository unavailable: {message}"
        )),
        CompanyPersistenceError::Query { message }
        | CompanyPersistenceError::Transaction { message } => {
            Error::internal(format!("{operation}: company repository error: {message}"))
        }
        CompanyPersistenceError::NotFound { id } => {
            Error::not_found(format!("company {id} not found"))
        }
        CompanyPersistenceError::Duplicate { field } => {
            Error::invalid_request(format!("company {field} is already taken"))
                .with_details(json!({ "field": field, "code": "already_taken" }))
        }
    }
}

fn require_identity(requester: UserId) -> Result<(), Error> {
    if requester.is_assigned() {
        Ok(())
    } else {
        Err(Error::unauthorized("caller identity is required"))
    }
}

/// Run every provisioning step against `tx`, stopping at the first failure.
async fn provision(
    tx: &mut dyn CompanyTransaction,
    company: &Company,
) -> Result<Company, Error> {
    let owner = company.owner_id;
    let created = tx
        .insert_company(company)
        .await
        .map_err(|err| map_persistence_error("insert company", err))?;

    tx.add_employee(created.id, owner)
        .await
        .map_err(|err| map_persistence_error("add company employee", err))?;

    let role = tx
        .insert_role(&Role::admin(created.id))
        .await
        .map_err(|err| map_persistence_error("insert admin role", err))?;
    tx.add_company_role(created.id, role.id)
        .await
        .map_err(|err| map_persistence_error("add company role", err))?;

    let employee = tx
        .find_company_employee(created.id, owner)
        .await
        .map_err(|err| map_persistence_error("find company employee", err))?
        .ok_or_else(|| {
            Error::internal(format!(
                "find company employee: no record for user {owner} in company {}",
                created.id
            ))
        })?;
    let company_role = tx
        .find_company_role(created.id, role.id)
        .await
        .map_err(|err| map_persistence_error("find company role", err))?
        .ok_or_else(|| {
            Error::internal(format!(
                "find company role: no record for role {} in company {}",
                role.id, created.id
            ))
        })?;

    tx.add_employee_role(employee.id, company_role.id)
        .await
        .map_err(|err| map_persistence_error("add employee role", err))?;

    Ok(created)
}

impl<R> CompanyService<R>
where
    R: CompanyRepository,
{
    async fn find_existing(&self, id: CompanyId) -> Result<Company, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error("read company", err))?
            .ok_or_else(|| Error::not_found(format!("company {id} not found")))
    }

    /// Load `id` and check that `requester` owns it.
    async fn find_owned(&self, requester: UserId, id: CompanyId) -> Result<Company, Error> {
        require_identity(requester)?;
        let company = self.find_existing(id).await?;
        if company.owner_id != requester {
            return Err(Error::forbidden(format!(
                "user {requester} does not own company {id}"
            )));
        }
        Ok(company)
    }
}

#[async_trait]
impl<R> CompanyCommand for CompanyService<R>
where
    R: CompanyRepository,
{
    async fn create(&self, requester: UserId, details: CompanyDetails) -> Result<Company, Error> {
        require_identity(requester)?;
        let company = Company::new(details.name, requester);
        company.validate_for_create()?;

        let mut tx = self
            .repo
            .begin()
            .await
            .map_err(|err| map_persistence_error("begin company transaction", err))?;

        match provision(tx.as_mut(), &company).await {
            Ok(created) => {
                tx.commit()
                    .await
                    .map_err(|err| map_persistence_error("commit company transaction", err))?;
                debug!(company_id = %created.id, owner_id = %requester, "company provisioned");
                Ok(created)
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!(
                        error = %rollback_error,
                        cause = %error,
                        "company transaction rollback failed"
                    );
                }
                Err(error)
            }
        }
    }

    async fn update(
        &self,
        requester: UserId,
        id: CompanyId,
        details: CompanyDetails,
    ) -> Result<Company, Error> {
        let existing = self.find_owned(requester, id).await?;
        let company = Company {
            name: details.name,
            ..existing
        };
        company.validate_for_update()?;
        self.repo
            .update(&company)
            .await
            .map_err(|err| map_persistence_error("update company", err))
    }

    async fn delete(&self, requester: UserId, id: CompanyId) -> Result<(), Error> {
        self.find_owned(requester, id).await?;
        self.repo
            .delete(id)
            .await
            .map_err(|err| map_persistence_error("delete company", err))
    }
}

#[async_trait]
impl<R> CompanyQuery for CompanyService<R>
where
    R: CompanyRepository,
{
    async fn get(&self, id: CompanyId) -> Result<Company, Error> {
        self.find_existing(id).await
    }
}

#[cfg(test)]
#[path = "company_service_tests.rs"]
mod tests;
