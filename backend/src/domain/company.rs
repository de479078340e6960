//! Company data model and the association records created alongside it.

use chrono::{DateTime, Utc};

use super::validation::{check_name, ValidationError};
use super::{CompanyEmployeeId, CompanyId, CompanyRoleId, EmployeeRoleId, RoleId, UserId};

/// Name of the role granted to the user who creates a company.
pub const ADMIN_ROLE_NAME: &str = "admin";

/// A company owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub owner_id: UserId,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Company {
    /// Build a company that has not been stored yet.
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            id: CompanyId::UNSET,
            name: name.into(),
            owner_id,
            updated_at: None,
        }
    }

    /// Replace the identifier.
    #[must_use]
    pub fn with_id(mut self, id: CompanyId) -> Self {
        self.id = id;
        self
    }

    /// Check the fields required to insert the company.
    ///
    /// # Errors
    /// Returns the first failing field rule.
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        if !self.owner_id.is_assigned() {
            return Err(ValidationError::UnassignedOwner);
        }
        Ok(())
    }

    /// Check the fields required to update an existing company.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnassignedId`] when `id` is not positive, or
    /// the first failing field rule.
    pub fn validate_for_update(&self) -> Result<(), ValidationError> {
        if !self.id.is_assigned() {
            return Err(ValidationError::UnassignedId);
        }
        self.validate_for_create()
    }

    /// Whether the company may be inserted.
    #[must_use]
    pub fn is_valid_for_create(&self) -> bool {
        self.validate_for_create().is_ok()
    }

    /// Whether the company may overwrite a stored row.
    #[must_use]
    pub fn is_valid_for_update(&self) -> bool {
        self.validate_for_update().is_ok()
    }
}

/// A named role scoped to one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub company_id: CompanyId,
}

impl Role {
    /// The administrator role for `company_id`, not yet stored.
    ///
    /// # Examples
    /// ```
    /// use company_api::domain::{CompanyId, Role};
    ///
    /// let role = Role::admin(CompanyId::new(3));
    /// assert_eq!(role.name, "admin");
    /// ```
    #[must_use]
    pub fn admin(company_id: CompanyId) -> Self {
        Self {
            id: RoleId::UNSET,
            name: ADMIN_ROLE_NAME.to_owned(),
            company_id,
        }
    }
}

/// Membership of a user in a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyEmployee {
    pub id: CompanyEmployeeId,
    pub company_id: CompanyId,
    pub user_id: UserId,
}

/// Availability of a role inside a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyRole {
    pub id: CompanyRoleId,
    pub company_id: CompanyId,
    pub role_id: RoleId,
}

/// Assignment of a company role to a company employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeRole {
    pub id: EmployeeRoleId,
    pub company_employee_id: CompanyEmployeeId,
    pub company_role_id: CompanyRoleId,
}
