//! Surrogate identifiers generated by the database.
//!
//! Identifiers are positive integers once assigned; zero marks an entity that
//! has not been persisted yet.

use serde::{Deserialize, Serialize};

macro_rules! define_entity_id {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Identifier of an entity that has not been stored yet.
            pub const UNSET: Self = Self(0);

            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw database value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Whether the identifier refers to a stored row.
            #[must_use]
            pub const fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a row in `users`.
    UserId
);
define_entity_id!(
    /// Identifier of a row in `companies`.
    CompanyId
);
define_entity_id!(
    /// Identifier of a row in `roles`.
    RoleId
);
define_entity_id!(
    /// Identifier of a row in `company_employees`.
    CompanyEmployeeId
);
define_entity_id!(
    /// Identifier of a row in `company_roles`.
    CompanyRoleId
);
define_entity_id!(
    /// Identifier of a row in `employee_roles`.
    EmployeeRoleId
);
