//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CompanyTransaction`]) are implemented by
//! persistence adapters. Driving ports (`*Command`, `*Query`) are implemented
//! by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod company_command;
mod company_repository;
mod user_command;
mod user_repository;

pub use company_command::{CompanyCommand, CompanyDetails, CompanyQuery};
#[cfg(test)]
pub use company_command::{MockCompanyCommand, MockCompanyQuery};
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{CompanyPersistenceError, CompanyRepository, CompanyTransaction};
pub use user_command::{UserCommand, UserCredentials, UserQuery};
#[cfg(test)]
pub use user_command::{MockUserCommand, MockUserQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
