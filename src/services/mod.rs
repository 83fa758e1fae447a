//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on the `UnitOfWork` abstraction for
//! repository access and multi-table writes.

mod auth_service;
pub mod container;
mod guardian_service;
mod role_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse, UserSummary};
pub use guardian_service::{GuardianManager, GuardianService};
pub use role_service::{default_description, RoleManager, RoleService};
pub(crate) use role_service::find_or_create_role;
pub use user_service::{NewUser, UserChanges, UserManager, UserService};
