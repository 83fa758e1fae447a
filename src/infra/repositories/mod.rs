//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod guardian_repository;
mod role_repository;
mod user_profile_repository;
mod user_repository;

pub use guardian_repository::{GuardianRepository, GuardianStore};
pub use role_repository::{RoleRepository, RoleStore};
pub use user_profile_repository::{UserProfileRepository, UserProfileStore};
pub(crate) use user_repository::email_conflict;
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use guardian_repository::MockGuardianRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_profile_repository::MockUserProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
