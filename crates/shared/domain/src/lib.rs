//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Entities are built through validating factories (`create` / `make`),
//! rehydrated through `reconstruct`, and changed only through update methods
//! that rerun the same validation.

pub mod constants;
pub mod email;
pub mod error;
pub mod guardian;
pub mod password;
pub mod role;
pub mod user;
pub mod user_name;
pub mod user_profile;

pub use constants::*;
pub use email::{is_valid_email, Email};
pub use error::{CredentialField, DomainError, DomainResult, EntityKind};
pub use guardian::{Guardian, GuardianChanges, GuardianData, GuardianRecord};
pub use password::Password;
pub use role::{Role, RoleData, RoleName, RoleRecord, UserRoleAssignment};
pub use user::{User, UserData, UserRecord, UserWithProfile};
pub use user_name::UserName;
pub use user_profile::{UserProfile, UserProfileData, UserProfileRecord};
