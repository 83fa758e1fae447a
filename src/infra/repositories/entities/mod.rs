//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod guardian;
pub mod role;
pub mod user;
pub mod user_profile;
pub mod user_role;
