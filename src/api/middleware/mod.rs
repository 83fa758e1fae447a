//! API middleware.

mod auth;
mod error_path;

pub use auth::{auth_middleware, require_admin, CurrentUser};
pub use error_path::error_envelope_path;
