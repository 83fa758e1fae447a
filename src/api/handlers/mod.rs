//! HTTP request handlers.

pub mod auth_handler;
pub mod guardian_handler;
pub mod health_handler;
pub mod role_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use guardian_handler::guardian_routes;
pub use health_handler::health_check;
pub use role_handler::role_routes;
pub use user_handler::user_routes;
