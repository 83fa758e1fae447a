//! Membership registry - backend for a youth organization's member records.
//!
//! Members sign up (or are imported from a spreadsheet export), keep an
//! extended profile and a list of guardians, and are managed by admins
//! through a role-protected HTTP API.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: Command-line interface and its implementations
//! - **config**: Environment configuration and constants
//! - **services**: Use cases over the unit of work
//! - **seeds**: CSV import pipeline and superadmin seeding
//! - **infra**: SeaORM persistence, migrations and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Pagination and response envelopes
//! - **errors**: Centralized error handling
//!
//! Entities and value objects live in the `domain` workspace crate.
//!
//! # CLI Usage
//!
//! ```bash
//! membership-registry migrate up
//! membership-registry seed data.csv
//! membership-registry serve --port 3006
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod infra;
pub mod seeds;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
