//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Default roles, superadmin and CSV member import

pub mod args;

pub use args::{Cli, Commands};
