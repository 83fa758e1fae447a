//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - SeaORM repositories
//! - Unit of Work for transactional batch inserts

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    GuardianRepository, GuardianStore, RoleRepository, RoleStore, UserProfileRepository,
    UserProfileStore, UserRepository, UserStore,
};
pub use unit_of_work::{InsertBatch, Persistence, UnitOfWork};
