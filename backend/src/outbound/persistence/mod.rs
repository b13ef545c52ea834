//! Store adapters implementing the repository ports.
//!
//! Two backends are provided:
//!
//! - **In memory**: [`InMemoryStore`] keeps records for the lifetime of the
//!   process and is used when no database URL is configured.
//! - **PostgreSQL**: Diesel repositories over a `bb8` pool of `diesel-async`
//!   connections. Row structs (`models.rs`) and table definitions
//!   (`schema.rs`) stay private to this module.
//!
//! ```ignore
//! use exercise_tracker::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/exercise_tracker")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_exercise_repository;
mod diesel_user_repository;
mod in_memory_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_exercise_repository::DieselExerciseRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use in_memory_store::InMemoryStore;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
