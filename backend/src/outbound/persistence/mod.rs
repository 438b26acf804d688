//! PostgreSQL persistence for customer records using Diesel ORM.
//!
//! Async access goes through `diesel-async` with a `bb8` pool. Row structs
//! (`models.rs`) and the table definition (`schema.rs`) stay private; only the
//! pool and the repository adapter are exported.
//!
//! # Example
//!
//! ```ignore
//! use clientes::outbound::persistence::{DbPool, DieselCustomerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/clientes")).await?;
//! let repo = DieselCustomerRepository::new(pool);
//! ```

mod diesel_customer_repository;
mod diesel_error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_customer_repository::DieselCustomerRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
