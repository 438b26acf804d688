//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed customer repository using Diesel ORM
//!
//! Adapters convert between domain types and storage representations. They
//! contain no business logic.

pub mod persistence;
