//! Driving port for customer mutations.

use async_trait::async_trait;

use crate::domain::{Customer, DeletionCriteria, Error, Rut};

/// Outcome of a rename request.
///
/// A missing customer is a regular outcome rather than an error; HTTP clients
/// receive a success status with a "not found" message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The customer existed and its name was replaced.
    Updated,
    /// No customer carries the requested `rut`.
    NotFound,
}

/// Use-case port for creating, deleting and renaming customers.
#[async_trait]
pub trait CustomersCommand: Send + Sync {
    /// Store a new customer, failing with a conflict when `rut` is taken.
    async fn create_customer(&self, customer: Customer) -> Result<Customer, Error>;

    /// Delete every customer matching `criteria` and return their names.
    async fn delete_customers(&self, criteria: &DeletionCriteria) -> Result<Vec<String>, Error>;

    /// Replace the name of the customer identified by `rut`.
    async fn rename_customer(&self, rut: &Rut, name: &str) -> Result<RenameOutcome, Error>;
}
