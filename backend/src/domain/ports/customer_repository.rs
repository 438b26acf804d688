//! Driven port for customer persistence.
//!
//! Adapters translate each [`CustomerFilter`] or [`DeletionCriteria`] into a
//! single parameterised statement. Implementations must not retry and must not
//! span multiple statements in one call.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerFilter, DeletionCriteria, Rut};

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer repository adapters.
    pub enum CustomerPersistenceError {
        /// A connection could not be checked out of the pool.
        Connection { message: String } =>
            "customer repository connection failed: {message}",
        /// The statement failed while executing.
        Query { message: String } =>
            "customer repository query failed: {message}",
        /// The store rejected an insert because the `rut` already exists.
        DuplicateRut { rut: String } =>
            "customer with rut {rut} already exists",
    }
}

/// Port for reading and mutating stored customers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Return customers matching `filter`, ordered by name ascending.
    async fn find(&self, filter: &CustomerFilter)
    -> Result<Vec<Customer>, CustomerPersistenceError>;

    /// Insert a new customer and return the stored row.
    ///
    /// Returns [`CustomerPersistenceError::DuplicateRut`] when the identifier
    /// is already taken.
    async fn insert(&self, customer: &Customer) -> Result<Customer, CustomerPersistenceError>;

    /// Delete every customer matching `criteria` and return their names.
    async fn delete(
        &self,
        criteria: &DeletionCriteria,
    ) -> Result<Vec<String>, CustomerPersistenceError>;

    /// Replace the name of the customer identified by `rut`.
    ///
    /// Returns the number of rows affected, zero when no customer matched.
    async fn update_name(&self, rut: &Rut, name: &str) -> Result<u64, CustomerPersistenceError>;
}
