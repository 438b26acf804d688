//! Driving port for customer lookups.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerFilter, Error};

/// Use-case port for filtered customer retrieval.
#[async_trait]
pub trait CustomersQuery: Send + Sync {
    /// Return customers matching `filter` ordered by name.
    ///
    /// An empty match is reported as [`crate::domain::ErrorCode::NotFound`],
    /// never as an empty list.
    async fn list_customers(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, Error>;
}
