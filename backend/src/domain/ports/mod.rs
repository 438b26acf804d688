//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`CustomersQuery`], [`CustomersCommand`]) are what inbound
//! adapters call. The driven port ([`CustomerRepository`]) is what persistence
//! adapters implement, with strongly typed errors instead of opaque strings.

mod macros;
pub(crate) use macros::define_port_error;

mod customer_repository;
mod customers_command;
mod customers_query;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{CustomerPersistenceError, CustomerRepository};
pub use customers_command::{CustomersCommand, RenameOutcome};
pub use customers_query::CustomersQuery;
