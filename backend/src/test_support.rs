//! Test utilities for the clientes crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`), the
//! latter through the `test-support` feature. Nothing here is compiled into
//! release builds.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{CustomerPersistenceError, CustomerRepository};
use crate::domain::{Customer, CustomerFilter, CustomerService, DeletionCriteria, Rut};
use crate::inbound::http::state::HttpState;

/// In-memory [`CustomerRepository`] mirroring the SQL adapter's semantics.
///
/// Rows are keyed by `rut`; lookups return matches ordered by name. A
/// failure can be injected to exercise error paths.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    rows: Mutex<BTreeMap<String, Customer>>,
    failure: Mutex<Option<CustomerPersistenceError>>,
}

impl InMemoryCustomerRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `customers`.
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let rows = customers
            .into_iter()
            .map(|customer| (customer.rut().as_str().to_owned(), customer))
            .collect();
        Self {
            rows: Mutex::new(rows),
            failure: Mutex::new(None),
        }
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: CustomerPersistenceError) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(error);
        }
    }

    /// Snapshot of the stored customers ordered by `rut`.
    pub fn customers(&self) -> Vec<Customer> {
        self.rows
            .lock()
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<String, Customer>>, CustomerPersistenceError> {
        if let Some(error) = self.failure.lock().ok().and_then(|failure| failure.clone()) {
            return Err(error);
        }
        self.rows
            .lock()
            .map_err(|_| CustomerPersistenceError::query("in-memory store poisoned"))
    }
}

fn matches_lookup(filter: &CustomerFilter, customer: &Customer) -> bool {
    match filter {
        CustomerFilter::Rut(rut) => customer.rut() == rut,
        CustomerFilter::Age(age) => customer.age() == *age,
        CustomerFilter::AgeRange(range) => range.contains(customer.age()),
        CustomerFilter::NamePrefix(prefix) => prefix.matches(customer.name()),
        CustomerFilter::All => true,
    }
}

fn matches_deletion(criteria: &DeletionCriteria, customer: &Customer) -> bool {
    match criteria {
        DeletionCriteria::Rut(rut) => customer.rut() == rut,
        DeletionCriteria::Age(age) => customer.age() == *age,
        DeletionCriteria::AgeRange(range) => range.contains(customer.age()),
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<Customer>, CustomerPersistenceError> {
        let rows = self.rows()?;
        let mut found: Vec<Customer> = rows
            .values()
            .filter(|customer| matches_lookup(filter, customer))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(found)
    }

    async fn insert(&self, customer: &Customer) -> Result<Customer, CustomerPersistenceError> {
        let mut rows = self.rows()?;
        let key = customer.rut().as_str();
        if rows.contains_key(key) {
            return Err(CustomerPersistenceError::duplicate_rut(key));
        }
        rows.insert(key.to_owned(), customer.clone());
        Ok(customer.clone())
    }

    async fn delete(
        &self,
        criteria: &DeletionCriteria,
    ) -> Result<Vec<String>, CustomerPersistenceError> {
        let mut rows = self.rows()?;
        let doomed: Vec<String> = rows
            .values()
            .filter(|customer| matches_deletion(criteria, customer))
            .map(|customer| customer.rut().as_str().to_owned())
            .collect();
        Ok(doomed
            .iter()
            .filter_map(|rut| rows.remove(rut))
            .map(|customer| customer.name().to_owned())
            .collect())
    }

    async fn update_name(&self, rut: &Rut, name: &str) -> Result<u64, CustomerPersistenceError> {
        let mut rows = self.rows()?;
        match rows.get_mut(rut.as_str()) {
            Some(customer) => {
                *customer = Customer::new(customer.rut().clone(), name, customer.age());
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Build HTTP state over an in-memory repository.
///
/// Returns the repository too so tests can inspect stored rows or inject
/// failures after requests have been made.
pub fn in_memory_state(
    customers: impl IntoIterator<Item = Customer>,
) -> (HttpState, Arc<InMemoryCustomerRepository>) {
    let repository = Arc::new(InMemoryCustomerRepository::with_customers(customers));
    let state = HttpState::from_service(CustomerService::new(Arc::clone(&repository)));
    (state, repository)
}

/// Build a customer from raw parts; panics on a blank `rut`.
pub fn customer(rut: &str, name: &str, age: i32) -> Customer {
    let rut = Rut::new(rut).expect("fixture rut is non-blank");
    Customer::new(rut, name, age)
}
