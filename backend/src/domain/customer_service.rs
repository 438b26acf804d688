//! Customer use-cases backed by a [`CustomerRepository`].
//!
//! The service owns the response semantics that sit above persistence: empty
//! lookups and deletions become `NotFound`, duplicate identifiers become
//! `Conflict`, and a rename that matches nothing is a regular outcome.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::ports::{
    CustomerPersistenceError, CustomerRepository, CustomersCommand, CustomersQuery,
    RenameOutcome,
};
use super::{Customer, CustomerFilter, DeletionCriteria, Error, Rut};

pub(crate) const NO_MATCHES_MESSAGE: &str = "No se encontraron coincidencias";
pub(crate) const NOTHING_TO_DELETE_MESSAGE: &str = "No hay coincidencias para eliminar";
pub(crate) const DUPLICATE_RUT_MESSAGE: &str = "Conflicto: El RUT ya existe en el sistema";

/// Customer service implementing both driving ports.
pub struct CustomerService<R> {
    repository: Arc<R>,
}

impl<R> CustomerService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> Clone for CustomerService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn map_persistence_error(error: CustomerPersistenceError) -> Error {
    match error {
        CustomerPersistenceError::Connection { message } => {
            warn!(%message, "customer store unavailable");
            Error::internal(format!("Error inesperado: {message}"))
        }
        CustomerPersistenceError::Query { message } => {
            error!(%message, "customer store query failed");
            Error::internal(format!("Error inesperado: {message}"))
        }
        CustomerPersistenceError::DuplicateRut { rut } => {
            debug!(%rut, "duplicate rut rejected");
            Error::conflict(DUPLICATE_RUT_MESSAGE).with_details(serde_json::json!({
                "field": "rut",
                "value": rut,
                "code": "duplicate_rut",
            }))
        }
    }
}

#[async_trait]
impl<R> CustomersQuery for CustomerService<R>
where
    R: CustomerRepository + 'static,
{
    async fn list_customers(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, Error> {
        let customers = self
            .repository
            .find(filter)
            .await
            .map_err(map_persistence_error)?;
        if customers.is_empty() {
            return Err(Error::not_found(NO_MATCHES_MESSAGE));
        }
        Ok(customers)
    }
}

#[async_trait]
impl<R> CustomersCommand for CustomerService<R>
where
    R: CustomerRepository + 'static,
{
    async fn create_customer(&self, customer: Customer) -> Result<Customer, Error> {
        self.repository
            .insert(&customer)
            .await
            .map_err(map_persistence_error)
    }

    async fn delete_customers(&self, criteria: &DeletionCriteria) -> Result<Vec<String>, Error> {
        let names = self
            .repository
            .delete(criteria)
            .await
            .map_err(map_persistence_error)?;
        if names.is_empty() {
            return Err(Error::not_found(NOTHING_TO_DELETE_MESSAGE));
        }
        debug!(deleted = names.len(), "customers deleted");
        Ok(names)
    }

    async fn rename_customer(&self, rut: &Rut, name: &str) -> Result<RenameOutcome, Error> {
        let affected = self
            .repository
            .update_name(rut, name)
            .await
            .map_err(map_persistence_error)?;
        Ok(if affected > 0 {
            RenameOutcome::Updated
        } else {
            RenameOutcome::NotFound
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockCustomerRepository;
    use crate::domain::{AgeRange, ErrorCode};
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    fn rut(value: &str) -> Rut {
        Rut::new(value).expect("valid rut")
    }

    #[fixture]
    fn ana() -> Customer {
        Customer::new(rut("11-1"), "Ana", 22)
    }

    fn service(repository: MockCustomerRepository) -> CustomerService<MockCustomerRepository> {
        CustomerService::new(Arc::new(repository))
    }

    #[rstest]
    #[tokio::test]
    async fn list_returns_repository_rows(ana: Customer) {
        let mut repository = MockCustomerRepository::new();
        let rows = vec![ana.clone()];
        repository
            .expect_find()
            .with(eq(CustomerFilter::Age(22)))
            .times(1)
            .return_once(move |_| Ok(rows));

        let customers = service(repository)
            .list_customers(&CustomerFilter::Age(22))
            .await
            .expect("lookup succeeds");
        assert_eq!(customers, vec![ana]);
    }

    #[rstest]
    #[tokio::test]
    async fn list_reports_empty_match_as_not_found() {
        let mut repository = MockCustomerRepository::new();
        repository.expect_find().return_once(|_| Ok(Vec::new()));

        let error = service(repository)
            .list_customers(&CustomerFilter::All)
            .await
            .expect_err("empty lookup fails");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), NO_MATCHES_MESSAGE);
    }

    #[rstest]
    #[case(CustomerPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(CustomerPersistenceError::connection("timed out"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_maps_store_failures(
        #[case] failure: CustomerPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repository = MockCustomerRepository::new();
        repository.expect_find().return_once(move |_| Err(failure));

        let error = service(repository)
            .list_customers(&CustomerFilter::All)
            .await
            .expect_err("store failure propagates");
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn internal_errors_keep_the_underlying_message() {
        let mut repository = MockCustomerRepository::new();
        repository
            .expect_find()
            .return_once(|_| Err(CustomerPersistenceError::query("relation missing")));

        let error = service(repository)
            .list_customers(&CustomerFilter::All)
            .await
            .expect_err("store failure propagates");
        assert_eq!(error.message(), "Error inesperado: relation missing");
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_internal_errors() {
        let mut repository = MockCustomerRepository::new();
        repository
            .expect_delete()
            .return_once(|_| Err(CustomerPersistenceError::connection("pool timed out")));

        let error = service(repository)
            .delete_customers(&DeletionCriteria::Age(30))
            .await
            .expect_err("store failure propagates");
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert_eq!(error.message(), "Error inesperado: pool timed out");
    }

    #[rstest]
    #[tokio::test]
    async fn create_maps_duplicate_rut_to_conflict(ana: Customer) {
        let mut repository = MockCustomerRepository::new();
        repository
            .expect_insert()
            .return_once(|customer| Err(CustomerPersistenceError::duplicate_rut(customer.rut().as_str())));

        let error = service(repository)
            .create_customer(ana)
            .await
            .expect_err("duplicate rejected");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), DUPLICATE_RUT_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_stored_customer(ana: Customer) {
        let mut repository = MockCustomerRepository::new();
        repository
            .expect_insert()
            .withf(|customer| customer.rut().as_str() == "11-1")
            .return_once(|customer| Ok(customer.clone()));

        let created = service(repository)
            .create_customer(ana.clone())
            .await
            .expect("insert succeeds");
        assert_eq!(created, ana);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_returns_removed_names() {
        let criteria = DeletionCriteria::AgeRange(AgeRange::new(18, 25));
        let mut repository = MockCustomerRepository::new();
        repository
            .expect_delete()
            .with(eq(criteria.clone()))
            .return_once(|_| Ok(vec!["Ana".to_owned(), "Bruno".to_owned()]));

        let names = service(repository)
            .delete_customers(&criteria)
            .await
            .expect("delete succeeds");
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_empty_match_as_not_found() {
        let mut repository = MockCustomerRepository::new();
        repository.expect_delete().return_once(|_| Ok(Vec::new()));

        let error = service(repository)
            .delete_customers(&DeletionCriteria::Age(99))
            .await
            .expect_err("nothing deleted");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), NOTHING_TO_DELETE_MESSAGE);
    }

    #[rstest]
    #[case(1, RenameOutcome::Updated)]
    #[case(0, RenameOutcome::NotFound)]
    #[tokio::test]
    async fn rename_reports_outcome(#[case] affected: u64, #[case] expected: RenameOutcome) {
        let mut repository = MockCustomerRepository::new();
        repository
            .expect_update_name()
            .withf(|rut, name| rut.as_str() == "11-1" && name == "Ana María")
            .return_once(move |_, _| Ok(affected));

        let outcome = service(repository)
            .rename_customer(&rut("11-1"), "Ana María")
            .await
            .expect("rename succeeds");
        assert_eq!(outcome, expected);
    }
}
