//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CustomersCommand, CustomersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub customers: Arc<dyn CustomersCommand>,
    pub customers_query: Arc<dyn CustomersQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        customers: Arc<dyn CustomersCommand>,
        customers_query: Arc<dyn CustomersQuery>,
    ) -> Self {
        Self {
            customers,
            customers_query,
        }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use clientes::domain::CustomerService;
    /// use clientes::inbound::http::state::HttpState;
    /// use clientes::outbound::persistence::{DbPool, DieselCustomerRepository};
    ///
    /// # async fn build(pool: DbPool) {
    /// let repository = Arc::new(DieselCustomerRepository::new(pool));
    /// let state = HttpState::from_service(CustomerService::new(repository));
    /// let _query = state.customers_query.clone();
    /// # }
    /// ```
    pub fn from_service<S>(service: S) -> Self
    where
        S: CustomersCommand + CustomersQuery + 'static,
    {
        let service = Arc::new(service);
        Self {
            customers: service.clone(),
            customers_query: service,
        }
    }
}
