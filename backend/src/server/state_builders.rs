//! Builders wiring persistence adapters into HTTP state.

use std::sync::Arc;

use actix_web::web;

use clientes::domain::CustomerService;
use clientes::inbound::http::state::HttpState;
use clientes::outbound::persistence::{DbPool, DieselCustomerRepository};

/// Build handler state backed by the Diesel customer repository.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let repository = Arc::new(DieselCustomerRepository::new(pool.clone()));
    web::Data::new(HttpState::from_service(CustomerService::new(repository)))
}
