//! HTTP inbound adapter exposing the customer REST endpoints.

pub mod customers;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

use self::validation::invalid_body_error;

/// JSON extractor configuration rendering parse failures as domain errors.
///
/// Malformed or mistyped bodies produce the same `{code, message, details}`
/// payload as every other validation failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| invalid_body_error(&err).into())
}

/// Query-string extractor configuration mirroring [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| invalid_body_error(&err).into())
}
