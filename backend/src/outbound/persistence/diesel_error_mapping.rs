//! Diesel and pool error mapping for the customer repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::CustomerPersistenceError;

use super::pool::PoolError;

/// Map pool failures onto the connection variant.
pub(crate) fn map_pool_error(error: PoolError) -> CustomerPersistenceError {
    CustomerPersistenceError::connection(error.message())
}

/// Map Diesel failures onto repository errors.
///
/// Database-reported messages are kept so callers can surface them; a unique
/// violation is reported as a duplicate of `rut` when the caller knows which
/// identifier it attempted to insert.
pub(crate) fn map_diesel_error(
    error: DieselError,
    attempted_rut: Option<&str>,
) -> CustomerPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match (error, attempted_rut) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), Some(rut)) => {
            CustomerPersistenceError::duplicate_rut(rut)
        }
        (DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info), _) => {
            CustomerPersistenceError::connection(info.message())
        }
        (DieselError::DatabaseError(_, info), _) => CustomerPersistenceError::query(info.message()),
        (DieselError::NotFound, _) => CustomerPersistenceError::query("record not found"),
        (DieselError::QueryBuilderError(err), _) => {
            CustomerPersistenceError::query(format!("database query error: {err}"))
        }
        (DieselError::DeserializationError(err), _) => {
            CustomerPersistenceError::query(format!("unreadable row: {err}"))
        }
        (other, _) => CustomerPersistenceError::query(other.to_string()),
    }
}
