//! Domain primitives, filter resolution and customer use-cases.
//!
//! Purpose: keep the customer model, the predicate precedence rules and the
//! response semantics independent of HTTP and SQL. Adapters depend on this
//! module; it depends on neither of them.
//!
//! Public surface:
//! - [`Customer`] and [`Rut`]: the stored record and its identifier.
//! - [`resolve_lookup`] / [`resolve_deletion`]: pure filter resolution into
//!   [`CustomerFilter`] and [`DeletionCriteria`].
//! - [`CustomerService`]: implementation of the driving ports in [`ports`].
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation identifier.

pub mod customer;
pub mod customer_service;
pub mod error;
pub mod filter;
pub mod ports;
pub mod trace_id;

pub use self::customer::{Customer, CustomerValidationError, Rut};
pub use self::customer_service::CustomerService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filter::{
    AgeParam, AgeRange, CustomerFilter, DeletionCriteria, FilterError, FilterParams, NamePrefix,
    resolve_deletion, resolve_lookup,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
