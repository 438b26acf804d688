//! Customer data model.
//!
//! A customer is identified by its `rut`, carries a display name and an age.
//! The wire format keeps the field names used by existing clients: `rut`,
//! `nombre` and `edad`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when building customer values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomerValidationError {
    /// The identifier was empty once trimmed.
    #[error("rut must not be empty")]
    EmptyRut,
}

/// Natural identifier of a customer, unique across the store.
///
/// Surrounding whitespace is stripped on construction.
///
/// # Examples
/// ```
/// use clientes::domain::Rut;
///
/// let rut = Rut::new(" 12345678-9 ").expect("valid rut");
/// assert_eq!(rut.as_str(), "12345678-9");
/// assert!(Rut::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rut(String);

impl Rut {
    /// Validate and construct a [`Rut`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, CustomerValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CustomerValidationError::EmptyRut);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Rut {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Rut {
    type Error = CustomerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rut> for String {
    fn from(value: Rut) -> Self {
        value.0
    }
}

/// Stored customer record.
///
/// # Examples
/// ```
/// use clientes::domain::{Customer, Rut};
///
/// let rut = Rut::new("11111111-1").expect("valid rut");
/// let customer = Customer::new(rut, "Ana Pérez", 31);
/// let json = serde_json::to_value(&customer).expect("serialise");
/// assert_eq!(json["nombre"], "Ana Pérez");
/// assert_eq!(json["edad"], 31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    rut: Rut,
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "edad")]
    age: i32,
}

impl Customer {
    /// Assemble a customer from validated parts.
    pub fn new(rut: Rut, name: impl Into<String>, age: i32) -> Self {
        Self {
            rut,
            name: name.into(),
            age,
        }
    }

    /// Unique identifier.
    pub fn rut(&self) -> &Rut {
        &self.rut
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in whole years.
    pub fn age(&self) -> i32 {
        self.age
    }
}
