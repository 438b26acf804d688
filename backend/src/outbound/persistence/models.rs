//! Internal Diesel row structs for the `clientes` table.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain [`Customer`](crate::domain::Customer) values.

use diesel::prelude::*;

use super::schema::clientes;

/// Row struct for reading from the `clientes` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clientes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub rut: String,
    pub nombre: String,
    pub edad: i32,
}

/// Insertable struct for creating customer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clientes)]
pub(crate) struct NewCustomerRow<'a> {
    pub rut: &'a str,
    pub nombre: &'a str,
    pub edad: i32,
}
