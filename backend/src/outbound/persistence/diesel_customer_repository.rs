//! PostgreSQL-backed `CustomerRepository` implementation using Diesel ORM.
//!
//! Each predicate template maps onto one Diesel expression whose values are
//! sent as bind parameters:
//!
//! | filter        | SQL predicate                 |
//! |---------------|-------------------------------|
//! | `Rut`         | `rut = $1`                    |
//! | `Age`         | `edad = $1`                   |
//! | `AgeRange`    | `edad BETWEEN $1 AND $2`      |
//! | `NamePrefix`  | `nombre ILIKE $1`             |
//! | `All`         | none                          |
//!
//! Every call checks out one connection and runs exactly one statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CustomerPersistenceError, CustomerRepository};
use crate::domain::{Customer, CustomerFilter, DeletionCriteria, Rut};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CustomerRow, NewCustomerRow};
use super::pool::DbPool;
use super::schema::clientes;

/// Diesel-backed implementation of the `CustomerRepository` port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_customer(row: CustomerRow) -> Result<Customer, CustomerPersistenceError> {
    let rut = Rut::new(&row.rut).map_err(|err| {
        CustomerPersistenceError::query(format!("stored customer has invalid rut: {err}"))
    })?;
    Ok(Customer::new(rut, row.nombre, row.edad))
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn find(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<Customer>, CustomerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let query = clientes::table
            .select(CustomerRow::as_select())
            .order(clientes::nombre.asc())
            .into_boxed();
        let query = match filter {
            CustomerFilter::Rut(rut) => query.filter(clientes::rut.eq(rut.as_str())),
            CustomerFilter::Age(age) => query.filter(clientes::edad.eq(*age)),
            CustomerFilter::AgeRange(range) => {
                query.filter(clientes::edad.between(range.min(), range.max()))
            }
            CustomerFilter::NamePrefix(prefix) => {
                query.filter(clientes::nombre.ilike(prefix.like_pattern()))
            }
            CustomerFilter::All => query,
        };

        let rows: Vec<CustomerRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        debug!(?filter, matched = rows.len(), "customer lookup");

        rows.into_iter().map(row_to_customer).collect()
    }

    async fn insert(&self, customer: &Customer) -> Result<Customer, CustomerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCustomerRow {
            rut: customer.rut().as_str(),
            nombre: customer.name(),
            edad: customer.age(),
        };

        let row = diesel::insert_into(clientes::table)
            .values(&new_row)
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(customer.rut().as_str())))?;

        row_to_customer(row)
    }

    async fn delete(
        &self,
        criteria: &DeletionCriteria,
    ) -> Result<Vec<String>, CustomerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = match criteria {
            DeletionCriteria::Rut(rut) => {
                diesel::delete(clientes::table.filter(clientes::rut.eq(rut.as_str())))
                    .returning(clientes::nombre)
                    .get_results::<String>(&mut conn)
                    .await
            }
            DeletionCriteria::Age(age) => {
                diesel::delete(clientes::table.filter(clientes::edad.eq(*age)))
                    .returning(clientes::nombre)
                    .get_results::<String>(&mut conn)
                    .await
            }
            DeletionCriteria::AgeRange(range) => diesel::delete(
                clientes::table.filter(clientes::edad.between(range.min(), range.max())),
            )
            .returning(clientes::nombre)
            .get_results::<String>(&mut conn)
            .await,
        };

        let names = result.map_err(|err| map_diesel_error(err, None))?;
        debug!(?criteria, deleted = names.len(), "customer deletion");
        Ok(names)
    }

    async fn update_name(&self, rut: &Rut, name: &str) -> Result<u64, CustomerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(clientes::table.filter(clientes::rut.eq(rut.as_str())))
            .set(clientes::nombre.eq(name))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(u64::try_from(affected).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn row_conversion_keeps_fields() {
        let customer = row_to_customer(CustomerRow {
            rut: "11-1".to_owned(),
            nombre: "Ana".to_owned(),
            edad: 22,
        })
        .expect("valid row");
        assert_eq!(customer.rut().as_str(), "11-1");
        assert_eq!(customer.name(), "Ana");
        assert_eq!(customer.age(), 22);
    }

    #[rstest]
    fn row_conversion_rejects_blank_rut() {
        let result = row_to_customer(CustomerRow {
            rut: " ".to_owned(),
            nombre: "Ana".to_owned(),
            edad: 22,
        });
        assert!(matches!(result, Err(CustomerPersistenceError::Query { .. })));
    }
}
