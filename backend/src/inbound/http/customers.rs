//! Customer HTTP handlers.
//!
//! ```text
//! GET    /clientes?rut=&edad=&edadMin=&edadMax=&nombre=
//! DELETE /clientes/{rut}
//! DELETE /clientes?rut=&edad=&edadMin=&edadMax=
//! POST   /clientes {"rut":"12345678-9","nombre":"Ana","edad":34}
//! PUT    /clientes/{rut} {"nombre":"Ana María"}
//! ```
//!
//! Handlers parse wire input into domain values, call exactly one port
//! method and render the outcome. Predicate selection lives in
//! [`crate::domain::filter`].

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::RenameOutcome;
use crate::domain::{
    Customer, CustomerValidationError, Error, FilterParams, Rut, resolve_deletion,
    resolve_lookup,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CustomerSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    NOMBRE, RUT, map_filter_error, missing_field_error, parse_body_age,
};

const DELETED_MESSAGE: &str = "Eliminados con éxito";
const UPDATED_MESSAGE: &str = "Actualizado";
const NOT_UPDATED_MESSAGE: &str = "No encontrado";

/// Filter parameters accepted by lookups and deletions.
///
/// Only the highest-precedence parameter present is used; the others are
/// ignored without being parsed.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerQuery {
    /// Exact identifier.
    pub rut: Option<String>,
    /// Exact age.
    pub edad: Option<String>,
    /// Inclusive lower age bound; used only together with `edadMax`.
    pub edad_min: Option<String>,
    /// Inclusive upper age bound; used only together with `edadMin`.
    pub edad_max: Option<String>,
    /// Case-insensitive name prefix. Ignored by deletions.
    pub nombre: Option<String>,
}

impl From<CustomerQuery> for FilterParams {
    fn from(value: CustomerQuery) -> Self {
        Self {
            rut: value.rut,
            age: value.edad,
            min_age: value.edad_min,
            max_age: value.edad_max,
            name: value.nombre,
        }
    }
}

/// Request body for `POST /clientes`.
///
/// `edad` is kept as raw JSON so that strings, fractions and `null` can be
/// rejected with a field-level error instead of a generic parse failure.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCustomerRequest {
    #[schema(example = "12345678-9")]
    pub rut: Option<String>,
    #[schema(example = "Ana Pérez")]
    pub nombre: Option<String>,
    #[schema(value_type = Option<i32>, example = 34)]
    pub edad: Option<serde_json::Value>,
}

/// Request body for `PUT /clientes/{rut}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCustomerRequest {
    #[schema(example = "Ana María Pérez")]
    pub nombre: Option<String>,
}

/// Response body listing the names of deleted customers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Eliminados con éxito")]
    pub message: String,
    pub eliminados: Vec<String>,
}

/// Plain message response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Actualizado")]
    pub message: String,
}

fn invalid_rut_error(error: CustomerValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": RUT.as_str(),
        "code": "invalid_rut",
    }))
}

fn parse_create_request(payload: CreateCustomerRequest) -> Result<Customer, Error> {
    let rut = payload.rut.ok_or_else(|| missing_field_error(RUT))?;
    let rut = Rut::new(rut).map_err(invalid_rut_error)?;
    let nombre = payload.nombre.ok_or_else(|| missing_field_error(NOMBRE))?;
    let edad = parse_body_age(payload.edad)?;
    Ok(Customer::new(rut, nombre, edad))
}

/// List customers matching the highest-precedence filter, ordered by name.
#[utoipa::path(
    get,
    path = "/clientes",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Matching customers", body = [CustomerSchema]),
        (status = 400, description = "Malformed age parameter", body = ErrorSchema),
        (status = 404, description = "No customer matches", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["clientes"],
    operation_id = "listCustomers"
)]
#[get("/clientes")]
pub async fn list_customers(
    state: web::Data<HttpState>,
    query: web::Query<CustomerQuery>,
) -> ApiResult<HttpResponse> {
    let params = FilterParams::from(query.into_inner());
    let filter = resolve_lookup(&params).map_err(map_filter_error)?;
    debug!(?filter, "resolved customer lookup");
    let customers = state.customers_query.list_customers(&filter).await?;
    Ok(HttpResponse::Ok().json(customers))
}

async fn delete_matching(
    state: &HttpState,
    path_rut: Option<&str>,
    query: CustomerQuery,
) -> ApiResult<HttpResponse> {
    let params = FilterParams::from(query);
    let criteria = resolve_deletion(path_rut, &params).map_err(map_filter_error)?;
    debug!(?criteria, "resolved customer deletion");
    let eliminados = state.customers.delete_customers(&criteria).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse {
        message: DELETED_MESSAGE.to_owned(),
        eliminados,
    }))
}

/// Delete customers selected by query parameters.
#[utoipa::path(
    delete,
    path = "/clientes",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Customers deleted", body = DeletedResponse),
        (status = 400, description = "No criteria or malformed age", body = ErrorSchema),
        (status = 404, description = "Nothing to delete", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["clientes"],
    operation_id = "deleteCustomers"
)]
#[delete("/clientes")]
pub async fn delete_customers(
    state: web::Data<HttpState>,
    query: web::Query<CustomerQuery>,
) -> ApiResult<HttpResponse> {
    delete_matching(&state, None, query.into_inner()).await
}

/// Delete the customer identified by the path segment.
///
/// A blank path segment falls back to the query parameters.
#[utoipa::path(
    delete,
    path = "/clientes/{rut}",
    params(
        ("rut" = String, Path, description = "Customer identifier"),
        CustomerQuery
    ),
    responses(
        (status = 200, description = "Customer deleted", body = DeletedResponse),
        (status = 400, description = "Blank path and no criteria, or malformed age", body = ErrorSchema),
        (status = 404, description = "Nothing to delete", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["clientes"],
    operation_id = "deleteCustomer"
)]
#[delete("/clientes/{rut}")]
pub async fn delete_customer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<CustomerQuery>,
) -> ApiResult<HttpResponse> {
    delete_matching(&state, Some(path.as_str()), query.into_inner()).await
}

/// Register a new customer.
#[utoipa::path(
    post,
    path = "/clientes",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerSchema),
        (status = 400, description = "Invalid body", body = ErrorSchema),
        (status = 409, description = "The rut already exists", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["clientes"],
    operation_id = "createCustomer"
)]
#[post("/clientes")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCustomerRequest>,
) -> ApiResult<HttpResponse> {
    let customer = parse_create_request(payload.into_inner())?;
    let created = state.customers.create_customer(customer).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace the name of an existing customer.
///
/// An unknown `rut` is not an error: the response is `200` with the message
/// `"No encontrado"`.
#[utoipa::path(
    put,
    path = "/clientes/{rut}",
    params(("rut" = String, Path, description = "Customer identifier")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Update outcome", body = MessageResponse),
        (status = 400, description = "Invalid body", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["clientes"],
    operation_id = "updateCustomer"
)]
#[put("/clientes/{rut}")]
pub async fn update_customer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateCustomerRequest>,
) -> ApiResult<HttpResponse> {
    let rut = Rut::new(path.as_str()).map_err(invalid_rut_error)?;
    let nombre = payload
        .into_inner()
        .nombre
        .ok_or_else(|| missing_field_error(NOMBRE))?;
    let message = match state.customers.rename_customer(&rut, &nombre).await? {
        RenameOutcome::Updated => UPDATED_MESSAGE,
        RenameOutcome::NotFound => NOT_UPDATED_MESSAGE,
    };
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: message.to_owned(),
    }))
}
