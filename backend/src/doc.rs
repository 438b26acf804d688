//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every customer endpoint, the health probes and the
//! schema wrappers from [`crate::inbound::http::schemas`], which keep domain
//! types free of utoipa derives. The document backs Swagger UI in debug
//! builds.

use crate::inbound::http::customers::{
    CreateCustomerRequest, DeletedResponse, MessageResponse, UpdateCustomerRequest,
};
use crate::inbound::http::schemas::{CustomerSchema, ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clientes API",
        description = "Filtered retrieval, deletion, creation and renaming of customer records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::customers::list_customers,
        crate::inbound::http::customers::delete_customers,
        crate::inbound::http::customers::delete_customer,
        crate::inbound::http::customers::create_customer,
        crate::inbound::http::customers::update_customer,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CustomerSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateCustomerRequest,
        UpdateCustomerRequest,
        DeletedResponse,
        MessageResponse
    )),
    tags(
        (name = "clientes", description = "Customer records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
