//! Customer account management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::customer::{CreateCustomer, Customer, CustomerQuery, UpdateCustomer, UpdateCustomerStatus},
};

use super::{companies::PaginatedResponse, AuthenticatedStaff};

/// List customers with search and pagination
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(CustomerQuery),
    responses(
        (status = 200, description = "List of customers"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<PaginatedResponse<Customer>>> {
    claims.require_read()?;

    let (customers, total) = state.services.customers.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: customers,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Register a customer account on behalf of a walk-in traveller
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    security(("bearer_auth" = [])),
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(customer): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    claims.require_write()?;

    let created = state.services.customers.create(customer).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a customer's identity and contact fields
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(customer): Json<UpdateCustomer>,
) -> AppResult<Json<Customer>> {
    claims.require_write()?;

    let updated = state.services.customers.update(id, customer).await?;
    Ok(Json(updated))
}

/// Change a customer's account status (admin only)
#[utoipa::path(
    put,
    path = "/customers/{id}/status",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomerStatus,
    responses(
        (status = 200, description = "Status updated", body = Customer),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer_status(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCustomerStatus>,
) -> AppResult<Json<Customer>> {
    claims.require_admin()?;

    let updated = state.services.customers.set_status(id, request.status).await?;
    Ok(Json(updated))
}
