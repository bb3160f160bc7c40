//! Vehicle management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle},
};

use super::AuthenticatedStaff;

/// List a company's vehicles
#[utoipa::path(
    get,
    path = "/companies/{id}/vehicles",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "List of vehicles", body = Vec<Vehicle>),
        (status = 404, description = "Company not found")
    )
)]
pub async fn list_vehicles(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
) -> AppResult<Json<Vec<Vehicle>>> {
    claims.require_read()?;

    let vehicles = state.services.vehicles.list(company_id).await?;
    Ok(Json(vehicles))
}

/// Get a vehicle by ID
#[utoipa::path(
    get,
    path = "/companies/{id}/vehicles/{vehicle_id}",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("vehicle_id" = i32, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle details", body = Vehicle),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, vehicle_id)): Path<(i32, i32)>,
) -> AppResult<Json<Vehicle>> {
    claims.require_read()?;

    let vehicle = state.services.vehicles.get(company_id, vehicle_id).await?;
    Ok(Json(vehicle))
}

/// Create a new vehicle
#[utoipa::path(
    post,
    path = "/companies/{id}/vehicles",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = CreateVehicle,
    responses(
        (status = 201, description = "Vehicle created", body = Vehicle),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Registration number already exists")
    )
)]
pub async fn create_vehicle(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
    Json(vehicle): Json<CreateVehicle>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    claims.require_write()?;

    let created = state.services.vehicles.create(company_id, vehicle).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing vehicle
#[utoipa::path(
    put,
    path = "/companies/{id}/vehicles/{vehicle_id}",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("vehicle_id" = i32, Path, description = "Vehicle ID")
    ),
    request_body = UpdateVehicle,
    responses(
        (status = 200, description = "Vehicle updated", body = Vehicle),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Registration number already exists")
    )
)]
pub async fn update_vehicle(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, vehicle_id)): Path<(i32, i32)>,
    Json(vehicle): Json<UpdateVehicle>,
) -> AppResult<Json<Vehicle>> {
    claims.require_write()?;

    let updated = state.services.vehicles.update(company_id, vehicle_id, vehicle).await?;
    Ok(Json(updated))
}

/// Delete a vehicle
#[utoipa::path(
    delete,
    path = "/companies/{id}/vehicles/{vehicle_id}",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("vehicle_id" = i32, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Vehicle is still referenced by trips")
    )
)]
pub async fn delete_vehicle(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, vehicle_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.vehicles.delete(company_id, vehicle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
