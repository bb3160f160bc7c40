//! Station management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::station::{CreateStation, Station, UpdateStation},
};

use super::AuthenticatedStaff;

/// List a company's stations
#[utoipa::path(
    get,
    path = "/companies/{id}/stations",
    tag = "stations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "List of stations", body = Vec<Station>),
        (status = 404, description = "Company not found")
    )
)]
pub async fn list_stations(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
) -> AppResult<Json<Vec<Station>>> {
    claims.require_read()?;

    let stations = state.services.stations.list(company_id).await?;
    Ok(Json(stations))
}

/// Get a station by ID
#[utoipa::path(
    get,
    path = "/companies/{id}/stations/{station_id}",
    tag = "stations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("station_id" = i32, Path, description = "Station ID")
    ),
    responses(
        (status = 200, description = "Station details", body = Station),
        (status = 404, description = "Station not found")
    )
)]
pub async fn get_station(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, station_id)): Path<(i32, i32)>,
) -> AppResult<Json<Station>> {
    claims.require_read()?;

    let station = state.services.stations.get(company_id, station_id).await?;
    Ok(Json(station))
}

/// Create a new station
#[utoipa::path(
    post,
    path = "/companies/{id}/stations",
    tag = "stations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = CreateStation,
    responses(
        (status = 201, description = "Station created", body = Station),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn create_station(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
    Json(station): Json<CreateStation>,
) -> AppResult<(StatusCode, Json<Station>)> {
    claims.require_write()?;

    let created = state.services.stations.create(company_id, station).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing station
#[utoipa::path(
    put,
    path = "/companies/{id}/stations/{station_id}",
    tag = "stations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("station_id" = i32, Path, description = "Station ID")
    ),
    request_body = UpdateStation,
    responses(
        (status = 200, description = "Station updated", body = Station),
        (status = 404, description = "Station not found")
    )
)]
pub async fn update_station(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, station_id)): Path<(i32, i32)>,
    Json(station): Json<UpdateStation>,
) -> AppResult<Json<Station>> {
    claims.require_write()?;

    let updated = state.services.stations.update(company_id, station_id, station).await?;
    Ok(Json(updated))
}

/// Delete a station
#[utoipa::path(
    delete,
    path = "/companies/{id}/stations/{station_id}",
    tag = "stations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("station_id" = i32, Path, description = "Station ID")
    ),
    responses(
        (status = 204, description = "Station deleted"),
        (status = 404, description = "Station not found"),
        (status = 409, description = "Station is still referenced")
    )
)]
pub async fn delete_station(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, station_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.stations.delete(company_id, station_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
