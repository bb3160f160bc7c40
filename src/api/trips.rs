//! Trip and trip-stop management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::stop::{CreateStop, StopStats, TripStop, UpdateStop},
    models::trip::{CreateTrip, Trip, TripDetails, TripQuery, UpdateTrip, UpdateTripStatus},
};

use super::{companies::PaginatedResponse, AuthenticatedStaff};

/// List a company's trips with filters and pagination
#[utoipa::path(
    get,
    path = "/companies/{id}/trips",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        TripQuery
    ),
    responses(
        (status = 200, description = "List of trips"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn list_trips(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
    Query(query): Query<TripQuery>,
) -> AppResult<Json<PaginatedResponse<TripDetails>>> {
    claims.require_read()?;

    let (trips, total) = state.services.trips.search(company_id, &query).await?;

    Ok(Json(PaginatedResponse {
        items: trips,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get a trip by ID
#[utoipa::path(
    get,
    path = "/companies/{id}/trips/{trip_id}",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip details", body = TripDetails),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn get_trip(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id)): Path<(i32, i32)>,
) -> AppResult<Json<TripDetails>> {
    claims.require_read()?;

    let trip = state.services.trips.get(company_id, trip_id).await?;
    Ok(Json(trip))
}

/// Create a new trip from a route + vehicle + driver triple
#[utoipa::path(
    post,
    path = "/companies/{id}/trips",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = CreateTrip,
    responses(
        (status = 201, description = "Trip created", body = Trip),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Route, vehicle or driver not found"),
        (status = 409, description = "Driver inactive or vehicle already assigned")
    )
)]
pub async fn create_trip(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
    Json(trip): Json<CreateTrip>,
) -> AppResult<(StatusCode, Json<Trip>)> {
    claims.require_write()?;

    let created = state.services.trips.create(company_id, trip).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a trip's assignment and schedule fields
#[utoipa::path(
    put,
    path = "/companies/{id}/trips/{trip_id}",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID")
    ),
    request_body = UpdateTrip,
    responses(
        (status = 200, description = "Trip updated", body = Trip),
        (status = 404, description = "Trip not found"),
        (status = 409, description = "Trip is in a terminal state")
    )
)]
pub async fn update_trip(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id)): Path<(i32, i32)>,
    Json(trip): Json<UpdateTrip>,
) -> AppResult<Json<Trip>> {
    claims.require_write()?;

    let updated = state.services.trips.update(company_id, trip_id, trip).await?;
    Ok(Json(updated))
}

/// Apply a trip status transition
#[utoipa::path(
    put,
    path = "/companies/{id}/trips/{trip_id}/status",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID")
    ),
    request_body = UpdateTripStatus,
    responses(
        (status = 200, description = "Status updated", body = Trip),
        (status = 404, description = "Trip not found"),
        (status = 409, description = "Invalid status transition")
    )
)]
pub async fn update_trip_status(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateTripStatus>,
) -> AppResult<Json<Trip>> {
    claims.require_write()?;

    let updated = state
        .services
        .trips
        .set_status(company_id, trip_id, request.status)
        .await?;
    Ok(Json(updated))
}

/// Delete a scheduled trip without active bookings
#[utoipa::path(
    delete,
    path = "/companies/{id}/trips/{trip_id}",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID")
    ),
    responses(
        (status = 204, description = "Trip deleted"),
        (status = 404, description = "Trip not found"),
        (status = 409, description = "Trip has started or has active bookings")
    )
)]
pub async fn delete_trip(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.trips.delete(company_id, trip_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Stops
// ---------------------------------------------------------------------------

/// List a trip's stops in traversal order
#[utoipa::path(
    get,
    path = "/companies/{id}/trips/{trip_id}/stops",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "List of stops", body = Vec<TripStop>),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn list_stops(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id)): Path<(i32, i32)>,
) -> AppResult<Json<Vec<TripStop>>> {
    claims.require_read()?;

    let stops = state.services.trips.list_stops(company_id, trip_id).await?;
    Ok(Json(stops))
}

/// Aggregate statistics over a trip's stop sequence
#[utoipa::path(
    get,
    path = "/companies/{id}/trips/{trip_id}/stops/stats",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Stop statistics", body = StopStats),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn get_stop_stats(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id)): Path<(i32, i32)>,
) -> AppResult<Json<StopStats>> {
    claims.require_read()?;

    let stats = state.services.trips.stop_stats(company_id, trip_id).await?;
    Ok(Json(stats))
}

/// Add a stop to a trip
#[utoipa::path(
    post,
    path = "/companies/{id}/trips/{trip_id}/stops",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID")
    ),
    request_body = CreateStop,
    responses(
        (status = 201, description = "Stop created", body = TripStop),
        (status = 400, description = "Invalid stop timing"),
        (status = 404, description = "Trip or station not found"),
        (status = 409, description = "Stop order already taken")
    )
)]
pub async fn create_stop(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id)): Path<(i32, i32)>,
    Json(stop): Json<CreateStop>,
) -> AppResult<(StatusCode, Json<TripStop>)> {
    claims.require_write()?;

    let created = state.services.trips.add_stop(company_id, trip_id, stop).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a stop
#[utoipa::path(
    put,
    path = "/companies/{id}/trips/{trip_id}/stops/{stop_id}",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID"),
        ("stop_id" = i32, Path, description = "Stop ID")
    ),
    request_body = UpdateStop,
    responses(
        (status = 200, description = "Stop updated", body = TripStop),
        (status = 404, description = "Stop not found"),
        (status = 409, description = "Stop order already taken")
    )
)]
pub async fn update_stop(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id, stop_id)): Path<(i32, i32, i32)>,
    Json(stop): Json<UpdateStop>,
) -> AppResult<Json<TripStop>> {
    claims.require_write()?;

    let updated = state
        .services
        .trips
        .update_stop(company_id, trip_id, stop_id, stop)
        .await?;
    Ok(Json(updated))
}

/// Remove a stop from a trip
#[utoipa::path(
    delete,
    path = "/companies/{id}/trips/{trip_id}/stops/{stop_id}",
    tag = "trips",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("trip_id" = i32, Path, description = "Trip ID"),
        ("stop_id" = i32, Path, description = "Stop ID")
    ),
    responses(
        (status = 204, description = "Stop deleted"),
        (status = 404, description = "Stop not found")
    )
)]
pub async fn delete_stop(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, trip_id, stop_id)): Path<(i32, i32, i32)>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.trips.delete_stop(company_id, trip_id, stop_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
