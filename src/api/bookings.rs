//! Booking management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::booking::{Booking, BookingDetails, BookingQuery, CreateBooking, UpdateBookingStatus},
};

use super::{companies::PaginatedResponse, AuthenticatedStaff};

/// List bookings with filters and pagination
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "List of bookings"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<PaginatedResponse<BookingDetails>>> {
    claims.require_read()?;

    let (bookings, total) = state.services.bookings.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: bookings,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    claims.require_read()?;

    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking))
}

/// Create a booking for a customer on a trip
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Invalid input or unsupported passenger_info version"),
        (status = 404, description = "Customer or trip not found"),
        (status = 409, description = "Not enough seats available")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(booking): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    claims.require_write()?;

    let created = state.services.bookings.create(booking).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Apply a booking status transition. Cancellation hands the seats back to
/// the trip.
#[utoipa::path(
    patch,
    path = "/bookings/{id}/status",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatus,
    responses(
        (status = 200, description = "Status updated", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Invalid status transition")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBookingStatus>,
) -> AppResult<Json<Booking>> {
    claims.require_write()?;

    let updated = state.services.bookings.set_status(id, request).await?;
    Ok(Json(updated))
}
