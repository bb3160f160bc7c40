//! Booking management service
//!
//! Seat inventory is taken with a single conditional decrement inside the
//! repository transaction; this service owns the commission arithmetic and
//! the booking state machine.

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::CommissionConfig,
    error::{AppError, AppResult, ErrorCode},
    models::booking::{commission_amount, Booking, BookingDetails, BookingQuery, CreateBooking, UpdateBookingStatus},
    models::enums::BookingStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    commission: CommissionConfig,
}

impl BookingsService {
    pub fn new(repository: Repository, commission: CommissionConfig) -> Self {
        Self { repository, commission }
    }

    /// Search bookings
    pub async fn search(&self, query: &BookingQuery) -> AppResult<(Vec<BookingDetails>, i64)> {
        self.repository.bookings.search(query).await
    }

    /// Get a booking with labels
    pub async fn get(&self, id: i32) -> AppResult<BookingDetails> {
        self.repository.bookings.get_details(id).await
    }

    /// Create a booking for a customer on a trip
    pub async fn create(&self, booking: CreateBooking) -> AppResult<Booking> {
        booking
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        booking.passenger_info.validate_shape()?;

        self.repository.customers.get_by_id(booking.customer_id).await?;

        let trip = self.repository.trips.get_by_id(booking.trip_id).await?;
        if !trip.status.accepts_bookings() {
            return Err(AppError::Conflict(
                ErrorCode::InvalidTransition,
                format!("Trip {} is {} and does not accept bookings", trip.id, trip.status),
            ));
        }

        // Pre-check for a friendly error; the decrement below is what
        // actually guarantees no overbooking under concurrency
        if booking.seats_requested > trip.available_seats {
            return Err(AppError::Conflict(
                ErrorCode::SeatsUnavailable,
                format!(
                    "Trip {} has {} seats available, {} requested",
                    trip.id, trip.available_seats, booking.seats_requested
                ),
            ));
        }

        let total_amount = trip.price * rust_decimal::Decimal::from(booking.seats_requested);
        let commission = commission_amount(total_amount, self.commission.percentage);

        self.repository
            .bookings
            .create(
                Uuid::new_v4(),
                booking.customer_id,
                booking.trip_id,
                booking.seats_requested,
                total_amount,
                commission,
                &booking.passenger_info,
            )
            .await
    }

    /// Apply a status transition, enforcing the state machine. Cancellation
    /// hands the seats back to the trip.
    pub async fn set_status(&self, id: i32, request: UpdateBookingStatus) -> AppResult<Booking> {
        let current = self.repository.bookings.get_by_id(id).await?;
        if !current.status.can_transition_to(request.status) {
            return Err(AppError::Conflict(
                ErrorCode::InvalidTransition,
                format!(
                    "Cannot transition booking from {} to {}",
                    current.status, request.status
                ),
            ));
        }

        match request.status {
            BookingStatus::Cancelled => {
                self.repository
                    .bookings
                    .cancel(id, current.trip_id, current.seats_booked)
                    .await
            }
            status => self.repository.bookings.set_status(id, status).await,
        }
    }
}
