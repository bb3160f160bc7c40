//! Bookings repository for database operations
//!
//! Booking creation and cancellation run in a transaction together with the
//! trip seat counter, so the inventory can never drift from the bookings.

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::booking::{Booking, BookingDetails, BookingQuery, PassengerManifest},
    models::enums::BookingStatus,
};

const BOOKING_WITH_LABELS: &str = r#"
    SELECT b.*,
           c.first_name || ' ' || c.last_name AS customer_name,
           ds.name AS departure_station,
           ar.name AS arrival_station,
           t.departure_time
    FROM bookings b
    JOIN customers c ON b.customer_id = c.id
    JOIN trips t ON b.trip_id = t.id
    JOIN routes r ON t.route_id = r.id
    JOIN stations ds ON r.departure_station_id = ds.id
    JOIN stations ar ON r.arrival_station_id = ar.id
"#;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn details_from_row(row: &sqlx::postgres::PgRow) -> BookingDetails {
        BookingDetails {
            booking: Booking {
                id: row.get("id"),
                reference: row.get("reference"),
                customer_id: row.get("customer_id"),
                trip_id: row.get("trip_id"),
                status: row.get("status"),
                seats_booked: row.get("seats_booked"),
                total_amount: row.get("total_amount"),
                commission_amount: row.get("commission_amount"),
                passenger_info: row.get("passenger_info"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            },
            customer_name: row.get("customer_name"),
            departure_station: row.get("departure_station"),
            arrival_station: row.get("arrival_station"),
            departure_time: row.get("departure_time"),
        }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Get booking details with customer and trip labels
    pub async fn get_details(&self, id: i32) -> AppResult<BookingDetails> {
        let query = format!("{} WHERE b.id = $1", BOOKING_WITH_LABELS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        Ok(Self::details_from_row(&row))
    }

    /// Search bookings with pagination
    pub async fn search(&self, query: &BookingQuery) -> AppResult<(Vec<BookingDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

        let listing = format!(
            r#"{}
            WHERE ($1::text IS NULL OR b.status = $1)
              AND ($2::int IS NULL OR b.trip_id = $2)
              AND ($3::int IS NULL OR b.customer_id = $3)
              AND ($4::timestamptz IS NULL OR b.created_at >= $4)
              AND ($5::timestamptz IS NULL OR b.created_at < $5)
            ORDER BY b.created_at DESC, b.id DESC
            LIMIT $6 OFFSET $7
            "#,
            BOOKING_WITH_LABELS
        );

        let rows = sqlx::query(&listing)
            .bind(query.status.map(|s| s.as_str()))
            .bind(query.trip_id)
            .bind(query.customer_id)
            .bind(query.from)
            .bind(query.to)
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings b
            WHERE ($1::text IS NULL OR b.status = $1)
              AND ($2::int IS NULL OR b.trip_id = $2)
              AND ($3::int IS NULL OR b.customer_id = $3)
              AND ($4::timestamptz IS NULL OR b.created_at >= $4)
              AND ($5::timestamptz IS NULL OR b.created_at < $5)
            "#,
        )
        .bind(query.status.map(|s| s.as_str()))
        .bind(query.trip_id)
        .bind(query.customer_id)
        .bind(query.from)
        .bind(query.to)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.iter().map(Self::details_from_row).collect(), total))
    }

    /// Create a booking, taking the seats with one conditional decrement in
    /// the same transaction. Zero rows updated means the trip no longer has
    /// the seats (or stopped accepting bookings) and the whole operation
    /// rolls back.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        reference: Uuid,
        customer_id: i32,
        trip_id: i32,
        seats: i32,
        total_amount: Decimal,
        commission_amount: Decimal,
        passenger_info: &PassengerManifest,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query(
            r#"
            UPDATE trips
            SET available_seats = available_seats - $1, updated_at = NOW()
            WHERE id = $2
              AND available_seats >= $1
              AND status IN ('scheduled', 'in_progress')
            "#,
        )
        .bind(seats)
        .bind(trip_id)
        .execute(&mut *tx)
        .await?;

        if reserved.rows_affected() == 0 {
            return Err(AppError::Conflict(
                ErrorCode::SeatsUnavailable,
                format!("Trip {} does not have {} seats available", trip_id, seats),
            ));
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                reference, customer_id, trip_id, status, seats_booked,
                total_amount, commission_amount, passenger_info
            )
            VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(reference)
        .bind(customer_id)
        .bind(trip_id)
        .bind(seats)
        .bind(total_amount)
        .bind(commission_amount)
        .bind(sqlx::types::Json(passenger_info))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Set a booking's status (transition already validated by the caller)
    pub async fn set_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Cancel a booking and hand its seats back to the trip, atomically
    pub async fn cancel(&self, id: i32, trip_id: i32, seats: i32) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        sqlx::query(
            "UPDATE trips SET available_seats = available_seats + $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(seats)
        .bind(trip_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }
}
