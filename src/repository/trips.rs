//! Trips repository for database operations
//!
//! Seat inventory lives here as a single conditional UPDATE so two
//! concurrent bookings can never both take the last seats.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::enums::TripStatus,
    models::trip::{Trip, TripDetails, TripQuery, UpdateTrip},
};

const TRIP_WITH_LABELS: &str = r#"
    SELECT t.*,
           ds.name AS departure_station,
           ar.name AS arrival_station,
           v.registration_number AS vehicle_registration,
           v.capacity AS vehicle_capacity,
           p.first_name || ' ' || p.last_name AS driver_name
    FROM trips t
    JOIN routes r ON t.route_id = r.id
    JOIN stations ds ON r.departure_station_id = ds.id
    JOIN stations ar ON r.arrival_station_id = ar.id
    JOIN vehicles v ON t.vehicle_id = v.id
    JOIN personnel p ON t.driver_id = p.id
"#;

#[derive(Clone)]
pub struct TripsRepository {
    pool: Pool<Postgres>,
}

impl TripsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn details_from_row(row: &sqlx::postgres::PgRow) -> TripDetails {
        TripDetails {
            trip: Trip {
                id: row.get("id"),
                company_id: row.get("company_id"),
                route_id: row.get("route_id"),
                vehicle_id: row.get("vehicle_id"),
                driver_id: row.get("driver_id"),
                departure_time: row.get("departure_time"),
                arrival_time: row.get("arrival_time"),
                status: row.get("status"),
                price: row.get("price"),
                available_seats: row.get("available_seats"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            },
            departure_station: row.get("departure_station"),
            arrival_station: row.get("arrival_station"),
            vehicle_registration: row.get("vehicle_registration"),
            vehicle_capacity: row.get("vehicle_capacity"),
            driver_name: row.get("driver_name"),
        }
    }

    /// Get trip by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Trip> {
        sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip with id {} not found", id)))
    }

    /// Get a trip scoped to its owning company
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<Trip> {
        sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip with id {} not found", id)))
    }

    /// Get trip details with route, vehicle and driver labels
    pub async fn get_details(&self, company_id: i32, id: i32) -> AppResult<TripDetails> {
        let query = format!("{} WHERE t.company_id = $1 AND t.id = $2", TRIP_WITH_LABELS);
        let row = sqlx::query(&query)
            .bind(company_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip with id {} not found", id)))?;
        Ok(Self::details_from_row(&row))
    }

    /// Search a company's trips with pagination
    pub async fn search(
        &self,
        company_id: i32,
        query: &TripQuery,
    ) -> AppResult<(Vec<TripDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

        let listing = format!(
            r#"{}
            WHERE t.company_id = $1
              AND ($2::text IS NULL OR t.status = $2)
              AND ($3::int IS NULL OR t.route_id = $3)
              AND ($4::timestamptz IS NULL OR t.departure_time >= $4)
              AND ($5::timestamptz IS NULL OR t.departure_time < $5)
            ORDER BY t.departure_time, t.id
            LIMIT $6 OFFSET $7
            "#,
            TRIP_WITH_LABELS
        );

        let rows = sqlx::query(&listing)
            .bind(company_id)
            .bind(query.status.map(|s| s.as_str()))
            .bind(query.route_id)
            .bind(query.from)
            .bind(query.to)
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM trips t
            WHERE t.company_id = $1
              AND ($2::text IS NULL OR t.status = $2)
              AND ($3::int IS NULL OR t.route_id = $3)
              AND ($4::timestamptz IS NULL OR t.departure_time >= $4)
              AND ($5::timestamptz IS NULL OR t.departure_time < $5)
            "#,
        )
        .bind(company_id)
        .bind(query.status.map(|s| s.as_str()))
        .bind(query.route_id)
        .bind(query.from)
        .bind(query.to)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.iter().map(Self::details_from_row).collect(), total))
    }

    /// Whether the vehicle is already assigned to another non-terminal trip
    /// overlapping the [departure, arrival) window
    pub async fn vehicle_overlaps(
        &self,
        vehicle_id: i32,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
        exclude_trip: Option<i32>,
    ) -> AppResult<bool> {
        let overlaps: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM trips
                WHERE vehicle_id = $1
                  AND status IN ('scheduled', 'in_progress')
                  AND departure_time < $3
                  AND arrival_time > $2
                  AND ($4::int IS NULL OR id != $4)
            )
            "#,
        )
        .bind(vehicle_id)
        .bind(departure)
        .bind(arrival)
        .bind(exclude_trip)
        .fetch_one(&self.pool)
        .await?;
        Ok(overlaps)
    }

    /// Whether the trip has bookings that are not cancelled
    pub async fn has_active_bookings(&self, trip_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE trip_id = $1 AND status != 'cancelled')",
        )
        .bind(trip_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new trip (all defaults already resolved by the caller)
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        company_id: i32,
        route_id: i32,
        vehicle_id: i32,
        driver_id: i32,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
        price: Decimal,
        available_seats: i32,
    ) -> AppResult<Trip> {
        let created = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                company_id, route_id, vehicle_id, driver_id,
                departure_time, arrival_time, status, price, available_seats
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'scheduled', $7, $8)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(route_id)
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(departure_time)
        .bind(arrival_time)
        .bind(price)
        .bind(available_seats)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partial update of a trip's assignment and schedule fields
    pub async fn update(&self, company_id: i32, id: i32, trip: &UpdateTrip) -> AppResult<Trip> {
        sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips SET
                route_id = COALESCE($1, route_id),
                vehicle_id = COALESCE($2, vehicle_id),
                driver_id = COALESCE($3, driver_id),
                departure_time = COALESCE($4, departure_time),
                arrival_time = COALESCE($5, arrival_time),
                price = COALESCE($6, price),
                available_seats = COALESCE($7, available_seats),
                updated_at = NOW()
            WHERE company_id = $8 AND id = $9
            RETURNING *
            "#,
        )
        .bind(trip.route_id)
        .bind(trip.vehicle_id)
        .bind(trip.driver_id)
        .bind(trip.departure_time)
        .bind(trip.arrival_time)
        .bind(trip.price)
        .bind(trip.available_seats)
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip with id {} not found", id)))
    }

    /// Set a trip's status (transition already validated by the caller)
    pub async fn set_status(&self, id: i32, status: TripStatus) -> AppResult<Trip> {
        sqlx::query_as::<_, Trip>(
            "UPDATE trips SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip with id {} not found", id)))
    }

    /// Delete a trip
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM trips WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| super::constraint_error(e, "Trip still has bookings or stops"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Trip with id {} not found", id)));
        }
        Ok(())
    }
}
