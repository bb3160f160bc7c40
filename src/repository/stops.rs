//! Trip stops repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::stop::{CreateStop, TripStop, UpdateStop},
};

#[derive(Clone)]
pub struct StopsRepository {
    pool: Pool<Postgres>,
}

impl StopsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a trip's stops in traversal order
    pub async fn list_for_trip(&self, trip_id: i32) -> AppResult<Vec<TripStop>> {
        let stops = sqlx::query_as::<_, TripStop>(
            "SELECT * FROM trip_stops WHERE trip_id = $1 ORDER BY stop_order",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stops)
    }

    /// Get a stop scoped to its trip
    pub async fn get(&self, trip_id: i32, id: i32) -> AppResult<TripStop> {
        sqlx::query_as::<_, TripStop>(
            "SELECT * FROM trip_stops WHERE trip_id = $1 AND id = $2",
        )
        .bind(trip_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Stop with id {} not found", id)))
    }

    /// Create a new stop. The (trip, stop_order) pair is unique; a taken
    /// order is a conflict, never renumbered.
    pub async fn create(&self, trip_id: i32, stop: &CreateStop) -> AppResult<TripStop> {
        let created = sqlx::query_as::<_, TripStop>(
            r#"
            INSERT INTO trip_stops (
                trip_id, station_id, stop_order, arrival_time, departure_time,
                available_seats, price, platform, notes, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'scheduled')
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(stop.station_id)
        .bind(stop.stop_order)
        .bind(stop.arrival_time)
        .bind(stop.departure_time)
        .bind(stop.available_seats)
        .bind(stop.price)
        .bind(&stop.platform)
        .bind(&stop.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::stop_order_conflict(e, trip_id, stop.stop_order))?;

        Ok(created)
    }

    /// Partial update of a stop
    pub async fn update(&self, trip_id: i32, id: i32, stop: &UpdateStop) -> AppResult<TripStop> {
        sqlx::query_as::<_, TripStop>(
            r#"
            UPDATE trip_stops SET
                station_id = COALESCE($1, station_id),
                stop_order = COALESCE($2, stop_order),
                arrival_time = COALESCE($3, arrival_time),
                departure_time = COALESCE($4, departure_time),
                available_seats = COALESCE($5, available_seats),
                boarding_count = COALESCE($6, boarding_count),
                alighting_count = COALESCE($7, alighting_count),
                price = COALESCE($8, price),
                platform = COALESCE($9, platform),
                notes = COALESCE($10, notes),
                status = COALESCE($11, status),
                updated_at = NOW()
            WHERE trip_id = $12 AND id = $13
            RETURNING *
            "#,
        )
        .bind(stop.station_id)
        .bind(stop.stop_order)
        .bind(stop.arrival_time)
        .bind(stop.departure_time)
        .bind(stop.available_seats)
        .bind(stop.boarding_count)
        .bind(stop.alighting_count)
        .bind(stop.price)
        .bind(&stop.platform)
        .bind(&stop.notes)
        .bind(stop.status)
        .bind(trip_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::stop_order_conflict(e, trip_id, stop.stop_order.unwrap_or(0)))?
        .ok_or_else(|| AppError::NotFound(format!("Stop with id {} not found", id)))
    }

    /// Delete a stop
    pub async fn delete(&self, trip_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM trip_stops WHERE trip_id = $1 AND id = $2")
            .bind(trip_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Stop with id {} not found", id)));
        }
        Ok(())
    }

    fn stop_order_conflict(err: sqlx::Error, trip_id: i32, order: i32) -> AppError {
        let is_unique = err
            .as_database_error()
            .and_then(|e| e.code().map(|c| c == "23505"))
            .unwrap_or(false);
        if is_unique {
            AppError::Conflict(
                ErrorCode::StopOrderTaken,
                format!("Stop order {} is already taken on trip {}", order, trip_id),
            )
        } else {
            AppError::Database(err)
        }
    }
}
