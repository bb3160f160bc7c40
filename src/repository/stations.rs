//! Stations repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::station::{CreateStation, Station, UpdateStation},
};

#[derive(Clone)]
pub struct StationsRepository {
    pool: Pool<Postgres>,
}

impl StationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a company's stations. Ordered by id so repeated reads return the
    /// same array when nothing changed.
    pub async fn list_for_company(&self, company_id: i32) -> AppResult<Vec<Station>> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT * FROM stations WHERE company_id = $1 ORDER BY id",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stations)
    }

    /// Get a station scoped to its owning company
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<Station> {
        sqlx::query_as::<_, Station>(
            "SELECT * FROM stations WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Station with id {} not found", id)))
    }

    /// Create a new station
    pub async fn create(&self, company_id: i32, station: &CreateStation) -> AppResult<Station> {
        let created = sqlx::query_as::<_, Station>(
            r#"
            INSERT INTO stations (
                company_id, name, city, address, latitude, longitude, capacity,
                has_waiting_room, has_ticket_office, has_parking, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'active')
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&station.name)
        .bind(&station.city)
        .bind(&station.address)
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(station.capacity)
        .bind(station.has_waiting_room)
        .bind(station.has_ticket_office)
        .bind(station.has_parking)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partial update of a station
    pub async fn update(&self, company_id: i32, id: i32, station: &UpdateStation) -> AppResult<Station> {
        sqlx::query_as::<_, Station>(
            r#"
            UPDATE stations SET
                name = COALESCE($1, name),
                city = COALESCE($2, city),
                address = COALESCE($3, address),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                capacity = COALESCE($6, capacity),
                has_waiting_room = COALESCE($7, has_waiting_room),
                has_ticket_office = COALESCE($8, has_ticket_office),
                has_parking = COALESCE($9, has_parking),
                status = COALESCE($10, status),
                updated_at = NOW()
            WHERE company_id = $11 AND id = $12
            RETURNING *
            "#,
        )
        .bind(&station.name)
        .bind(&station.city)
        .bind(&station.address)
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(station.capacity)
        .bind(station.has_waiting_room)
        .bind(station.has_ticket_office)
        .bind(station.has_parking)
        .bind(station.status)
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Station with id {} not found", id)))
    }

    /// Delete a station. Fails with a conflict if routes or stops still
    /// reference it.
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM stations WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| super::constraint_error(e, "Station is still referenced by routes or stops"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Station with id {} not found", id)));
        }
        Ok(())
    }
}
