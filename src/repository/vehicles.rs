//! Vehicles repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle},
};

#[derive(Clone)]
pub struct VehiclesRepository {
    pool: Pool<Postgres>,
}

impl VehiclesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a company's vehicles
    pub async fn list_for_company(&self, company_id: i32) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE company_id = $1 ORDER BY id",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    /// Get a vehicle scoped to its owning company
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle with id {} not found", id)))
    }

    /// Create a new vehicle. The registration number is unique per company.
    pub async fn create(&self, company_id: i32, vehicle: &CreateVehicle) -> AppResult<Vehicle> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                company_id, registration_number, brand, model, vehicle_type,
                capacity, has_air_conditioning, has_wifi, has_toilet, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active')
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&vehicle.registration_number)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.vehicle_type)
        .bind(vehicle.capacity)
        .bind(vehicle.has_air_conditioning)
        .bind(vehicle.has_wifi)
        .bind(vehicle.has_toilet)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::constraint_error(e, "Registration number already exists for this company"))?;

        Ok(created)
    }

    /// Partial update of a vehicle
    pub async fn update(&self, company_id: i32, id: i32, vehicle: &UpdateVehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles SET
                registration_number = COALESCE($1, registration_number),
                brand = COALESCE($2, brand),
                model = COALESCE($3, model),
                vehicle_type = COALESCE($4, vehicle_type),
                capacity = COALESCE($5, capacity),
                has_air_conditioning = COALESCE($6, has_air_conditioning),
                has_wifi = COALESCE($7, has_wifi),
                has_toilet = COALESCE($8, has_toilet),
                status = COALESCE($9, status),
                updated_at = NOW()
            WHERE company_id = $10 AND id = $11
            RETURNING *
            "#,
        )
        .bind(&vehicle.registration_number)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.vehicle_type)
        .bind(vehicle.capacity)
        .bind(vehicle.has_air_conditioning)
        .bind(vehicle.has_wifi)
        .bind(vehicle.has_toilet)
        .bind(vehicle.status)
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::constraint_error(e, "Registration number already exists for this company"))?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle with id {} not found", id)))
    }

    /// Delete a vehicle. Fails with a conflict if trips still reference it.
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| super::constraint_error(e, "Vehicle is still referenced by trips"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vehicle with id {} not found", id)));
        }
        Ok(())
    }
}
