//! Personnel repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::personnel::{CreatePersonnel, Personnel, PersonnelQuery, UpdatePersonnel},
};

#[derive(Clone)]
pub struct PersonnelRepository {
    pool: Pool<Postgres>,
}

impl PersonnelRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a company's personnel, optionally filtered by type and status
    pub async fn list_for_company(
        &self,
        company_id: i32,
        query: &PersonnelQuery,
    ) -> AppResult<Vec<Personnel>> {
        let personnel = sqlx::query_as::<_, Personnel>(
            r#"
            SELECT * FROM personnel
            WHERE company_id = $1
              AND ($2::text IS NULL OR personnel_type = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY id
            "#,
        )
        .bind(company_id)
        .bind(query.personnel_type.map(|t| t.as_str()))
        .bind(query.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;
        Ok(personnel)
    }

    /// Get a personnel record scoped to its owning company
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<Personnel> {
        sqlx::query_as::<_, Personnel>(
            "SELECT * FROM personnel WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Personnel with id {} not found", id)))
    }

    /// Create a new personnel record
    pub async fn create(&self, company_id: i32, personnel: &CreatePersonnel) -> AppResult<Personnel> {
        let created = sqlx::query_as::<_, Personnel>(
            r#"
            INSERT INTO personnel (
                company_id, personnel_type, first_name, last_name, email, phone,
                license_number, license_expiry_date, license_type, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active')
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(personnel.personnel_type)
        .bind(&personnel.first_name)
        .bind(&personnel.last_name)
        .bind(&personnel.email)
        .bind(&personnel.phone)
        .bind(&personnel.license_number)
        .bind(personnel.license_expiry_date)
        .bind(&personnel.license_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partial update of a personnel record
    pub async fn update(&self, company_id: i32, id: i32, personnel: &UpdatePersonnel) -> AppResult<Personnel> {
        sqlx::query_as::<_, Personnel>(
            r#"
            UPDATE personnel SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                license_number = COALESCE($5, license_number),
                license_expiry_date = COALESCE($6, license_expiry_date),
                license_type = COALESCE($7, license_type),
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE company_id = $9 AND id = $10
            RETURNING *
            "#,
        )
        .bind(&personnel.first_name)
        .bind(&personnel.last_name)
        .bind(&personnel.email)
        .bind(&personnel.phone)
        .bind(&personnel.license_number)
        .bind(personnel.license_expiry_date)
        .bind(&personnel.license_type)
        .bind(personnel.status)
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Personnel with id {} not found", id)))
    }

    /// Delete a personnel record. Fails with a conflict if trips still
    /// reference the driver.
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM personnel WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| super::constraint_error(e, "Personnel is still referenced by trips"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Personnel with id {} not found", id)));
        }
        Ok(())
    }
}
