//! Staff users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::staff::{StaffRole, StaffUser},
};

#[derive(Clone)]
pub struct StaffRepository {
    pool: Pool<Postgres>,
}

impl StaffRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get staff user by login
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<StaffUser>> {
        let user = sqlx::query_as::<_, StaffUser>("SELECT * FROM staff_users WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Get staff user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<StaffUser> {
        sqlx::query_as::<_, StaffUser>("SELECT * FROM staff_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Staff user with id {} not found", id)))
    }

    /// Count staff users
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a staff user with an already-hashed password
    pub async fn create(
        &self,
        login: &str,
        password_hash: &str,
        role: StaffRole,
    ) -> AppResult<StaffUser> {
        let created = sqlx::query_as::<_, StaffUser>(
            r#"
            INSERT INTO staff_users (login, password, role, active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#,
        )
        .bind(login)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::constraint_error(e, "Login already exists"))?;

        Ok(created)
    }

    /// Record a successful login
    pub async fn touch_last_login(&self, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE staff_users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
