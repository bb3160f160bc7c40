//! Customers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, CustomerQuery, UpdateCustomer},
    models::enums::CustomerStatus,
};

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get customer by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Search customers with pagination
    pub async fn search(&self, query: &CustomerQuery) -> AppResult<(Vec<Customer>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let search = query.search.as_ref().map(|s| format!("%{}%", s));

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE ($1::text IS NULL
                   OR first_name ILIKE $1 OR last_name ILIKE $1
                   OR email ILIKE $1 OR phone ILIKE $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&search)
        .bind(query.status.map(|s| s.as_str()))
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM customers
            WHERE ($1::text IS NULL
                   OR first_name ILIKE $1 OR last_name ILIKE $1
                   OR email ILIKE $1 OR phone ILIKE $1)
              AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(&search)
        .bind(query.status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;

        Ok((customers, total))
    }

    /// Create a customer account (walk-in registration by staff)
    pub async fn create(&self, customer: &CreateCustomer) -> AppResult<Customer> {
        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, email, phone, city, status)
            VALUES ($1, $2, $3, $4, $5, 'active')
            RETURNING *
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::constraint_error(e, "Email already registered"))?;

        Ok(created)
    }

    /// Partial update of a customer's identity and contact fields
    pub async fn update(&self, id: i32, customer: &UpdateCustomer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                city = COALESCE($5, city),
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.city)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Change a customer's account status
    pub async fn set_status(&self, id: i32, status: CustomerStatus) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "UPDATE customers SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }
}
