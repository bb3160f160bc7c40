//! Companies repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::company::{Company, CompanyDetails, CompanyQuery, CreateCompany, UpdateCompany},
    models::enums::CompanyStatus,
};

/// Shared projection: a company row plus live counts from the owned tables.
/// The counters are always computed on read; nothing is denormalized.
const COMPANY_WITH_COUNTS: &str = r#"
    SELECT c.*,
           (SELECT COUNT(*) FROM personnel p
             WHERE p.company_id = c.id AND p.personnel_type = 'driver') AS drivers_count,
           (SELECT COUNT(*) FROM vehicles v WHERE v.company_id = c.id) AS vehicles_count,
           (SELECT COUNT(*) FROM stations s WHERE s.company_id = c.id) AS stations_count,
           (SELECT COUNT(*) FROM trips t WHERE t.company_id = c.id) AS trips_count
    FROM companies c
"#;

#[derive(Clone)]
pub struct CompaniesRepository {
    pool: Pool<Postgres>,
}

impl CompaniesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn details_from_row(row: &sqlx::postgres::PgRow) -> CompanyDetails {
        CompanyDetails {
            company: Company {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
                address: row.get("address"),
                city: row.get("city"),
                country: row.get("country"),
                status: row.get("status"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            },
            drivers_count: row.get("drivers_count"),
            vehicles_count: row.get("vehicles_count"),
            stations_count: row.get("stations_count"),
            trips_count: row.get("trips_count"),
        }
    }

    /// Get company by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Company> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))
    }

    /// Get company with live counts
    pub async fn get_details(&self, id: i32) -> AppResult<CompanyDetails> {
        let query = format!("{} WHERE c.id = $1", COMPANY_WITH_COUNTS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))?;
        Ok(Self::details_from_row(&row))
    }

    /// Search companies with pagination
    pub async fn search(&self, query: &CompanyQuery) -> AppResult<(Vec<CompanyDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let search = query.search.as_ref().map(|s| format!("%{}%", s));

        let listing = format!(
            r#"{}
            WHERE ($1::text IS NULL OR c.name ILIKE $1 OR c.city ILIKE $1)
              AND ($2::text IS NULL OR c.status = $2)
            ORDER BY c.id
            LIMIT $3 OFFSET $4
            "#,
            COMPANY_WITH_COUNTS
        );

        let rows = sqlx::query(&listing)
            .bind(&search)
            .bind(query.status.map(|s| s.as_str()))
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM companies c
            WHERE ($1::text IS NULL OR c.name ILIKE $1 OR c.city ILIKE $1)
              AND ($2::text IS NULL OR c.status = $2)
            "#,
        )
        .bind(&search)
        .bind(query.status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.iter().map(Self::details_from_row).collect(), total))
    }

    /// Create a new company
    pub async fn create(&self, company: &CreateCompany) -> AppResult<Company> {
        let created = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, email, phone, address, city, country, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'active')
            RETURNING *
            "#,
        )
        .bind(&company.name)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address)
        .bind(&company.city)
        .bind(&company.country)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::constraint_error(e, "Company name already exists"))?;

        Ok(created)
    }

    /// Partial update of a company
    pub async fn update(&self, id: i32, company: &UpdateCompany) -> AppResult<Company> {
        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($1, name),
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                city = COALESCE($5, city),
                country = COALESCE($6, country),
                updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&company.name)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address)
        .bind(&company.city)
        .bind(&company.country)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))
    }

    /// Toggle company status (companies are never hard-deleted)
    pub async fn set_status(&self, id: i32, status: CompanyStatus) -> AppResult<Company> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))
    }
}
