//! Routes repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::route::{CreateRoute, Route, RouteDetails, UpdateRoute},
};

const ROUTE_WITH_STATIONS: &str = r#"
    SELECT r.*, ds.name AS departure_station, ar.name AS arrival_station
    FROM routes r
    JOIN stations ds ON r.departure_station_id = ds.id
    JOIN stations ar ON r.arrival_station_id = ar.id
"#;

#[derive(Clone)]
pub struct RoutesRepository {
    pool: Pool<Postgres>,
}

impl RoutesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn details_from_row(row: &sqlx::postgres::PgRow) -> RouteDetails {
        RouteDetails {
            route: Route {
                id: row.get("id"),
                company_id: row.get("company_id"),
                departure_station_id: row.get("departure_station_id"),
                arrival_station_id: row.get("arrival_station_id"),
                distance_km: row.get("distance_km"),
                duration_minutes: row.get("duration_minutes"),
                base_price: row.get("base_price"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            },
            departure_station: row.get("departure_station"),
            arrival_station: row.get("arrival_station"),
        }
    }

    /// List a company's routes with resolved station names
    pub async fn list_for_company(&self, company_id: i32) -> AppResult<Vec<RouteDetails>> {
        let query = format!("{} WHERE r.company_id = $1 ORDER BY r.id", ROUTE_WITH_STATIONS);
        let rows = sqlx::query(&query)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(Self::details_from_row).collect())
    }

    /// Get a route scoped to its owning company
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            "SELECT * FROM routes WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Route with id {} not found", id)))
    }

    /// Get route details with station names
    pub async fn get_details(&self, company_id: i32, id: i32) -> AppResult<RouteDetails> {
        let query = format!("{} WHERE r.company_id = $1 AND r.id = $2", ROUTE_WITH_STATIONS);
        let row = sqlx::query(&query)
            .bind(company_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Route with id {} not found", id)))?;
        Ok(Self::details_from_row(&row))
    }

    /// Create a new route
    pub async fn create(&self, company_id: i32, route: &CreateRoute) -> AppResult<Route> {
        let created = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (
                company_id, departure_station_id, arrival_station_id,
                distance_km, duration_minutes, base_price
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(route.departure_station_id)
        .bind(route.arrival_station_id)
        .bind(route.distance_km)
        .bind(route.duration_minutes)
        .bind(route.base_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partial update of a route
    pub async fn update(&self, company_id: i32, id: i32, route: &UpdateRoute) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes SET
                departure_station_id = COALESCE($1, departure_station_id),
                arrival_station_id = COALESCE($2, arrival_station_id),
                distance_km = COALESCE($3, distance_km),
                duration_minutes = COALESCE($4, duration_minutes),
                base_price = COALESCE($5, base_price),
                updated_at = NOW()
            WHERE company_id = $6 AND id = $7
            RETURNING *
            "#,
        )
        .bind(route.departure_station_id)
        .bind(route.arrival_station_id)
        .bind(route.distance_km)
        .bind(route.duration_minutes)
        .bind(route.base_price)
        .bind(company_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Route with id {} not found", id)))
    }

    /// Delete a route. Fails with a conflict if trips still reference it.
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM routes WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| super::constraint_error(e, "Route is still referenced by trips"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Route with id {} not found", id)));
        }
        Ok(())
    }
}
