//! Route model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Route row from database
///
/// A fixed departure/arrival station pair with nominal distance, duration and
/// base price, reusable across many trips.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Route {
    pub id: i32,
    pub company_id: i32,
    pub departure_station_id: i32,
    pub arrival_station_id: i32,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Nominal travel time in minutes
    pub duration_minutes: i32,
    #[schema(value_type = String)]
    pub base_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Route with resolved station names for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RouteDetails {
    #[serde(flatten)]
    pub route: Route,
    pub departure_station: String,
    pub arrival_station: String,
}

/// Create route request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoute {
    pub departure_station_id: i32,
    pub arrival_station_id: i32,
    #[validate(range(min = 0.1))]
    pub distance_km: f64,
    #[validate(range(min = 1))]
    pub duration_minutes: i32,
    #[schema(value_type = String)]
    pub base_price: Decimal,
}

/// Partial route update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoute {
    pub departure_station_id: Option<i32>,
    pub arrival_station_id: Option<i32>,
    #[validate(range(min = 0.1))]
    pub distance_km: Option<f64>,
    #[validate(range(min = 1))]
    pub duration_minutes: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub base_price: Option<Decimal>,
}
