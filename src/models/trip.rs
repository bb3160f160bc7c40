//! Trip model and related types

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::TripStatus;

/// Trip row from database
///
/// A single scheduled departure of one vehicle/driver along one route.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Trip {
    pub id: i32,
    pub company_id: i32,
    pub route_id: i32,
    pub vehicle_id: i32,
    pub driver_id: i32,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: TripStatus,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub available_seats: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trip with resolved route, vehicle and driver labels for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TripDetails {
    #[serde(flatten)]
    pub trip: Trip,
    pub departure_station: String,
    pub arrival_station: String,
    pub vehicle_registration: String,
    pub vehicle_capacity: i32,
    pub driver_name: String,
}

/// Create trip request
///
/// `arrival_time` defaults to `departure_time + route.duration`; `price`
/// defaults to the route's base price; `available_seats` defaults to the
/// vehicle capacity.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTrip {
    pub route_id: i32,
    pub vehicle_id: i32,
    pub driver_id: i32,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[validate(range(min = 1))]
    pub available_seats: Option<i32>,
}

/// Partial trip update (only while the trip is not terminal)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTrip {
    pub route_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub driver_id: Option<i32>,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub available_seats: Option<i32>,
}

/// Status transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTripStatus {
    pub status: TripStatus,
}

/// Query parameters for trip listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct TripQuery {
    /// Filter by status
    pub status: Option<TripStatus>,
    /// Filter by route
    pub route_id: Option<i32>,
    /// Departures at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Departures before this instant
    pub to: Option<DateTime<Utc>>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}

/// Arrival time derived from the route's nominal duration
pub fn derive_arrival_time(departure: DateTime<Utc>, duration_minutes: i32) -> DateTime<Utc> {
    departure + Duration::minutes(duration_minutes as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrival_derived_from_route_duration() {
        let departure = "2025-03-01T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let arrival = derive_arrival_time(departure, 180);
        assert_eq!(arrival, "2025-03-01T11:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert!(arrival > departure);
    }
}
