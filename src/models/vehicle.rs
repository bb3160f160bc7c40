//! Vehicle model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::VehicleStatus;

/// Vehicle row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vehicle {
    pub id: i32,
    pub company_id: i32,
    /// Registration plate, unique within a company
    pub registration_number: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: Option<String>,
    /// Number of passenger seats
    pub capacity: i32,
    pub has_air_conditioning: bool,
    pub has_wifi: bool,
    pub has_toilet: bool,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create vehicle request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicle {
    #[validate(length(min = 2, max = 32))]
    pub registration_number: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub capacity: i32,
    #[serde(default)]
    pub has_air_conditioning: bool,
    #[serde(default)]
    pub has_wifi: bool,
    #[serde(default)]
    pub has_toilet: bool,
}

/// Partial vehicle update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicle {
    #[validate(length(min = 2, max = 32))]
    pub registration_number: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub capacity: Option<i32>,
    pub has_air_conditioning: Option<bool>,
    pub has_wifi: Option<bool>,
    pub has_toilet: Option<bool>,
    pub status: Option<VehicleStatus>,
}
