//! Station model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::StationStatus;

/// Station row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Station {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: Option<i32>,
    pub has_waiting_room: bool,
    pub has_ticket_office: bool,
    pub has_parking: bool,
    pub status: StationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create station request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStation {
    #[validate(length(min = 2, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 80))]
    pub city: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub has_waiting_room: bool,
    #[serde(default)]
    pub has_ticket_office: bool,
    #[serde(default)]
    pub has_parking: bool,
}

/// Partial station update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStation {
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 80))]
    pub city: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub has_waiting_room: Option<bool>,
    pub has_ticket_office: Option<bool>,
    pub has_parking: Option<bool>,
    pub status: Option<StationStatus>,
}
