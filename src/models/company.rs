//! Transport company model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::CompanyStatus;

/// Company row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub status: CompanyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Company with live resource counts, computed on read from the owned tables
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyDetails {
    #[serde(flatten)]
    pub company: Company,
    /// Number of drivers on staff
    pub drivers_count: i64,
    /// Number of vehicles in the fleet
    pub vehicles_count: i64,
    /// Number of stations operated
    pub stations_count: i64,
    /// Number of trips (all statuses)
    pub trips_count: i64,
}

/// Create company request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCompany {
    #[validate(length(min = 2, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Partial company update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCompany {
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Status toggle request (companies are never hard-deleted)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCompanyStatus {
    pub status: CompanyStatus,
}

/// Query parameters for company listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CompanyQuery {
    /// Search by name or city
    pub search: Option<String>,
    /// Filter by status
    pub status: Option<CompanyStatus>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}
