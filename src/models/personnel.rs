//! Personnel (driver / agent) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{PersonnelStatus, PersonnelType};

/// Personnel row from database
///
/// Drivers carry license fields; agents leave them null.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Personnel {
    pub id: i32,
    pub company_id: i32,
    pub personnel_type: PersonnelType,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub license_type: Option<String>,
    pub status: PersonnelStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create personnel request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePersonnel {
    pub personnel_type: PersonnelType,
    #[validate(length(min = 1, max = 80))]
    pub first_name: String,
    #[validate(length(min = 1, max = 80))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub license_type: Option<String>,
}

/// Partial personnel update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePersonnel {
    #[validate(length(min = 1, max = 80))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 80))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub license_type: Option<String>,
    pub status: Option<PersonnelStatus>,
}

/// Query parameters for personnel listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PersonnelQuery {
    /// Filter by type (driver or agent)
    #[serde(rename = "type")]
    pub personnel_type: Option<PersonnelType>,
    /// Filter by status
    pub status: Option<PersonnelStatus>,
}
