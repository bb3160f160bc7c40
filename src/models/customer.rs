//! Customer model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::CustomerStatus;

/// Customer row from database
///
/// Customers register through the public app; this API manages existing
/// accounts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub status: CustomerStatus,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create customer request (walk-in registration by staff)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 80))]
    pub first_name: String,
    #[validate(length(min = 1, max = 80))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

/// Partial customer update (identity and contact fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, max = 80))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 80))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

/// Account status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomerStatus {
    pub status: CustomerStatus,
}

/// Query parameters for customer listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CustomerQuery {
    /// Search by name, email or phone
    pub search: Option<String>,
    /// Filter by account status
    pub status: Option<CustomerStatus>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}
