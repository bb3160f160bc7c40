//! Booking model, passenger manifest and commission arithmetic

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

use super::enums::BookingStatus;

/// Manifest schema versions this server understands
const SUPPORTED_MANIFEST_VERSIONS: &[u32] = &[1];

/// Booking row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    /// Public reference quoted by the customer
    pub reference: Uuid,
    pub customer_id: i32,
    pub trip_id: i32,
    pub status: BookingStatus,
    pub seats_booked: i32,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    #[schema(value_type = String)]
    pub commission_amount: Decimal,
    #[schema(value_type = PassengerManifest)]
    pub passenger_info: sqlx::types::Json<PassengerManifest>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking with customer and trip labels for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub customer_name: String,
    pub departure_station: String,
    pub arrival_station: String,
    pub departure_time: DateTime<Utc>,
}

/// Versioned passenger payload stored with each booking
///
/// Rejected at the boundary when the version is unknown, so old rows stay
/// readable while new shapes get an explicit migration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PassengerManifest {
    pub version: u32,
    pub passengers: Vec<PassengerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PassengerEntry {
    pub name: String,
    pub phone: Option<String>,
    pub id_document: Option<String>,
}

impl PassengerManifest {
    /// Boundary validation for incoming manifests
    pub fn validate_shape(&self) -> AppResult<()> {
        if !SUPPORTED_MANIFEST_VERSIONS.contains(&self.version) {
            return Err(AppError::Validation(format!(
                "Unsupported passenger_info version: {}",
                self.version
            )));
        }
        if self.passengers.is_empty() {
            return Err(AppError::Validation(
                "passenger_info must list at least one passenger".to_string(),
            ));
        }
        if self.passengers.iter().any(|p| p.name.trim().is_empty()) {
            return Err(AppError::Validation(
                "Every passenger needs a name".to_string(),
            ));
        }
        Ok(())
    }
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub customer_id: i32,
    pub trip_id: i32,
    #[validate(range(min = 1))]
    pub seats_requested: i32,
    pub passenger_info: PassengerManifest,
}

/// Status transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}

/// Query parameters for booking listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    /// Filter by status
    pub status: Option<BookingStatus>,
    /// Filter by trip
    pub trip_id: Option<i32>,
    /// Filter by customer
    pub customer_id: Option<i32>,
    /// Bookings created at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Bookings created before this instant
    pub to: Option<DateTime<Utc>>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}

/// Platform commission on a booking total, rounded half-away-from-zero to
/// whole currency units (amounts are in FCFA)
pub fn commission_amount(total: Decimal, percentage: Decimal) -> Decimal {
    (total * percentage / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// What the company keeps from its gross revenue after the platform's cut.
/// The retained commission is floored, so the company never loses a fraction
/// of a franc to rounding.
pub fn net_revenue(revenue: Decimal, percentage: Decimal) -> Decimal {
    revenue - (revenue * percentage / Decimal::ONE_HUNDRED).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn commission_is_fifteen_percent_of_total() {
        // 4 seats at 5000 FCFA
        assert_eq!(commission_amount(d(20000), d(15)), d(3000));
    }

    #[test]
    fn commission_rounds_half_away_from_zero() {
        // 330 * 0.15 = 49.5 -> 50
        assert_eq!(commission_amount(d(330), d(15)), d(50));
        // 333 * 0.15 = 49.95 -> 50
        assert_eq!(commission_amount(d(333), d(15)), d(50));
        // 327 * 0.15 = 49.05 -> 49
        assert_eq!(commission_amount(d(327), d(15)), d(49));
    }

    #[test]
    fn net_revenue_floors_the_commission() {
        // 333 * 0.15 = 49.95, floored to 49
        assert_eq!(net_revenue(d(333), d(15)), d(284));
        assert_eq!(net_revenue(d(20000), d(15)), d(17000));
    }

    #[test]
    fn manifest_version_gate() {
        let manifest = PassengerManifest {
            version: 1,
            passengers: vec![PassengerEntry {
                name: "Aya Koné".to_string(),
                phone: Some("+2250700000001".to_string()),
                id_document: None,
            }],
        };
        assert!(manifest.validate_shape().is_ok());

        let unknown = PassengerManifest { version: 7, ..manifest.clone() };
        assert!(unknown.validate_shape().is_err());
    }

    #[test]
    fn manifest_rejects_empty_and_nameless() {
        let empty = PassengerManifest { version: 1, passengers: vec![] };
        assert!(empty.validate_shape().is_err());

        let nameless = PassengerManifest {
            version: 1,
            passengers: vec![PassengerEntry { name: "  ".to_string(), phone: None, id_document: None }],
        };
        assert!(nameless.validate_shape().is_err());
    }
}
