//! Shared domain status enums
//!
//! Statuses are stored as text slugs in the database and exposed verbatim in
//! the JSON API. Each enum carries the sqlx TEXT codec impls so repositories
//! can bind them directly.

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// CompanyStatus
// ---------------------------------------------------------------------------

/// Transport company account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    Active,
    Inactive,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Active => "active",
            CompanyStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CompanyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CompanyStatus::Active),
            "inactive" => Ok(CompanyStatus::Inactive),
            _ => Err(format!("Invalid company status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for CompanyStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for CompanyStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for CompanyStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// StationStatus
// ---------------------------------------------------------------------------

/// Station operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    Active,
    Inactive,
    UnderMaintenance,
}

impl StationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Active => "active",
            StationStatus::Inactive => "inactive",
            StationStatus::UnderMaintenance => "under_maintenance",
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StationStatus::Active),
            "inactive" => Ok(StationStatus::Inactive),
            "under_maintenance" => Ok(StationStatus::UnderMaintenance),
            _ => Err(format!("Invalid station status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for StationStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for StationStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for StationStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// VehicleStatus
// ---------------------------------------------------------------------------

/// Vehicle operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Inactive,
    UnderMaintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Inactive => "inactive",
            VehicleStatus::UnderMaintenance => "under_maintenance",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(VehicleStatus::Active),
            "inactive" => Ok(VehicleStatus::Inactive),
            "under_maintenance" => Ok(VehicleStatus::UnderMaintenance),
            _ => Err(format!("Invalid vehicle status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for VehicleStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for VehicleStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for VehicleStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// PersonnelType
// ---------------------------------------------------------------------------

/// Personnel role within a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PersonnelType {
    Driver,
    Agent,
}

impl PersonnelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonnelType::Driver => "driver",
            PersonnelType::Agent => "agent",
        }
    }
}

impl std::fmt::Display for PersonnelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PersonnelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver" => Ok(PersonnelType::Driver),
            "agent" => Ok(PersonnelType::Agent),
            _ => Err(format!("Invalid personnel type: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for PersonnelType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for PersonnelType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for PersonnelType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// PersonnelStatus
// ---------------------------------------------------------------------------

/// Personnel availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PersonnelStatus {
    Active,
    Inactive,
    OnLeave,
}

impl PersonnelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonnelStatus::Active => "active",
            PersonnelStatus::Inactive => "inactive",
            PersonnelStatus::OnLeave => "on_leave",
        }
    }
}

impl std::fmt::Display for PersonnelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PersonnelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PersonnelStatus::Active),
            "inactive" => Ok(PersonnelStatus::Inactive),
            "on_leave" => Ok(PersonnelStatus::OnLeave),
            _ => Err(format!("Invalid personnel status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for PersonnelStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for PersonnelStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for PersonnelStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// TripStatus
// ---------------------------------------------------------------------------

/// Trip lifecycle status
///
/// `scheduled -> in_progress -> completed`, with `cancelled` reachable from
/// the two non-terminal states. `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "scheduled",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is permitted out of this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }

    /// Whether the trip still accepts bookings
    pub fn accepts_bookings(&self) -> bool {
        matches!(self, TripStatus::Scheduled | TripStatus::InProgress)
    }

    /// Transition table for the trip state machine
    pub fn can_transition_to(&self, next: TripStatus) -> bool {
        use TripStatus::*;
        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(TripStatus::Scheduled),
            "in_progress" => Ok(TripStatus::InProgress),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            _ => Err(format!("Invalid trip status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for TripStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for TripStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for TripStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// StopStatus
// ---------------------------------------------------------------------------

/// Trip stop status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl StopStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopStatus::Scheduled => "scheduled",
            StopStatus::Completed => "completed",
            StopStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for StopStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StopStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(StopStatus::Scheduled),
            "completed" => Ok(StopStatus::Completed),
            "cancelled" => Ok(StopStatus::Cancelled),
            _ => Err(format!("Invalid stop status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for StopStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for StopStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for StopStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// CustomerStatus
// ---------------------------------------------------------------------------

/// Customer account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Suspended,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
            CustomerStatus::Suspended => "suspended",
        }
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CustomerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CustomerStatus::Active),
            "inactive" => Ok(CustomerStatus::Inactive),
            "suspended" => Ok(CustomerStatus::Suspended),
            _ => Err(format!("Invalid customer status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for CustomerStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for CustomerStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for CustomerStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle status
///
/// `pending -> confirmed -> completed`, with `cancelled` reachable from
/// `pending` and `confirmed`. `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is permitted out of this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Transition table for the booking state machine
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_status_happy_path() {
        assert!(TripStatus::Scheduled.can_transition_to(TripStatus::InProgress));
        assert!(TripStatus::InProgress.can_transition_to(TripStatus::Completed));
    }

    #[test]
    fn trip_status_cancellable_while_running() {
        assert!(TripStatus::Scheduled.can_transition_to(TripStatus::Cancelled));
        assert!(TripStatus::InProgress.can_transition_to(TripStatus::Cancelled));
    }

    #[test]
    fn trip_status_terminal_states_are_frozen() {
        for next in [
            TripStatus::Scheduled,
            TripStatus::InProgress,
            TripStatus::Completed,
            TripStatus::Cancelled,
        ] {
            assert!(!TripStatus::Completed.can_transition_to(next));
            assert!(!TripStatus::Cancelled.can_transition_to(next));
        }
        assert!(TripStatus::Completed.is_terminal());
        assert!(TripStatus::Cancelled.is_terminal());
    }

    #[test]
    fn trip_status_no_skipping_or_rewinding() {
        assert!(!TripStatus::Scheduled.can_transition_to(TripStatus::Completed));
        assert!(!TripStatus::InProgress.can_transition_to(TripStatus::Scheduled));
        assert!(!TripStatus::Scheduled.can_transition_to(TripStatus::Scheduled));
    }

    #[test]
    fn booking_status_transitions() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Cancelled));
    }

    #[test]
    fn status_slugs_round_trip() {
        assert_eq!("under_maintenance".parse::<StationStatus>().unwrap(), StationStatus::UnderMaintenance);
        assert_eq!(StationStatus::UnderMaintenance.to_string(), "under_maintenance");
        assert_eq!("in_progress".parse::<TripStatus>().unwrap(), TripStatus::InProgress);
        assert_eq!("on_leave".parse::<PersonnelStatus>().unwrap(), PersonnelStatus::OnLeave);
        assert!("paused".parse::<TripStatus>().is_err());
    }
}
