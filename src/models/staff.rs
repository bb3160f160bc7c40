//! Staff user model, roles and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

use crate::error::AppError;

/// Staff role (string identifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    /// Full access, including staff and customer account management
    Admin,
    /// Read/write on operational data
    Manager,
    /// Read-only dashboards
    Viewer,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Manager => "manager",
            StaffRole::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(StaffRole::Admin),
            "manager" => Ok(StaffRole::Manager),
            "viewer" => Ok(StaffRole::Viewer),
            _ => Err(format!("Invalid staff role: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for StaffRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for StaffRole {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for StaffRole {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Staff user row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffUser {
    pub id: i32,
    pub login: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: StaffRole,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Staff profile returned to clients (no credential material)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffProfile {
    pub id: i32,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: StaffRole,
}

impl From<StaffUser> for StaffProfile {
    fn from(u: StaffUser) -> Self {
        Self {
            id: u.id,
            login: u.login,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            role: u.role,
        }
    }
}

/// JWT claims carried by every authenticated request
///
/// The explicit claims object is the session: it is extracted per request
/// and passed into handlers, never read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffClaims {
    pub sub: String,
    pub staff_id: i32,
    pub role: StaffRole,
    pub exp: i64,
    pub iat: i64,
}

impl StaffClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks
    pub fn require_read(&self) -> Result<(), AppError> {
        // Every authenticated staff member can read
        Ok(())
    }

    pub fn require_write(&self) -> Result<(), AppError> {
        match self.role {
            StaffRole::Admin | StaffRole::Manager => Ok(()),
            StaffRole::Viewer => Err(AppError::Authorization(
                "Insufficient rights to modify data".to_string(),
            )),
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == StaffRole::Admin {
            Ok(())
        } else {
            Err(AppError::Authorization("Admin privileges required".to_string()))
        }
    }
}
