//! Staff authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::staff::{StaffClaims, StaffProfile, StaffRole, StaffUser},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate a staff member by login and return a JWT token with the
    /// public profile
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<(String, StaffProfile)> {
        let user = self
            .repository
            .staff
            .get_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !user.active {
            return Err(AppError::Authentication("Account is disabled".to_string()));
        }

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid login or password".to_string()));
        }

        let token = self.create_token(&user)?;
        self.repository.staff.touch_last_login(user.id).await?;

        Ok((token, user.into()))
    }

    /// Get the authenticated staff member's profile
    pub async fn me(&self, staff_id: i32) -> AppResult<StaffProfile> {
        let user = self.repository.staff.get_by_id(staff_id).await?;
        Ok(user.into())
    }

    /// Create a bootstrap admin account when the staff table is empty
    pub async fn ensure_bootstrap_admin(&self) -> AppResult<()> {
        if self.repository.staff.count().await? > 0 {
            return Ok(());
        }

        let hash = self.hash_password(&self.config.bootstrap_password)?;
        self.repository
            .staff
            .create(&self.config.bootstrap_login, &hash, StaffRole::Admin)
            .await?;

        tracing::warn!(
            "Created bootstrap admin account '{}' - change its password",
            self.config.bootstrap_login
        );
        Ok(())
    }

    /// Create JWT token for a staff user
    fn create_token(&self, user: &StaffUser) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = StaffClaims {
            sub: user.login.clone(),
            staff_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify a staff user's password
    fn verify_password(&self, user: &StaffUser, password: &str) -> AppResult<bool> {
        if let Some(ref hash) = user.password {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        Ok(false)
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
