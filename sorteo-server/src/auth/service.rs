//! Admin credential verification.
//!
//! There is exactly one admin identity. Its credential is an Argon2 PHC
//! hash, either supplied directly (`ADMIN_PASSWORD_HASH`) or derived at
//! startup from a plaintext delivered by the remote config provider. The
//! plaintext is hashed immediately and dropped; nothing in the process
//! ever compares plaintext against plaintext. With no credential at all
//! the admin surface stays disabled and login is rejected outright.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use shared::error::ErrorCode;
use shared::{AppError, AppResult};

use crate::auth::{JwtError, JwtService};
use crate::security_log;

/// Successful login result
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct AdminAuthService {
    password_hash: Option<String>,
    jwt: JwtService,
}

impl AdminAuthService {
    pub fn new(jwt: JwtService, password_hash: Option<String>) -> Self {
        if password_hash.is_none() {
            tracing::warn!("No admin credential configured, admin endpoints are disabled");
        }
        Self { password_hash, jwt }
    }

    /// Hash a plaintext password into an Argon2 PHC string
    pub fn hash_password(plain: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Whether an admin credential exists at all
    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt
    }

    /// Verify the password and issue a session token
    pub fn login(&self, password: &str) -> AppResult<AdminSession> {
        let Some(hash) = &self.password_hash else {
            security_log!("WARN", "admin_login_unconfigured", outcome = "rejected");
            return Err(AppError::new(ErrorCode::AdminNotConfigured));
        };

        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Stored credential is malformed: {}", e)))?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            security_log!("WARN", "admin_login_failed", outcome = "invalid_password");
            return Err(AppError::invalid_credentials());
        }

        let token = self.jwt.generate_admin_token().map_err(|e| match e {
            JwtError::GenerationFailed(msg) => {
                AppError::internal(format!("Token generation failed: {}", msg))
            }
            other => AppError::internal(other.to_string()),
        })?;

        security_log!("INFO", "admin_login_ok", outcome = "token_issued");
        Ok(AdminSession {
            token,
            expires_in: self.jwt.config.expiration_minutes * 60,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;

    fn jwt() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            expiration_minutes: 240,
            issuer: "sorteo-server".to_string(),
            audience: "sorteo-admin".to_string(),
        })
    }

    #[test]
    fn test_login_with_correct_password() {
        let hash = AdminAuthService::hash_password("s3creto").unwrap();
        let auth = AdminAuthService::new(jwt(), Some(hash));
        assert!(auth.is_configured());

        let session = auth.login("s3creto").expect("login should succeed");
        assert_eq!(session.expires_in, 240 * 60);
        assert!(auth.jwt_service().validate_token(&session.token).is_ok());
    }

    #[test]
    fn test_login_with_wrong_password() {
        let hash = AdminAuthService::hash_password("s3creto").unwrap();
        let auth = AdminAuthService::new(jwt(), Some(hash));

        let err = auth.login("otra-cosa").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[test]
    fn test_login_without_credential_is_disabled() {
        let auth = AdminAuthService::new(jwt(), None);
        assert!(!auth.is_configured());

        let err = auth.login("cualquiera").unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminNotConfigured);
    }

    #[test]
    fn test_hash_is_phc_and_salted() {
        let a = AdminAuthService::hash_password("mismo").unwrap();
        let b = AdminAuthService::hash_password("mismo").unwrap();
        assert!(a.starts_with("$argon2"));
        assert_ne!(a, b);
    }
}
