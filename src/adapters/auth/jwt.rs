//! HS256 JWT sessions for the admin dashboard.
//!
//! One shared secret both signs tokens after a successful OTP check and
//! validates them on every admin request.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::admin::{AdminAuthError, AdminIdentity};
use crate::domain::foundation::Timestamp;
use crate::ports::{AdminSessionValidator, AdminTokenIssuer};

/// `iss` claim on every admin token.
const TOKEN_ISSUER: &str = "peche-checkout";

/// `role` claim on every admin token.
const ADMIN_ROLE: &str = "admin";

/// JWT claims for admin tokens.
#[derive(Debug, Serialize, Deserialize)]
struct AdminClaims {
    /// Subject - the admin email
    sub: String,

    iss: String,

    role: String,

    /// Issued at (Unix epoch seconds)
    iat: i64,

    /// Expiry (Unix epoch seconds)
    exp: i64,
}

/// Issues and validates admin bearer tokens.
pub struct JwtAdminSessions {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl JwtAdminSessions {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl AdminTokenIssuer for JwtAdminSessions {
    fn issue(&self, email: &str) -> Result<String, AdminAuthError> {
        let now = Timestamp::now();
        let claims = AdminClaims {
            sub: email.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: now.as_unix_secs(),
            exp: now.plus_secs(self.ttl_secs).as_unix_secs(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AdminAuthError::unavailable(format!("Token signing failed: {}", e)))
    }
}

#[async_trait]
impl AdminSessionValidator for JwtAdminSessions {
    async fn validate(&self, token: &str) -> Result<AdminIdentity, AdminAuthError> {
        let data = decode::<AdminClaims>(token, &self.decoding_key, &Self::validation()).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Admin token expired"),
                    _ => tracing::warn!("Admin token validation failed: {}", e),
                }
                AdminAuthError::InvalidToken
            },
        )?;

        if data.claims.role != ADMIN_ROLE {
            tracing::warn!(sub = %data.claims.sub, "Token without admin role");
            return Err(AdminAuthError::InvalidToken);
        }

        Ok(AdminIdentity::new(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> JwtAdminSessions {
        JwtAdminSessions::new("test-jwt-secret", 86_400)
    }

    fn signed(claims: &AdminClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(exp_offset: i64) -> AdminClaims {
        let now = Timestamp::now().as_unix_secs();
        AdminClaims {
            sub: "owner@peche.shop".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: now,
            exp: now + exp_offset,
        }
    }

    #[tokio::test]
    async fn issued_token_validates_to_same_email() {
        let sessions = sessions();

        let token = sessions.issue("owner@peche.shop").unwrap();
        let admin = sessions.validate(&token).await.unwrap();

        assert_eq!(admin.email, "owner@peche.shop");
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let token = signed(&claims(3600), "other-secret");

        let result = sessions().validate(&token).await;

        assert_eq!(result, Err(AdminAuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let token = signed(&claims(-3600), "test-jwt-secret");

        let result = sessions().validate(&token).await;

        assert_eq!(result, Err(AdminAuthError::InvalidToken));
    }

    #[tokio::test]
    async fn token_without_admin_role_is_rejected() {
        let mut claims = claims(3600);
        claims.role = "viewer".to_string();
        let token = signed(&claims, "test-jwt-secret");

        let result = sessions().validate(&token).await;

        assert_eq!(result, Err(AdminAuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let result = sessions().validate("not.a.jwt").await;

        assert_eq!(result, Err(AdminAuthError::InvalidToken));
    }
}
