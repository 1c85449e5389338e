use crate::types::{AppError, Claims, Result, Role};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};

/// Issues and verifies portal access tokens.
///
/// Tokens are HS256 JWTs bound to a portal session id (`sid`), so revoking
/// the session revokes the token even before it expires.
pub struct AuthService {
    jwt_secret: String,
    access_expiry: i64,
}

impl AuthService {
    /// Creates a new AuthService.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing JWTs (should be at least 32 chars)
    /// * `access_expiry` - Access token validity in seconds
    pub fn new(jwt_secret: String, access_expiry: i64) -> Self {
        Self {
            jwt_secret,
            access_expiry,
        }
    }

    pub fn access_expiry(&self) -> i64 {
        self.access_expiry
    }

    /// Generates an access token for a signed-in user.
    pub fn generate_access_token(
        &self,
        user_id: &str,
        email: &str,
        role: Role,
        session_id: &str,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            sid: session_id.to_string(),
            exp: (now + Duration::seconds(self.access_expiry)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Auth(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a JWT token and returns the claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Auth(format!("Invalid token: {}", e)))
    }

    /// SHA-256 fingerprint of a token, safe to log.
    pub fn hash_token(&self, token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> AuthService {
        AuthService::new(
            "test-secret-key-that-is-at-least-32-chars".to_string(),
            900, // 15 minutes
        )
    }

    #[test]
    fn test_token_round_trip_keeps_session() {
        let service = create_test_service();

        let token = service
            .generate_access_token("2", "teacher@example.com", Role::Teacher, "sid-1")
            .expect("should generate token");
        let claims = service.verify_token(&token).expect("should verify token");

        assert_eq!(claims.sub, "2");
        assert_eq!(claims.email, "teacher@example.com");
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.sid, "sid-1");
    }

    #[test]
    fn test_token_verification_invalid_token() {
        let service = create_test_service();

        let result = service.verify_token("invalid.token.here");

        assert!(result.is_err(), "invalid token should fail verification");
    }

    #[test]
    fn test_token_verification_wrong_secret() {
        let service1 = AuthService::new("secret-one-that-is-32-chars-long".to_string(), 900);
        let service2 = AuthService::new("secret-two-that-is-32-chars-long".to_string(), 900);

        let token = service1
            .generate_access_token("1", "student@example.com", Role::Student, "sid")
            .expect("should generate");
        let result = service2.verify_token(&token);

        assert!(result.is_err(), "token from different secret should fail");
    }

    #[test]
    fn test_hash_token() {
        let service = create_test_service();

        let hash1 = service.hash_token("some-token");
        let hash2 = service.hash_token("some-token");

        assert_eq!(hash1, hash2, "same token should hash to same value");
        assert_eq!(hash1.len(), 64, "SHA256 hash should be 64 hex characters");
        assert!(hash1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash1, service.hash_token("other-token"));
    }

    #[test]
    fn test_claims_expiration() {
        let service = create_test_service();
        let token = service
            .generate_access_token("3", "admin@example.com", Role::Admin, "sid")
            .expect("should generate");
        let claims = service.verify_token(&token).expect("should verify");

        let now = chrono::Utc::now().timestamp() as usize;

        assert!(
            claims.iat <= now && claims.iat >= now - 5,
            "iat should be current timestamp"
        );

        let expected_exp = claims.iat + 900;
        assert!(
            claims.exp >= expected_exp - 5 && claims.exp <= expected_exp + 5,
            "exp should be iat + 900 seconds"
        );
    }
}
