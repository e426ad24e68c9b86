//! JWT token issuance and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::role::Role;

/// Manages JWT token creation and validation.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    /// Create a new `JwtManager` with the given secret and token lifetime.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Issue a token for the given user. Returns the token and its TTL.
    pub fn issue_token(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
    ) -> Result<(String, i64), jsonwebtoken::errors::Error> {
        let now = wanderlust_core::db::unix_timestamp();

        let claims = Claims {
            jti: uuid::Uuid::new_v4().to_string(),
            sub: user_id.to_string(),
            username: username.to_string(),
            role,
            iat: now,
            exp: now + self.ttl_secs,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok((token, self.ttl_secs))
    }

    /// Validate a token and return its claims.
    ///
    /// Fails on a bad signature, a malformed token, or an expired `exp`.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_jwt() -> JwtManager {
        JwtManager::new(b"test-secret-key-for-testing", 3600)
    }

    #[test]
    fn issue_and_validate_token() {
        let jwt = test_jwt();
        let (token, ttl) = jwt.issue_token(7, "alice", Role::Operator).unwrap();
        assert_eq!(ttl, 3600);

        let claims = jwt.validate(&token).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Operator);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn each_token_gets_a_unique_id() {
        let jwt = test_jwt();
        let (t1, _) = jwt.issue_token(1, "alice", Role::Public).unwrap();
        let (t2, _) = jwt.issue_token(1, "alice", Role::Public).unwrap();
        assert_ne!(jwt.validate(&t1).unwrap().jti, jwt.validate(&t2).unwrap().jti);
    }

    #[test]
    fn invalid_token_fails_validation() {
        let jwt = test_jwt();
        assert!(jwt.validate("not-a-valid-token").is_err());
    }

    #[test]
    fn wrong_secret_fails_validation() {
        let jwt1 = test_jwt();
        let jwt2 = JwtManager::new(b"different-secret", 3600);

        let (token, _) = jwt1.issue_token(1, "alice", Role::Public).unwrap();
        assert!(jwt2.validate(&token).is_err());
    }

    #[test]
    fn expired_token_fails_validation() {
        // Well past the default 60 second leeway.
        let jwt = JwtManager::new(b"test-secret-key-for-testing", -3600);
        let (token, _) = jwt.issue_token(1, "alice", Role::Public).unwrap();
        assert!(jwt.validate(&token).is_err());
    }
}
