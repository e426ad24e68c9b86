//! JWT claims structure for Wanderlust auth.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// JWT ID (unique per token).
    pub jti: String,
    /// Subject (numeric user ID, as a string).
    pub sub: String,
    /// Username at issuance time.
    pub username: String,
    /// Role at issuance time.
    pub role: Role,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// The user ID carried in `sub`, if it is a valid integer.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
