//! Authorization roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The sole authorization axis: a caller is either a traveler or an operator.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    /// Regular traveler. Older tokens and clients call this role `"user"`.
    #[default]
    #[serde(alias = "user")]
    Public,
    /// Manages hotel inventory and moderates messages.
    Operator,
}

impl Role {
    /// Normalize a role requested by a client.
    ///
    /// Only an explicit `"operator"` (case-insensitive) grants the operator
    /// role; anything else, including a missing value, is `Public`.
    pub fn from_input(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("operator") => Self::Operator,
            _ => Self::Public,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Operator => "operator",
        }
    }

    pub const fn is_operator(self) -> bool {
        matches!(self, Self::Operator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
