use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod requests;
pub mod responses;

/// Closed set of roles a token can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Who a token speaks for. Fixed at issue time; role changes made later
/// only show up in tokens minted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityClaim {
    pub subject_id: String,
    pub role: Role,
}

impl IdentityClaim {
    pub fn new(subject_id: impl Into<String>, role: Role) -> Self {
        IdentityClaim {
            subject_id: subject_id.into(),
            role,
        }
    }
}

/// Signed payload as it travels inside the token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenClaims {
    pub id: String,
    pub role: Role,
    pub exp: i64, // seconds since epoch
}

impl TokenClaims {
    pub fn identity(&self) -> IdentityClaim {
        IdentityClaim::new(self.id.clone(), self.role)
    }
}
