//! Token-related types returned by the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a token.
pub type TokenID = i64;

/// Telegram user id.
pub type UserID = i64;

/// Permission tier of a token. Ordered `User < Admin < Root`.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    User,
    Admin,
    Root,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::User => "User",
            Permission::Admin => "Admin",
            Permission::Root => "Root",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown permission '{0}'. Valid values: root, admin, user")]
pub struct ParsePermissionError(pub String);

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "root" => Ok(Permission::Root),
            "admin" => Ok(Permission::Admin),
            "user" => Ok(Permission::User),
            _ => Err(ParsePermissionError(s.to_string())),
        }
    }
}

/// An API token record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub id: TokenID,

    pub permission: Permission,

    /// The secret bearer value.
    pub token: String,

    /// Telegram user id of the token owner.
    pub userid: UserID,

    /// Absent on older API versions.
    #[serde(default)]
    pub retired: bool,
}

/// Result of `Client::create_token`.
///
/// The API answers 400 when the user id or permission is unacceptable; that
/// case is reported as `Rejected` instead of an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreatedToken {
    Created(Token),
    Rejected,
}

impl CreatedToken {
    pub fn into_option(self) -> Option<Token> {
        match self {
            CreatedToken::Created(token) => Some(token),
            CreatedToken::Rejected => None,
        }
    }
}
