//! Ban-related types returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserID;

/// A ban record.
///
/// Serializes back to the API's wire shape, where `date` is the raw Unix
/// timestamp in seconds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "BanRecord", into = "BanRecord")]
pub struct Ban {
    /// Telegram id of the banned user.
    pub id: UserID,

    pub reason: String,

    /// User id of the banning admin. Not sent by older API versions.
    pub admin: Option<UserID>,

    /// When the ban was created, derived from `timestamp`.
    pub date: DateTime<Utc>,

    /// Raw Unix timestamp (seconds) as sent by the API.
    pub timestamp: i64,

    pub message: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct BanRecord {
    id: UserID,
    reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin: Option<UserID>,
    #[serde(default)]
    date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl TryFrom<BanRecord> for Ban {
    type Error = String;

    fn try_from(record: BanRecord) -> Result<Self, Self::Error> {
        let date = DateTime::<Utc>::from_timestamp(record.date, 0)
            .ok_or_else(|| format!("ban date {} is out of range", record.date))?;
        Ok(Ban {
            id: record.id,
            reason: record.reason,
            admin: record.admin,
            date,
            timestamp: record.date,
            message: record.message,
        })
    }
}

impl From<Ban> for BanRecord {
    fn from(ban: Ban) -> Self {
        BanRecord {
            id: ban.id,
            reason: ban.reason,
            admin: ban.admin,
            date: ban.timestamp,
            message: ban.message,
        }
    }
}

/// A ban to submit through `Client::add_bans`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewBan {
    pub id: UserID,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewBan {
    pub fn new(id: UserID, reason: &str) -> Self {
        Self {
            id,
            reason: reason.to_string(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}

/// Result of `Client::get_ban`. A 404 from the API means the user is not
/// banned and is reported as `NotBanned`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BanLookup {
    Banned(Ban),
    NotBanned,
}

impl BanLookup {
    pub fn is_banned(&self) -> bool {
        matches!(self, BanLookup::Banned(_))
    }

    pub fn into_option(self) -> Option<Ban> {
        match self {
            BanLookup::Banned(ban) => Some(ban),
            BanLookup::NotBanned => None,
        }
    }
}
