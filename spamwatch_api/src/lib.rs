//! Client for the SpamWatch ban-list API.
//!
//! [`Client`] wraps the token and ban endpoints; failures surface as [`Error`].

mod banlist;
mod client;
mod errors;
pub mod types;
pub use self::banlist::parse_ban_ids;
pub use self::client::{Client, ClientBuilder, DEFAULT_HOST, REQUEST_TIMEOUT};
pub use self::errors::Error;
