//! HTTP client for the SpamWatch API.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use crate::{
    banlist::parse_ban_ids,
    types::{Ban, BanLookup, CreatedToken, NewBan, Permission, Token, TokenID, UserID},
    Error,
};

/// Public SpamWatch API host.
pub const DEFAULT_HOST: &str = "https://api.spamwat.ch";

/// Default request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the SpamWatch API.
///
/// Every request carries `Authorization: Bearer <token>`. The client holds no
/// mutable state, so clones can be used concurrently; they share one
/// connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    host: String,
    token: String,
}

/// Builder for [`Client`] with a custom host or timeout.
pub struct ClientBuilder {
    token: String,
    host: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Overrides the API host. Used for testing with wiremock.
    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| Error::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Network(e)
            })?;

        Ok(Client {
            http,
            host: self.host.trim_end_matches('/').to_string(),
            token: self.token,
        })
    }
}

/// Response handed back by `request` when the status is not one the client
/// maps to an error on its own.
struct RawResponse {
    status: StatusCode,
    body: String,
}

impl Client {
    /// Creates a client for the public API.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::builder(token).build()
    }

    /// Creates a client for a custom host.
    pub fn with_host(token: &str, host: &str) -> Result<Self, Error> {
        Self::builder(token).host(host).build()
    }

    pub fn builder(token: &str) -> ClientBuilder {
        ClientBuilder {
            token: token.to_string(),
            host: DEFAULT_HOST.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&format!("{}/{}", self.host, path)).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })
    }

    /// Sends one request and maps the statuses every endpoint shares.
    ///
    /// `path` has no leading slash. 401, 403, 429 and 5xx become errors here;
    /// everything else is returned for the endpoint to interpret.
    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<RawResponse, Error> {
        let url = self.get_url(path)?;
        tracing::debug!("{} {}", method, url);

        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Request to '{}' failed: {}", path, e);
            Error::Network(e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network(e)
        })?;
        tracing::debug!("'{}' answered {}", path, status);

        if status.as_u16() >= 500 {
            let snippet = truncate_body(&body);
            tracing::error!("Server error {} for '{}': {}", status, path, snippet);
            return Err(Error::Server {
                status: status.as_u16(),
                body: snippet,
            });
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::FORBIDDEN => Err(Error::Forbidden {
                token: self.token.clone(),
            }),
            StatusCode::TOO_MANY_REQUESTS => {
                let until = retry_until(&body);
                tracing::warn!("Rate limited on '{}' until {}", path, until);
                Err(Error::TooManyRequests {
                    method: path.to_string(),
                    until,
                })
            }
            _ => Ok(RawResponse { status, body }),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = expect_success(self.request(path, Method::GET, None).await?)?;
        decode(&resp.body)
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        expect_success(self.request(path, Method::DELETE, None).await?)?;
        Ok(())
    }

    async fn post(&self, path: &str, body: &Value) -> Result<(), Error> {
        expect_success(self.request(path, Method::POST, Some(body)).await?)?;
        Ok(())
    }

    /// Fetches the API version document.
    pub async fn version(&self) -> Result<Value, Error> {
        self.get("version").await
    }

    /// Fetches API statistics such as the total ban count.
    pub async fn stats(&self) -> Result<Value, Error> {
        self.get("stats").await
    }

    /// Lists all tokens. Requires Root permission.
    pub async fn list_tokens(&self) -> Result<Vec<Token>, Error> {
        self.get("tokens").await
    }

    /// Creates a token for `userid`. Requires Root permission.
    ///
    /// A 400 answer yields `CreatedToken::Rejected` rather than an error.
    pub async fn create_token(
        &self,
        userid: UserID,
        permission: Permission,
    ) -> Result<CreatedToken, Error> {
        let body = json!({ "id": userid, "permission": permission });
        let resp = self.request("tokens", Method::POST, Some(&body)).await?;
        if resp.status == StatusCode::BAD_REQUEST {
            tracing::debug!("Token creation for {} rejected: {}", userid, resp.body);
            return Ok(CreatedToken::Rejected);
        }
        let resp = expect_success(resp)?;
        decode(&resp.body).map(CreatedToken::Created)
    }

    /// Fetches the token this client authenticates with.
    pub async fn get_self_token(&self) -> Result<Token, Error> {
        self.get("tokens/self").await
    }

    /// Fetches a token by id. Requires Root permission.
    pub async fn get_token(&self, id: TokenID) -> Result<Token, Error> {
        self.get(&format!("tokens/{}", id)).await
    }

    /// Lists the tokens owned by `userid`. Requires Root permission.
    pub async fn get_tokens_by_user(&self, userid: UserID) -> Result<Vec<Token>, Error> {
        self.get(&format!("tokens/userid/{}", userid)).await
    }

    /// Retires a token. Requires Root permission.
    pub async fn delete_token(&self, id: TokenID) -> Result<(), Error> {
        self.delete(&format!("tokens/{}", id)).await
    }

    /// Looks up the ban for `userid`; a 404 answer yields `BanLookup::NotBanned`.
    pub async fn get_ban(&self, userid: UserID) -> Result<BanLookup, Error> {
        let resp = self
            .request(&format!("banlist/{}", userid), Method::GET, None)
            .await?;
        if resp.status == StatusCode::NOT_FOUND {
            return Ok(BanLookup::NotBanned);
        }
        let resp = expect_success(resp)?;
        decode::<Ban>(&resp.body).map(BanLookup::Banned)
    }

    /// Lists every ban. Requires Admin permission.
    pub async fn list_bans(&self) -> Result<Vec<Ban>, Error> {
        self.get("banlist").await
    }

    /// Lists the ids of all banned users. Requires Admin permission.
    pub async fn list_ban_ids(&self) -> Result<Vec<UserID>, Error> {
        let resp = expect_success(self.request("banlist/all", Method::GET, None).await?)?;
        parse_ban_ids(&resp.body)
    }

    /// Lifts the ban on `userid`. Requires Admin permission.
    pub async fn delete_ban(&self, userid: UserID) -> Result<(), Error> {
        self.delete(&format!("banlist/{}", userid)).await
    }

    /// Bans a single user. Requires Admin permission.
    pub async fn add_ban(
        &self,
        userid: UserID,
        reason: &str,
        message: Option<&str>,
    ) -> Result<(), Error> {
        let mut ban = json!({ "id": userid, "reason": reason });
        if let Some(message) = message {
            ban["message"] = json!(message);
        }
        self.post("banlist", &json!([ban])).await
    }

    /// Bans several users in one request. Requires Admin permission.
    ///
    /// Only `id` and `reason` are sent; any `message` is not part of the
    /// bulk payload.
    pub async fn add_bans(&self, bans: &[NewBan]) -> Result<(), Error> {
        let body: Vec<Value> = bans
            .iter()
            .map(|b| json!({ "id": b.id, "reason": b.reason }))
            .collect();
        self.post("banlist", &Value::Array(body)).await
    }
}

fn expect_success(resp: RawResponse) -> Result<RawResponse, Error> {
    if resp.status.is_success() {
        return Ok(resp);
    }
    let snippet = truncate_body(&resp.body);
    tracing::error!("Request failed with status {}: {}", resp.status, snippet);
    if resp.status == StatusCode::BAD_REQUEST {
        return Err(Error::BadRequest { body: snippet });
    }
    Err(Error::UnexpectedStatus {
        status: resp.status.as_u16(),
        body: snippet,
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::Decode(e.to_string())
    })
}

/// Reads the `until` field (epoch seconds) of a 429 body. Integers, floats
/// and numeric strings are accepted; a missing field means epoch 0.
fn retry_until(body: &str) -> DateTime<Utc> {
    let until = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| match v.get("until") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|secs| secs.is_finite())
        .unwrap_or(0.0);
    DateTime::<Utc>::from_timestamp_millis((until * 1000.0) as i64)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_trailing_slash_is_trimmed() {
        let client = Client::with_host("t", "http://localhost:1234/").unwrap();
        assert_eq!(client.host(), "http://localhost:1234");
        assert_eq!(
            client.get_url("tokens/self").unwrap().as_str(),
            "http://localhost:1234/tokens/self"
        );
    }

    #[test]
    fn default_host() {
        let client = Client::new("t").unwrap();
        assert_eq!(client.host(), DEFAULT_HOST);
        assert_eq!(client.token(), "t");
    }

    #[test]
    fn token_with_newline_is_invalid() {
        let result = Client::new("bad\ntoken");
        assert!(matches!(result, Err(Error::InvalidToken)));
    }

    #[test]
    fn invalid_host_is_reported() {
        let client = Client::with_host("t", "not a url").unwrap();
        assert!(matches!(client.get_url("stats"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn retry_until_reads_field() {
        assert_eq!(
            retry_until(r#"{"until": 1700000000}"#).timestamp_millis(),
            1_700_000_000_000
        );
    }

    #[test]
    fn retry_until_reads_float_and_string() {
        assert_eq!(
            retry_until(r#"{"until": 1700000000.5}"#).timestamp_millis(),
            1_700_000_000_500
        );
        assert_eq!(
            retry_until(r#"{"until": "1700000000"}"#).timestamp_millis(),
            1_700_000_000_000
        );
    }

    #[test]
    fn retry_until_defaults_to_epoch() {
        assert_eq!(retry_until("{}"), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(retry_until("slow down"), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() < body.len());
    }

    #[test]
    fn expect_success_maps_bad_request() {
        let resp = RawResponse {
            status: StatusCode::BAD_REQUEST,
            body: "missing reason".to_string(),
        };
        assert!(matches!(
            expect_success(resp),
            Err(Error::BadRequest { ref body }) if body == "missing reason"
        ));
    }

    #[test]
    fn expect_success_maps_other_statuses() {
        let resp = RawResponse {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(matches!(
            expect_success(resp),
            Err(Error::UnexpectedStatus { status: 404, .. })
        ));
    }
}
