//! Connection settings resolved from flags, environment and `.env`.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use spamwatch_api::{Client, DEFAULT_HOST, REQUEST_TIMEOUT};

pub const TOKEN_VAR: &str = "SPAMWATCH_TOKEN";
pub const HOST_VAR: &str = "SPAMWATCH_HOST";
pub const TIMEOUT_VAR: &str = "SPAMWATCH_TIMEOUT";

#[derive(Debug, PartialEq)]
pub struct Settings {
    pub token: String,
    pub host: String,
    pub timeout: Duration,
}

impl Settings {
    /// Flags win over environment variables, which win over defaults.
    pub fn resolve(
        token: Option<&str>,
        host: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        Self::resolve_with(token, host, timeout_secs, |key| std::env::var(key).ok())
    }

    fn resolve_with<F>(
        token: Option<&str>,
        host: Option<&str>,
        timeout_secs: Option<u64>,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = token
            .map(str::to_string)
            .or_else(|| env(TOKEN_VAR))
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("no API token given. Pass --token or set {}", TOKEN_VAR))?;

        let host = host
            .map(str::to_string)
            .or_else(|| env(HOST_VAR))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let timeout = match timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => match env(TIMEOUT_VAR) {
                Some(raw) => Duration::from_secs(
                    raw.trim()
                        .parse()
                        .with_context(|| format!("{} must be a number of seconds", TIMEOUT_VAR))?,
                ),
                None => REQUEST_TIMEOUT,
            },
        };

        Ok(Self {
            token,
            host,
            timeout,
        })
    }

    pub fn client(&self) -> Result<Client> {
        let client = Client::builder(&self.token)
            .host(&self.host)
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }
}
