//! Gateway configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GatewayError, Result};

/// Environment variable holding the user service base URL.
pub const USER_ENDPOINT_ENV: &str = "USER_ENDPOINT";
/// Environment variable holding the complex scraper base URL.
pub const SCRAPER_ENDPOINT_ENV: &str = "COMPLEX_SCRAPER_ENDPOINT";

/// Endpoint bases and transport settings for [`RemoteGateway`](crate::RemoteGateway).
///
/// Timeouts are left to the transport unless set explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the user service (`/signin`, `/signout`, `/signup`, `/test_decode`).
    pub user_endpoint: Url,
    /// Base URL of the complex scraper service (`/scrape`).
    pub scraper_endpoint: Url,
    /// Connect timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl GatewayConfig {
    /// Build a configuration from two base URLs.
    pub fn new(user_endpoint: &str, scraper_endpoint: &str) -> Result<Self> {
        let config = Self {
            user_endpoint: parse_endpoint("user_endpoint", user_endpoint)?,
            scraper_endpoint: parse_endpoint("scraper_endpoint", scraper_endpoint)?,
            connect_timeout_secs: None,
            request_timeout_secs: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from `USER_ENDPOINT` and `COMPLEX_SCRAPER_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        let user = read_env(USER_ENDPOINT_ENV, "user_endpoint")?;
        let scraper = read_env(SCRAPER_ENDPOINT_ENV, "scraper_endpoint")?;
        Self::new(&user, &scraper)
    }

    #[must_use]
    pub fn with_timeouts(mut self, connect_secs: Option<u64>, request_secs: Option<u64>) -> Self {
        self.connect_timeout_secs = connect_secs;
        self.request_timeout_secs = request_secs;
        self
    }

    /// Check invariants that deserialization alone cannot enforce.
    pub fn validate(&self) -> Result<()> {
        check_scheme("user_endpoint", &self.user_endpoint)?;
        check_scheme("scraper_endpoint", &self.scraper_endpoint)?;

        for (field, value) in [
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("request_timeout_secs", self.request_timeout_secs),
        ] {
            if value == Some(0) {
                return Err(GatewayError::InvalidConfig {
                    field: field.to_string(),
                    detail: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub(crate) fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// `{user_endpoint}{path}`
    pub(crate) fn user_url(&self, path: &str) -> String {
        join(&self.user_endpoint, path)
    }

    /// `{scraper_endpoint}{path}`
    pub(crate) fn scraper_url(&self, path: &str) -> String {
        join(&self.scraper_endpoint, path)
    }
}

/// Append `path` to a base URL, keeping any path prefix the base already has.
fn join(base: &Url, path: &str) -> String {
    format!("{}{path}", base.as_str().trim_end_matches('/'))
}

fn parse_endpoint(field: &str, raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).map_err(|e| GatewayError::InvalidConfig {
        field: field.to_string(),
        detail: format!("'{raw}' is not a valid URL: {e}"),
    })
}

fn check_scheme(field: &str, url: &Url) -> Result<()> {
    if matches!(url.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(GatewayError::InvalidConfig {
            field: field.to_string(),
            detail: format!("unsupported scheme '{}', expected http or https", url.scheme()),
        })
    }
}

fn read_env(var: &str, field: &str) -> Result<String> {
    std::env::var(var).map_err(|_| GatewayError::InvalidConfig {
        field: field.to_string(),
        detail: format!("environment variable {var} is not set"),
    })
}
