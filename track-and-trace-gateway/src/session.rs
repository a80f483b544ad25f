//! HTTP clients and the session cookie jar
//!
//! Two clients are kept per gateway: a credentialed one sharing a cookie jar
//! (sign-in, sign-out, the session check) and a plain one that never sends or
//! stores cookies (sign-up, scraping).

use std::sync::Arc;

use reqwest::Client;
use reqwest::cookie::{CookieStore, Jar};
use url::Url;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// Cookie set by the user service next to the HTTP-only access token.
pub const CSRF_COOKIE: &str = "csrf_access_token";
/// Header the user service expects the double-submit token in.
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// 创建 HTTP Client，超时未配置时使用 reqwest 默认值
pub(crate) fn create_http_client(config: &GatewayConfig, jar: Option<Arc<Jar>>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(jar) = jar {
        builder = builder.cookie_provider(jar);
    }

    builder.build().map_err(|e| GatewayError::InvalidConfig {
        field: "http_client".to_string(),
        detail: e.to_string(),
    })
}

/// Credentialed transport shared by the gateway and the session authenticator.
///
/// Cloning is cheap; clones share the connection pool and the cookie jar.
#[derive(Clone)]
pub struct Session {
    pub(crate) client: Client,
    jar: Arc<Jar>,
    user_endpoint: Url,
}

impl Session {
    pub(crate) fn new(config: &GatewayConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        Ok(Self {
            client: create_http_client(config, Some(Arc::clone(&jar)))?,
            jar,
            user_endpoint: config.user_endpoint.clone(),
        })
    }

    /// Value of a cookie the user service has set, if any.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.user_endpoint)?;
        let header = header.to_str().ok()?;
        header.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }

    /// Double-submit CSRF token of the current session.
    pub fn csrf_token(&self) -> Option<String> {
        self.cookie(CSRF_COOKIE)
    }

    /// Cookies held for the user service, in `Cookie` header form
    /// (`name=value; name2=value2`).
    pub fn cookie_header(&self) -> Option<String> {
        let header = self.jar.cookies(&self.user_endpoint)?;
        header.to_str().ok().map(str::to_string)
    }

    /// Seed the jar with cookies exported by [`cookie_header`](Self::cookie_header),
    /// e.g. from an earlier process. Cookies are scoped to the user service host.
    pub fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim) {
            if pair.contains('=') {
                self.jar
                    .add_cookie_str(&format!("{pair}; Path=/"), &self.user_endpoint);
            }
        }
    }

    /// Whether the user service has issued any cookie to this session.
    pub fn has_cookies(&self) -> bool {
        self.jar.cookies(&self.user_endpoint).is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_endpoint", &self.user_endpoint.as_str())
            .field("has_cookies", &self.has_cookies())
            .finish_non_exhaustive()
    }
}
