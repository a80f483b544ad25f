//! Authenticator implementations

use async_trait::async_trait;

use crate::config::GatewayConfig;
use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::session::{CSRF_HEADER, Session};
use crate::traits::Authenticator;
use crate::types::AuthStatus;

/// Label used in logs and errors for calls to the user service.
pub(crate) const USER_SERVICE: &str = "user-service";

/// Session check path on the user service.
pub const SESSION_CHECK_PATH: &str = "/test_decode";

/// Checks the current session against the user service.
///
/// Sends `GET {user_endpoint}/test_decode` with the session cookies and the
/// double-submit CSRF token. The HTTP status of the answer is reported as-is:
/// `200` for a valid session, `401` (or whatever the service chooses) otherwise.
#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    session: Session,
    url: String,
}

impl SessionAuthenticator {
    pub fn new(session: Session, config: &GatewayConfig) -> Self {
        Self {
            session,
            url: config.user_url(SESSION_CHECK_PATH),
        }
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self) -> Result<AuthStatus> {
        let mut request = self.session.client.get(&self.url);
        match self.session.csrf_token() {
            Some(token) => request = request.header(CSRF_HEADER, token),
            None => log::debug!("[{USER_SERVICE}] No CSRF cookie in session"),
        }

        let (status, _) =
            HttpUtils::execute_request(request, USER_SERVICE, "GET", &self.url).await?;
        Ok(AuthStatus::new(status))
    }
}

/// Reports a fixed status without any I/O.
///
/// For deployments that authorize lookups elsewhere, and for tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuthenticator(AuthStatus);

impl StaticAuthenticator {
    pub const fn new(status: u16) -> Self {
        Self(AuthStatus::new(status))
    }

    /// Always authorizes.
    pub const fn allow() -> Self {
        Self::new(AuthStatus::OK)
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self) -> Result<AuthStatus> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_authenticator_reports_its_status() {
        assert_eq!(
            StaticAuthenticator::allow().authenticate().await.unwrap(),
            AuthStatus::new(200)
        );
        assert_eq!(
            StaticAuthenticator::new(401).authenticate().await.unwrap(),
            AuthStatus::new(401)
        );
    }

    #[test]
    fn session_authenticator_targets_check_path() {
        let config = GatewayConfig::new("http://localhost:5002/user", "http://scraper").unwrap();
        let session = Session::new(&config).unwrap();
        let auth = SessionAuthenticator::new(session, &config);
        assert_eq!(auth.url, "http://localhost:5002/user/test_decode");
    }
}
