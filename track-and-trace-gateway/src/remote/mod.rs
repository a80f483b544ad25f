//! HTTP-backed gateway

mod gateway;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::SessionAuthenticator;
use crate::config::GatewayConfig;
use crate::error::Result;
use crate::session::{Session, create_http_client};
use crate::traits::Authenticator;

/// Label used in logs and errors for calls to the scraper service.
pub(crate) const SCRAPER_SERVICE: &str = "complex-scraper";

pub(crate) const SIGNIN_PATH: &str = "/signin";
pub(crate) const SIGNOUT_PATH: &str = "/signout";
pub(crate) const SIGNUP_PATH: &str = "/signup";
pub(crate) const SCRAPE_PATH: &str = "/scrape";

/// Gateway talking to the user service and the complex scraper over HTTP.
pub struct RemoteGateway {
    pub(crate) config: GatewayConfig,
    pub(crate) session: Session,
    /// No cookie store: sign-up and scrape requests travel without credentials.
    pub(crate) plain: Client,
    pub(crate) authenticator: Arc<dyn Authenticator>,
}

impl RemoteGateway {
    /// Build a gateway with an injected authorization check.
    pub fn new(config: GatewayConfig, authenticator: Arc<dyn Authenticator>) -> Result<Self> {
        config.validate()?;
        let session = Session::new(&config)?;
        let plain = create_http_client(&config, None)?;
        Ok(Self {
            config,
            session,
            plain,
            authenticator,
        })
    }

    /// Build a gateway whose status lookups are authorized by the user service's
    /// session check, sharing this gateway's cookie jar.
    pub fn with_session_authenticator(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let session = Session::new(&config)?;
        let plain = create_http_client(&config, None)?;
        let authenticator = Arc::new(SessionAuthenticator::new(session.clone(), &config));
        Ok(Self {
            config,
            session,
            plain,
            authenticator,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Credentialed transport, e.g. to inspect cookies after sign-in.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl std::fmt::Debug for RemoteGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteGateway")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
