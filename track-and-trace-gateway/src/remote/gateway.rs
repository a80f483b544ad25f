//! `TrackingGateway` 实现

use async_trait::async_trait;

use crate::auth::USER_SERVICE;
use crate::error::{GatewayError, Result};
use crate::http_client::HttpUtils;
use crate::traits::TrackingGateway;
use crate::types::{BackendMessage, Credentials, SignupRequest, TrackingQuery, TrackingResult};

use super::{RemoteGateway, SCRAPE_PATH, SCRAPER_SERVICE, SIGNIN_PATH, SIGNOUT_PATH, SIGNUP_PATH};

#[async_trait]
impl TrackingGateway for RemoteGateway {
    async fn sign_in(&self, credentials: &Credentials) -> Result<BackendMessage> {
        let url = self.config.user_url(SIGNIN_PATH);
        log::info!("[{USER_SERVICE}] Signing in as '{}'", credentials.username);

        let request = self.session.client.post(&url).json(credentials);
        HttpUtils::send_json(request, USER_SERVICE, "POST", &url).await
    }

    async fn sign_out(&self) -> Result<BackendMessage> {
        let url = self.config.user_url(SIGNOUT_PATH);
        log::info!("[{USER_SERVICE}] Signing out");

        let request = self.session.client.post(&url);
        HttpUtils::send_json(request, USER_SERVICE, "POST", &url).await
    }

    async fn sign_up(&self, request: &SignupRequest) -> Result<BackendMessage> {
        let url = self.config.user_url(SIGNUP_PATH);
        log::info!(
            "[{USER_SERVICE}] Registering '{}' <{}>",
            request.username,
            request.email
        );

        let builder = self.plain.post(&url).json(&request.payload());
        HttpUtils::send_json(builder, USER_SERVICE, "POST", &url).await
    }

    async fn bl_status(&self, query: &TrackingQuery) -> Result<TrackingResult> {
        let auth = self.authenticator.authenticate().await?;
        if !auth.is_authorized() {
            let err = GatewayError::Unauthorized {
                status: auth.status,
            };
            log::warn!("{err}");
            return Err(err);
        }

        let url = self.config.scraper_url(SCRAPE_PATH);
        log::info!(
            "[{SCRAPER_SERVICE}] Looking up {} {} on {} ({})",
            query.identifier_type,
            query.identifier,
            query.shipping_line,
            query.direction
        );

        let request = self.plain.post(&url).json(query);
        HttpUtils::send_json(request, SCRAPER_SERVICE, "POST", &url).await
    }
}
