use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AuthStatus, BackendMessage, Credentials, SignupRequest, TrackingQuery, TrackingResult};

/// Authorization check run before every status lookup.
///
/// The gateway only relies on the returned status: `200` authorizes the lookup,
/// anything else rejects it with [`GatewayError::Unauthorized`](crate::GatewayError::Unauthorized).
/// Errors returned here are propagated unchanged.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self) -> Result<AuthStatus>;
}

/// 用户操作到后端调用的映射
///
/// One method per user action. Implementations must not panic on transport or
/// backend failures; every outcome is a `Result`.
#[async_trait]
pub trait TrackingGateway: Send + Sync {
    /// Open a session. Cookies issued by the user service are kept for later
    /// credentialed calls.
    async fn sign_in(&self, credentials: &Credentials) -> Result<BackendMessage>;

    /// Close the current session.
    async fn sign_out(&self) -> Result<BackendMessage>;

    /// Register a new account. Sent without session cookies.
    async fn sign_up(&self, request: &SignupRequest) -> Result<BackendMessage>;

    /// Authorize, then look up a shipment on the scraper service.
    async fn bl_status(&self, query: &TrackingQuery) -> Result<TrackingResult>;
}
