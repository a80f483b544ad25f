//! Gateway factory functions.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::error::Result;
use crate::remote::RemoteGateway;
use crate::traits::{Authenticator, TrackingGateway};

/// Creates a [`TrackingGateway`] whose status lookups are authorized by the user
/// service's session check.
///
/// The returned gateway is wrapped in `Arc<dyn TrackingGateway>` so UI handlers
/// and async tasks can share it.
///
/// # Examples
///
/// ```rust,no_run
/// use track_and_trace_gateway::{create_gateway, GatewayConfig};
///
/// let config = GatewayConfig::new("http://localhost:5002/user", "http://localhost:8080").unwrap();
/// let gateway = create_gateway(config).unwrap();
/// ```
pub fn create_gateway(config: GatewayConfig) -> Result<Arc<dyn TrackingGateway>> {
    Ok(Arc::new(RemoteGateway::with_session_authenticator(config)?))
}

/// Creates a [`TrackingGateway`] with a caller-supplied authorization check.
pub fn create_gateway_with_authenticator(
    config: GatewayConfig,
    authenticator: Arc<dyn Authenticator>,
) -> Result<Arc<dyn TrackingGateway>> {
    Ok(Arc::new(RemoteGateway::new(config, authenticator)?))
}
