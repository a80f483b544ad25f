//! # track-and-trace-gateway
//!
//! Remote call gateway of the Track & Trace shipment tracking frontend. Each user
//! action maps to one HTTP call against one of two services:
//!
//! | Operation | Request | Credentials |
//! |-----------|---------|-------------|
//! | [`sign_in`](TrackingGateway::sign_in) | `POST {user_endpoint}/signin` | included |
//! | [`sign_out`](TrackingGateway::sign_out) | `POST {user_endpoint}/signout` | included |
//! | [`sign_up`](TrackingGateway::sign_up) | `POST {user_endpoint}/signup` | not included |
//! | [`bl_status`](TrackingGateway::bl_status) | authorization check, then `POST {scraper_endpoint}/scrape` | not included |
//!
//! "Credentials included" means the request goes through the session client,
//! whose cookie jar keeps the access-token cookies issued at sign-in.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use track_and_trace_gateway::{
//!     create_gateway, Credentials, Direction, GatewayConfig, TrackingQuery,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::from_env()?;
//!     let gateway = create_gateway(config)?;
//!
//!     gateway.sign_in(&Credentials::new("alice", "secret")).await?;
//!
//!     let result = gateway
//!         .bl_status(&TrackingQuery {
//!             shipping_line: "MAERSK".to_string(),
//!             identifier: "MAEU123456789".to_string(),
//!             identifier_type: "bl".to_string(),
//!             direction: Direction::Import,
//!         })
//!         .await?;
//!
//!     for step in result.milestones() {
//!         println!("{}: {:?}", step.stage.label(), step.value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, GatewayError>`](GatewayError):
//!
//! - [`GatewayError::Backend`]: the service rejected the request; its error body
//!   is kept in `payload`
//! - [`GatewayError::Network`] / [`GatewayError::Timeout`]: no response arrived
//! - [`GatewayError::Unauthorized`]: the session check before a lookup failed
//! - [`GatewayError::Decode`]: a success body did not match the expected schema
//!
//! Requests are never retried.

mod auth;
mod config;
mod error;
mod factory;
mod http_client;
mod remote;
mod session;
mod traits;
mod types;
mod utils;

pub use auth::{SESSION_CHECK_PATH, SessionAuthenticator, StaticAuthenticator};
pub use config::{GatewayConfig, SCRAPER_ENDPOINT_ENV, USER_ENDPOINT_ENV};
pub use error::{GatewayError, Result};
pub use factory::{create_gateway, create_gateway_with_authenticator};
pub use remote::RemoteGateway;
pub use session::{CSRF_COOKIE, CSRF_HEADER, Session};
pub use traits::{Authenticator, TrackingGateway};
pub use types::{
    AuthStatus, BackendMessage, Credentials, Direction, Milestone, MilestoneStage, SignupRequest,
    TrackingQuery, TrackingResult,
};

pub use utils::datetime;
