//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use track_and_trace_gateway::{
    Authenticator, Direction, GatewayConfig, RemoteGateway, StaticAuthenticator, TrackingQuery,
};
use wiremock::{MockServer, Request, ResponseTemplate};

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Both services are served by the same mock; the user service lives under `/user`.
pub fn config_for(server: &MockServer) -> GatewayConfig {
    GatewayConfig::new(&format!("{}/user", server.uri()), &server.uri())
        .expect("mock server URI should be a valid endpoint")
}

pub fn gateway_with(server: &MockServer, authenticator: impl Authenticator + 'static) -> RemoteGateway {
    RemoteGateway::new(config_for(server), Arc::new(authenticator))
        .expect("gateway construction should succeed")
}

pub fn gateway(server: &MockServer) -> RemoteGateway {
    gateway_with(server, StaticAuthenticator::allow())
}

pub fn session_gateway(server: &MockServer) -> RemoteGateway {
    RemoteGateway::with_session_authenticator(config_for(server))
        .expect("gateway construction should succeed")
}

pub fn sample_query() -> TrackingQuery {
    TrackingQuery {
        shipping_line: "MAERSK".to_string(),
        identifier: "MAEU123456789".to_string(),
        identifier_type: "bl".to_string(),
        direction: Direction::Import,
    }
}

pub fn sample_query_body() -> Value {
    json!({
        "shipping_line": "MAERSK",
        "identifier": "MAEU123456789",
        "identifier_type": "bl",
        "direction": "import"
    })
}

pub fn sample_tracking_body() -> Value {
    json!({
        "arrival": "2023-03-01",
        "discharge": "SINGAPORE",
        "status": "Vessel departed",
        "vessel": "MAERSK ESSEN",
        "bl": "MAEU123456789",
        "shipline": "MAERSK",
        "loading": "ROTTERDAM"
    })
}

/// Sign-in response as issued by the user service: JSON body plus the
/// access-token and CSRF cookies.
pub fn login_success() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(json!({"code": 200, "message": "login success"}))
        .append_header("set-cookie", "access_token_cookie=jwt-token; Path=/; HttpOnly")
        .append_header("set-cookie", "csrf_access_token=csrf-token; Path=/")
}

pub fn cookie_header(req: &Request) -> Option<String> {
    req.headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn has_session_cookie(req: &Request) -> bool {
    cookie_header(req).is_some_and(|c| c.contains("access_token_cookie=jwt-token"))
}

pub fn has_no_cookie(req: &Request) -> bool {
    cookie_header(req).is_none()
}
