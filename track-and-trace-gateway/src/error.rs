//! Unified error type definition

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error type for every gateway operation.
///
/// Each variant that stems from a remote call carries the `endpoint` label of the
/// service that produced it (`user-service` or `complex-scraper`). All variants are
/// serializable so a calling UI can forward them as structured error payloads.
///
/// # Failure classes
///
/// - [`Backend`](Self::Backend): the service answered with a non-2xx status and
///   (usually) a structured error body.
/// - [`Network`](Self::Network) / [`Timeout`](Self::Timeout): no response was
///   received at all.
/// - [`Unauthorized`](Self::Unauthorized): the authorization check before a status
///   lookup did not succeed.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum GatewayError {
    /// The request never produced a response (DNS failure, connection refused, reset).
    #[error("[{endpoint}] Network error: {detail}")]
    Network {
        /// Service the request was addressed to.
        endpoint: String,
        /// Transport error details.
        detail: String,
    },

    /// The request timed out.
    #[error("[{endpoint}] Request timeout: {detail}")]
    Timeout {
        /// Service the request was addressed to.
        endpoint: String,
        /// Transport error details.
        detail: String,
    },

    /// The authorization check preceding a status lookup returned a non-200 status.
    #[error("Request Unauthorised (status {status})")]
    Unauthorized {
        /// Status reported by the authenticator.
        status: u16,
    },

    /// The service answered with a non-2xx status.
    #[error("[{endpoint}] HTTP {status}: {}", summarize_payload(.payload))]
    Backend {
        /// Service that rejected the request.
        endpoint: String,
        /// HTTP status code of the response.
        status: u16,
        /// Structured error body. Non-JSON bodies are kept as a JSON string.
        payload: Value,
    },

    /// A 2xx body did not match the expected schema.
    #[error("[{endpoint}] Decode error: {detail}")]
    Decode {
        /// Service that produced the body.
        endpoint: String,
        /// Deserializer error details.
        detail: String,
    },

    /// The gateway configuration was rejected.
    #[error("Invalid configuration '{field}': {detail}")]
    InvalidConfig {
        /// Offending configuration key.
        field: String,
        /// What is wrong with it.
        detail: String,
    },
}

impl GatewayError {
    /// Whether the error is an anticipated outcome of user input (wrong password,
    /// expired session, rejected lookup), used for log level selection.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Update this method whenever a variant is added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Backend { .. } | Self::Unauthorized { .. })
    }

    /// Human readable message extracted from a backend error payload, if any.
    ///
    /// The user service answers with `{code, message}` or `{msg}`; other services may
    /// use `{error}`.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { payload, .. } => payload_message(payload),
            _ => None,
        }
    }
}

fn payload_message(payload: &Value) -> Option<&str> {
    match payload {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => ["message", "msg", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}

fn summarize_payload(payload: &Value) -> String {
    payload_message(payload).map_or_else(|| payload.to_string(), str::to_string)
}

/// Convenience type alias for `Result<T, GatewayError>`.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_network_error() {
        let e = GatewayError::Network {
            endpoint: "user-service".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[user-service] Network error: connection refused");
    }

    #[test]
    fn display_unauthorized() {
        let e = GatewayError::Unauthorized { status: 401 };
        assert_eq!(e.to_string(), "Request Unauthorised (status 401)");
    }

    #[test]
    fn display_backend_uses_message_field() {
        let e = GatewayError::Backend {
            endpoint: "user-service".to_string(),
            status: 401,
            payload: json!({"code": 401, "message": "Wrong password"}),
        };
        assert_eq!(e.to_string(), "[user-service] HTTP 401: Wrong password");
    }

    #[test]
    fn display_backend_falls_back_to_raw_json() {
        let e = GatewayError::Backend {
            endpoint: "complex-scraper".to_string(),
            status: 500,
            payload: json!({"detail": [1, 2]}),
        };
        assert_eq!(
            e.to_string(),
            r#"[complex-scraper] HTTP 500: {"detail":[1,2]}"#
        );
    }

    #[test]
    fn backend_message_reads_known_keys() {
        let msg = |payload: Value| {
            GatewayError::Backend {
                endpoint: "t".into(),
                status: 400,
                payload,
            }
            .backend_message()
            .map(str::to_string)
        };

        assert_eq!(msg(json!({"message": "User not found"})).as_deref(), Some("User not found"));
        assert_eq!(msg(json!({"msg": "sign out successful"})).as_deref(), Some("sign out successful"));
        assert_eq!(msg(json!({"error": "bad credentials"})).as_deref(), Some("bad credentials"));
        assert_eq!(msg(json!("Bad Gateway")).as_deref(), Some("Bad Gateway"));
        assert_eq!(msg(json!({"code": 500})), None);
    }

    #[test]
    fn backend_message_is_none_for_transport_errors() {
        let e = GatewayError::Timeout {
            endpoint: "t".into(),
            detail: "30s".into(),
        };
        assert!(e.backend_message().is_none());
    }

    #[test]
    fn expected_classification() {
        assert!(GatewayError::Unauthorized { status: 403 }.is_expected());
        assert!(
            GatewayError::Backend {
                endpoint: "t".into(),
                status: 404,
                payload: Value::Null,
            }
            .is_expected()
        );
        assert!(
            !GatewayError::Network {
                endpoint: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
        assert!(
            !GatewayError::Decode {
                endpoint: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = GatewayError::Backend {
            endpoint: "user-service".to_string(),
            status: 404,
            payload: json!({"code": 404, "message": "User not found"}),
        };
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["code"], "Backend");
        assert_eq!(value["status"], 404);
        assert_eq!(value["payload"]["message"], "User not found");
    }

    #[test]
    fn deserializes_unauthorized() {
        let e: GatewayError =
            serde_json::from_value(json!({"code": "Unauthorized", "status": 401})).unwrap();
        assert!(matches!(e, GatewayError::Unauthorized { status: 401 }));
    }
}
