use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::datetime;
use crate::utils::log_sanitizer::mask_secret;

// ============ User session ============

/// Sign-in credentials.
///
/// `username` may also be an email address; the user service decides which lookup
/// to perform. The password is masked in `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name or email.
    pub username: String,
    /// Plain-text password, sent once and never retained by the gateway.
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &mask_secret(&self.password))
            .finish()
    }
}

/// Account registration form.
///
/// The form collects a `username`, but the registration payload sent to the user
/// service only carries `email`, `password`, `phone` and `company`
/// (see [`SignupRequest::payload`]). Whether the service should receive the
/// username is an open product question; the omission is kept as-is.
#[derive(Clone, Deserialize)]
pub struct SignupRequest {
    /// Username typed into the form. Not transmitted.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Numeric phone number.
    pub phone: u64,
    /// Company name.
    pub company: String,
}

/// Wire body of `POST /signup`.
#[derive(Debug, Serialize)]
pub(crate) struct SignupPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub phone: u64,
    pub company: &'a str,
}

impl SignupRequest {
    pub(crate) fn payload(&self) -> SignupPayload<'_> {
        SignupPayload {
            email: &self.email,
            password: &self.password,
            phone: self.phone,
            company: &self.company,
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &mask_secret(&self.password))
            .field("phone", &self.phone)
            .field("company", &self.company)
            .finish()
    }
}

/// Envelope returned by the user service.
///
/// Success and failure bodies look like `{"code": 200, "message": "login success"}`,
/// sign-out answers `{"msg": "..."}`. Keys outside the envelope are preserved in
/// [`extra`](Self::extra) so callers see the payload exactly as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendMessage {
    /// Application status code echoed in the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human readable message.
    #[serde(default, alias = "msg", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional data attachment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Any other key sent by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BackendMessage {
    /// Look up a key outside the `{code, message, data}` envelope.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Outcome of the authorization check run before a status lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    /// HTTP-like status; `200` means authorized.
    pub status: u16,
}

impl AuthStatus {
    pub const OK: u16 = 200;

    pub const fn new(status: u16) -> Self {
        Self { status }
    }

    pub const fn is_authorized(self) -> bool {
        self.status == Self::OK
    }
}

// ============ Shipment tracking ============

/// Shipment direction relative to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Import,
    Export,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import => f.write_str("import"),
            Self::Export => f.write_str("export"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "import" => Ok(Self::Import),
            "export" => Ok(Self::Export),
            other => Err(format!("unknown direction '{other}', expected import or export")),
        }
    }
}

/// Parameters of a shipment status lookup. Serializes to the scraper's wire body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingQuery {
    /// Carrier whose site is scraped.
    pub shipping_line: String,
    /// B/L, container or booking number.
    pub identifier: String,
    /// Kind of `identifier`, interpreted by the scraper.
    pub identifier_type: String,
    pub direction: Direction,
}

/// Tracking data returned by the scraper and shown on the status page.
///
/// `bl` and `status` are required; every other field may be missing. All fields
/// must be strings, anything else fails decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResult {
    /// Bill of lading number.
    pub bl: String,
    /// Current shipment status.
    pub status: String,
    /// Estimated arrival.
    #[serde(default)]
    pub arrival: Option<String>,
    /// Port of discharge.
    #[serde(default)]
    pub discharge: Option<String>,
    /// Vessel name.
    #[serde(default)]
    pub vessel: Option<String>,
    /// Shipping line handling the leg.
    #[serde(default)]
    pub shipline: Option<String>,
    /// Port of loading.
    #[serde(default)]
    pub loading: Option<String>,
}

/// Step of the status page progress list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStage {
    Origin,
    InTransit,
    Disembarked,
    Status,
}

impl MilestoneStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Origin => "Shipment Origin",
            Self::InTransit => "Shipment In Progress Via",
            Self::Disembarked => "Shipment Disembarked",
            Self::Status => "Shipment Status",
        }
    }
}

/// One rendered step of the progress list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub stage: MilestoneStage,
    /// Value shown under the label; `None` when the scraper did not report it.
    pub value: Option<String>,
    /// `true` for completed steps, `false` for the current one.
    pub done: bool,
}

impl TrackingResult {
    /// The four progress steps of the status page, in display order.
    ///
    /// Origin, transit and discharge are always completed; the status step is the
    /// current one.
    pub fn milestones(&self) -> Vec<Milestone> {
        let done = |stage, value: &Option<String>| Milestone {
            stage,
            value: value.clone(),
            done: true,
        };

        vec![
            done(MilestoneStage::Origin, &self.loading),
            done(MilestoneStage::InTransit, &self.shipline),
            done(MilestoneStage::Disembarked, &self.discharge),
            Milestone {
                stage: MilestoneStage::Status,
                value: Some(self.status.clone()),
                done: false,
            },
        ]
    }

    /// Parsed arrival time, if `arrival` is present and recognisable.
    pub fn eta(&self) -> Option<DateTime<Utc>> {
        self.arrival.as_deref().and_then(datetime::parse_arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signup_payload_omits_username() {
        let req = SignupRequest {
            username: "alice".into(),
            email: "a@b.com".into(),
            password: "pw".into(),
            phone: 5_551_234,
            company: "Acme".into(),
        };
        let body = serde_json::to_value(req.payload()).unwrap();
        assert_eq!(
            body,
            json!({"email": "a@b.com", "password": "pw", "phone": 5_551_234, "company": "Acme"})
        );
        assert!(body.get("username").is_none());
    }

    #[test]
    fn debug_masks_passwords() {
        let creds = Credentials::new("alice", "hunter2");
        let out = format!("{creds:?}");
        assert!(out.contains("alice"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn tracking_query_wire_keys() {
        let query = TrackingQuery {
            shipping_line: "MAERSK".into(),
            identifier: "MAEU123456789".into(),
            identifier_type: "bl".into(),
            direction: Direction::Import,
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "shipping_line": "MAERSK",
                "identifier": "MAEU123456789",
                "identifier_type": "bl",
                "direction": "import"
            })
        );
    }

    #[test]
    fn direction_from_str() {
        assert_eq!("Export".parse::<Direction>(), Ok(Direction::Export));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn backend_message_accepts_msg_alias_and_keeps_extra_keys() {
        let m: BackendMessage =
            serde_json::from_value(json!({"msg": "sign out successful"})).unwrap();
        assert_eq!(m.message.as_deref(), Some("sign out successful"));

        let m: BackendMessage = serde_json::from_value(json!({"token": "abc"})).unwrap();
        assert_eq!(m.get("token"), Some(&json!("abc")));
        assert_eq!(serde_json::to_value(&m).unwrap(), json!({"token": "abc"}));
    }

    #[test]
    fn tracking_result_requires_bl_and_status() {
        let missing: Result<TrackingResult, _> =
            serde_json::from_value(json!({"bl": "X", "vessel": "EVER GIVEN"}));
        assert!(missing.is_err());

        let wrong_type: Result<TrackingResult, _> =
            serde_json::from_value(json!({"bl": "X", "status": "Arrived", "vessel": 7}));
        assert!(wrong_type.is_err());
    }

    #[test]
    fn milestones_follow_status_page_order() {
        let result = TrackingResult {
            bl: "BL1".into(),
            status: "Discharged".into(),
            arrival: Some("2023-03-01".into()),
            discharge: Some("SINGAPORE".into()),
            vessel: Some("EVER GIVEN".into()),
            shipline: Some("EVERGREEN".into()),
            loading: None,
        };

        let steps = result.milestones();
        let stages: Vec<_> = steps.iter().map(|m| m.stage).collect();
        assert_eq!(
            stages,
            [
                MilestoneStage::Origin,
                MilestoneStage::InTransit,
                MilestoneStage::Disembarked,
                MilestoneStage::Status
            ]
        );
        assert_eq!(steps[0].value, None);
        assert_eq!(steps[1].value.as_deref(), Some("EVERGREEN"));
        assert!(steps[..3].iter().all(|m| m.done));
        assert!(!steps[3].done);
        assert_eq!(steps[3].value.as_deref(), Some("Discharged"));
        assert_eq!(MilestoneStage::InTransit.label(), "Shipment In Progress Via");
    }

    #[test]
    fn auth_status_sentinel() {
        assert!(AuthStatus::new(200).is_authorized());
        assert!(!AuthStatus::new(401).is_authorized());
    }
}
