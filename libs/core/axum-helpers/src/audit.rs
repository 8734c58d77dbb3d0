//! Structured audit trail for registrations and admin mutations.
//!
//! Events go to the `audit` tracing target so they can be routed separately.
//!
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome, extract_ip_from_headers};
//!
//! AuditEvent::new(
//!     None,
//!     "event.register",
//!     Some(format!("event:{}", event_id)),
//!     AuditOutcome::Success,
//! )
//! .with_ip(extract_ip_from_headers(&headers))
//! .with_details(json!({"registration_id": registration.id}))
//! .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    /// Rejected by a business rule or failed in the store
    Failure,
    /// Caller lacked the admin role
    Denied,
}

/// One audited action. Build with the `with_*` methods, then [`AuditEvent::log`].
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Token subject; `None` for anonymous callers such as public registrations
    pub user_id: Option<String>,
    /// Dotted verb, e.g. `event.register` or `post.delete`
    pub action: String,
    /// `kind:id`, e.g. `event:<uuid>` or `post:<slug>`
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        user_id: Option<String>,
        action: impl Into<String>,
        resource: Option<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            user_id,
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_ip(self, ip_address: Option<String>) -> Self {
        Self { ip_address, ..self }
    }

    pub fn with_user_agent(self, user_agent: Option<String>) -> Self {
        Self { user_agent, ..self }
    }

    /// Details that fail to serialize are dropped
    pub fn with_details(self, details: impl Serialize) -> Self {
        Self {
            details: serde_json::to_value(details).ok(),
            ..self
        }
    }

    /// Emit on the `audit` target; failures and denials at `warn`
    pub fn log(self) {
        let details = self.details.as_ref().map(|d| d.to_string());
        match self.outcome {
            AuditOutcome::Success => tracing::info!(
                target: "audit",
                user_id = self.user_id,
                action = %self.action,
                resource = self.resource,
                outcome = ?self.outcome,
                ip = self.ip_address,
                user_agent = self.user_agent,
                details,
                "audit"
            ),
            AuditOutcome::Failure | AuditOutcome::Denied => tracing::warn!(
                target: "audit",
                user_id = self.user_id,
                action = %self.action,
                resource = self.resource,
                outcome = ?self.outcome,
                ip = self.ip_address,
                user_agent = self.user_agent,
                details,
                "audit"
            ),
        }
    }
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

/// `User-Agent` header, if any
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(
            extract_ip_from_headers(&headers).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("10.0.0.2"));
        assert_eq!(extract_user_agent(&headers), None);
    }

    #[test]
    fn test_event_serializes_outcome_lowercase() {
        let event = AuditEvent::new(
            Some("admin-1".to_string()),
            "registration.cancel",
            Some("event:1".to_string()),
            AuditOutcome::Denied,
        )
        .with_details(serde_json::json!({"reason": "not admin"}));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["outcome"], "denied");
        assert!(json.get("ip_address").is_none());
        assert_eq!(json["details"]["reason"], "not admin");
    }
}
