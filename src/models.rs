// Request and response models — transient values that live for one submission.
//
// Nothing here is persisted client-side. A request is built when the user
// submits a form, sent once, and dropped after the response is handled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A social-media platform the detection service knows about.
///
/// Unrecognized identifiers are kept verbatim in `Other` so they pass
/// through to the server and the formatters unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Instagram,
    Facebook,
    Twitter,
    TikTok,
    Other(String),
}

impl Platform {
    /// Parse a platform identifier. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "instagram" => Platform::Instagram,
            "facebook" => Platform::Facebook,
            "twitter" => Platform::Twitter,
            "tiktok" => Platform::TikTok,
            other => Platform::Other(other.to_string()),
        }
    }

    /// The wire identifier sent in form bodies.
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::TikTok => "tiktok",
            Platform::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Platform::Other(_))
    }
}

impl From<String> for Platform {
    fn from(raw: String) -> Self {
        Platform::parse(&raw)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A profile scan submission. The server validates the URL; we don't.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub profile_url: String,
    pub platform: Platform,
    /// Free-text notes from the user (defaults to empty)
    pub additional_context: String,
}

impl ScanRequest {
    pub fn new(profile_url: impl Into<String>, platform: Platform) -> Self {
        Self {
            profile_url: profile_url.into(),
            platform,
            additional_context: String::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = context.into();
        self
    }

    /// Form-encoded body fields, in the order the server expects them.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("profile_url".to_string(), self.profile_url.clone()),
            ("platform".to_string(), self.platform.as_str().to_string()),
            (
                "additional_context".to_string(),
                self.additional_context.clone(),
            ),
        ]
    }
}

/// An abuse report for a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub profile_url: String,
    pub platform: Platform,
    pub reason: String,
}

impl ReportRequest {
    pub fn new(
        profile_url: impl Into<String>,
        platform: Platform,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            profile_url: profile_url.into(),
            platform,
            reason: reason.into(),
        }
    }

    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("profile_url".to_string(), self.profile_url.clone()),
            ("platform".to_string(), self.platform.as_str().to_string()),
            ("reason".to_string(), self.reason.clone()),
        ]
    }
}

/// Typed reading of the JSON the report endpoint answers with.
///
/// The server replies `{"status": "success", "report_id": 7}` when the
/// report is stored and `{"status": "error", "message": "..."}` when it
/// refuses it. Both arrive with HTTP 200.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Filed { report_id: Option<i64> },
    Rejected { message: String },
    Other { status: Option<String> },
}

impl ReportOutcome {
    pub fn from_value(value: &Value) -> Self {
        let status = value.get("status").and_then(Value::as_str);
        match status {
            Some("success") => ReportOutcome::Filed {
                report_id: value.get("report_id").and_then(Value::as_i64),
            },
            Some("error") => ReportOutcome::Rejected {
                message: value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string(),
            },
            other => ReportOutcome::Other {
                status: other.map(str::to_string),
            },
        }
    }
}
