use std::env;

use anyhow::Result;

use crate::cookies::{get_cookie, CSRF_COOKIE};
use crate::ui::forms::LoadingPolicy;

/// Default detection server for local development.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Central configuration loaded from environment variables.
///
/// Session cookies come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Detection server root (PROFILESCAN_BASE_URL)
    pub base_url: String,
    /// Raw cookie string, e.g. `csrftoken=...; sessionid=...`
    /// (PROFILESCAN_COOKIES). Sent as the Cookie header.
    pub cookies: String,
    /// When submit buttons come back after a request (PROFILESCAN_LOADING_POLICY)
    pub loading_policy: LoadingPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let loading_policy = match env::var("PROFILESCAN_LOADING_POLICY") {
            Ok(raw) => LoadingPolicy::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!(
                    "PROFILESCAN_LOADING_POLICY must be `timer` or `settled`, got `{raw}`"
                )
            })?,
            Err(_) => LoadingPolicy::default(),
        };

        Ok(Self {
            base_url: env::var("PROFILESCAN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            cookies: env::var("PROFILESCAN_COOKIES").unwrap_or_default(),
            loading_policy,
        })
    }

    /// Check that a CSRF cookie is configured.
    /// Call this before any mutating request (scan, report).
    pub fn require_csrf(&self) -> Result<()> {
        if get_cookie(&self.cookies, CSRF_COOKIE).is_none() {
            anyhow::bail!(
                "No csrftoken cookie in PROFILESCAN_COOKIES. Log in through the browser,\n\
                 copy the csrftoken and sessionid cookies, and add them to your .env file:\n\
                 PROFILESCAN_COOKIES=\"csrftoken=...; sessionid=...\""
            );
        }
        Ok(())
    }

    /// Check that some session cookie is present.
    /// The history endpoint requires a logged-in session.
    pub fn require_session(&self) -> Result<()> {
        if self.cookies.trim().is_empty() {
            anyhow::bail!(
                "PROFILESCAN_COOKIES not set. The server only answers logged-in sessions.\n\
                 Add your sessionid cookie to your .env file."
            );
        }
        Ok(())
    }
}
