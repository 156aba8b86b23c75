// HTTP transport — the seam between the API client and the network.
//
// The client only ever needs "send this form to this path and give me the
// status and body back". Keeping that behind a trait means the client can be
// exercised against canned responses without a server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::COOKIE;
use tracing::debug;

use super::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request relative to the service base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute path on the service, e.g. `/detect/`
    pub path: String,
    pub headers: Vec<(String, String)>,
    /// Form-encoded body fields. `None` sends no body.
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.to_string(),
            headers: Vec::new(),
            form: None,
        }
    }

    pub fn post_form(path: &str, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            path: path.to_string(),
            headers: Vec::new(),
            form: Some(form),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Look up a header value (case-insensitive name match).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response. No retries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport talking to a real detection server.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    /// Forwarded as the `Cookie` header so the session and CSRF cookies
    /// reach the server the way a browser would send them.
    cookie_header: Option<String>,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, cookie_header: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("profilescan/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie_header: cookie_header.filter(|c| !c.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);

        debug!(method = ?request.method, url = %url, "HTTP request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookies) = &self.cookie_header {
            builder = builder.header(COOKIE, cookies.as_str());
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
