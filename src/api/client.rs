// Client for the detection service's form endpoints.
//
// Every call is a single attempt. Failures are logged here before they are
// handed back, so callers see them both in the log and as an `Err`.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::error::ApiError;
use super::transport::{HttpRequest, HttpTransport};
use crate::cookies::{CookieReader, CookieSource};
use crate::models::{ReportRequest, ScanRequest};

pub const DETECT_PATH: &str = "/detect/";
pub const REPORT_PATH: &str = "/detect/report/";
pub const HISTORY_PATH: &str = "/dashboard/history/";

/// Header the server checks the CSRF cookie value against.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Detection, report and history calls against one server.
#[derive(Clone)]
pub struct FakeProfileApi {
    transport: Arc<dyn HttpTransport>,
    cookies: Arc<dyn CookieSource>,
}

impl FakeProfileApi {
    pub fn new(transport: Arc<dyn HttpTransport>, cookies: Arc<dyn CookieSource>) -> Self {
        Self { transport, cookies }
    }

    /// Current CSRF token, read fresh from the cookie source on every call.
    pub fn csrf_token(&self) -> Option<String> {
        CookieReader::new(self.cookies.as_ref()).csrf_token()
    }

    /// Submit a profile for scanning. Returns the server-rendered result HTML.
    pub async fn detect_profile(&self, scan: &ScanRequest) -> Result<String, ApiError> {
        let request = self.with_csrf(HttpRequest::post_form(DETECT_PATH, scan.form_fields()));
        self.execute(request).await.inspect_err(
            |e| error!(profile_url = %scan.profile_url, error = %e, "Error detecting profile"),
        )
    }

    /// File an abuse report. Returns the server's JSON object reply as-is;
    /// any other JSON shape is a parse error.
    pub async fn report_profile(&self, report: &ReportRequest) -> Result<Value, ApiError> {
        let request = self.with_csrf(HttpRequest::post_form(REPORT_PATH, report.form_fields()));
        let result = match self.execute(request).await {
            Ok(body) => serde_json::from_str::<Map<String, Value>>(&body)
                .map(Value::Object)
                .map_err(ApiError::from),
            Err(e) => Err(e),
        };
        result.inspect_err(
            |e| error!(profile_url = %report.profile_url, error = %e, "Error reporting profile"),
        )
    }

    /// Fetch the full scan-history fragment as HTML.
    pub async fn get_scan_history(&self) -> Result<String, ApiError> {
        self.execute(HttpRequest::get(HISTORY_PATH))
            .await
            .inspect_err(|e| error!(error = %e, "Error fetching scan history"))
    }

    fn with_csrf(&self, request: HttpRequest) -> HttpRequest {
        match self.csrf_token() {
            Some(token) => request.header(CSRF_HEADER, &token),
            None => {
                warn!(path = %request.path, "No csrftoken cookie; sending without X-CSRFToken");
                request
            }
        }
    }

    async fn execute(&self, request: HttpRequest) -> Result<String, ApiError> {
        let path = request.path.clone();
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            debug!(
                path = %path,
                status = response.status,
                body = %response.body,
                "Non-success response"
            );
            return Err(ApiError::HttpStatus {
                status: response.status,
            });
        }

        Ok(response.body)
    }
}
