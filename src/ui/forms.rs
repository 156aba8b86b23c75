// Form interaction — submit loading state, password toggle and confirmation.
//
// A form is either Idle or Submitting. Submitting disables the submit button
// and swaps its label for a spinner. How it gets back to Idle depends on the
// `LoadingPolicy`: after a fixed delay (the old behavior) or when the
// request actually settles.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::element::Node;
use super::page::Page;
use crate::api::FakeProfileApi;
use crate::models::{Platform, ScanRequest};

/// Spinner markup prepended to every working label.
pub const SPINNER_HTML: &str = r#"<i class="fas fa-spinner fa-spin"></i>"#;

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// The three forms that show a loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Signup,
    ProfileCheck,
}

impl FormKind {
    pub fn form_id(&self) -> &'static str {
        match self {
            FormKind::Login => "login-form",
            FormKind::Signup => "signup-form",
            FormKind::ProfileCheck => "profile-check-form",
        }
    }

    pub fn working_text(&self) -> &'static str {
        match self {
            FormKind::Login => "Signing In...",
            FormKind::Signup => "Creating Account...",
            FormKind::ProfileCheck => "Analyzing...",
        }
    }

    /// Label shown while submitting.
    pub fn working_label(&self) -> String {
        format!("{SPINNER_HTML} {}", self.working_text())
    }

    /// Delay before the timer policy re-enables the button.
    pub fn reset_delay(&self) -> Duration {
        match self {
            FormKind::Login | FormKind::Signup => Duration::from_secs(2),
            FormKind::ProfileCheck => Duration::from_secs(3),
        }
    }
}

/// When a submitting form goes back to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPolicy {
    /// After `FormKind::reset_delay`, whether or not the request finished
    Timer,
    /// When the submitted request resolves
    #[default]
    Settled,
}

impl LoadingPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "timer" => Some(LoadingPolicy::Timer),
            "settled" => Some(LoadingPolicy::Settled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
}

#[derive(Debug)]
struct SubmitState {
    state: FormState,
    original_label: String,
}

/// Loading-state controller for one form's submit button.
#[derive(Debug, Clone)]
pub struct FormController {
    kind: FormKind,
    policy: LoadingPolicy,
    button: Node,
    inner: Arc<Mutex<SubmitState>>,
}

impl FormController {
    /// Bind to `#<form-id> button[type=submit]`.
    pub fn bind(page: &Page, kind: FormKind, policy: LoadingPolicy) -> Option<Self> {
        let form = page.by_id(kind.form_id())?;
        let button = form.first_descendant(|n| {
            n.tag() == "button" && n.input_type().as_deref() == Some("submit")
        })?;
        Some(Self::new(kind, policy, button))
    }

    pub fn new(kind: FormKind, policy: LoadingPolicy, button: Node) -> Self {
        Self {
            kind,
            policy,
            button,
            inner: Arc::new(Mutex::new(SubmitState {
                state: FormState::Idle,
                original_label: String::new(),
            })),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn policy(&self) -> LoadingPolicy {
        self.policy
    }

    pub fn button(&self) -> &Node {
        &self.button
    }

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SubmitState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Idle → Submitting. Returns false when already submitting, which is
    /// what a disabled button amounts to.
    pub fn begin(&self) -> bool {
        let mut inner = self.lock();
        if inner.state == FormState::Submitting || self.button.is_disabled() {
            debug!(form = self.kind.form_id(), "Submit ignored while submitting");
            return false;
        }
        inner.state = FormState::Submitting;
        inner.original_label = self.button.inner_html();
        self.button.set_inner_html(&self.kind.working_label());
        self.button.set_disabled(true);
        true
    }

    /// Submitting → Idle: restore the label and re-enable.
    pub fn finish(&self) {
        let mut inner = self.lock();
        if inner.state == FormState::Idle {
            return;
        }
        inner.state = FormState::Idle;
        self.button.set_inner_html(&inner.original_label);
        self.button.set_disabled(false);
    }

    /// Handle a submit event. Under the timer policy this schedules the
    /// reset and returns its handle; under the settled policy the caller is
    /// expected to call `finish` (or use `run`).
    pub fn on_submit(&self) -> Option<JoinHandle<()>> {
        if !self.begin() {
            return None;
        }
        match self.policy {
            LoadingPolicy::Timer => Some(self.schedule_reset()),
            LoadingPolicy::Settled => None,
        }
    }

    fn schedule_reset(&self) -> JoinHandle<()> {
        let this = self.clone();
        let delay = self.kind.reset_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.finish();
        })
    }

    /// Submit with `work` as the request. Returns `None` if the submit was
    /// ignored because the form was already submitting.
    pub async fn run<F, T>(&self, work: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        if !self.begin() {
            return None;
        }
        if self.policy == LoadingPolicy::Timer {
            self.schedule_reset();
        }
        // Dropping this future (timeout, select!, abort) still counts as settled.
        let _settle = (self.policy == LoadingPolicy::Settled).then(|| FinishOnDrop(self));
        Some(work.await)
    }
}

/// Returns the form to Idle when dropped.
struct FinishOnDrop<'a>(&'a FormController);

impl Drop for FinishOnDrop<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// What became of a scan-form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The form was already submitting
    Ignored,
    /// Result HTML was rendered into the result container
    Rendered,
    /// The request failed; the message is shown in the error banner
    Failed(String),
}

/// The profile-check form wired to the API client.
///
/// Unlike the bare submit handler, failures are written to an inline
/// banner instead of only reaching the log.
pub struct ScanForm {
    controller: FormController,
    api: FakeProfileApi,
    url_input: Node,
    platform_input: Node,
    context_input: Option<Node>,
    result: Node,
    banner: Node,
}

impl ScanForm {
    pub fn bind(
        page: &Page,
        api: FakeProfileApi,
        policy: LoadingPolicy,
        result: Node,
        banner: Node,
    ) -> Option<Self> {
        let controller = FormController::bind(page, FormKind::ProfileCheck, policy)?;
        Some(Self {
            controller,
            api,
            url_input: page.by_id("profile-url")?,
            platform_input: page.by_id("platform")?,
            context_input: page.by_id("additional-context"),
            result,
            banner,
        })
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Build a scan request from the current input values.
    pub fn current_request(&self) -> ScanRequest {
        let request = ScanRequest::new(
            self.url_input.value(),
            Platform::parse(&self.platform_input.value()),
        );
        match &self.context_input {
            Some(node) => request.with_context(node.value()),
            None => request,
        }
    }

    pub async fn submit(&self) -> ScanOutcome {
        let request = self.current_request();
        match self.controller.run(self.api.detect_profile(&request)).await {
            None => ScanOutcome::Ignored,
            Some(Ok(html)) => {
                self.result.set_inner_html(&html);
                self.banner.set_display("none");
                ScanOutcome::Rendered
            }
            Some(Err(e)) => {
                let message = format!("Scan failed: {e}");
                warn!(error = %e, "Showing scan failure banner");
                self.banner.set_inner_html(&message);
                self.banner.add_class("alert");
                self.banner.set_display("block");
                ScanOutcome::Failed(message)
            }
        }
    }
}

/// Show/hide toggle for the password field.
#[derive(Debug, Clone)]
pub struct PasswordToggle {
    input: Node,
    icon: Node,
}

impl PasswordToggle {
    /// Bind to `#togglePassword`, its `<i>` icon and `#password`.
    pub fn bind(page: &Page) -> Option<Self> {
        let toggle = page.by_id("togglePassword")?;
        let icon = toggle.first_descendant(|n| n.tag() == "i")?;
        let input = page.by_id("password")?;
        Some(Self { input, icon })
    }

    pub fn new(input: Node, icon: Node) -> Self {
        Self { input, icon }
    }

    /// Flip visibility. Returns true when the password is now shown.
    pub fn toggle(&self) -> bool {
        if self.input.input_type().as_deref() == Some("password") {
            self.input.set_input_type("text");
            self.icon.remove_class("fa-eye");
            self.icon.add_class("fa-eye-slash");
            true
        } else {
            self.input.set_input_type("password");
            self.icon.remove_class("fa-eye-slash");
            self.icon.add_class("fa-eye");
            false
        }
    }
}

/// Advisory match check between the signup password and its confirmation.
#[derive(Debug, Clone)]
pub struct PasswordConfirmation {
    password: Node,
    confirm: Node,
}

impl PasswordConfirmation {
    /// Only bound on pages with a signup form.
    pub fn bind(page: &Page) -> Option<Self> {
        page.by_id(FormKind::Signup.form_id())?;
        Some(Self {
            password: page.by_id("password")?,
            confirm: page.by_id("confirm-password")?,
        })
    }

    /// Run on every input event in the confirmation field.
    pub fn on_input(&self) {
        if self.password.value() != self.confirm.value() {
            self.confirm.set_custom_validity(PASSWORD_MISMATCH);
        } else {
            self.confirm.set_custom_validity("");
        }
    }
}
