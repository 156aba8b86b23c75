// Tests for the headless UI controllers.
//
// Builds small pages out of nodes and drives the controllers the way the
// browser would dispatch events. Timer behavior runs on tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use profilescan::api::{FakeProfileApi, HttpRequest, HttpResponse, HttpTransport, TransportError};
use profilescan::cookies::StaticCookies;
use profilescan::models::Platform;
use profilescan::ui::dashboard::{DashboardUi, SidebarMenu, UserDropdown};
use profilescan::ui::forms::{
    FormController, FormKind, FormState, LoadingPolicy, PasswordConfirmation, PasswordToggle,
    ScanForm, ScanOutcome, PASSWORD_MISMATCH, SPINNER_HTML,
};
use profilescan::ui::platform::PlatformPicker;
use profilescan::ui::{Node, Page};

fn submit_button(label: &str) -> Node {
    Node::new("button")
        .with_attr("type", "submit")
        .with_html(label)
}

fn form_page(kind: FormKind, label: &str) -> (Page, Node) {
    let button = submit_button(label);
    let page = Page::new(vec![Node::new("form")
        .with_id(kind.form_id())
        .with_child(Node::new("input").with_id("email"))
        .with_child(button.clone())]);
    (page, button)
}

// ============================================================
// Form loading state
// ============================================================

#[test]
fn form_binding_requires_form_and_submit_button() {
    let (page, _) = form_page(FormKind::Login, "Sign In");
    assert!(FormController::bind(&page, FormKind::Login, LoadingPolicy::Timer).is_some());
    assert!(FormController::bind(&page, FormKind::Signup, LoadingPolicy::Timer).is_none());

    let no_button = Page::new(vec![Node::new("form").with_id("login-form")]);
    assert!(FormController::bind(&no_button, FormKind::Login, LoadingPolicy::Timer).is_none());
}

#[tokio::test(start_paused = true)]
async fn timer_policy_reenables_login_after_two_seconds() {
    let (page, button) = form_page(FormKind::Login, "Sign In");
    let form = FormController::bind(&page, FormKind::Login, LoadingPolicy::Timer).unwrap();
    let start = Instant::now();

    let reset = form.on_submit().expect("timer policy schedules a reset");
    assert!(button.is_disabled());
    assert_eq!(
        button.inner_html(),
        format!("{SPINNER_HTML} Signing In...")
    );
    assert_eq!(form.state(), FormState::Submitting);

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert!(button.is_disabled());

    reset.await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert!(!button.is_disabled());
    assert_eq!(button.inner_html(), "Sign In");
    assert_eq!(form.state(), FormState::Idle);
}

#[tokio::test(start_paused = true)]
async fn timer_policy_scan_form_waits_three_seconds() {
    let (page, button) = form_page(FormKind::ProfileCheck, "Check Profile");
    let form = FormController::bind(&page, FormKind::ProfileCheck, LoadingPolicy::Timer).unwrap();

    let reset = form.on_submit().unwrap();
    assert!(button.inner_html().ends_with("Analyzing..."));

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(button.is_disabled());

    reset.await.unwrap();
    assert!(!button.is_disabled());
}

#[tokio::test(start_paused = true)]
async fn timer_policy_reenables_while_request_still_pending() {
    let (page, button) = form_page(FormKind::Signup, "Create Account");
    let form = FormController::bind(&page, FormKind::Signup, LoadingPolicy::Timer).unwrap();

    let runner = form.clone();
    let task = tokio::spawn(async move {
        runner
            .run(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                "done"
            })
            .await
    });

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!button.is_disabled(), "timer fires before the request settles");
    assert_eq!(task.await.unwrap(), Some("done"));
}

#[tokio::test(start_paused = true)]
async fn settled_policy_holds_until_request_resolves() {
    let (page, button) = form_page(FormKind::Login, "Sign In");
    let form = FormController::bind(&page, FormKind::Login, LoadingPolicy::Settled).unwrap();
    assert!(form.on_submit().is_none(), "settled policy schedules no reset");
    form.finish();

    let runner = form.clone();
    let task = tokio::spawn(async move {
        runner
            .run(async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                7
            })
            .await
    });

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(button.is_disabled());
    assert_eq!(form.state(), FormState::Submitting);

    assert_eq!(task.await.unwrap(), Some(7));
    assert!(!button.is_disabled());
    assert_eq!(button.inner_html(), "Sign In");
}

#[tokio::test(start_paused = true)]
async fn settled_policy_recovers_when_request_is_cancelled() {
    let (page, button) = form_page(FormKind::ProfileCheck, "Check Profile");
    let form = FormController::bind(&page, FormKind::ProfileCheck, LoadingPolicy::Settled).unwrap();

    let timed_out = tokio::time::timeout(
        Duration::from_secs(1),
        form.run(tokio::time::sleep(Duration::from_secs(30))),
    )
    .await;
    assert!(timed_out.is_err());

    assert_eq!(form.state(), FormState::Idle);
    assert!(!button.is_disabled());
    assert_eq!(button.inner_html(), "Check Profile");
    assert_eq!(form.run(async { 1 }).await, Some(1));
}

#[tokio::test(start_paused = true)]
async fn settled_policy_recovers_when_task_is_aborted() {
    let (page, button) = form_page(FormKind::Login, "Sign In");
    let form = FormController::bind(&page, FormKind::Login, LoadingPolicy::Settled).unwrap();

    let runner = form.clone();
    let task = tokio::spawn(async move {
        runner
            .run(tokio::time::sleep(Duration::from_secs(30)))
            .await
    });

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(button.is_disabled());

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert_eq!(form.state(), FormState::Idle);
    assert!(!button.is_disabled());
}

#[tokio::test]
async fn second_submit_while_submitting_is_ignored() {
    let (page, _) = form_page(FormKind::Login, "Sign In");
    let form = FormController::bind(&page, FormKind::Login, LoadingPolicy::Settled).unwrap();

    assert!(form.begin());
    assert_eq!(form.run(async { 1 }).await, None);
    form.finish();
    assert_eq!(form.run(async { 2 }).await, Some(2));
}

// ============================================================
// Password toggle and confirmation
// ============================================================

fn signup_page() -> (Page, Node, Node, Node, Node) {
    let password = Node::new("input")
        .with_id("password")
        .with_attr("type", "password");
    let confirm = Node::new("input")
        .with_id("confirm-password")
        .with_attr("type", "password");
    let icon = Node::new("i").with_class("fas").with_class("fa-eye");
    let toggle = Node::new("span")
        .with_id("togglePassword")
        .with_child(icon.clone());
    let page = Page::new(vec![Node::new("form")
        .with_id("signup-form")
        .with_child(password.clone())
        .with_child(toggle.clone())
        .with_child(confirm.clone())
        .with_child(submit_button("Create Account"))]);
    (page, password, confirm, icon, toggle)
}

#[test]
fn password_toggle_flips_type_and_icon() {
    let (page, password, _, icon, _) = signup_page();
    let toggle = PasswordToggle::bind(&page).unwrap();

    assert!(toggle.toggle());
    assert_eq!(password.input_type().as_deref(), Some("text"));
    assert!(icon.has_class("fa-eye-slash"));
    assert!(!icon.has_class("fa-eye"));

    assert!(!toggle.toggle());
    assert_eq!(password.input_type().as_deref(), Some("password"));
    assert!(icon.has_class("fa-eye"));
    assert!(!icon.has_class("fa-eye-slash"));
}

#[test]
fn password_toggle_absent_without_control() {
    let page = Page::new(vec![Node::new("input").with_id("password")]);
    assert!(PasswordToggle::bind(&page).is_none());
}

#[test]
fn confirmation_marks_mismatch_and_clears() {
    let (page, password, confirm, _, _) = signup_page();
    let check = PasswordConfirmation::bind(&page).unwrap();

    password.set_value("hunter22");
    confirm.set_value("hunter2");
    check.on_input();
    assert_eq!(confirm.validity_message(), PASSWORD_MISMATCH);
    assert!(!confirm.is_valid());

    confirm.set_value("hunter22");
    check.on_input();
    assert!(confirm.is_valid());
}

#[test]
fn confirmation_only_on_signup_pages() {
    let page = Page::new(vec![Node::new("form")
        .with_id("login-form")
        .with_child(Node::new("input").with_id("password"))
        .with_child(Node::new("input").with_id("confirm-password"))]);
    assert!(PasswordConfirmation::bind(&page).is_none());
}

// ============================================================
// Platform picker
// ============================================================

#[test]
fn platform_picker_selects_and_sets_placeholder() {
    let icons: Vec<Node> = ["instagram", "tiktok", "myspace"]
        .iter()
        .map(|p| {
            Node::new("div")
                .with_class("platform-icon")
                .with_attr("data-platform", p)
        })
        .collect();
    let platform_input = Node::new("input").with_id("platform");
    let url_input = Node::new("input").with_id("profile-url");

    let mut root = Node::new("div");
    for icon in &icons {
        root = root.with_child(icon.clone());
    }
    let page = Page::new(vec![
        root.with_child(platform_input.clone())
            .with_child(url_input.clone()),
    ]);
    let picker = PlatformPicker::bind(&page).unwrap();

    assert_eq!(picker.select(1), Some(Platform::TikTok));
    assert_eq!(platform_input.value(), "tiktok");
    assert_eq!(url_input.placeholder(), "https://www.tiktok.com/@username");
    assert!(icons[1].has_class("active"));

    assert_eq!(picker.select(0), Some(Platform::Instagram));
    assert!(!icons[1].has_class("active"));
    assert_eq!(picker.selected(), Some(Platform::Instagram));

    // Unknown platform keeps the previous placeholder
    picker.select(2);
    assert_eq!(platform_input.value(), "myspace");
    assert_eq!(url_input.placeholder(), "https://www.instagram.com/username");

    assert_eq!(picker.select(9), None);
}

// ============================================================
// Sidebar and dropdown
// ============================================================

#[test]
fn sidebar_click_moves_active_marker() {
    let items = vec![
        Node::new("li"),
        Node::new("li").with_class("active"),
        Node::new("li"),
    ];
    let mut menu_root = Node::new("ul").with_class("sidebar-menu");
    for item in &items {
        menu_root = menu_root.with_child(item.clone());
    }
    let page = Page::new(vec![menu_root]);
    let menu = SidebarMenu::bind(&page).unwrap();
    assert_eq!(menu.active_index(), Some(1));

    menu.click(2);
    let active: Vec<bool> = items.iter().map(|i| i.has_class("active")).collect();
    assert_eq!(active, vec![false, false, true]);
    assert_eq!(menu.active_index(), Some(2));
}

fn dropdown_page() -> (Page, Node, Node, Node) {
    let avatar = Node::new("img");
    let content = Node::new("div").with_class("dropdown-content");
    let dropdown = Node::new("div")
        .with_class("user-dropdown")
        .with_child(avatar.clone())
        .with_child(content.clone());
    let elsewhere = Node::new("main");
    let page = Page::new(vec![Node::new("body")
        .with_child(dropdown)
        .with_child(elsewhere.clone())]);
    (page, avatar, content, elsewhere)
}

#[test]
fn dropdown_toggles_on_inside_click() {
    let (page, avatar, content, _) = dropdown_page();
    let dropdown = UserDropdown::bind(&page).unwrap();

    assert!(!dropdown.is_open());
    dropdown.handle_click(&avatar);
    assert_eq!(content.display().as_deref(), Some("block"));
    dropdown.handle_click(&avatar);
    assert_eq!(content.display().as_deref(), Some("none"));
}

#[test]
fn dropdown_closes_on_outside_click() {
    let (page, avatar, content, elsewhere) = dropdown_page();
    let ui = DashboardUi::bind(&page);

    ui.document_click(&avatar);
    assert!(ui.dropdown.as_ref().unwrap().is_open());
    ui.document_click(&elsewhere);
    assert_eq!(content.display().as_deref(), Some("none"));

    // Outside click while closed leaves it closed
    ui.document_click(&elsewhere);
    assert!(!ui.dropdown.as_ref().unwrap().is_open());
}

#[test]
fn dashboard_without_chrome_binds_nothing() {
    let ui = DashboardUi::bind(&Page::default());
    assert!(ui.sidebar.is_none());
    assert!(ui.dropdown.is_none());
    assert!(ui.logout.is_none());
    assert!(ui.alerts().is_empty());
}

// ============================================================
// Alert auto-dismiss
// ============================================================

#[tokio::test(start_paused = true)]
async fn alerts_fade_then_leave_the_page() {
    let first = Node::new("div").with_class("alert").with_html("Saved");
    let second = Node::new("div").with_class("alert").with_html("Welcome");
    let page = Page::new(vec![Node::new("body")
        .with_child(first.clone())
        .with_child(second.clone())]);
    let ui = DashboardUi::bind(&page);
    let dismissal = ui.start_alert_dismissal();
    assert_eq!(dismissal.len(), 2);

    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert_eq!(first.opacity(), None);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(first.opacity(), Some(0.0));
    assert!(first.is_attached());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!first.is_attached());
    assert!(!second.is_attached());
    assert!(page.by_class("alert").is_empty());

    assert_eq!(dismissal.wait().await, 0);
}

#[tokio::test(start_paused = true)]
async fn alerts_added_after_bind_stay() {
    let body = Node::new("body").with_child(Node::new("div").with_class("alert"));
    let page = Page::new(vec![body.clone()]);
    let ui = DashboardUi::bind(&page);
    let dismissal = ui.start_alert_dismissal();

    let late = Node::new("div").with_class("alert");
    body.append(late.clone());

    assert_eq!(dismissal.wait().await, 0);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(late.is_attached());
    assert_eq!(page.by_class("alert").len(), 1);
}

// ============================================================
// Scan form wired to the API
// ============================================================

struct FixedTransport(u16, &'static str);

#[async_trait]
impl HttpTransport for FixedTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(self.0, self.1))
    }
}

fn scan_page() -> Page {
    Page::new(vec![Node::new("form")
        .with_id("profile-check-form")
        .with_child(
            Node::new("input")
                .with_id("profile-url")
                .with_value("https://www.instagram.com/someone"),
        )
        .with_child(Node::new("input").with_id("platform").with_value("instagram"))
        .with_child(submit_button("Check Profile"))])
}

fn scan_api(status: u16, body: &'static str) -> FakeProfileApi {
    FakeProfileApi::new(
        Arc::new(FixedTransport(status, body)),
        Arc::new(StaticCookies("csrftoken=t".to_string())),
    )
}

#[tokio::test]
async fn scan_form_renders_result_html() {
    let page = scan_page();
    let result = Node::new("section");
    let banner = Node::new("div");
    let form = ScanForm::bind(
        &page,
        scan_api(200, "<h2>Likely genuine</h2>"),
        LoadingPolicy::Settled,
        result.clone(),
        banner.clone(),
    )
    .unwrap();

    let request = form.current_request();
    assert_eq!(request.platform, Platform::Instagram);
    assert_eq!(request.additional_context, "");

    assert_eq!(form.submit().await, ScanOutcome::Rendered);
    assert_eq!(result.inner_html(), "<h2>Likely genuine</h2>");
    assert!(!form.controller().button().is_disabled());
}

#[tokio::test]
async fn scan_form_shows_failure_banner() {
    let page = scan_page();
    let result = Node::new("section");
    let banner = Node::new("div");
    let form = ScanForm::bind(
        &page,
        scan_api(500, "boom"),
        LoadingPolicy::Settled,
        result.clone(),
        banner.clone(),
    )
    .unwrap();

    let outcome = form.submit().await;
    assert!(matches!(outcome, ScanOutcome::Failed(ref msg) if msg.contains("500")));
    assert_eq!(banner.display().as_deref(), Some("block"));
    assert!(banner.has_class("alert"));
    assert!(banner.inner_html().contains("Network response was not ok"));
    assert_eq!(result.inner_html(), "");
    assert!(!form.controller().button().is_disabled());
}
