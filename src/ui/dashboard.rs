// Dashboard chrome — sidebar selection, user menu, alerts and logout.
//
// Alert dismissal runs on spawned tokio tasks. The timers are independent
// and nothing cancels them on navigation.

use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::element::Node;
use super::page::Page;

/// How long an alert stays fully visible.
pub const ALERT_FADE_DELAY: Duration = Duration::from_secs(5);
/// Gap between the fade starting and the alert leaving the page.
pub const ALERT_REMOVE_DELAY: Duration = Duration::from_millis(300);

pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

/// Single-selection sidebar menu over `.sidebar-menu li`.
#[derive(Debug, Clone)]
pub struct SidebarMenu {
    items: Vec<Node>,
}

impl SidebarMenu {
    pub fn bind(page: &Page) -> Option<Self> {
        let items = page.within_class("sidebar-menu", |n| n.tag() == "li");
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn new(items: Vec<Node>) -> Self {
        Self { items }
    }

    /// Mark item `index` active and every sibling inactive.
    pub fn click(&self, index: usize) {
        let Some(clicked) = self.items.get(index) else {
            return;
        };
        for item in &self.items {
            item.remove_class("active");
        }
        clicked.add_class("active");
    }

    pub fn active_index(&self) -> Option<usize> {
        self.items.iter().position(|i| i.has_class("active"))
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

/// User menu: click toggles, click elsewhere closes.
#[derive(Debug, Clone)]
pub struct UserDropdown {
    container: Node,
    content: Node,
}

impl UserDropdown {
    /// Bind to the first `.user-dropdown` and its `.dropdown-content`.
    pub fn bind(page: &Page) -> Option<Self> {
        let container = page.by_class("user-dropdown").into_iter().next()?;
        let content = container.first_descendant(|n| n.has_class("dropdown-content"))?;
        Some(Self { container, content })
    }

    pub fn is_open(&self) -> bool {
        self.content.display().as_deref() == Some("block")
    }

    pub fn toggle(&self) {
        let next = if self.is_open() { "none" } else { "block" };
        self.content.set_display(next);
    }

    pub fn close(&self) {
        self.content.set_display("none");
    }

    /// Dispatch a document click on `target`. Clicks inside the dropdown
    /// toggle it; anything else closes it.
    pub fn handle_click(&self, target: &Node) {
        if self.container.contains(target) {
            self.toggle();
        } else {
            self.close();
        }
    }
}

/// Timers fading and removing the alerts that were present at bind time.
pub struct AlertDismissal {
    handles: Vec<JoinHandle<()>>,
}

impl AlertDismissal {
    /// Schedule every alert: fade at 5 s, remove 300 ms later.
    pub fn schedule(alerts: Vec<Node>) -> Self {
        let handles = alerts
            .into_iter()
            .map(|alert| {
                tokio::spawn(async move {
                    tokio::time::sleep(ALERT_FADE_DELAY).await;
                    alert.set_opacity(0.0);
                    tokio::time::sleep(ALERT_REMOVE_DELAY).await;
                    alert.remove();
                    debug!("Alert dismissed");
                })
            })
            .collect();
        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait until every scheduled alert has been removed.
    /// Returns how many dismissal tasks failed (panicked or were aborted).
    pub async fn wait(self) -> usize {
        let mut failed = 0;
        for result in join_all(self.handles).await {
            if let Err(e) = result {
                warn!(error = %e, "Alert dismissal task failed");
                failed += 1;
            }
        }
        failed
    }
}

/// Yes/no prompt shown before logging out.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// `#logout-btn`: navigates to its `href` only after confirmation.
#[derive(Debug, Clone)]
pub struct LogoutButton {
    button: Node,
}

impl LogoutButton {
    pub fn bind(page: &Page) -> Option<Self> {
        Some(Self {
            button: page.by_id("logout-btn")?,
        })
    }

    /// Returns the URL to navigate to, or `None` if the user declined.
    pub fn click(&self, prompt: &dyn Confirm) -> Option<String> {
        if prompt.confirm(LOGOUT_PROMPT) {
            self.button.attr("href")
        } else {
            None
        }
    }
}

/// Everything the dashboard page wires up on load.
pub struct DashboardUi {
    pub sidebar: Option<SidebarMenu>,
    pub dropdown: Option<UserDropdown>,
    pub logout: Option<LogoutButton>,
    alerts: Vec<Node>,
}

impl DashboardUi {
    pub fn bind(page: &Page) -> Self {
        Self {
            sidebar: SidebarMenu::bind(page),
            dropdown: UserDropdown::bind(page),
            logout: LogoutButton::bind(page),
            alerts: page.by_class("alert"),
        }
    }

    /// Alerts captured at bind time.
    pub fn alerts(&self) -> &[Node] {
        &self.alerts
    }

    /// Start the dismissal timers. Must be called inside a tokio runtime.
    pub fn start_alert_dismissal(&self) -> AlertDismissal {
        AlertDismissal::schedule(self.alerts.clone())
    }

    /// Route a document click to the dropdown.
    pub fn document_click(&self, target: &Node) {
        if let Some(dropdown) = &self.dropdown {
            dropdown.handle_click(target);
        }
    }
}
