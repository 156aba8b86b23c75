// Platform picker — the row of platform icons above the scan form.

use tracing::debug;

use super::element::Node;
use super::page::Page;
use crate::format::url_placeholder;
use crate::models::Platform;

/// Single-selection over `.platform-icon[data-platform]` nodes.
#[derive(Debug, Clone)]
pub struct PlatformPicker {
    icons: Vec<Node>,
    platform_input: Node,
    url_input: Option<Node>,
}

impl PlatformPicker {
    /// Needs at least one icon and the hidden `#platform` input.
    pub fn bind(page: &Page) -> Option<Self> {
        let icons: Vec<Node> = page
            .by_class("platform-icon")
            .into_iter()
            .filter(|n| n.attr("data-platform").is_some())
            .collect();
        if icons.is_empty() {
            return None;
        }
        Some(Self {
            icons,
            platform_input: page.by_id("platform")?,
            url_input: page.by_id("profile-url"),
        })
    }

    pub fn icons(&self) -> &[Node] {
        &self.icons
    }

    /// Click on the icon at `index`. Returns the selected platform.
    pub fn select(&self, index: usize) -> Option<Platform> {
        let icon = self.icons.get(index)?;
        for other in &self.icons {
            other.remove_class("active");
        }
        icon.add_class("active");

        let raw = icon.attr("data-platform").unwrap_or_default();
        self.platform_input.set_value(&raw);

        if let (Some(input), Some(placeholder)) = (&self.url_input, url_placeholder(&raw)) {
            input.set_placeholder(placeholder);
        }

        debug!(platform = %raw, "Platform selected");
        Some(Platform::parse(&raw))
    }

    /// The currently active platform, if any icon is marked active.
    pub fn selected(&self) -> Option<Platform> {
        self.icons
            .iter()
            .find(|i| i.has_class("active"))
            .and_then(|i| i.attr("data-platform"))
            .map(|raw| Platform::parse(&raw))
    }
}
